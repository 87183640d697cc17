use crate::list_sorter::{page, page_count, SortState};
use crate::tx_classifier::classify_all;
use ethernity_core::{
    address::parse_address,
    error::{Error, Result},
    traits::ExplorerDataProvider,
    types::NormalizedTransaction,
};
use tracing::debug;

/// Página de transações de um endereço (visão de portfólio)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressActivity {
    pub address: String,
    pub total: usize,
    pub page_number: usize,
    pub page_count: usize,
    pub transactions: Vec<NormalizedTransaction>,
}

/// Carrega, classifica, ordena e pagina as transações de um endereço
pub async fn load_address_activity<P>(
    provider: &P,
    address: &str,
    sort: SortState,
    page_number: usize,
    page_size: usize,
) -> Result<AddressActivity>
where
    P: ExplorerDataProvider + ?Sized,
{
    let address = address.trim();
    if parse_address(address).is_none() {
        return Err(Error::NoMatch(address.to_string()));
    }

    let raw = provider.get_transactions_by_address(address).await?;
    debug!(address, count = raw.len(), "transações do endereço carregadas");

    let sorted = sort.sort(&classify_all(&raw));
    Ok(AddressActivity {
        address: address.to_string(),
        total: sorted.len(),
        page_number,
        page_count: page_count(sorted.len(), page_size),
        transactions: page(&sorted, page_number, page_size).to_vec(),
    })
}
