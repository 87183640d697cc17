/*!
 * Ethernity Traits
 * 
 * Porta de acesso ao serviço externo de dados de blockchain
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{BlockWithTransactions, RawTransaction};

/// Serviço de dados consultado pelo explorer.
///
/// Implementações devolvem `Ok(None)` quando o registro não existe e
/// `Error::UpstreamUnavailable` quando o serviço falha. O motor não faz
/// retentativas; essa política pertence à implementação.
#[async_trait]
pub trait ExplorerDataProvider: Send + Sync {
    /// Obtém uma transação pelo hash
    async fn get_transaction_by_hash(&self, hash: &str) -> Result<Option<RawTransaction>>;

    /// Obtém um bloco e suas transações pelo número
    async fn get_block_by_number(&self, number: u64) -> Result<Option<BlockWithTransactions>>;

    /// Obtém as transações associadas a um endereço
    async fn get_transactions_by_address(&self, address: &str) -> Result<Vec<RawTransaction>>;
}
