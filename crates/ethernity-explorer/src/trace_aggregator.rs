use crate::config::ExplorerConfig;
use crate::list_sorter::{page, page_count, SortDirection};
use ethernity_core::address::{self, display_short, is_null_address};
use ethernity_core::format::{wei_to_eth, PLACEHOLDER};
use ethernity_core::types::Trace;
use serde::{Deserialize, Serialize};

/// Rótulo exibido no lugar do endereço nulo
pub const NULL_ADDRESS_LABEL: &str = "Null Address";

/// Lado da transferência
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferSide {
    Debit,
    Credit,
}

impl TransferSide {
    fn sign(self) -> char {
        match self {
            TransferSide::Debit => '-',
            TransferSide::Credit => '+',
        }
    }
}

/// Como a conta de uma linha deve ser exibida
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountDisplay {
    /// Link para o endereço, com a forma curta
    Link { address: String, short: String },
    /// Endereço nulo, sem link
    NullPlaceholder,
}

impl AccountDisplay {
    fn for_account(account: &str, head: usize, tail: usize) -> Self {
        if is_null_address(account) {
            AccountDisplay::NullPlaceholder
        } else {
            AccountDisplay::Link {
                address: account.to_string(),
                short: display_short(account, head, tail),
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AccountDisplay::Link { short, .. } => short,
            AccountDisplay::NullPlaceholder => NULL_ADDRESS_LABEL,
        }
    }
}

/// Linha de transferência derivada de um trace; nunca persistida
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRow {
    pub side: TransferSide,
    pub account: String,
    pub account_display: AccountDisplay,
    pub asset: String,
    pub value_wei: String,
    /// Valor em ETH com sinal, ou [`PLACEHOLDER`]
    pub amount: String,
    pub event_log_index: u32,
}

impl TransferRow {
    fn new(trace: &Trace, side: TransferSide, head: usize, tail: usize) -> Self {
        let account = match side {
            TransferSide::Debit => &trace.from,
            TransferSide::Credit => &trace.to,
        };
        let amount = match wei_to_eth(&trace.value_wei) {
            Ok(eth) => format!("{}{}", side.sign(), eth),
            Err(_) => PLACEHOLDER.to_string(),
        };
        Self {
            side,
            account: account.clone(),
            account_display: AccountDisplay::for_account(account, head, tail),
            asset: trace.asset.clone(),
            value_wei: trace.value_wei.clone(),
            amount,
            event_log_index: trace.event_log_index,
        }
    }
}

/// Expande traces com uma janela de abreviação explícita
pub fn expand_with(traces: &[Trace], head: usize, tail: usize) -> Vec<TransferRow> {
    let mut rows = Vec::with_capacity(traces.len() * 2);
    for trace in traces {
        rows.push(TransferRow::new(trace, TransferSide::Debit, head, tail));
        rows.push(TransferRow::new(trace, TransferSide::Credit, head, tail));
    }
    rows
}

/// Gera duas linhas por trace, débito seguido do crédito, na ordem de entrada
pub fn expand(traces: &[Trace]) -> Vec<TransferRow> {
    expand_with(traces, address::DEFAULT_HEAD_LEN, address::DEFAULT_TAIL_LEN)
}

/// Ordenação estável por `event_log_index`.
///
/// As duas linhas de um par têm a mesma chave e permanecem adjacentes.
pub fn sort_by_event_log_index(rows: &[TransferRow], direction: SortDirection) -> Vec<TransferRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| direction.apply(a.event_log_index.cmp(&b.event_log_index)));
    sorted
}

/// Tabela de traces: expansão, ordenação e paginação
#[derive(Debug, Clone)]
pub struct TraceTable {
    rows: Vec<TransferRow>,
    direction: SortDirection,
    page_size: usize,
}

impl TraceTable {
    pub fn new(traces: &[Trace], config: &ExplorerConfig) -> Self {
        let rows = expand_with(traces, config.short_head, config.short_tail);
        Self {
            rows: sort_by_event_log_index(&rows, SortDirection::Ascending),
            direction: SortDirection::Ascending,
            page_size: config.trace_page_size,
        }
    }

    /// Reordena as linhas existentes
    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
        self.rows = sort_by_event_log_index(&self.rows, direction);
    }

    pub fn toggle_direction(&mut self) {
        self.set_direction(self.direction.flipped());
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn rows(&self) -> &[TransferRow] {
        &self.rows
    }

    pub fn page(&self, page_number: usize) -> &[TransferRow] {
        page(&self.rows, page_number, self.page_size)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.rows.len(), self.page_size)
    }
}
