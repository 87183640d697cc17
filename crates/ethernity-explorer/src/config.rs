use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Linhas por página nas tabelas de traces
pub const TRACE_PAGE_SIZE: usize = 20;

/// Linhas por página nas tabelas de transações e de transações de bloco
pub const TRANSACTION_PAGE_SIZE: usize = 50;

/// Configuração do explorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Tamanho de página das tabelas de traces
    pub trace_page_size: usize,
    /// Tamanho de página das listas de transações
    pub transaction_page_size: usize,
    /// Espera máxima por uma busca em milissegundos
    pub lookup_timeout_ms: u64,
    /// Caracteres iniciais na forma curta de endereços
    pub short_head: usize,
    /// Caracteres finais na forma curta de endereços
    pub short_tail: usize,
}

impl ExplorerConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            trace_page_size: TRACE_PAGE_SIZE,
            transaction_page_size: TRANSACTION_PAGE_SIZE,
            lookup_timeout_ms: 10_000, // 10 segundos
            short_head: ethernity_core::address::DEFAULT_HEAD_LEN,
            short_tail: ethernity_core::address::DEFAULT_TAIL_LEN,
        }
    }
}
