/*!
 * Ethernity Explorer
 *
 * Motor de normalização e apresentação de transações MEV: classificação
 * de registros brutos, expansão de traces em linhas de transferência,
 * ordenação/paginação e resolução de buscas com descarte de respostas
 * obsoletas.
 */

mod config;
mod tx_classifier;
mod trace_aggregator;
mod list_sorter;
mod search_resolver;
mod address_activity;
mod summary;

pub use config::*;
pub use tx_classifier::*;
pub use trace_aggregator::*;
pub use list_sorter::*;
pub use search_resolver::*;
pub use address_activity::*;
pub use summary::*;
