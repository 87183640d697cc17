/*!
 * Ethernity Core
 * 
 * Modelo de dados, formatação de valores e porta de acesso ao serviço
 * de dados compartilhados pelo explorer Ethernity
 */

pub mod types;
pub mod traits;
pub mod format;
pub mod address;
pub mod error;

// Re-exportações públicas
pub use error::Error;
pub use types::*;
