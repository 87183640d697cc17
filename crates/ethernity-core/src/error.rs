use thiserror::Error;

/// Erros comuns do explorer Ethernity
///
/// Nenhum destes erros é fatal: a camada de apresentação converte cada um
/// em um placeholder ou em um estado explícito do painel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Valor esperado como inteiro base 10 não é numérico
    #[error("Literal numérico inválido: {0:?}")]
    InvalidNumericLiteral(String),

    /// Endereço ou hash menor que a janela de abreviação
    #[error("Valor curto demais para abreviar ({len} <= {window})")]
    TooShort { len: usize, window: usize },

    /// Resposta pertencente a uma geração de busca antiga
    #[error("Resultado obsoleto: geração {response}, atual {current}")]
    StaleResult { response: u64, current: u64 },

    /// Nenhum dado encontrado para a busca
    #[error("Nenhum resultado: {0}")]
    NoMatch(String),

    /// Falha do serviço de dados externo
    #[error("Serviço de dados indisponível: {0}")]
    UpstreamUnavailable(String),

    /// Tempo limite de espera esgotado
    #[error("Timeout: {0}")]
    TimedOut(String),

    /// Data/hora em formato não reconhecido
    #[error("Timestamp inválido: {0:?}")]
    InvalidTimestamp(String),

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
