/*!
 * Ethernity Types
 *
 * Registros brutos recebidos do serviço de dados e o modelo normalizado
 * exposto para a camada de apresentação
 */

use crate::format::is_decimal_integer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desserializadores tolerantes para o formato não confiável do serviço
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Aceita string, número ou booleano e guarda o texto decimal
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    /// `null` vira lista vazia
    pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Trace bruto de transferência de ativo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrace {
    #[serde(default, deserialize_with = "lenient::string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_log_index: Option<String>,
}

/// Perna de um sandwich (front-run, vítima ou back-run)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSandwichLeg {
    #[serde(default, deserialize_with = "lenient::string")]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub traces: Vec<RawTrace>,
}

/// Evento de liquidação emitido pelo protocolo de lending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLiquidationEvent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub debt_asset: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub debt_to_cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub collateral_asset: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub liquidated_collateral_amount: Option<String>,
}

/// Transação bruta como entregue pelo serviço de dados.
///
/// Nenhum campo é garantido; `label` é o único discriminante.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default, deserialize_with = "lenient::string")]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub block_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub index: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gas_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gas_used: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub profit: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub revenue: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub traces: Vec<RawTrace>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub front_run: Vec<RawSandwichLeg>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub victim: Vec<RawSandwichLeg>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub back_run: Vec<RawSandwichLeg>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub liquidator: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub liquidation_event: Vec<RawLiquidationEvent>,
}

/// Cabeçalho bruto de bloco
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default, deserialize_with = "lenient::string")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub miner: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gas_used: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gas_limit: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub base_fee_per_gas: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub transaction_count: Option<String>,
}

/// Bloco acompanhado das transações que ele contém
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockWithTransactions {
    #[serde(default)]
    pub block: RawBlock,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub transactions: Vec<RawTransaction>,
}

/// Transferência de ativo normalizada
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub from: String,
    pub to: String,
    pub asset: String,
    /// Inteiro base 10 não negativo, de tamanho arbitrário
    pub value_wei: String,
    pub event_log_index: u32,
}

impl From<&RawTrace> for Trace {
    fn from(raw: &RawTrace) -> Self {
        let value_wei = match raw.value.as_deref().map(str::trim) {
            Some(v) if is_decimal_integer(v) => v.to_string(),
            _ => "0".to_string(),
        };
        Self {
            from: text(&raw.from),
            to: text(&raw.to),
            asset: text(&raw.asset),
            value_wei,
            event_log_index: parse_or_zero(&raw.event_log_index),
        }
    }
}

/// Evento de liquidação normalizado
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationEvent {
    pub user: String,
    pub debt_asset: String,
    pub debt_to_cover: String,
    pub collateral_asset: String,
    pub liquidated_collateral_amount: String,
}

impl From<&RawLiquidationEvent> for LiquidationEvent {
    fn from(raw: &RawLiquidationEvent) -> Self {
        Self {
            user: text(&raw.user),
            debt_asset: text(&raw.debt_asset),
            debt_to_cover: text(&raw.debt_to_cover),
            collateral_asset: text(&raw.collateral_asset),
            liquidated_collateral_amount: text(&raw.liquidated_collateral_amount),
        }
    }
}

/// Categoria MEV de uma transação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MevKind {
    Normal,
    Arbitrage,
    Sandwich,
    Liquidation,
}

impl fmt::Display for MevKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MevKind::Normal => write!(f, "normal"),
            MevKind::Arbitrage => write!(f, "arbitrage"),
            MevKind::Sandwich => write!(f, "sandwich"),
            MevKind::Liquidation => write!(f, "liquidation"),
        }
    }
}

/// Transação normalizada, imutável depois de construída
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedTransaction {
    Normal {
        hash: String,
        from: String,
        to: String,
        block_number: u64,
        index: u64,
        gas_price_wei: String,
        gas_used_units: String,
        timestamp: String,
        traces: Vec<Trace>,
    },
    Arbitrage {
        hash: String,
        from: String,
        to: String,
        block_number: u64,
        index: u64,
        profit_wei: String,
        cost_wei: String,
        revenue_wei: String,
        time: String,
        traces: Vec<Trace>,
    },
    Sandwich {
        id: String,
        block_number: u64,
        profit_wei: String,
        cost_wei: String,
        revenue_wei: String,
        time: String,
        front_run_traces: Vec<Trace>,
        victim_traces: Vec<Trace>,
        back_run_traces: Vec<Trace>,
    },
    Liquidation {
        hash: String,
        from: String,
        to: String,
        block_number: u64,
        time: String,
        profit_wei: String,
        cost_wei: String,
        revenue_wei: String,
        liquidator: String,
        events: Vec<LiquidationEvent>,
    },
}

impl NormalizedTransaction {
    pub fn kind(&self) -> MevKind {
        match self {
            Self::Normal { .. } => MevKind::Normal,
            Self::Arbitrage { .. } => MevKind::Arbitrage,
            Self::Sandwich { .. } => MevKind::Sandwich,
            Self::Liquidation { .. } => MevKind::Liquidation,
        }
    }

    pub fn block_number(&self) -> u64 {
        match self {
            Self::Normal { block_number, .. }
            | Self::Arbitrage { block_number, .. }
            | Self::Sandwich { block_number, .. }
            | Self::Liquidation { block_number, .. } => *block_number,
        }
    }

    /// Posição dentro do bloco; variantes sem índice retornam 0
    pub fn index(&self) -> u64 {
        match self {
            Self::Normal { index, .. } | Self::Arbitrage { index, .. } => *index,
            Self::Sandwich { .. } | Self::Liquidation { .. } => 0,
        }
    }

    /// Instante da transação no formato recebido (`timestamp` ou `time`)
    pub fn time(&self) -> &str {
        match self {
            Self::Normal { timestamp, .. } => timestamp,
            Self::Arbitrage { time, .. }
            | Self::Sandwich { time, .. }
            | Self::Liquidation { time, .. } => time,
        }
    }

    /// Hash da transação; sandwiches não possuem hash único
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Normal { hash, .. }
            | Self::Arbitrage { hash, .. }
            | Self::Liquidation { hash, .. } => Some(hash),
            Self::Sandwich { .. } => None,
        }
    }

    /// Chave usada para navegar até o detalhe da transação
    pub fn detail_key(&self) -> &str {
        match self {
            Self::Sandwich { id, .. } => id,
            other => other.hash().unwrap_or_default(),
        }
    }

    /// Lucro em wei, ausente para transações normais
    pub fn profit_wei(&self) -> Option<&str> {
        match self {
            Self::Normal { .. } => None,
            Self::Arbitrage { profit_wei, .. }
            | Self::Sandwich { profit_wei, .. }
            | Self::Liquidation { profit_wei, .. } => Some(profit_wei),
        }
    }

    pub fn cost_wei(&self) -> Option<&str> {
        match self {
            Self::Normal { .. } => None,
            Self::Arbitrage { cost_wei, .. }
            | Self::Sandwich { cost_wei, .. }
            | Self::Liquidation { cost_wei, .. } => Some(cost_wei),
        }
    }

    pub fn revenue_wei(&self) -> Option<&str> {
        match self {
            Self::Normal { .. } => None,
            Self::Arbitrage { revenue_wei, .. }
            | Self::Sandwich { revenue_wei, .. }
            | Self::Liquidation { revenue_wei, .. } => Some(revenue_wei),
        }
    }
}

/// Texto do campo ou string vazia
pub fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Interpreta um campo numérico, degradando para zero quando inválido
pub fn parse_or_zero<T>(value: &Option<String>) -> T
where
    T: std::str::FromStr + Default,
{
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or_default()
}
