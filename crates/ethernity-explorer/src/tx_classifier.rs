use ethernity_core::types::{
    parse_or_zero, text, LiquidationEvent, NormalizedTransaction, RawSandwichLeg, RawTrace,
    RawTransaction, Trace,
};
use tracing::debug;

const LABEL_ARBITRAGE: &str = "ARBITRAGE";
const LABEL_SANDWICH: &str = "SANDWICH";
const LABEL_LIQUIDATION: &str = "LIQUIDATION";

/// Valores monetários de uma transação MEV, já corrigidos
#[derive(Debug, Clone, PartialEq, Eq)]
struct Amounts {
    profit: String,
    cost: String,
    revenue: String,
}

impl Amounts {
    fn from_raw(raw: &RawTransaction) -> Self {
        let profit = raw.profit.as_deref().unwrap_or_default();
        let revenue = corrected_revenue(raw.revenue.as_deref().unwrap_or_default(), profit);
        Self {
            profit: or_zero(profit),
            cost: or_zero(raw.cost.as_deref().unwrap_or_default()),
            revenue: or_zero(&revenue),
        }
    }
}

/// Corrige a receita quando o serviço entrega `profit` concatenado em `revenue`.
///
/// O gatilho é continência de substring, não igualdade.
pub fn corrected_revenue(revenue: &str, profit: &str) -> String {
    if !profit.is_empty() && revenue.contains(profit) {
        profit.to_string()
    } else {
        revenue.to_string()
    }
}

fn or_zero(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn traces(raw: &[RawTrace]) -> Vec<Trace> {
    raw.iter().map(Trace::from).collect()
}

fn first_leg_traces(legs: &[RawSandwichLeg]) -> Vec<Trace> {
    legs.first().map(|leg| traces(&leg.traces)).unwrap_or_default()
}

/// Instante de uma transação MEV: `time`, com `timestamp` como alternativa
fn mev_time(raw: &RawTransaction) -> String {
    match raw.time.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => text(&raw.timestamp),
    }
}

/// Converte uma transação bruta em exatamente uma variante normalizada.
///
/// Função pura e total: campos ausentes ou malformados viram zero ou vazio.
pub fn classify(raw: &RawTransaction) -> NormalizedTransaction {
    let label = raw
        .label
        .as_deref()
        .map(|l| l.trim().to_uppercase())
        .unwrap_or_default();

    match label.as_str() {
        LABEL_ARBITRAGE => {
            let amounts = Amounts::from_raw(raw);
            NormalizedTransaction::Arbitrage {
                hash: text(&raw.hash),
                from: text(&raw.from),
                to: text(&raw.to),
                block_number: parse_or_zero(&raw.block_number),
                index: parse_or_zero(&raw.index),
                profit_wei: amounts.profit,
                cost_wei: amounts.cost,
                revenue_wei: amounts.revenue,
                time: mev_time(raw),
                traces: traces(&raw.traces),
            }
        }
        LABEL_SANDWICH => {
            let amounts = Amounts::from_raw(raw);
            NormalizedTransaction::Sandwich {
                id: text(&raw.id),
                block_number: parse_or_zero(&raw.block_number),
                profit_wei: amounts.profit,
                cost_wei: amounts.cost,
                revenue_wei: amounts.revenue,
                time: mev_time(raw),
                front_run_traces: first_leg_traces(&raw.front_run),
                victim_traces: first_leg_traces(&raw.victim),
                back_run_traces: first_leg_traces(&raw.back_run),
            }
        }
        LABEL_LIQUIDATION => {
            let amounts = Amounts::from_raw(raw);
            NormalizedTransaction::Liquidation {
                hash: text(&raw.hash),
                from: text(&raw.from),
                to: text(&raw.to),
                block_number: parse_or_zero(&raw.block_number),
                time: mev_time(raw),
                profit_wei: amounts.profit,
                cost_wei: amounts.cost,
                revenue_wei: amounts.revenue,
                liquidator: text(&raw.liquidator),
                // apenas o primeiro evento é exibido
                events: raw
                    .liquidation_event
                    .first()
                    .map(LiquidationEvent::from)
                    .into_iter()
                    .collect(),
            }
        }
        other => {
            if !other.is_empty() {
                debug!(label = other, "label desconhecido, classificando como normal");
            }
            NormalizedTransaction::Normal {
                hash: text(&raw.hash),
                from: text(&raw.from),
                to: text(&raw.to),
                block_number: parse_or_zero(&raw.block_number),
                index: parse_or_zero(&raw.index),
                gas_price_wei: text(&raw.gas_price),
                gas_used_units: text(&raw.gas_used),
                timestamp: text(&raw.timestamp),
                traces: traces(&raw.traces),
            }
        }
    }
}

/// Classifica uma lista preservando a ordem
pub fn classify_all(raw: &[RawTransaction]) -> Vec<NormalizedTransaction> {
    raw.iter().map(classify).collect()
}
