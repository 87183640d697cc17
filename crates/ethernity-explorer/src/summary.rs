use ethernity_core::format::{is_decimal_integer, wei_to_eth, PLACEHOLDER};
use ethernity_core::types::{MevKind, NormalizedTransaction};
use num_bigint::BigUint;

/// Totais de atividade MEV de uma lista de transações
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MevSummary {
    pub normal: usize,
    pub arbitrage: usize,
    pub sandwich: usize,
    pub liquidation: usize,
    pub total_profit_wei: BigUint,
    pub total_cost_wei: BigUint,
    pub total_revenue_wei: BigUint,
}

fn accumulate(total: &mut BigUint, value: Option<&str>) {
    // valores inválidos ou negativos não entram na soma
    if let Some(v) = value.filter(|v| is_decimal_integer(v)) {
        if let Some(parsed) = BigUint::parse_bytes(v.as_bytes(), 10) {
            *total += parsed;
        }
    }
}

impl MevSummary {
    pub fn from_transactions(transactions: &[NormalizedTransaction]) -> Self {
        let mut summary = Self::default();
        for tx in transactions {
            match tx.kind() {
                MevKind::Normal => summary.normal += 1,
                MevKind::Arbitrage => summary.arbitrage += 1,
                MevKind::Sandwich => summary.sandwich += 1,
                MevKind::Liquidation => summary.liquidation += 1,
            }
            accumulate(&mut summary.total_profit_wei, tx.profit_wei());
            accumulate(&mut summary.total_cost_wei, tx.cost_wei());
            accumulate(&mut summary.total_revenue_wei, tx.revenue_wei());
        }
        summary
    }

    /// Quantidade de transações MEV (todas exceto normais)
    pub fn mev_count(&self) -> usize {
        self.arbitrage + self.sandwich + self.liquidation
    }

    pub fn count(&self, kind: MevKind) -> usize {
        match kind {
            MevKind::Normal => self.normal,
            MevKind::Arbitrage => self.arbitrage,
            MevKind::Sandwich => self.sandwich,
            MevKind::Liquidation => self.liquidation,
        }
    }

    pub fn profit_eth(&self) -> String {
        display_total(&self.total_profit_wei)
    }

    pub fn cost_eth(&self) -> String {
        display_total(&self.total_cost_wei)
    }

    pub fn revenue_eth(&self) -> String {
        display_total(&self.total_revenue_wei)
    }
}

fn display_total(total: &BigUint) -> String {
    wei_to_eth(&total.to_string()).unwrap_or_else(|_| PLACEHOLDER.to_string())
}
