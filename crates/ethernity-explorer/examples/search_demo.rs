//! Demonstra a busca do explorer sobre um serviço de dados em memória.
//!
//! Execute com `cargo run -p ethernity-explorer --example search_demo`.

use async_trait::async_trait;
use ethernity_core::{
    error::Result,
    format::{display_eth, display_relative_time},
    traits::ExplorerDataProvider,
    types::{BlockWithTransactions, NormalizedTransaction, RawBlock, RawTransaction},
};
use ethernity_explorer::{ExplorerConfig, MevSummary, SearchSession, SearchState, TraceTable};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

struct InMemoryProvider {
    transactions: Vec<RawTransaction>,
}

#[async_trait]
impl ExplorerDataProvider for InMemoryProvider {
    async fn get_transaction_by_hash(&self, hash: &str) -> Result<Option<RawTransaction>> {
        Ok(self.transactions.iter().find(|tx| tx.hash.as_deref() == Some(hash)).cloned())
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Option<BlockWithTransactions>> {
        let transactions: Vec<RawTransaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.block_number.as_deref() == Some(number.to_string().as_str()))
            .cloned()
            .collect();
        if transactions.is_empty() {
            return Ok(None);
        }
        Ok(Some(BlockWithTransactions {
            block: RawBlock { number: Some(number.to_string()), ..Default::default() },
            transactions,
        }))
    }

    async fn get_transactions_by_address(&self, address: &str) -> Result<Vec<RawTransaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|tx| tx.from.as_deref() == Some(address))
            .cloned()
            .collect())
    }
}

fn sample_transactions() -> anyhow::Result<Vec<RawTransaction>> {
    let data = json!([
        {
            "hash": format!("0x{}", "a".repeat(64)),
            "label": "ARBITRAGE",
            "from": "0x5a52e96bacdabb82fd05763e25335261b270efcb",
            "blockNumber": 22289420,
            "profit": "1250000000000000000",
            "revenue": "1300000000000000000",
            "time": "2025-04-17T10:00:00Z",
            "traces": [
                { "from": "0x5a52e96bacdabb82fd05763e25335261b270efcb",
                  "to": "0x0000000000000000000000000000000000000000",
                  "asset": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                  "value": "1300000000000000000", "eventLogIndex": 12 }
            ]
        },
        { "id": "sandwich-1", "label": "SANDWICH", "blockNumber": 22289420, "profit": "4000000000000000" },
        { "hash": "0x01", "blockNumber": 22289420, "gasPrice": "1200000000", "timestamp": "1744884000" }
    ]);
    Ok(serde_json::from_value(data)?)
}

fn describe(tx: &NormalizedTransaction) {
    info!(
        kind = %tx.kind(),
        key = tx.detail_key(),
        profit = %tx.profit_wei().map(display_eth).unwrap_or_default(),
        age = %display_relative_time(tx.time()),
        "transação"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ExplorerConfig::default();
    let provider = Arc::new(InMemoryProvider { transactions: sample_transactions()? });
    let mut session = SearchSession::new(provider, &config);

    for input in ["2", "22", "22289420"] {
        session.on_input(input);
    }
    if let SearchState::ShowBlock(panel) = session.settle().await {
        info!(block = panel.block.number, count = panel.transactions.len(), "bloco encontrado");
        panel.transactions.iter().for_each(describe);

        let summary = MevSummary::from_transactions(&panel.transactions);
        info!(mev = summary.mev_count(), profit = %summary.profit_eth(), "resumo MEV");
    }

    session.on_input(&format!("0x{}", "a".repeat(64)));
    if let SearchState::ShowTx(NormalizedTransaction::Arbitrage { traces, .. }) = session.settle().await {
        let table = TraceTable::new(traces, &config);
        for row in table.page(1) {
            info!(side = ?row.side, account = row.account_display.label(), amount = %row.amount, "transferência");
        }
    }

    Ok(())
}
