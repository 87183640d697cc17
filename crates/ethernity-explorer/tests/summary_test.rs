use ethernity_core::types::{MevKind, RawTransaction};
use ethernity_explorer::{classify_all, MevSummary};

fn raw(label: Option<&str>, profit: Option<&str>, cost: Option<&str>) -> RawTransaction {
    RawTransaction {
        label: label.map(String::from),
        profit: profit.map(String::from),
        cost: cost.map(String::from),
        ..Default::default()
    }
}

#[test]
fn counts_each_kind_and_sums_amounts() {
    let txs = classify_all(&[
        raw(None, None, None),
        raw(Some("ARBITRAGE"), Some("1500000000000000000"), Some("100000000000000000")),
        raw(Some("SANDWICH"), Some("500000000000000000"), None),
        raw(Some("LIQUIDATION"), Some("-3"), Some("oops")),
        raw(Some("arbitrage"), Some("2000000000000000000"), None),
    ]);
    let summary = MevSummary::from_transactions(&txs);

    assert_eq!(summary.count(MevKind::Normal), 1);
    assert_eq!(summary.count(MevKind::Arbitrage), 2);
    assert_eq!(summary.count(MevKind::Sandwich), 1);
    assert_eq!(summary.count(MevKind::Liquidation), 1);
    assert_eq!(summary.mev_count(), 4);

    assert_eq!(summary.profit_eth(), "4.000000");
    assert_eq!(summary.cost_eth(), "0.100000");
}

#[test]
fn empty_summary() {
    let summary = MevSummary::from_transactions(&[]);
    assert_eq!(summary.mev_count(), 0);
    // abaixo do limiar de dígitos o valor não é convertido
    assert_eq!(summary.profit_eth(), "0");
}
