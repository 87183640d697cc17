use ethernity_core::error::Error;
use ethernity_core::types::{BlockWithTransactions, MevKind, RawBlock, RawTransaction};
use ethernity_explorer::*;

fn tx_hash(c: char) -> String {
    format!("0x{}", c.to_string().repeat(64))
}

fn found_tx(hash: &str) -> LookupOutcome {
    LookupOutcome::Transaction(Some(RawTransaction {
        hash: Some(hash.into()),
        label: Some("ARBITRAGE".into()),
        ..Default::default()
    }))
}

fn shown_hash(state: &SearchState) -> Option<&str> {
    match state {
        SearchState::ShowTx(tx) => tx.hash(),
        _ => None,
    }
}

#[test]
fn classify_input_rules() {
    assert_eq!(classify_input(""), SearchClassification::Empty);
    assert_eq!(classify_input("   "), SearchClassification::Empty);
    assert_eq!(classify_input(&tx_hash('a')), SearchClassification::TxHash);
    assert_eq!(classify_input("22289420"), SearchClassification::BlockNumber(22289420));
    assert_eq!(classify_input(" 42 "), SearchClassification::BlockNumber(42));
    assert_eq!(
        classify_input("0x5a52e96bacdabb82fd05763e25335261b270efcb"),
        SearchClassification::Address
    );
    assert_eq!(classify_input("uniswap"), SearchClassification::Unrecognized);
    // 66 caracteres sem o prefixo padrão
    assert_eq!(classify_input(&"a".repeat(66)), SearchClassification::Unrecognized);
    assert_eq!(classify_input("99999999999999999999999"), SearchClassification::Unrecognized);
}

#[test]
fn tx_hash_requires_ascii_hex_digits() {
    // 32 caracteres 'é' ocupam 64 bytes
    let multibyte = format!("0x{}", "é".repeat(32));
    assert_eq!(multibyte.len(), 66);
    assert_eq!(classify_input(&multibyte), SearchClassification::Unrecognized);

    let non_hex = format!("0x{}", "z".repeat(64));
    assert_eq!(classify_input(&non_hex), SearchClassification::Unrecognized);

    let mut resolver = SearchResolver::new();
    assert_eq!(resolver.search(&multibyte), None);
    assert_eq!(resolver.state(), &SearchState::NoMatch);
}

#[test]
fn tx_hash_dispatches_only_transaction_lookup() {
    let hash = tx_hash('a');
    let mut resolver = SearchResolver::new();
    assert_eq!(resolver.input(&hash), SearchClassification::TxHash);
    assert_eq!(resolver.state(), &SearchState::Typing);

    let request = resolver.dispatch().expect("consulta de transação");
    assert_eq!(request, LookupRequest::Transaction { generation: 1, hash: hash.clone() });
    assert_eq!(resolver.state(), &SearchState::ResolvingTx);
    // um único despacho por entrada
    assert_eq!(resolver.dispatch(), None);
}

#[test]
fn block_number_dispatches_block_lookup() {
    let mut resolver = SearchResolver::new();
    let request = resolver.search("22289420").unwrap();
    assert_eq!(request, LookupRequest::Block { generation: 1, number: 22289420 });
    assert_eq!(resolver.state(), &SearchState::ResolvingBlock);
}

#[test]
fn unrecognized_input_is_no_match_without_query() {
    let mut resolver = SearchResolver::new();
    assert_eq!(resolver.search("hello"), None);
    assert_eq!(resolver.state(), &SearchState::NoMatch);

    assert_eq!(resolver.search("0x5a52e96bacdabb82fd05763e25335261b270efcb"), None);
    assert_eq!(resolver.state(), &SearchState::NoMatch);
    assert_eq!(resolver.query().unwrap().classification, SearchClassification::Address);
}

#[test]
fn every_input_change_bumps_generation() {
    let mut resolver = SearchResolver::new();
    resolver.input("1");
    resolver.input("12");
    resolver.input("");
    assert_eq!(resolver.generation(), 3);
    assert_eq!(resolver.state(), &SearchState::Idle);
    assert!(resolver.query().is_none());
}

#[test]
fn stale_response_is_discarded() {
    let mut resolver = SearchResolver::new();
    let first = resolver.search(&tx_hash('a')).unwrap();
    let second = resolver.search(&tx_hash('b')).unwrap();

    let err = resolver
        .apply(LookupResponse { generation: first.generation(), outcome: found_tx(&tx_hash('a')) })
        .unwrap_err();
    assert_eq!(err, Error::StaleResult { response: 1, current: 2 });
    assert_eq!(resolver.state(), &SearchState::ResolvingTx);

    resolver
        .apply(LookupResponse { generation: second.generation(), outcome: found_tx(&tx_hash('b')) })
        .unwrap();
    assert_eq!(shown_hash(resolver.state()), Some(tx_hash('b').as_str()));
}

#[test]
fn latest_generation_wins_in_any_arrival_order() {
    let inputs = [tx_hash('a'), tx_hash('b'), tx_hash('c')];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let mut resolver = SearchResolver::new();
        let requests: Vec<LookupRequest> =
            inputs.iter().map(|input| resolver.search(input).unwrap()).collect();

        for &i in &order {
            let _ = resolver.apply(LookupResponse {
                generation: requests[i].generation(),
                outcome: found_tx(&inputs[i]),
            });
            // antes da resposta da última entrada o painel continua pendente
            if shown_hash(resolver.state()).is_none() {
                assert_eq!(resolver.state(), &SearchState::ResolvingTx);
            }
        }
        assert_eq!(shown_hash(resolver.state()), Some(inputs[2].as_str()), "ordem {:?}", order);
    }
}

#[test]
fn dismiss_clears_and_invalidates_pending() {
    let mut resolver = SearchResolver::new();
    let request = resolver.search("100").unwrap();
    resolver.dismiss();
    assert_eq!(resolver.state(), &SearchState::Idle);
    assert!(resolver.query().is_none());

    let outcome = LookupOutcome::Block { number: 100, payload: Some(BlockWithTransactions::default()) };
    assert!(resolver.apply(LookupResponse { generation: request.generation(), outcome }).is_err());
    assert_eq!(resolver.state(), &SearchState::Idle);
}

#[test]
fn block_panel_lists_transactions_of_block() {
    let mut resolver = SearchResolver::new();
    let request = resolver.search("22289420").unwrap();

    let tx = |hash: &str, block: &str, label: Option<&str>| RawTransaction {
        hash: Some(hash.into()),
        id: Some(format!("id-{}", hash)),
        block_number: Some(block.into()),
        label: label.map(String::from),
        ..Default::default()
    };
    let payload = BlockWithTransactions {
        block: RawBlock {
            number: Some("22289420".into()),
            hash: Some("0xblock".into()),
            miner: Some("0xminer".into()),
            ..Default::default()
        },
        transactions: vec![
            tx("0x01", "22289420", None),
            tx("0x02", "22289420", Some("SANDWICH")),
            tx("0x03", "22289419", None),
            tx("0x04", "22289420", Some("ARBITRAGE")),
        ],
    };

    resolver
        .apply(LookupResponse {
            generation: request.generation(),
            outcome: LookupOutcome::Block { number: 22289420, payload: Some(payload) },
        })
        .unwrap();

    match resolver.state() {
        SearchState::ShowBlock(panel) => {
            assert_eq!(panel.block.number, 22289420);
            assert_eq!(panel.block.miner, "0xminer");
            assert_eq!(panel.block.transaction_count, 3);
            assert!(panel.transactions.iter().all(|t| t.block_number() == 22289420));
            assert_eq!(panel.detail_keys(), vec!["0x01", "id-0x02", "0x04"]);
            assert_eq!(panel.transactions[1].kind(), MevKind::Sandwich);
            assert_eq!(panel.page(1, TRANSACTION_PAGE_SIZE).len(), 3);
        }
        other => panic!("esperado ShowBlock, obtido {:?}", other),
    }
}

#[test]
fn empty_timeout_and_failure_outcomes() {
    let mut resolver = SearchResolver::new();
    let request = resolver.search(&tx_hash('a')).unwrap();
    resolver
        .apply(LookupResponse { generation: request.generation(), outcome: LookupOutcome::Transaction(None) })
        .unwrap();
    assert_eq!(resolver.state(), &SearchState::NoMatch);

    let request = resolver.search("5").unwrap();
    resolver
        .apply(LookupResponse { generation: request.generation(), outcome: LookupOutcome::TimedOut })
        .unwrap();
    assert_eq!(resolver.state(), &SearchState::NoMatch);

    let request = resolver.search("6").unwrap();
    resolver
        .apply(LookupResponse {
            generation: request.generation(),
            outcome: LookupOutcome::Unavailable("503".into()),
        })
        .unwrap();
    assert_eq!(resolver.state(), &SearchState::Unavailable("503".into()));
}

#[test]
fn duplicate_response_for_same_generation_is_ignored() {
    let mut resolver = SearchResolver::new();
    let request = resolver.search(&tx_hash('a')).unwrap();
    let response = LookupResponse { generation: request.generation(), outcome: found_tx(&tx_hash('a')) };
    resolver.apply(response.clone()).unwrap();
    assert!(matches!(resolver.apply(response), Err(Error::StaleResult { .. })));
}
