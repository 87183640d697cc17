use ethernity_core::address::*;
use ethernity_core::error::Error;

const ADDR: &str = "0x5a52e96bacdabb82fd05763e25335261b270efcb";

#[test]
fn shorten_default_window() {
    assert_eq!(shorten_default(ADDR).unwrap(), "0x5a52...efcb");
    assert_eq!(shorten(ADDR, 4, 2).unwrap(), "0x5a...cb");
}

#[test]
fn shorten_too_short_falls_back() {
    assert_eq!(
        shorten("0x12345678", 6, 4),
        Err(Error::TooShort { len: 10, window: 10 })
    );
    assert_eq!(display_short("0x12345678", 6, 4), "0x12345678");
    assert_eq!(display_short(ADDR, 6, 4), "0x5a52...efcb");
}

#[test]
fn null_address_is_exact_match() {
    assert!(is_null_address(NULL_ADDRESS));
    assert!(!is_null_address("0x0"));
    assert!(!is_null_address(ADDR));
}

#[test]
fn parse_address_requires_full_length() {
    assert!(parse_address(ADDR).is_some());
    assert!(parse_address("0x5a52e96b").is_none());
    assert!(parse_address("5a52e96bacdabb82fd05763e25335261b270efcb").is_none());
}

#[test]
fn identicon_is_deterministic() {
    let first = identicon_color(NULL_ADDRESS);
    for _ in 0..10 {
        assert_eq!(identicon_color(NULL_ADDRESS), first);
    }
    assert_ne!(identicon_color(NULL_ADDRESS), identicon_color(ADDR));
}

#[test]
fn identicon_is_order_sensitive() {
    assert_ne!(identicon_color("ab"), identicon_color("ba"));
}

#[test]
fn identicon_matches_deployed_colors_after_overflow() {
    assert_eq!(identicon_color(NULL_ADDRESS), (130, 145, 160));
    assert_eq!(identicon_color(ADDR), (114, 33, 207));
}
