#[path = "../common/mod.rs"]
mod common;

use libfelica::card::CardIdentity;

#[test]
fn parse_select_reply() {
    let card = CardIdentity::parse(&common::card_identity_bytes()).unwrap();
    assert_eq!(card.idm(), &common::sample_idm());
    assert_eq!(card.uid(), &[0x4c, 0xd3, 0x1a, 0x2b, 0x3c, 0x4d]);
    assert_eq!(card.ic_code(), &[0x00, 0xf1]);
    assert_eq!(card.max_response_time(), &[0x00, 0x00, 0x00, 0x01, 0x43, 0x00]);
    let text = card.to_string();
    assert!(text.starts_with("FeliCa tag info"));
    assert!(text.contains("IDm  01 2e 4c d3 1a 2b 3c 4d"));
}

#[test]
fn reject_short_reply() {
    assert!(CardIdentity::parse(&common::card_identity_bytes()[..20]).is_err());
}
