#[path = "../common/mod.rs"]
mod common;

use libfelica::device::Device;
use libfelica::protocol::commands::{SniffParams, SniffRequest, parse_sniff};
use libfelica::protocol::{Opcode, ResponseFrame};
use libfelica::transport::MockTransport;
use libfelica::{Error, ExitStatus};

#[test]
fn reader_selects_card() {
    let mut mock = MockTransport::new();
    mock.push_ack(ResponseFrame::new(common::card_identity_bytes(), 0, 0));
    let mut dev = Device::new(mock);

    let card = dev.reader("").unwrap();
    assert_eq!(card.idm(), &common::sample_idm());
    assert_eq!(card.pmm(), &common::sample_pmm());
    assert_eq!(card.manufacturer_code(), &[0x01, 0x2e]);
    assert_eq!(card.service_code().as_u16(), 0x000b);

    let sent = dev.transport().last_sent().unwrap();
    assert_eq!(sent.opcode, Opcode::FelicaCommand);
    assert_eq!(sent.flags, 1);
    assert!(sent.payload.is_empty());
}

#[test]
fn reader_status_codes() {
    for (status, expected) in [
        (1u32, ExitStatus::Timeout),
        (2, ExitStatus::SoftFailure),
        (3, ExitStatus::SoftFailure),
        (7, ExitStatus::SoftFailure),
    ] {
        let mut mock = MockTransport::new();
        mock.push_ack(ResponseFrame::new(Vec::new(), status, 0));
        let mut dev = Device::new(mock);
        let res = dev.reader("s");
        assert_eq!(ExitStatus::from(&res), expected, "status {}", status);
    }
}

#[test]
fn sniff_is_fire_and_forget() {
    let params = match parse_sniff("s 1000 t 2").unwrap() {
        SniffRequest::Start(p) => p,
        SniffRequest::Usage => panic!("expected sniff parameters"),
    };
    assert_eq!(
        params,
        SniffParams {
            samples_to_skip: 1000,
            triggers_to_skip: 2
        }
    );

    let mut dev = Device::new(MockTransport::new());
    dev.sniff(params).unwrap();
    let mock = dev.transport();
    assert_eq!(mock.sent[0].opcode, Opcode::FelicaSniff);
    assert_eq!((mock.sent[0].flags, mock.sent[0].args), (1000, 2));
    assert!(mock.waits.is_empty());
}

#[test]
fn sniff_rejects_unknown_letter() {
    assert!(matches!(parse_sniff("x 1"), Err(Error::UnknownOption('x'))));
}
