#[path = "../common/mod.rs"]
mod common;

use libfelica::device::Device;
use libfelica::protocol::{ChecksumStatus, FelicaFlags, Opcode, ReplyPhase, ResponseFrame};
use libfelica::test_support::{framed_reply, mock_device_with_replies};
use libfelica::transport::MockTransport;
use libfelica::Error;

#[test]
fn raw_command_sends_packed_frame() {
    let reply = framed_reply(&common::bytes("12 01 01 2e 4c d3 1a 2b 3c 4d"));
    let mut dev = mock_device_with_replies(vec![reply.clone()]);

    let exchange = dev.raw_command("-a -c 06 00 ff ff 01 00").unwrap().unwrap();
    assert!(exchange.select.is_none());
    let data = exchange.data.unwrap();
    assert_eq!(data.phase, ReplyPhase::Data);
    assert_eq!(data.checksum, ChecksumStatus::Valid);
    assert_eq!(data.payload, reply);

    let mock = dev.transport();
    let packet = mock.last_sent().unwrap();
    assert_eq!(packet.opcode, Opcode::FelicaCommand);
    assert_eq!(
        packet.flags,
        u64::from((FelicaFlags::CONNECT | FelicaFlags::NO_SELECT | FelicaFlags::RAW).bits())
    );
    assert_eq!(packet.args, 8);
    assert_eq!(packet.payload.len(), 8);
    assert_eq!(mock.buffer_clears, 1);
}

#[test]
fn corrupted_reply_is_reported_not_dropped() {
    let mut reply = framed_reply(&[0x07, 0x00]);
    let n = reply.len();
    reply[n - 1] ^= 0x55;
    let mut dev = mock_device_with_replies(vec![reply.clone()]);

    let data = dev.raw_command("01 02").unwrap().unwrap().data.unwrap();
    assert_eq!(data.checksum, ChecksumStatus::Mismatch);
    assert_eq!(data.payload, reply);
}

#[test]
fn select_phase_uses_second_length() {
    let mut mock = MockTransport::new();
    mock.push_ack(ResponseFrame::new(common::card_identity_bytes(), 0, 0));
    let mut dev = Device::new(mock);

    let exchange = dev.raw_command("-s").unwrap().unwrap();
    let select = exchange.select.unwrap();
    assert_eq!(select.checksum, ChecksumStatus::Empty);
    assert!(select.payload.is_empty());
    assert!(exchange.data.is_none());
}

#[test]
fn data_phase_timeout() {
    let mut mock = MockTransport::new();
    mock.push_ack(ResponseFrame::new(vec![0; 4], 0, 4));
    let mut dev = Device::new(mock);
    assert!(matches!(dev.raw_command("-s 01"), Err(Error::Timeout)));
    assert_eq!(dev.transport().waits.len(), 2);
}

#[test]
fn request_service_round_trip() {
    let mut body = vec![0x00, 0x03];
    body.extend_from_slice(&common::sample_idm_bytes());
    body.extend_from_slice(&[0x01, 0x00, 0x01]);
    body[0] = (body.len() + 2) as u8;
    let reply = framed_reply(&body);

    let mut mock = MockTransport::new();
    mock.push_ack(ResponseFrame::new(Vec::new(), 0, 0));
    mock.push_ack(ResponseFrame::new(reply.clone(), reply.len() as u32, 0));
    let mut dev = Device::new(mock);

    let res = dev
        .request_service(common::sample_idm(), &[0x000b])
        .unwrap();
    assert_eq!(res.key_versions, vec![0x0100]);
    assert!(res.exists(0));
    assert_eq!(dev.transport().sent[0].payload[1], 0x02);
}
