use libfelica::protocol::checksum;
use libfelica::protocol::commands::{RawRequest, build_raw};
use libfelica::protocol::{Command, FelicaFlags};
use libfelica::Error;

fn transmit(cmd: &str) -> libfelica::protocol::CommandFrame {
    match build_raw(cmd).unwrap() {
        RawRequest::Transmit(frame) => frame,
        RawRequest::Usage => panic!("unexpected usage for {:?}", cmd),
    }
}

#[test]
fn checksum_appended_high_byte_first() {
    let frame = transmit("-c 0A 0B 0C");
    let (hi, lo) = checksum::compute(&[0x0a, 0x0b, 0x0c]);
    assert_eq!(frame.payload(), &[0x0a, 0x0b, 0x0c, hi, lo]);

    let flags = frame.wire_flags();
    assert!(flags.contains(FelicaFlags::RAW));
    assert!(!flags.contains(FelicaFlags::CONNECT));
    assert!(!flags.contains(FelicaFlags::APPEND_CRC));
}

#[test]
fn active_without_select() {
    let frame = transmit("-a -c 01");
    let (hi, lo) = checksum::compute(&[0x01]);
    assert_eq!(frame.payload(), &[0x01, hi, lo]);
    let flags = frame.wire_flags();
    assert!(flags.contains(FelicaFlags::CONNECT | FelicaFlags::NO_SELECT | FelicaFlags::RAW));
}

#[test]
fn packed_arguments_on_the_wire() {
    let frame = transmit("-p -s -b7 06 00 ff ff 01 00");
    let packet = Command::Raw(frame).encode();
    assert_eq!(
        packet.flags,
        u64::from((FelicaFlags::CONNECT | FelicaFlags::NO_DISCONNECT | FelicaFlags::RAW).bits())
    );
    assert_eq!(packet.args, (7 << 16) | 6);
}

#[test]
fn rejected_inputs() {
    assert!(matches!(build_raw("x"), Err(Error::MalformedInput(_))));
    assert!(matches!(build_raw("-z 01"), Err(Error::UnknownOption('z'))));
    assert!(matches!(build_raw("0G 01"), Err(Error::MalformedInput(_))));
    assert!(matches!(build_raw("-h"), Ok(RawRequest::Usage)));
}

#[test]
fn oversized_input_truncates_without_checksum() {
    let cmd = format!("-c {}", "aa ".repeat(600));
    let frame = transmit(&cmd);
    assert_eq!(frame.payload().len(), 512);
    assert!(!frame.checksum_appended());
}
