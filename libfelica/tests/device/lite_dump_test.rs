#[path = "../common/mod.rs"]
mod common;

use libfelica::card::LiteBlock;
use libfelica::device::{Device, DeviceBuilder};
use libfelica::protocol::Opcode;
use libfelica::test_support::mock_with_lite_trace;
use libfelica::transport::MockTransport;
use libfelica::{Error, ExitStatus, SystemCode};

#[test]
fn dump_decodes_every_record() {
    let trace = common::lite_dump_trace();
    let mut dev = Device::new(mock_with_lite_trace(trace.clone(), 3));

    let dump = dev.lite_dump().unwrap();
    assert_eq!(dump.trace().as_bytes(), trace.as_slice());

    let blocks: Vec<_> = dump.blocks().into_iter().map(|(_, b)| b).collect();
    assert_eq!(blocks.len(), 8);
    assert!(matches!(blocks[0], LiteBlock::UserPad { index: 0, .. }));
    assert!(matches!(
        blocks[1],
        LiteBlock::Register { reg_a: 1, reg_b: 2, .. }
    ));
    assert_eq!(blocks[4], LiteBlock::SystemCode(SystemCode::LITE));
    match &blocks[5] {
        LiteBlock::MemoryConfig(mc) => {
            assert!(mc.writable);
            assert!(mc.ndef_compatible);
            assert_eq!(mc.rf_parameter, 7);
            assert_eq!(mc.pad_read_write, 0xffff);
        }
        other => panic!("expected memory config, got {:?}", other),
    }
    assert_eq!(blocks[6], LiteBlock::WriteCounter(0x010203));
    assert_eq!(blocks[7], LiteBlock::Integrity { all_blocks_match: true });

    let mock = dev.into_transport();
    assert_eq!(mock.sent.len(), 1);
    assert_eq!(mock.sent[0].opcode, Opcode::FelicaLiteDump);
    assert_eq!(mock.waits.len(), 4);
    assert_eq!(mock.field_drops, 0);
}

#[test]
fn cancellation_drops_field_without_decoding() {
    let mut mock = MockTransport::new();
    mock.cancel_after(0);
    mock.set_trace(common::lite_dump_trace());
    let mut dev = Device::new(mock);

    let res = dev.lite_dump();
    assert!(matches!(res, Err(Error::Aborted)));
    assert_eq!(ExitStatus::from(&res), ExitStatus::Aborted);

    let mock = dev.into_transport();
    assert_eq!(mock.field_drops, 1);
    assert_eq!(mock.waits.len(), 1);
}

#[test]
fn retry_ceiling_is_a_hard_timeout() {
    let mut dev = DeviceBuilder::new()
        .with_transport(MockTransport::new())
        .dump_retry_limit(10)
        .build()
        .unwrap();
    let res = dev.lite_dump();
    assert!(matches!(res, Err(Error::Timeout)));
    let mock = dev.into_transport();
    assert_eq!(mock.waits.len(), 11);
    assert!(mock.waits.iter().all(|&t| t == 2000));
    assert_eq!(mock.field_drops, 1);
}

#[test]
fn empty_trace_is_soft_failure() {
    let mut dev = Device::new(mock_with_lite_trace(Vec::new(), 0));
    let res = dev.lite_dump();
    assert!(matches!(res, Err(Error::NoData(_))));
    assert_eq!(ExitStatus::from(&res), ExitStatus::SoftFailure);
}

#[test]
fn trailing_partial_record_is_ignored() {
    let mut trace = common::lite_dump_trace();
    trace.extend_from_slice(&[0x01, 0x00, 0x00, 0xaa]);
    let mut dev = Device::new(mock_with_lite_trace(trace, 0));
    let dump = dev.lite_dump().unwrap();
    assert_eq!(dump.trace().record_count(), 8);
}
