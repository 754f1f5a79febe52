use libfelica::protocol::{Opcode, ResponseFrame};
use libfelica::transport::Transport;
use libfelica::transport::mock::MockTransport;

#[test]
fn mock_transport_send_and_wait() {
    let mut m = MockTransport::new();
    m.push_ack(ResponseFrame::new(vec![0x01], 1, 0));
    m.send(Opcode::FelicaCommand, 0x09, 0x0002, &[0xaa, 0xbb])
        .unwrap();
    assert_eq!(m.sent.len(), 1);
    assert_eq!(m.sent[0].payload, vec![0xaa, 0xbb]);
    let r = m.wait_for_ack(1000).unwrap().unwrap();
    assert_eq!(r.data, vec![0x01]);
}

#[test]
fn boxed_mock_behaves_like_mock() {
    let mut boxed: Box<dyn Transport> = Box::new(MockTransport::new());
    boxed.clear_command_buffer().unwrap();
    boxed.drop_field().unwrap();
    assert!(!boxed.is_cancel_requested());
    assert!(boxed.wait_for_ack(10).unwrap().is_none());
}
