use libfelica::device::Device;
use libfelica::protocol::{Opcode, ResponseFrame};
use libfelica::transport::Transport;
use libfelica::{Error, ExitStatus, Result};

/// Transport whose link is gone: every send fails.
struct Unplugged {
    drops: usize,
}

impl Transport for Unplugged {
    fn send(&mut self, _: Opcode, _: u64, _: u64, _: &[u8]) -> Result<()> {
        Err(Error::Transport("reader disconnected".into()))
    }

    fn wait_for_ack(&mut self, _: u64) -> Result<Option<ResponseFrame>> {
        Ok(None)
    }

    fn fetch_buffer(&mut self, _: usize, _: usize, _: u64, _: &mut Vec<u8>) -> Result<()> {
        Err(Error::Timeout)
    }

    fn drop_field(&mut self) -> Result<()> {
        self.drops += 1;
        Ok(())
    }

    fn is_cancel_requested(&mut self) -> bool {
        false
    }
}

#[test]
fn send_failure_propagates() {
    let mut dev = Device::new(Unplugged { drops: 0 });
    let res = dev.lite_dump();
    assert!(matches!(res, Err(Error::Transport(_))));
    assert_eq!(ExitStatus::from(&res), ExitStatus::SoftFailure);
    assert!(matches!(dev.raw_command("-c 01"), Err(Error::Transport(_))));
    assert_eq!(dev.transport().drops, 0);
}
