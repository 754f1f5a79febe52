// libfelica/src/protocol/commands/sniff.rs

use crate::{Error, Result};

pub const USAGE: &str = "\
Usage: sniff [h] [s <samples>] [t <triggers>]
Gets data from the field and saves it into the reader's trace buffer.
      s       samples to skip (decimal)
      t       triggers to skip (decimal)
Example: sniff s 1000";

/// Skip counts handed to the reader before it starts recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SniffParams {
    pub samples_to_skip: u32,
    pub triggers_to_skip: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffRequest {
    Usage,
    Start(SniffParams),
}

fn decimal_arg(letter: char, arg: Option<&str>) -> Result<u32> {
    let arg = arg.ok_or_else(|| {
        Error::MalformedInput(format!("parameter '{}' needs a decimal value", letter))
    })?;
    arg.parse()
        .map_err(|e| Error::MalformedInput(format!("parameter '{}' value '{}': {}", letter, arg, e)))
}

/// Parse `s <n>` / `t <n>` pairs. An empty argument list shows usage.
pub fn parse_sniff(cmd: &str) -> Result<SniffRequest> {
    let mut params = cmd.split_whitespace();
    let mut out = SniffParams::default();
    let mut seen = false;

    while let Some(param) = params.next() {
        let Some(letter) = param.chars().next() else {
            continue;
        };
        match letter.to_ascii_lowercase() {
            'h' => return Ok(SniffRequest::Usage),
            's' => out.samples_to_skip = decimal_arg(letter, params.next())?,
            't' => out.triggers_to_skip = decimal_arg(letter, params.next())?,
            _ => return Err(Error::UnknownOption(letter)),
        }
        seen = true;
    }

    if !seen {
        return Ok(SniffRequest::Usage);
    }
    Ok(SniffRequest::Start(out))
}
