// libfelica/src/bin/felica.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use libfelica::card::LiteDump;
use libfelica::protocol::commands::{self, RawRequest, raw, service, sniff};
use libfelica::utils::{bytes_to_hex_spaced, parse_hex};
use libfelica::{Command, ExitStatus};
use log::{error, info};

#[derive(Parser)]
#[command(name = "felica")]
#[command(about = "Offline FeliCa frame builder and Lite dump decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a raw frame from `raw` options and hex bytes without sending it
    BuildRaw {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Decode a captured Lite dump trace
    DecodeLite {
        file: PathBuf,
        /// The file holds hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Print the usage text of a reader command
    Usage { command: String },
}

fn build_raw(args: &[String]) -> anyhow::Result<()> {
    let line = args.join(" ");
    match commands::build_raw(&line)? {
        RawRequest::Usage => println!("{}", raw::USAGE),
        RawRequest::Transmit(frame) => {
            let packet = Command::Raw(frame.clone()).encode();
            println!("payload : {}", bytes_to_hex_spaced(frame.payload()));
            println!("flags   : {:?} ({:#04x})", frame.wire_flags(), packet.flags);
            println!("args    : {:#010x}", packet.args);
            println!("checksum: {}", frame.checksum_appended());
            println!("reply   : {}", frame.expects_reply());
        }
    }
    Ok(())
}

fn decode_lite(file: &PathBuf, hex: bool) -> anyhow::Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let trace = if hex {
        let text = String::from_utf8(raw).context("hex trace is not UTF-8")?;
        parse_hex(&text).map_err(|e| anyhow::anyhow!("bad hex trace: {}", e))?
    } else {
        raw
    };
    let dump = LiteDump::new(trace);
    info!("{} records", dump.trace().record_count());
    println!("{}", dump);
    Ok(())
}

fn usage(command: &str) -> anyhow::Result<()> {
    let text = match command {
        "raw" => raw::USAGE,
        "litedump" => commands::DUMP_USAGE,
        "sniff" => sniff::USAGE,
        "reader" => commands::READER_USAGE,
        "rqservice" => service::USAGE,
        other => bail!("no such command '{}'", other),
    };
    println!("{}", text);
    Ok(())
}

fn status_of(err: &anyhow::Error) -> ExitStatus {
    match err.downcast_ref::<libfelica::Error>() {
        Some(e) => e.exit_status(),
        None => ExitStatus::SoftFailure,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let res = match &cli.command {
        Commands::BuildRaw { args } => build_raw(args),
        Commands::DecodeLite { file, hex } => decode_lite(file, *hex),
        Commands::Usage { command } => usage(command),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            if matches!(cli.command, Commands::BuildRaw { .. }) {
                eprintln!("{}", raw::USAGE);
            }
            ExitCode::from(status_of(&e) as u8)
        }
    }
}
