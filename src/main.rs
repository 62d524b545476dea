use anyhow::Context;
use clap::Parser;
use sbs_rs::{init_logger, log_debug, log_info, run_report, DeviceUri, ReportConfig, ReportOptions};
use std::io::Write;

const DEVICE_HELP: &str = "Device URIs:
  <scheme>://<device definition>

Examples:
  i2cdev:///dev/i2c-7
  i2c:///dev/i2c-7
  fx2lp://vid=0x04b4,pid=0x8613
  dump:///tmp/battery.json";

#[derive(Parser)]
#[command(name = "sbs-report")]
#[command(about = "Smart Battery Specification report tool")]
#[command(after_help = DEVICE_HELP)]
struct Cli {
    /// Use the given device for SMBus access: fx2lp, i2cdev, dump
    #[arg(short, long, default_value_t = DeviceUri::default())]
    device: DeviceUri,

    /// Do not enable SMBus Packet Error Checking
    #[arg(long)]
    no_pec: bool,

    /// Name the set bits of Battery Mode and Battery Status
    #[arg(long)]
    decode_flags: bool,
}

impl From<Cli> for ReportConfig {
    fn from(cli: Cli) -> Self {
        ReportConfig {
            device: cli.device,
            packet_error_checking: !cli.no_pec,
            options: ReportOptions {
                decode_flags: cli.decode_flags,
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = ReportConfig::from(Cli::parse());
    log_info(&format!("Opening {}", config.device));
    log_debug(&format!(
        "PEC: {}, decode flags: {}",
        config.packet_error_checking, config.options.decode_flags
    ));

    let (version, report) = run_report(&config)
        .await
        .with_context(|| format!("Error Opening SMBusb: {}", config.device))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Some(version) = version {
        writeln!(out, "SMBusb Firmware Version: {version}")?;
    }
    writeln!(out, "{}", "-".repeat(49))?;
    report.write_to(&mut out)?;

    Ok(())
}
