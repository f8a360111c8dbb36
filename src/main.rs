use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Parser, Subcommand};
use tracing::error;

use gesturelink::config::NodeConfig;
use gesturelink::node::{BridgeNode, CaptureNode, ConsolePad, NodeError, SenderNode};
use gesturelink::radio::UdpChannel;
use gesturelink::sensor::SyntheticAccelerometer;
use gesturelink::ui::{MatrixPanel, print_banner};
use gesturelink::utils::logging::init_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; missing fields fall back to defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Radio channel id override (both nodes must match)
    #[arg(long)]
    channel: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sensor node: sample bursts and stream them over the radio
    Sender {
        /// Burst duration override in ms
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Receiver node: forward decoded telemetry to the host sink
    Bridge {
        /// Sink file ("-" or absent = stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Radio-less acquisition straight to per-burst CSV files
    Capture {
        /// Number of takes to record
        #[arg(short, long)]
        takes: Option<u32>,
        /// Directory for the file_<n>.csv artifacts
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    init_logging();
    print_banner();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match NodeConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                std::process::exit(1);
            }
        },
        None => NodeConfig::default(),
    };
    if let Some(channel) = cli.channel {
        config.sender.radio.channel = channel;
        config.bridge.radio.channel = channel;
    }

    if let Err(err) = run(cli, config) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: NodeConfig) -> Result<(), NodeError> {
    match cli.command {
        Commands::Sender { duration } => {
            if let Some(duration) = duration {
                config.sender.sampler.duration_ms = duration;
            }
            // Channel open failure is the only fatal error path.
            let channel = UdpChannel::open(&config.sender.radio)?;
            let pad = ConsolePad::new()?;
            let node = SenderNode::new(
                channel,
                SyntheticAccelerometer::new(),
                pad,
                MatrixPanel::new("sender"),
                config.sender,
            );
            node.run();
        }
        Commands::Bridge { output } => {
            let channel = UdpChannel::open(&config.bridge.radio)?;
            let sink: Box<dyn io::Write> = match output {
                Some(path) if path != "-" => Box::new(BufWriter::new(File::create(path)?)),
                _ => Box::new(io::stdout()),
            };

            let running = Arc::new(AtomicBool::new(true));
            let r = running.clone();
            ctrlc::set_handler(move || {
                r.store(false, Ordering::SeqCst);
            })?;

            let mut node = BridgeNode::new(
                channel,
                MatrixPanel::new("bridge"),
                sink,
                config.bridge,
                running,
            );
            node.run()?;
        }
        Commands::Capture { takes, out_dir } => {
            if let Some(takes) = takes {
                config.capture.takes = takes;
            }
            if let Some(out_dir) = out_dir {
                config.capture.out_dir = out_dir;
            }
            let pad = ConsolePad::new()?;
            let mut node = CaptureNode::new(
                SyntheticAccelerometer::new(),
                pad,
                MatrixPanel::new("capture"),
                config.capture,
            );
            node.run()?;
        }
    }
    Ok(())
}
