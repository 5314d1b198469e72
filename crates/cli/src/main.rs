//! Peripheral verification CLI.
//!
//! This binary runs the verification scenarios against the reference
//! testbench. It provides:
//! 1. **UART:** TX/RX framing, flow control, pin routing and the divider sweep.
//! 2. **Shader:** Operand pairs through the selected shader revision.
//! 3. **Counter:** The minimal increment-only revision.
//!
//! Logging goes through `tracing`; set `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use busbench_core::config::Config;
use busbench_core::scenario::uart::SWEEP_BAUDS;
use busbench_core::scenario::{self, ScenarioReport, TestVectors};
use busbench_core::shader::{PeripheralProfile, ShaderDriver};
use busbench_core::{BusPort, Result, Testbench};

#[derive(Parser, Debug)]
#[command(
    name = "busbench",
    author,
    version,
    about = "Bit-accurate peripheral bus verification",
    long_about = "Run UART and shader-processor scenarios against the reference testbench.\n\nExamples:\n  busbench uart\n  busbench uart --sweep --baud 57600\n  busbench shader --profile combinational --vectors test_cases.json\n  busbench --config run.json counter"
)]
struct Cli {
    /// JSON configuration file; every field is optional.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print bus statistics after the run.
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// UART transmit, receive and flow-control checks.
    Uart {
        /// Override the configured baud rate.
        #[arg(long)]
        baud: Option<u32>,

        /// Also sweep the divider over 9600, 1000000 and 57600 baud.
        #[arg(long)]
        sweep: bool,

        /// Payload bytes (hex, comma separated).
        #[arg(long, value_delimiter = ',', value_parser = parse_byte, default_value = "a5,3c,00,ff,54")]
        bytes: Vec<u8>,
    },

    /// Shader arithmetic against host single precision.
    Shader {
        /// Override the configured peripheral revision.
        #[arg(long, value_enum)]
        profile: Option<ProfileKind>,

        /// Test vector file (`{"pairs": [[a, b], ...], "epsilon": e}`).
        #[arg(long)]
        vectors: Option<PathBuf>,
    },

    /// Increment checks on the minimal revision.
    Counter {
        /// Values to increment.
        #[arg(long, value_delimiter = ',', default_value = "0,1,41,4294967294")]
        values: Vec<u32>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileKind {
    Combinational,
    Programmable,
    Minimal,
}

impl From<ProfileKind> for PeripheralProfile {
    fn from(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Combinational => Self::combinational(),
            ProfileKind::Programmable => Self::programmable(),
            ProfileKind::Minimal => Self::minimal(),
        }
    }
}

fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let digits = s.trim().trim_start_matches("0x");
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid byte {s:?}: {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(reports) => {
            for report in &reports {
                print!("{report}");
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("FAILED: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<ScenarioReport>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    let (reports, tb) = match &cli.command {
        Commands::Uart { baud, sweep, bytes } => {
            if let Some(baud) = baud {
                config.uart.baud = *baud;
            }
            cmd_uart(&config, *sweep, bytes)?
        }
        Commands::Shader { profile, vectors } => {
            if let Some(kind) = profile {
                config.shader.profile = (*kind).into();
            }
            let vectors = match vectors {
                Some(path) => TestVectors::load(path)?,
                None => TestVectors::builtin(),
            };
            cmd_shader(&config, &vectors)?
        }
        Commands::Counter { values } => {
            config.shader.profile = PeripheralProfile::minimal();
            cmd_counter(&config, values)?
        }
    };

    if cli.stats {
        println!("{}", tb.stats());
    }
    Ok(reports)
}

fn cmd_uart(config: &Config, sweep: bool, bytes: &[u8]) -> Result<(Vec<ScenarioReport>, Testbench)> {
    let mut tb = Testbench::uart(&config.bench)?;
    let mut reports = vec![scenario::run_basic(&mut tb, &config.uart, bytes)?];
    if sweep {
        reports.push(scenario::run_divider_sweep(
            &mut tb,
            &config.uart,
            &SWEEP_BAUDS,
            bytes,
        )?);
    }
    Ok((reports, tb))
}

fn cmd_shader(config: &Config, vectors: &TestVectors) -> Result<(Vec<ScenarioReport>, Testbench)> {
    let mut tb = Testbench::shader(&config.bench, &config.shader)?;
    let report = scenario::run_arithmetic(&mut tb, config.shader.profile, vectors, config.shader.poll)?;
    Ok((vec![report], tb))
}

fn cmd_counter(config: &Config, values: &[u32]) -> Result<(Vec<ScenarioReport>, Testbench)> {
    let mut tb = Testbench::shader(&config.bench, &config.shader)?;
    tb.reset(0)?;
    let mut driver = ShaderDriver::new(&mut tb, config.shader.profile);
    let report = scenario::run_counter(&mut driver, values)?;
    Ok((vec![report], tb))
}
