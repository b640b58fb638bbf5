//! Valet parking command line
//!
//! # Examples
//!
//! ```bash
//! # Park a small car
//! valet park --size small
//!
//! # Return it (prompts for the ticket id when --ticket is omitted)
//! valet return --size small --ticket 1d89ab4d-7bd8-4a76-8a7e-7a8e398260a0
//!
//! # List open tickets
//! valet tickets
//! ```

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use valet::error::Error;
use valet::manage::{manage_car, Action};
use valet::{parking_init, JsonFileTicketStore, ParkingConfig, Size, TicketStore};

/// Valet parking: park cars by size and redeem tickets
#[derive(Parser, Debug)]
#[command(name = "valet")]
#[command(version = valet::VERSION)]
#[command(about = "Valet parking slot allocator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "VALET_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Park a car
    Park {
        /// Car size (small, medium, large)
        #[arg(short, long)]
        size: Size,
    },

    /// Return a car
    Return {
        /// Size of the slot printed on the ticket
        #[arg(short, long)]
        size: Size,

        /// Ticket id; read from stdin when omitted
        #[arg(short, long)]
        ticket: Option<String>,
    },

    /// List open tickets
    Tickets,

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ParkingConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = match setup_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(Error::Configuration(_)) => error!("Parking initialization error: {}", e),
                Some(Error::Sizing { .. }) => error!("Car management error: {}", e),
                _ => error!("{:#}", e),
            }
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Setup logging to stderr and to the parking log file
fn setup_logging(
    cli: &Cli,
    config: &ParkingConfig,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(&config.log.dir)?;

    let file_appender = RollingFileAppender::new(Rotation::NEVER, &config.log.dir, &config.log.file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    let log_level = level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(!cli.no_color)
                .with_target(false),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(guard)
}

fn run(command: Commands, config: &ParkingConfig) -> anyhow::Result<()> {
    match command {
        Commands::Park { size } => {
            let mut parking = build_valet(config)?;
            let outcome = manage_car(parking.as_mut(), Action::Park, size, None)?;
            println!("{}", outcome);
            Ok(())
        }
        Commands::Return { size, ticket } => {
            let mut parking = build_valet(config)?;
            let ticket = match ticket {
                Some(ticket) => ticket,
                None => prompt("Please, enter your ticket id: ")?,
            };
            let outcome = manage_car(parking.as_mut(), Action::Return, size, Some(&ticket))?;
            println!("{}", outcome);
            Ok(())
        }
        Commands::Tickets => {
            let store = JsonFileTicketStore::open(&config.tickets_path)?;
            let records = store.records()?;
            if records.is_empty() {
                println!("No open tickets.");
            } else {
                println!("Open tickets ({})", records.len());
                println!("───────────────────────────────");
                for record in records {
                    println!("  {}  {:<6}  {}", record.date, record.slot_size, record.ticket_id);
                }
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn build_valet(config: &ParkingConfig) -> anyhow::Result<Box<dyn valet::Valet>> {
    let slots = config.slot_pool()?;
    let store = JsonFileTicketStore::open(&config.tickets_path)?;
    info!(
        class = %config.parking_class,
        tickets = ?config.tickets_path,
        "Parking initialized"
    );
    Ok(parking_init(slots, config.parking_class, Box::new(store)))
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}
