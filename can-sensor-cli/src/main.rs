//! CAN Sensor Listener CLI Application
//!
//! Attaches to a CAN interface and runs the listener for the process
//! lifetime. It uses the can-sensor-listener library and adds:
//! - Command-line flags and an optional TOML config file
//! - Logging setup
//! - SIGINT-driven graceful shutdown
//! - Periodic JSON sensor snapshot logging

use anyhow::Result;
use can_sensor_listener::{CanBusSource, Clock, FrameDispatcher, ListenerConfig, SensorStore, SystemClock};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod stats;

/// CAN Sensor Listener - Decode sensor frames from a CAN bus
#[derive(Parser, Debug)]
#[command(name = "can-sensor-cli")]
#[command(about = "Listen on a CAN bus and decode sensor frames", long_about = None)]
#[command(version)]
struct Args {
    /// CAN interface to attach to (e.g. can0, vcan0)
    #[arg(short, long, value_name = "IFACE")]
    interface: Option<String>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bus name token used in unrecognized-frame dump lines
    #[arg(long, value_name = "LABEL")]
    bus_label: Option<String>,

    /// Seconds between sensor snapshot log lines (0 disables)
    #[arg(long, value_name = "SECS")]
    stats_interval: Option<u64>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CAN Sensor Listener CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using listener library v{}", can_sensor_listener::VERSION);

    // Merge config file and flags (flags win, defaults last)
    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };
    let (listener_config, stats_interval) = merge_config(&args, &app_config);

    run_listener(&listener_config, stats_interval)
}

/// Resolve the effective listener config and stats interval
fn merge_config(args: &Args, app: &config::AppConfig) -> (ListenerConfig, u64) {
    let mut listener = ListenerConfig::new()
        .with_interface(
            args.interface
                .clone()
                .unwrap_or_else(|| app.bus.interface.clone()),
        )
        .with_read_timeout_ms(app.bus.read_timeout_ms);

    if let Some(label) = args.bus_label.clone().or_else(|| app.bus.label.clone()) {
        listener = listener.with_bus_label(label);
    }

    let stats_interval = args.stats_interval.unwrap_or(app.stats.interval_secs);
    (listener, stats_interval)
}

/// Open the bus and drain it until SIGINT or a fatal read error
fn run_listener(listener_config: &ListenerConfig, stats_interval: u64) -> Result<()> {
    let store = Arc::new(SensorStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let dispatcher = FrameDispatcher::new(Arc::clone(&store), clock, listener_config.label());

    // Fail-fast: no interface, no listener
    let source = CanBusSource::open(listener_config)?;

    let stop = source.stop_handle();
    ctrlc::set_handler(move || {
        log::info!("SIGINT received, shutting down");
        stop.stop();
    })?;

    let reporter = (stats_interval > 0).then(|| {
        stats::StatsReporter::spawn(Arc::clone(&store), Duration::from_secs(stats_interval))
    });

    let result = can_sensor_listener::run(source, &dispatcher);

    if let Some(reporter) = reporter {
        reporter.shutdown();
    }

    // Final readings on the way out
    log::info!(
        "Final sensor snapshot: {}",
        serde_json::to_string(&store.snapshot())?
    );

    result.map_err(Into::into)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("can-sensor-cli").chain(argv.iter().copied()))
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut app = config::AppConfig::default();
        app.bus.interface = "can1".to_string();
        app.bus.label = Some("cabin".to_string());
        app.stats.interval_secs = 30;

        let (listener, stats) = merge_config(
            &args(&["-i", "vcan0", "--bus-label", "test", "--stats-interval", "5"]),
            &app,
        );
        assert_eq!(listener.interface, "vcan0");
        assert_eq!(listener.label(), "test");
        assert_eq!(stats, 5);
    }

    #[test]
    fn test_config_file_fills_missing_flags() {
        let mut app = config::AppConfig::default();
        app.bus.interface = "can1".to_string();
        app.bus.read_timeout_ms = 100;

        let (listener, stats) = merge_config(&args(&[]), &app);
        assert_eq!(listener.interface, "can1");
        assert_eq!(listener.label(), "can1");
        assert_eq!(listener.read_timeout_ms, 100);
        assert_eq!(stats, 60);
    }
}
