use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};
use logrx::config::Config;
use logrx::{parse_from_string, registry, LogRecord};

#[derive(Parser)]
#[command(name = "logrx", about = "logrx — log4j XML events and log receivers")]
struct Cli {
    /// Log at debug level to stderr (RUST_LOG overrides).
    #[arg(long, global = true)]
    debug: bool,

    /// Print records as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered receiver kinds.
    Receivers,
    /// Parse one log4j event passed as an argument.
    Parse {
        text: String,
        /// Logger name used when the event has none, or is malformed.
        #[arg(long, default_value = "Unknown")]
        default_logger: String,
    },
    /// Run a receiver and print every record it delivers.
    Receive {
        /// Receiver identifier. Defaults to `receiver.kind` in config.toml.
        #[arg(long)]
        receiver: Option<String>,
        /// Receiver setting as `key=value`. May be repeated.
        #[arg(long = "set", value_parser = parse_setting)]
        settings: Vec<(String, String)>,
    },
}

fn parse_setting(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    match cli.command {
        Command::Receivers => {
            for descriptor in registry::list() {
                println!("{:<12} {}", descriptor.identifier, descriptor.label());
            }
            Ok(())
        }
        Command::Parse { text, default_logger } => {
            let record = parse_from_string(&text, &default_logger);
            write_record(&mut std::io::stdout().lock(), &record, cli.json)
        }
        Command::Receive { receiver, settings } => receive(receiver, settings, cli.json),
    }
}

fn receive(kind: Option<String>, overrides: Vec<(String, String)>, json: bool) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not load config, using defaults");
        Config::defaults()
    });
    let kind = kind.unwrap_or_else(|| config.receiver.kind.clone());

    let mut receiver = registry::create(&kind).with_context(|| {
        let known: Vec<_> = registry::list().iter().map(|d| d.identifier).collect();
        format!("unknown receiver `{kind}` (known: {})", known.join(", "))
    })?;

    if kind == config.receiver.kind {
        for (key, value) in &config.receiver.settings {
            receiver.set(key, value)?;
        }
    }
    for (key, value) in &overrides {
        receiver.set(key, value)?;
    }

    let json = json || config.output.json;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let delivered = receiver.receive(&mut |record| write_record(&mut out, &record, json))?;
    tracing::info!(receiver = %kind, delivered, "receiver finished");
    Ok(())
}

fn write_record(out: &mut impl Write, record: &LogRecord, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{} {:<5} [{}] {} - {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level.to_string(),
            record.thread_name,
            record.logger_name,
            record.message,
        )?;
        for (key, value) in &record.properties {
            writeln!(out, "    {key} = {value}")?;
        }
    }
    Ok(())
}
