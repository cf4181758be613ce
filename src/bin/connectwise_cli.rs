//! ConnectWise client CLI: configuration checks and host resolution.
//!
//! Usage:
//!   connectwise-cli check <config>           Validate a configuration file
//!   connectwise-cli host <config> [path]     Print the resolved host URL
//!   connectwise-cli env                      Validate CONNECTWISE_* variables

use anyhow::{bail, Context};
use connectwise_client::{Client, ClientConfig};

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "check" => cmd_check(&args[2..]),
        "host" => cmd_host(&args[2..]),
        "env" => cmd_env(),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"connectwise-cli: ConnectWise client configuration tool

USAGE:
    connectwise-cli <COMMAND> [OPTIONS]

COMMANDS:
    check <config>              Validate a .json/.yaml configuration file
    host <config> [path]        Print the host URL, optionally with a path
    env                         Validate configuration from the environment
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    CONNECTWISE_COMPANY         Company identifier (used by `env`)
    CONNECTWISE_HOST            Absolute host URL (used by `env`)
    CONNECTWISE_USERNAME        Integrator login (used by `env`)
    CONNECTWISE_PASSWORD        Integrator password (used by `env`)
    RUST_LOG                    Log filter"#
    );
}

fn cmd_version() {
    println!("connectwise-cli {}", env!("CARGO_PKG_VERSION"));
}

fn load(args: &[String]) -> anyhow::Result<ClientConfig> {
    let Some(path) = args.first() else {
        bail!("missing <config> argument");
    };
    ClientConfig::from_path(path).with_context(|| format!("loading {path}"))
}

fn cmd_check(args: &[String]) -> anyhow::Result<()> {
    let config = load(args)?;
    report(&config);
    Ok(())
}

fn cmd_host(args: &[String]) -> anyhow::Result<()> {
    let client = Client::new(load(args)?);
    match args.get(1) {
        Some(path) => println!("{}", client.host_with(path)),
        None => println!("{}", client.host()),
    }
    Ok(())
}

fn cmd_env() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("reading CONNECTWISE_* environment")?;
    report(&config);
    Ok(())
}

fn report(config: &ClientConfig) {
    println!("Configuration OK");
    println!("  company:  {}", config.company());
    println!("  host:     {}", config.host());
    println!("  username: {}", config.username());
    if config.soap_options().is_empty() {
        println!("  soap_options: (none)");
    } else {
        let keys: Vec<&str> = config.soap_options().keys().map(String::as_str).collect();
        println!("  soap_options: {}", keys.join(", "));
    }
}
