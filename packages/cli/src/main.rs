#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal driver for the location typeahead and financial calculators.
//!
//! `livability search <text>` feeds the text through the typeahead
//! controller keystroke by keystroke and prints the listing;
//! `--select <index>` then loads and prints that location's detail.
//! `livability calc <type> field=value ...` submits a calculator form and
//! prints the summary and chart datasets. With no subcommand, an
//! interactive menu is shown.
//!
//! Logging goes through `pretty_env_logger`, filtered by `RUST_LOG`.

mod calc;
mod interactive;
mod search;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use livability_calculator_models::FormFields;
use livability_config::ClientConfig;

#[derive(Parser)]
#[command(name = "livability", about = "Location livability search and financial calculators")]
struct Cli {
    /// Alternate TOML config file (defaults are built in)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search locations by name
    Search {
        /// Text to type into the search box
        text: String,

        /// Zero-based index of the result to show details for
        #[arg(long)]
        select: Option<usize>,
    },
    /// Run a financial calculator
    Calc {
        /// Calculator type (emi, affordability, dti, gratuity, retirement)
        calculator: String,

        /// Form fields as `name=value`
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {arg:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {arg:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn load_config(path: Option<&PathBuf>) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            ClientConfig::load_from_str(&std::fs::read_to_string(path)?)?
        }
        None => ClientConfig::load()?,
    };
    log::debug!(
        "locator={} calculator={}",
        config.locator.base_url,
        config.calculator.base_url
    );
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Command::Search { text, select }) => search::run(&config, &text, select).await,
        Some(Command::Calc { calculator, fields }) => {
            let fields: FormFields = fields.into_iter().collect();
            calc::run(&config, &calculator, fields).await
        }
        None => interactive::run(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_fields() {
        assert_eq!(
            parse_field("rate=8.5").unwrap(),
            ("rate".to_string(), "8.5".to_string())
        );
        assert_eq!(
            parse_field(" tenure = 240 ").unwrap(),
            ("tenure".to_string(), "240".to_string())
        );
        assert_eq!(
            parse_field("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(parse_field("rate").is_err());
        assert!(parse_field("=8.5").is_err());
    }

    #[test]
    fn cli_parses_calc_fields() {
        let cli = Cli::try_parse_from([
            "livability",
            "calc",
            "emi",
            "loan_amount=100000",
            "rate=12",
            "tenure=3",
        ])
        .unwrap();
        let Some(Command::Calc { calculator, fields }) = cli.command else {
            panic!("expected calc subcommand");
        };
        assert_eq!(calculator, "emi");
        assert_eq!(fields.len(), 3);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "livability",
            "search",
            "saket",
            "--select",
            "0",
            "--config",
            "alt.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(
            cli.command,
            Some(Command::Search { select: Some(0), .. })
        ));
    }
}
