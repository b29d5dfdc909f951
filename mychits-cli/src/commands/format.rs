//! Format command - render amounts and dates the way the app does

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use mychits_core::format::{format_iso_date, CurrencyFormat};

use super::get_mychits_dir;
use mychits_core::config::Config;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DateStyle {
    /// 2024-03-05 (UTC)
    Iso,
    /// 05 Mar 2024
    Short,
    /// 05/03/2024
    Numeric,
}

#[derive(Subcommand)]
pub enum FormatCommands {
    /// Group an amount in the Indian style (12,34,567)
    Amount {
        /// Amount as a number or numeric string
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Round to this many decimals
        #[arg(long)]
        precision: Option<u32>,
        /// Prefix with the rupee sign
        #[arg(long)]
        rupee: bool,
    },
    /// Format a backend date in the configured display offset
    Date {
        /// RFC 3339 timestamp or YYYY-MM-DD
        value: String,
        #[arg(long, value_enum, default_value = "short")]
        style: DateStyle,
    },
}

pub fn run(command: FormatCommands) -> Result<()> {
    match command {
        FormatCommands::Amount {
            value,
            precision,
            rupee,
        } => {
            let mut format = if rupee {
                CurrencyFormat::rupees()
            } else {
                CurrencyFormat::new()
            };
            if let Some(precision) = precision {
                format = format.precision(precision);
            }
            println!("{}", format.format(value));
        }
        FormatCommands::Date { value, style } => {
            let config = Config::load(&get_mychits_dir()?)?;
            let dates = config.date_formatter()?;
            let rendered = match style {
                DateStyle::Iso => format_iso_date(Some(&value)),
                DateStyle::Short => dates.short(Some(&value)),
                DateStyle::Numeric => dates.numeric(Some(&value)),
            };
            println!("{}", rendered);
        }
    }
    Ok(())
}
