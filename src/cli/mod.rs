//! CLI module - Command-line interface for Flixlens
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CountryMode, FilterSpec, TitleKind, YearRange};
use crate::services::ingest::split_listing;

/// Flixlens - streaming catalog analytics
#[derive(Parser)]
#[command(name = "flixlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (seeds an empty database first when configured)
    #[command(alias = "web")]
    Serve,

    /// Load the catalog CSV into the database, replacing its contents
    Seed {
        /// CSV file (defaults to catalog.csv_path)
        #[arg(long)]
        csv: Option<String>,
    },

    /// Print catalog-wide totals
    Summary,

    /// Search titles by name
    #[command(alias = "s")]
    Search {
        #[arg(required = true)]
        query: Vec<String>,

        #[arg(long)]
        limit: Option<u64>,
    },

    /// Print insights for a filtered slice of the catalog
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Summary and insights straight from a CSV, without a database
    Report {
        #[arg(long)]
        csv: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Comma-separated genre names
    #[arg(long)]
    pub genres: Option<String>,

    /// Comma-separated country names
    #[arg(long)]
    pub countries: Option<String>,

    /// Comma-separated types (Movie, "TV Show")
    #[arg(long)]
    pub types: Option<String>,

    #[arg(long)]
    pub year_min: Option<i32>,

    #[arg(long)]
    pub year_max: Option<i32>,

    /// Count only each title's primary country
    #[arg(long)]
    pub primary: bool,
}

impl FilterArgs {
    #[must_use]
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            genres: self.genres.as_deref().map(split_listing).unwrap_or_default(),
            countries: self
                .countries
                .as_deref()
                .map(split_listing)
                .unwrap_or_default(),
            types: self
                .types
                .as_deref()
                .map(|raw| raw.split(',').filter_map(TitleKind::parse).collect())
                .unwrap_or_default(),
            years: YearRange::new(
                self.year_min.unwrap_or(YearRange::UNBOUNDED_MIN),
                self.year_max.unwrap_or(YearRange::UNBOUNDED_MAX),
            ),
            country_mode: if self.primary {
                CountryMode::Primary
            } else {
                CountryMode::All
            },
        }
    }
}

pub use commands::*;
