// ABOUTME: mealplan-cli - command-line front end for the meal plan reconciliation engine
// ABOUTME: Prints targets, reconciles stored producer output, or generates plans via the configured producer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show meal count and macro targets
//! mealplan-cli targets --calories 2200
//!
//! # Reconcile a stored producer response against a catalog file
//! mealplan-cli reconcile --calories 2200 --catalog foods.json --response reply.txt
//!
//! # Generate with the configured producer, retrying up to 3 times, and persist
//! mealplan-cli generate --calories 2200 --catalog foods.json --attempts 3 \
//!     --user alice --date 2025-06-01
//! ```
//!
//! Results are written to stdout as JSON; logs go to stderr.

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mealplan_engine::config::EngineConfig;
use mealplan_engine::logging::LoggingConfig;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "mealplan-cli",
    about = "Meal plan nutrition reconciliation engine",
    long_about = "Builds one-day meal plans from a food catalog and a text producer, correcting quantities toward calorie and macro targets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Where to persist a finished plan
#[derive(clap::Args, Debug, Clone)]
struct PersistArgs {
    /// User the meal log belongs to
    #[arg(long, requires = "date")]
    user: Option<String>,

    /// Log date (YYYY-MM-DD)
    #[arg(long, requires = "user")]
    date: Option<NaiveDate>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the meal count and daily/per-meal targets
    Targets {
        /// Daily calorie goal
        #[arg(long)]
        calories: f64,
    },

    /// Parse a stored producer response and reconcile it
    Reconcile {
        /// Daily calorie goal
        #[arg(long)]
        calories: f64,

        /// Food catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// File holding the raw producer response
        #[arg(long)]
        response: PathBuf,

        #[command(flatten)]
        persist: PersistArgs,
    },

    /// Ask the configured producer for a plan and reconcile it
    Generate {
        /// Daily calorie goal
        #[arg(long)]
        calories: f64,

        /// Food catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Maximum producer attempts on retryable failures
        #[arg(long, default_value = "3")]
        attempts: u32,

        #[command(flatten)]
        persist: PersistArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match cli.command {
        Command::Targets { calories } => commands::targets(calories)?,
        Command::Reconcile {
            calories,
            catalog,
            response,
            persist,
        } => {
            let config = EngineConfig::from_env()?;
            info!(catalog = %catalog.display(), "Reconciling stored producer response");
            commands::reconcile(&config, calories, &catalog, &response, persist).await?;
        }
        Command::Generate {
            calories,
            catalog,
            attempts,
            persist,
        } => {
            let config = EngineConfig::from_env()?;
            info!(
                base_url = %config.llm.base_url,
                model = %config.llm.model,
                "Generating meal plan"
            );
            commands::generate(&config, calories, &catalog, attempts, persist).await?;
        }
    }

    Ok(())
}
