//! Evaluate Example
//!
//! Evaluates a cart snapshot against a promotion configuration and prints the
//! result in the host's JSON output format.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to load a promotion configuration from a YAML file
//! Use `--cart` to read a JSON cart snapshot from a file (stdin otherwise)
//! Use `-b` to also print the per-promotion breakdown
//!
//! Set `RUST_LOG=plie_discounts=debug` to see how each line and bucket is priced.

use std::{fs, io::Read};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plie_discounts::{
    cart::RunInput, config::PromotionConfig, engine::PromotionEngine, fixtures::Fixture,
    pricing::format_amount, utils::EvaluateArgs,
};

/// Evaluate Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = EvaluateArgs::parse();

    let (engine, input) = if let Some(name) = args.fixture.as_deref() {
        let mut fixture = Fixture::new();

        let configured = match args.config.as_deref() {
            Some(path) => fixture.with_config(PromotionConfig::from_path(path)?),
            None => fixture.load_config(name)?,
        };

        configured.load_cart(name)?;

        (fixture.engine()?, fixture.input()?.clone())
    } else {
        let config = match args.config.as_deref() {
            Some(path) => PromotionConfig::from_path(path)?,
            None => PromotionConfig::default(),
        };

        let json = match args.cart.as_deref() {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut json = String::new();
                std::io::stdin().read_to_string(&mut json)?;
                json
            }
        };

        (PromotionEngine::new(&config)?, RunInput::from_json(&json)?)
    };

    let evaluation = engine.evaluate_with_breakdown(&input);

    if args.breakdown {
        for outcome in &evaluation.outcomes {
            println!(
                "{:<24} {:>4} units  {:>10}",
                outcome.name,
                outcome.units,
                format_amount(&outcome.discount)
            );
        }

        println!("{:<24} {:>16}\n", "total", format_amount(&evaluation.total));
    }

    println!("{}", serde_json::to_string_pretty(&evaluation.result)?);

    Ok(())
}
