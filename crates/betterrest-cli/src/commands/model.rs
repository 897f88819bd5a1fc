//! Sleep model inspection.

use std::path::PathBuf;

use betterrest_core::error::CoreError;
use betterrest_core::{
    CoffeeAmount, Config, LinearModel, PredictionInput, Predictor, SleepAmount, WakeTime,
};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ModelAction {
    /// Print the coefficients in use
    Show {
        /// Model artifact to inspect instead of the configured one
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Print the raw predicted hours of sleep
    Predict {
        /// Target wake time (HH:MM, 24-hour)
        #[arg(long)]
        wake: WakeTime,
        /// Desired hours of sleep (4-12, quarter-hour steps)
        #[arg(long)]
        sleep: SleepAmount,
        /// Cups of coffee per day (1-20)
        #[arg(long)]
        coffee: CoffeeAmount,
        /// Model artifact to use instead of the configured one
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Write the built-in model as an artifact file
    Export {
        /// Destination path
        path: PathBuf,
    },
}

pub fn run(action: ModelAction) -> Result<(), CoreError> {
    match action {
        ModelAction::Show { model } => {
            let config = Config::load()?;
            let linear = match model.or(config.model.path) {
                Some(path) => {
                    println!("# {}", path.display());
                    LinearModel::load(&path)?
                }
                None => {
                    println!("# built-in");
                    LinearModel::builtin()
                }
            };
            print!("{}", linear.to_toml_string()?);
        }
        ModelAction::Predict {
            wake,
            sleep,
            coffee,
            model,
        } => {
            let config = Config::load()?;
            let predictor = config.model.predictor(model.as_deref());
            let input = PredictionInput::new(wake, sleep, coffee);
            let hours = predictor.predict(&input)?;
            println!("{hours:.4}");
        }
        ModelAction::Export { path } => {
            std::fs::write(&path, LinearModel::builtin().to_toml_string()?)?;
            println!("model written to {}", path.display());
        }
    }
    Ok(())
}
