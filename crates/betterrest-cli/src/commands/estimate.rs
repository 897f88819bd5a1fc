//! Bedtime estimation command.

use std::path::PathBuf;

use betterrest_core::error::CoreError;
use betterrest_core::{
    estimate, Alert, Bedtime, CoffeeAmount, Config, SleepAmount, SleepRequest, WakeTime,
};
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct EstimateArgs {
    /// Target wake time (HH:MM, 24-hour)
    #[arg(long)]
    wake: Option<WakeTime>,
    /// Desired hours of sleep (4-12, quarter-hour steps)
    #[arg(long)]
    sleep: Option<SleepAmount>,
    /// Cups of coffee per day (1-20)
    #[arg(long)]
    coffee: Option<CoffeeAmount>,
    /// Model artifact to use instead of the configured one
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    request: &'a SleepRequest,
    bedtime: Option<&'a Bedtime>,
    alert: &'a Alert,
}

pub fn run(args: EstimateArgs) -> Result<(), CoreError> {
    let config = Config::load()?;
    let request = SleepRequest {
        wake_time: args.wake.unwrap_or(config.defaults.wake_time),
        sleep_amount: args.sleep.unwrap_or(config.defaults.sleep_amount),
        coffee_amount: args.coffee.unwrap_or(config.defaults.coffee_amount),
    };

    let model_path = args.model.as_deref().or(config.model.path.as_deref());
    tracing::debug!(
        model = %model_path.map_or("built-in".into(), |p| p.display().to_string()),
        "selected sleep model"
    );
    let predictor = config.model.predictor(args.model.as_deref());
    let result = estimate(
        request.wake_time,
        request.sleep_amount,
        request.coffee_amount,
        &predictor,
    );
    let alert = Alert::from_result(&result, config.display.clock_style());

    if args.json {
        let report = EstimateReport {
            request: &request,
            bedtime: result.as_ref().ok(),
            alert: &alert,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Wake up: {}", request.wake_time);
        println!("Sleep:   {}", request.sleep_amount.label());
        println!("Coffee:  {}", request.coffee_amount.label());
        println!();
        println!("{}", alert.render());
    }

    if alert.is_error {
        std::process::exit(1);
    }
    Ok(())
}
