mod config;
mod errors;
mod feeds;
mod models;
mod report;
mod risk;
mod server;
mod state;
mod validation;

use crate::config::AppConfig;
use crate::errors::RiskResult;
use crate::models::black_scholes::OptionPricer;
use crate::risk::var::{VarCalculator, VarReport};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("fx_option_risk starting");

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    match run_report(&cfg) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!("report error: {e}");
            std::process::exit(1);
        }
    }

    if cfg.serve_http {
        let state = AppState::new(cfg);
        if let Err(e) = server::serve(state).await {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

/// Price the configured contract and its what-if spots, and compute VaR when a
/// rate file is configured. Returns the rendered desk report.
fn run_report(cfg: &AppConfig) -> RiskResult<String> {
    let pricer = OptionPricer::new(
        &cfg.trade_date,
        &cfg.expiry_date,
        cfg.spot_price,
        cfg.strike_price,
        cfg.risk_free_rate,
        cfg.volatility,
    )?;

    let base = pricer.quote();
    tracing::info!(
        spot = pricer.spot_price(),
        strike = pricer.strike_price(),
        r = pricer.risk_free_rate(),
        t = base.time_to_expiry,
        call = base.call_price,
        put = base.put_price,
        "option priced"
    );

    let scenarios = pricer.scenario_quotes(&cfg.scenario_spots)?;

    let var = match &cfg.rates_csv_path {
        Some(path) => Some(compute_var(cfg, path)?),
        None => {
            tracing::warn!("RATES_CSV_PATH not set, skipping VaR");
            None
        }
    };

    Ok(report::render(&base, &scenarios, var.as_ref()))
}

fn compute_var(cfg: &AppConfig, path: &std::path::Path) -> RiskResult<VarReport> {
    let rates = feeds::rates_csv::load_rates(path)?;
    let calc = VarCalculator::new(rates.ccy1, rates.ccy2, cfg.holding_value_1, cfg.holding_value_2)?;
    tracing::debug!(
        rows_ccy1 = calc.rate_series_1().len(),
        rows_ccy2 = calc.rate_series_2().len(),
        "VaR inputs validated"
    );
    let report = calc.report()?;
    tracing::info!(
        observations = report.observations,
        var_1d = report.one_day_var,
        "one-day VaR computed"
    );
    Ok(report)
}
