use crate::errors::{RiskError, RiskResult};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub trade_date: String,
    pub expiry_date: String,
    pub spot_price: f64,
    pub strike_price: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub scenario_spots: Vec<f64>,
    pub rates_csv_path: Option<PathBuf>,
    pub holding_value_1: f64,
    pub holding_value_2: f64,
    pub serve_http: bool,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> RiskResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> RiskResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let scenario_spots = parse_list(&var_or("SCENARIO_SPOTS", "17,15"), "SCENARIO_SPOTS")?;

        let serve_http = var_or("SERVE_HTTP", "false")
            .parse::<bool>()
            .map_err(|e| RiskError::Config(format!("SERVE_HTTP: {e}")))?;

        let server_port = var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| RiskError::Config(format!("SERVER_PORT: {e}")))?;

        Ok(Self {
            trade_date: var_or("TRADE_DATE", "2022-11-23"),
            expiry_date: var_or("EXPIRY_DATE", "2023-05-10"),
            spot_price: parse_f64(&var_or("SPOT_PRICE", "19"), "SPOT_PRICE")?,
            strike_price: parse_f64(&var_or("STRIKE_PRICE", "17"), "STRIKE_PRICE")?,
            risk_free_rate: parse_f64(&var_or("RISK_FREE_RATE", "0.005"), "RISK_FREE_RATE")?,
            volatility: parse_f64(&var_or("VOLATILITY", "0.3"), "VOLATILITY")?,
            scenario_spots,
            rates_csv_path: lookup("RATES_CSV_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            holding_value_1: parse_f64(&var_or("HOLDING_VALUE_1", "153084.81"), "HOLDING_VALUE_1")?,
            holding_value_2: parse_f64(&var_or("HOLDING_VALUE_2", "95891.51"), "HOLDING_VALUE_2")?,
            serve_http,
            server_port,
        })
    }
}

fn parse_f64(value: &str, key: &str) -> RiskResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| RiskError::Config(format!("{key}: {e}")))
}

fn parse_list(value: &str, key: &str) -> RiskResult<Vec<f64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_f64(s, key))
        .collect()
}
