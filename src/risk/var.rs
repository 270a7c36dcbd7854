//! One-day historical-simulation VaR for a two-currency holding.
//!
//! Each rate series is ordered newest first. Day i's P&L for a holding h is
//!
//!   pnl[i] = (exp(ln(rate[i] / rate[i+1])) - 1) * h
//!
//! The two P&L vectors are summed element-wise and sorted ascending, and the
//! VaR is a fixed interpolation between the 2nd and 3rd order statistics:
//!
//!   VaR = 0.4 * sorted[1] + 0.6 * sorted[2]
//!
//! Pure functions over the owned inputs. Nothing is cached.

use crate::errors::{RiskError, RiskResult};
use crate::validation::{number_field, series_field, validate_number, validate_series};
use serde_json::Value;

/// Order-statistic weights (position, weight) for the one-day VaR.
const VAR_WEIGHTS: [(usize, f64); 2] = [(1, 0.4), (2, 0.6)];

/// Combined P&L observations needed to read the weighted order statistics.
pub const MIN_OBSERVATIONS: usize = 3;

#[derive(Debug, Clone)]
pub struct VarCalculator {
    rate_series_1: Vec<f64>,
    rate_series_2: Vec<f64>,
    holding_value_1: f64,
    holding_value_2: f64,
}

/// Snapshot of one VaR computation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VarReport {
    pub holding_value_1: f64,
    pub holding_value_2: f64,
    pub observations: usize,
    pub total_pnl: Vec<f64>,
    pub one_day_var: f64,
}

impl VarCalculator {
    pub fn new(
        rate_series_1: Vec<f64>,
        rate_series_2: Vec<f64>,
        holding_value_1: f64,
        holding_value_2: f64,
    ) -> RiskResult<Self> {
        Ok(Self {
            rate_series_1: validate_series(rate_series_1, "market_rate_1")?,
            rate_series_2: validate_series(rate_series_2, "market_rate_2")?,
            holding_value_1: validate_number(
                holding_value_1,
                "Total value of holdings in currency 1 (holding_value_1)",
            )?,
            holding_value_2: validate_number(
                holding_value_2,
                "Total value of holdings in currency 2 (holding_value_2)",
            )?,
        })
    }

    /// Build from a JSON object with fields `rate_series_1`, `rate_series_2`,
    /// `holding_value_1`, `holding_value_2`.
    pub fn from_json(obj: &Value) -> RiskResult<Self> {
        Ok(Self {
            rate_series_1: series_field(obj, "rate_series_1", "market_rate_1")?,
            rate_series_2: series_field(obj, "rate_series_2", "market_rate_2")?,
            holding_value_1: number_field(
                obj,
                "holding_value_1",
                "Total value of holdings in currency 1 (holding_value_1)",
            )?,
            holding_value_2: number_field(
                obj,
                "holding_value_2",
                "Total value of holdings in currency 2 (holding_value_2)",
            )?,
        })
    }

    pub fn rate_series_1(&self) -> &[f64] {
        &self.rate_series_1
    }

    pub fn rate_series_2(&self) -> &[f64] {
        &self.rate_series_2
    }

    /// Day-over-day P&L of `holding_value` implied by `rate_series`.
    /// Length is `rate_series.len() - 1`; empty for fewer than two rates.
    pub fn pnl_vector(holding_value: f64, rate_series: &[f64]) -> Vec<f64> {
        rate_series
            .windows(2)
            .map(|w| ((w[0] / w[1]).ln().exp() - 1.0) * holding_value)
            .collect()
    }

    /// Combined P&L of both holdings, sorted ascending.
    pub fn total_pnl(&self) -> RiskResult<Vec<f64>> {
        if self.rate_series_1.len() != self.rate_series_2.len() {
            return Err(RiskError::LengthMismatch {
                left: self.rate_series_1.len(),
                right: self.rate_series_2.len(),
            });
        }

        let pnl_1 = Self::pnl_vector(self.holding_value_1, &self.rate_series_1);
        let pnl_2 = Self::pnl_vector(self.holding_value_2, &self.rate_series_2);

        let mut total: Vec<f64> = pnl_1.iter().zip(&pnl_2).map(|(a, b)| a + b).collect();
        sort_nan_last(&mut total);
        Ok(total)
    }

    pub fn one_day_var(&self) -> RiskResult<f64> {
        let total = self.total_pnl()?;
        Self::weighted_var(&total)
    }

    pub fn report(&self) -> RiskResult<VarReport> {
        let total_pnl = self.total_pnl()?;
        let one_day_var = Self::weighted_var(&total_pnl)?;
        Ok(VarReport {
            holding_value_1: self.holding_value_1,
            holding_value_2: self.holding_value_2,
            observations: total_pnl.len(),
            total_pnl,
            one_day_var,
        })
    }

    fn weighted_var(sorted_pnl: &[f64]) -> RiskResult<f64> {
        if sorted_pnl.len() < MIN_OBSERVATIONS {
            return Err(RiskError::InsufficientObservations {
                needed: MIN_OBSERVATIONS,
                got: sorted_pnl.len(),
            });
        }
        let [(i, w_i), (j, w_j)] = VAR_WEIGHTS;
        Ok(w_i * sorted_pnl[i] + w_j * sorted_pnl[j])
    }
}

/// Ascending sort with every NaN at the end regardless of its sign bit.
fn sort_nan_last(values: &mut [f64]) {
    values.sort_by(|a, b| a.is_nan().cmp(&b.is_nan()).then(a.total_cmp(b)));
}
