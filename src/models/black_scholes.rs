use crate::errors::RiskResult;
use crate::models::DAYS_PER_YEAR;
use crate::validation::{date_field, number_field, parse_date, validate_number};
use chrono::NaiveDate;
use serde_json::Value;
use statrs::distribution::{ContinuousCDF, Normal};

/// European option priced off the forward under Black-Scholes.
///
/// F  = S * exp(r*T)
/// d1 = (ln(F/K) + (sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
/// C  = exp(-r*T) * (F * Phi(d1) - K * Phi(d2))
/// P  = C - S + K * exp(-r*T)
///
/// Every derived quantity is recomputed from the fields on each call.
/// T = 0 is not guarded: d1 becomes NaN or infinite and that flows into the prices.
#[derive(Debug, Clone)]
pub struct OptionPricer {
    trade_date: NaiveDate,
    expiry_date: NaiveDate,
    spot_price: f64,
    strike_price: f64,
    risk_free_rate: f64,
    volatility: f64,
    normal: Normal,
}

/// Snapshot of every derived quantity for one pricer state.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OptionQuote {
    pub trade_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub spot_price: f64,
    pub strike_price: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub time_to_expiry: f64,
    pub forward_price: f64,
    pub d1: f64,
    pub d2: f64,
    pub call_price: f64,
    pub put_price: f64,
}

impl OptionPricer {
    pub fn new(
        trade_date: &str,
        expiry_date: &str,
        spot_price: f64,
        strike_price: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> RiskResult<Self> {
        Ok(Self {
            trade_date: parse_date(trade_date, "trade_date")?,
            expiry_date: parse_date(expiry_date, "expiry_date")?,
            spot_price: validate_number(spot_price, "Spot price (S)")?,
            strike_price: validate_number(strike_price, "Exercise price (K)")?,
            risk_free_rate: validate_number(risk_free_rate, "Risk free rate (r)")?,
            volatility: validate_number(volatility, "sigma")?,
            normal: Normal::standard(),
        })
    }

    /// Build from a JSON object with fields `trade_date`, `expiry_date`, `spot_price`,
    /// `strike_price`, `risk_free_rate`, `volatility`.
    pub fn from_json(obj: &Value) -> RiskResult<Self> {
        Ok(Self {
            trade_date: date_field(obj, "trade_date", "trade_date")?,
            expiry_date: date_field(obj, "expiry_date", "expiry_date")?,
            spot_price: number_field(obj, "spot_price", "Spot price (S)")?,
            strike_price: number_field(obj, "strike_price", "Exercise price (K)")?,
            risk_free_rate: number_field(obj, "risk_free_rate", "Risk free rate (r)")?,
            volatility: number_field(obj, "volatility", "sigma")?,
            normal: Normal::standard(),
        })
    }

    /// Same contract under a different spot. The receiver is left untouched.
    pub fn with_spot(&self, spot_price: f64) -> RiskResult<Self> {
        Ok(Self {
            spot_price: validate_number(spot_price, "Spot price (S)")?,
            ..self.clone()
        })
    }

    /// Quote the contract under a what-if spot.
    pub fn reprice(&self, spot_price: f64) -> RiskResult<OptionQuote> {
        Ok(self.with_spot(spot_price)?.quote())
    }

    /// Quotes for a list of what-if spots, in input order.
    pub fn scenario_quotes(&self, spots: &[f64]) -> RiskResult<Vec<OptionQuote>> {
        spots.iter().map(|&s| self.reprice(s)).collect()
    }

    pub fn spot_price(&self) -> f64 {
        self.spot_price
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Year fraction between trade and expiry, Actual/365.
    /// Zero or negative when the dates are equal or inverted.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        (self.expiry_date - self.trade_date).num_days() as f64 / DAYS_PER_YEAR
    }

    /// Forward price under continuous compounding.
    #[inline]
    pub fn forward_price(&self) -> f64 {
        self.spot_price * (self.risk_free_rate * self.time_to_expiry()).exp()
    }

    #[inline]
    pub fn d1(&self) -> f64 {
        let t = self.time_to_expiry();
        ((self.forward_price() / self.strike_price).ln() + (self.volatility.powi(2) / 2.0) * t)
            / (self.volatility * t.sqrt())
    }

    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.time_to_expiry().sqrt()
    }

    pub fn call_price(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry()).exp()
            * (self.forward_price() * self.normal.cdf(self.d1())
                - self.strike_price * self.normal.cdf(self.d2()))
    }

    /// Put from put-call parity on the call price.
    pub fn put_price(&self) -> f64 {
        self.call_price() - self.spot_price
            + self.strike_price * (-self.risk_free_rate * self.time_to_expiry()).exp()
    }

    pub fn quote(&self) -> OptionQuote {
        OptionQuote {
            trade_date: self.trade_date,
            expiry_date: self.expiry_date,
            spot_price: self.spot_price,
            strike_price: self.strike_price,
            risk_free_rate: self.risk_free_rate,
            volatility: self.volatility,
            time_to_expiry: self.time_to_expiry(),
            forward_price: self.forward_price(),
            d1: self.d1(),
            d2: self.d2(),
            call_price: self.call_price(),
            put_price: self.put_price(),
        }
    }
}
