//! Fixed-label text summaries for desk output.
//! Rendering only; every number comes from an already computed snapshot.

use crate::models::black_scholes::OptionQuote;
use crate::risk::var::VarReport;
use std::fmt;

impl fmt::Display for OptionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Option Trading : ")?;
        writeln!(f, " trade_date: {}", self.trade_date)?;
        writeln!(f, " expiry_date: {}", self.expiry_date)?;
        writeln!(f, " spot_price: {}", self.spot_price)?;
        writeln!(f, " time_to_expiry: {}", self.time_to_expiry)?;
        writeln!(f, " forward_price: {}", self.forward_price)?;
        writeln!(f, "d1: {}", self.d1)?;
        writeln!(f, "d2: {}", self.d2)?;
        writeln!(f, " strike_price : {}", self.strike_price)?;
        writeln!(f, " call_price : {}", self.call_price)?;
        write!(f, " put_price (P): {}", self.put_price)
    }
}

impl fmt::Display for VarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " holding_value_1: {}", self.holding_value_1)?;
        writeln!(f, " holding_value_2: {}", self.holding_value_2)?;
        writeln!(f, " observations: {}", self.observations)?;
        write!(f, " VaR-One Day: {}", self.one_day_var)
    }
}

/// Full desk report: base quote, what-if quotes, and VaR when rates were supplied.
pub fn render(base: &OptionQuote, scenarios: &[OptionQuote], var: Option<&VarReport>) -> String {
    let mut out = String::new();
    out.push_str("Forward Black-Scholes Calculation:\n");
    out.push_str(&base.to_string());
    out.push('\n');

    for quote in scenarios {
        out.push_str(&format!("\nWhat-if spot {}:\n", quote.spot_price));
        out.push_str(&quote.to_string());
        out.push('\n');
    }

    if let Some(report) = var {
        out.push_str("\nVaR Calculation for One Day:\n");
        out.push_str(&report.to_string());
        out.push('\n');
    }

    out
}
