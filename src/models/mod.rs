pub mod black_scholes;

/// Day-count basis for time to expiry (Actual/365, calendar days).
pub const DAYS_PER_YEAR: f64 = 365.0;
