use crate::errors::{RiskError, RiskResult};
use crate::validation::parse_number;
use std::io::Read;
use std::path::Path;

/// One day of market rates. Column names follow the desk's rate sheet.
#[derive(Debug, serde::Deserialize)]
struct RateRecord {
    market_rate_ccy1: String,
    market_rate_ccy2: String,
}

/// Two parallel daily rate series, in file row order (newest first).
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub ccy1: Vec<f64>,
    pub ccy2: Vec<f64>,
}

impl RateSeries {
    pub fn len(&self) -> usize {
        self.ccy1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ccy1.is_empty()
    }
}

/// Load both currency rate columns from a CSV file.
pub fn load_rates(path: &Path) -> RiskResult<RateSeries> {
    let file = std::fs::File::open(path)
        .map_err(|e| RiskError::Io(format!("{}: {e}", path.display())))?;
    let series = read_rates(file)?;
    tracing::info!(path = %path.display(), rows = series.len(), "market rates loaded");
    Ok(series)
}

/// Read rate records from any CSV source. Every row yields one value per currency,
/// so the two series always come back with equal length.
pub fn read_rates<R: Read>(source: R) -> RiskResult<RateSeries> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);

    let mut series = RateSeries {
        ccy1: Vec::new(),
        ccy2: Vec::new(),
    };

    for (row, result) in reader.deserialize().enumerate() {
        let record: RateRecord = result?;
        // Header is line 1.
        let line = row + 2;
        series.ccy1.push(parse_number(
            &record.market_rate_ccy1,
            &format!("market_rate_ccy1 (line {line})"),
        )?);
        series.ccy2.push(parse_number(
            &record.market_rate_ccy2,
            &format!("market_rate_ccy2 (line {line})"),
        )?);
    }

    if series.is_empty() {
        tracing::warn!("rate source contained no rows");
    }

    Ok(series)
}
