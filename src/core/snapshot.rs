//! The persisted rate snapshot and the row normalization that produces it

use crate::core::currency::currency_code;
use crate::core::source::TableRow;
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Currency every scraped rate is quoted against.
pub const BASE_CURRENCY: &str = "SGD";

/// Fraction subtracted from / added to the mid-rate to derive bid and ask (0.01%).
pub const SPREAD: f64 = 0.0001;

/// Shape of the entries written to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateFormat {
    /// Display name with the second column's rate.
    Raw,
    /// ISO code with bid/ask synthesized around the third column's rate.
    #[default]
    Spread,
}

impl RateFormat {
    /// Zero-based index of the table column holding the rate.
    pub fn rate_column(&self) -> usize {
        match self {
            RateFormat::Raw => 1,
            RateFormat::Spread => 2,
        }
    }
}

impl Display for RateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateFormat::Raw => "raw",
                RateFormat::Spread => "spread",
            }
        )
    }
}

impl FromStr for RateFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(RateFormat::Raw),
            "spread" => Ok(RateFormat::Spread),
            _ => Err(anyhow::anyhow!("Invalid rate format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateEntry {
    Raw { currency: String, rate: f64 },
    Spread { code: String, bid: f64, ask: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub base_currency: String,
    #[serde(with = "iso_micros")]
    pub timestamp: NaiveDateTime,
    pub rates: Vec<RateEntry>,
}

impl RateSnapshot {
    /// Stamps `rates` with the current local wall-clock time.
    pub fn new(rates: Vec<RateEntry>) -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            timestamp: Local::now().naive_local().trunc_subsecs(6),
            rates,
        }
    }
}

/// ISO-8601 local time with microsecond precision, e.g. `2026-10-19T09:15:02.123456`.
mod iso_micros {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, READ_FORMAT).map_err(D::Error::custom)
    }
}

/// Rounds the exact binary value of `value` to 6 decimal places, half to even,
/// via the decimal formatter.
pub fn round6(value: f64) -> f64 {
    format!("{value:.6}").parse::<f64>().unwrap_or(value)
}

/// Returns `(bid, ask)` around `mid`, each rounded to 6 decimal places.
pub fn bid_ask(mid: f64) -> (f64, f64) {
    (round6(mid * (1.0 - SPREAD)), round6(mid * (1.0 + SPREAD)))
}

/// Converts scraped table rows into snapshot entries. Rows that are too short,
/// whose rate cell is not a finite number, or (for spread) whose currency is
/// not in the code mapping are dropped.
pub fn normalize_rows(rows: &[TableRow], format: RateFormat) -> Vec<RateEntry> {
    rows.iter()
        .filter_map(|row| {
            let name = row.first()?;
            let mid = row
                .get(format.rate_column())?
                .parse::<f64>()
                .ok()
                .filter(|m| m.is_finite())?;
            match format {
                RateFormat::Raw => Some(RateEntry::Raw {
                    currency: name.clone(),
                    rate: mid,
                }),
                RateFormat::Spread => {
                    let code = currency_code(name)?;
                    let (bid, ask) = bid_ask(mid);
                    Some(RateEntry::Spread {
                        code: code.to_string(),
                        bid,
                        ask,
                    })
                }
            }
        })
        .collect()
}
