use crate::config::RequestDefaults;
use crate::error::AppError;
use ftv::{CacheStats, RequestShape};
use serde::{Deserialize, Serialize};

/// Raw `/ftv` query parameters. Values are parsed by hand so malformed input
/// maps to our error body rather than the extractor's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct FtvQuery {
    pub num_series: Option<String>,
    pub num_points: Option<String>,
    pub percent_missing: Option<String>,
}

impl FtvQuery {
    /// Collect known parameters from decoded query pairs. A repeated key
    /// keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "num_series" => &mut query.num_series,
                "num_points" => &mut query.num_points,
                "percent_missing" => &mut query.percent_missing,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Fill absent parameters from `defaults` and parse the rest.
    pub fn into_shape(self, defaults: &RequestDefaults) -> Result<RequestShape, AppError> {
        let num_series = parse_count("num_series", self.num_series, defaults.num_series)?;
        let num_points = parse_count("num_points", self.num_points, defaults.num_points)?;
        let percent_missing = match self.percent_missing {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                AppError::BadRequest(format!("percent_missing must be a number, got {:?}", raw))
            })?,
            None => defaults.percent_missing,
        };
        Ok(RequestShape::new(num_series, num_points, percent_missing))
    }
}

fn parse_count(name: &str, raw: Option<String>, default: u32) -> Result<u32, AppError> {
    match raw {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            AppError::BadRequest(format!("{} must be a non-negative integer, got {:?}", name, raw))
        }),
        None => Ok(default),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub bytes: u64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            entries: stats.entries,
            bytes: stats.bytes,
        }
    }
}
