//! Strain loader contract
//!
//! Reading detector archive files lives outside this crate. Loaders hand
//! back a [`StrainData`] and the conditioning stages only see it once it
//! passes [`StrainData::validate`].

use crate::error::{ConditioningError, Result};
use crate::series::TimeSeries;
use std::path::Path;

/// Tolerance on the implied sample rate, Hz
pub const SAMPLE_RATE_TOLERANCE: f64 = 0.1;

/// Strain, GPS time and data-quality flags, one entry per sample
#[derive(Debug, Clone, PartialEq)]
pub struct StrainData {
    pub strain: Vec<f64>,
    pub time: Vec<f64>,
    pub data_quality: Vec<i32>,
}

/// Source of strain records, e.g. an HDF5 archive reader
pub trait StrainLoader {
    fn load(&self, path: &Path) -> Result<StrainData>;
}

impl StrainData {
    /// `1 / median(diff(time))`
    pub fn implied_sample_rate(&self) -> Result<f64> {
        if self.time.len() < 2 {
            return Err(ConditioningError::LoaderContract(
                "need at least two time stamps to infer a sample rate".to_string(),
            ));
        }

        let mut dt: Vec<f64> = self.time.windows(2).map(|w| w[1] - w[0]).collect();
        dt.sort_by(f64::total_cmp);
        let mid = dt.len() / 2;
        let median = if dt.len() % 2 == 0 {
            (dt[mid - 1] + dt[mid]) / 2.0
        } else {
            dt[mid]
        };

        Ok(1.0 / median)
    }

    /// Check the loader contract against a detector sample rate
    ///
    /// Equal lengths, strictly increasing time, and an implied sample rate
    /// within `tolerance` Hz of `expected_rate`.
    pub fn validate(&self, expected_rate: f64, tolerance: f64) -> Result<f64> {
        let n = self.strain.len();
        if self.time.len() != n || self.data_quality.len() != n {
            return Err(ConditioningError::LoaderContract(format!(
                "strain/time/data_quality lengths differ: {}/{}/{}",
                n,
                self.time.len(),
                self.data_quality.len()
            )));
        }
        if n == 0 {
            return Err(ConditioningError::EmptySeries);
        }

        if let Some(i) = self.time.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(ConditioningError::LoaderContract(format!(
                "time is not strictly increasing at index {}",
                i + 1
            )));
        }

        let rate = self.implied_sample_rate()?;
        if (rate - expected_rate).abs() >= tolerance {
            return Err(ConditioningError::LoaderContract(format!(
                "implied sample rate {} Hz differs from {} Hz",
                rate, expected_rate
            )));
        }

        Ok(rate)
    }

    /// Strain as a time series at the implied sample rate
    pub fn to_time_series(&self) -> Result<TimeSeries> {
        TimeSeries::new(self.strain.clone(), self.implied_sample_rate()?)
    }
}
