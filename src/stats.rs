//! Numeric kernels over plain `f64` slices. Callers filter out non-numeric cells first.

use crate::error::{ExplorerError, Result};
use serde::{Deserialize, Serialize};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ExplorerError::insufficient("mean", "no numeric values"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by N).
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(ExplorerError::insufficient(
            "variance",
            format!("needs at least 2 values, got {}", values.len()),
        ));
    }
    let m = mean(values)?;
    Ok(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        Some(v[mid])
    } else {
        Some((v[mid - 1] + v[mid]) / 2.0)
    }
}

/// Σ(value·weight) / Σweight over `(value, weight)` pairs.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> Result<f64> {
    if pairs.is_empty() {
        return Err(ExplorerError::insufficient(
            "weighted mean",
            "no country has both a value and a weight",
        ));
    }
    let (num, den) = pairs
        .iter()
        .fold((0.0, 0.0), |(n, d), (v, w)| (n + v * w, d + w));
    if den == 0.0 {
        return Err(ExplorerError::insufficient("weighted mean", "weights sum to zero"));
    }
    Ok(num / den)
}

/// Pearson correlation coefficient over `(x, y)` pairs.
///
/// A zero denominator (a constant series) yields `0.0` rather than an error.
pub fn pearson(pairs: &[(f64, f64)]) -> Result<f64> {
    if pairs.len() < 2 {
        return Err(ExplorerError::insufficient(
            "correlation",
            format!("needs at least 2 paired observations, got {}", pairs.len()),
        ));
    }
    let n = pairs.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sx2, mut sy2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        sx += x;
        sy += y;
        sxy += x * y;
        sx2 += x * x;
        sy2 += y * y;
    }
    let num = n * sxy - sx * sy;
    let den = ((n * sx2 - sx * sx) * (n * sy2 - sy * sy)).sqrt();
    if den == 0.0 || !den.is_finite() {
        return Ok(0.0);
    }
    Ok(num / den)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    pub fn of(r: f64) -> Self {
        let a = r.abs();
        if a > 0.7 {
            Strength::Strong
        } else if a > 0.3 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Anything not strictly positive, zero included, is labelled negative.
    pub fn of(r: f64) -> Self {
        if r > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Strength::Weak => "weak",
            Strength::Moderate => "moderate",
            Strength::Strong => "strong",
        })
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
        })
    }
}
