//! Cross-table statistics over latest-year snapshots.
//!
//! Two datasets are joined on country name, iterating the registry's canonical country list so
//! results are deterministic. Each dataset contributes its **own** most recent year; the two year
//! labels may differ and both are reported alongside the result.

use crate::error::{ExplorerError, Result};
use crate::models::Dataset;
use crate::query::{self, LatestValues};
use crate::registry::Registry;
use crate::stats::{self, Direction, Strength};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// One country present with a numeric value on both sides of a join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pair {
    pub country: String,
    pub x: f64,
    pub y: f64,
}

/// Descriptive statistics of one dataset's latest year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub dataset: Dataset,
    pub year: Option<String>,
    pub count: usize,
    /// Rows whose latest value is missing or not numeric.
    pub skipped: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedMean {
    pub value_dataset: Dataset,
    pub weight_dataset: Dataset,
    pub value_year: Option<String>,
    pub weight_year: Option<String>,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub x_dataset: Dataset,
    pub y_dataset: Dataset,
    pub x_year: Option<String>,
    pub y_year: Option<String>,
    pub count: usize,
    pub r: f64,
    pub strength: Strength,
    pub direction: Direction,
}

fn first_numeric<'a>(latest: &'a LatestValues) -> AHashMap<&'a str, f64> {
    let mut map = AHashMap::new();
    for (country, v) in latest.numeric() {
        // first match wins
        map.entry(country).or_insert(v);
    }
    map
}

/// Countries of `order` holding a numeric value in both snapshots, in `order`. A country listed
/// twice is paired once.
pub fn pair_by_country(order: &[String], x: &LatestValues, y: &LatestValues) -> Vec<Pair> {
    let xs = first_numeric(x);
    let ys = first_numeric(y);
    let mut seen = AHashSet::new();
    order
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .filter_map(|c| {
            let (&xv, &yv) = (xs.get(c.as_str())?, ys.get(c.as_str())?);
            Some(Pair {
                country: c.clone(),
                x: xv,
                y: yv,
            })
        })
        .collect()
}

/// Numeric latest-year values of `dataset`.
pub fn numeric_latest(reg: &Registry, dataset: Dataset) -> Result<Vec<f64>> {
    let latest = query::latest_values(reg, dataset)?;
    Ok(latest.numeric().into_iter().map(|(_, v)| v).collect())
}

pub fn mean(reg: &Registry, dataset: Dataset) -> Result<f64> {
    stats::mean(&numeric_latest(reg, dataset)?)
}

pub fn variance(reg: &Registry, dataset: Dataset) -> Result<f64> {
    stats::variance(&numeric_latest(reg, dataset)?)
}

pub fn std_dev(reg: &Registry, dataset: Dataset) -> Result<f64> {
    stats::std_dev(&numeric_latest(reg, dataset)?)
}

/// Summary of `dataset`'s latest year. Needs at least one numeric value.
pub fn describe(reg: &Registry, dataset: Dataset) -> Result<Summary> {
    let table = reg.table(dataset)?;
    let latest = query::latest_of(dataset, table)?;
    let values: Vec<f64> = latest.numeric().into_iter().map(|(_, v)| v).collect();
    let mean = stats::mean(&values)?;
    let keyed_rows = table.rows().filter(|r| r.key().is_some()).count();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median = stats::median(&values).unwrap_or(mean);

    Ok(Summary {
        dataset,
        year: latest.year,
        count: values.len(),
        skipped: keyed_rows.saturating_sub(values.len()),
        min,
        max,
        mean,
        median,
        variance: stats::variance(&values).ok(),
        std_dev: stats::std_dev(&values).ok(),
    })
}

/// Weighted mean of one snapshot using another as weights.
pub fn weighted_mean_of(
    order: &[String],
    values: &LatestValues,
    weights: &LatestValues,
) -> Result<WeightedMean> {
    let pairs = pair_by_country(order, values, weights);
    let xy: Vec<(f64, f64)> = pairs.iter().map(|p| (p.x, p.y)).collect();
    let value = stats::weighted_mean(&xy)?;
    Ok(WeightedMean {
        value_dataset: values.dataset,
        weight_dataset: weights.dataset,
        value_year: values.year.clone(),
        weight_year: weights.year.clone(),
        count: pairs.len(),
        value,
    })
}

pub fn weighted_mean(reg: &Registry, value: Dataset, weight: Dataset) -> Result<WeightedMean> {
    let values = query::latest_values(reg, value)?;
    let weights = query::latest_values(reg, weight)?;
    weighted_mean_of(reg.country_list(), &values, &weights)
}

/// Pearson correlation of two snapshots with its strength and direction labels.
pub fn correlation_of(order: &[String], x: &LatestValues, y: &LatestValues) -> Result<Correlation> {
    let pairs = pair_by_country(order, x, y);
    let xy: Vec<(f64, f64)> = pairs.iter().map(|p| (p.x, p.y)).collect();
    let r = stats::pearson(&xy)?;
    if x.year != y.year {
        log::debug!(
            "correlating {} ({:?}) with {} ({:?}) across different years",
            x.dataset,
            x.year,
            y.dataset,
            y.year
        );
    }
    Ok(Correlation {
        x_dataset: x.dataset,
        y_dataset: y.dataset,
        x_year: x.year.clone(),
        y_year: y.year.clone(),
        count: pairs.len(),
        r,
        strength: Strength::of(r),
        direction: Direction::of(r),
    })
}

pub fn correlation(reg: &Registry, x: Dataset, y: Dataset) -> Result<Correlation> {
    let xs = query::latest_values(reg, x)?;
    let ys = query::latest_values(reg, y)?;
    correlation_of(reg.country_list(), &xs, &ys)
}

impl Correlation {
    pub fn years_differ(&self) -> bool {
        self.x_year != self.y_year
    }
}

impl WeightedMean {
    pub fn years_differ(&self) -> bool {
        self.value_year != self.weight_year
    }
}

/// Unwrap a statistic, turning "not enough data" into `None` and keeping real failures.
pub fn computable<T>(res: Result<T>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(ExplorerError::InsufficientData { statistic, reason }) => {
            log::info!("{statistic} not computable: {reason}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
