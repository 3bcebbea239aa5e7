//! Single-table queries: latest-year snapshots, per-country histories and single values.
//!
//! Every function here is a pure read over a [`Registry`].

use crate::error::{ExplorerError, Result};
use crate::models::{Cell, Dataset};
use crate::registry::Registry;
use crate::table::{Row, Table};
use serde::Serialize;

/// Column names of the sector shares in `setores_economicos`.
pub const SECTOR_COLUMNS: [&str; 3] = ["agricultura", "industria", "servicos"];

/// One country's value in a latest-year snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub country: String,
    pub value: Cell,
}

/// Latest-year value per country, in table row order.
///
/// `year` is `None` when the table has no value columns; `values` is then empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestValues {
    pub dataset: Dataset,
    pub year: Option<String>,
    pub values: Vec<Observation>,
}

impl LatestValues {
    pub fn get(&self, country: &str) -> Option<&Cell> {
        self.values
            .iter()
            .find(|o| o.country == country)
            .map(|o| &o.value)
    }

    /// Only the finite numeric entries.
    pub fn numeric(&self) -> Vec<(&str, f64)> {
        self.values
            .iter()
            .filter_map(|o| o.value.as_f64().map(|v| (o.country.as_str(), v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearValue {
    pub year: String,
    pub value: Cell,
}

/// One value per value column for a single country, in column order. Missing cells are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryHistory {
    pub dataset: Dataset,
    pub country: String,
    pub points: Vec<YearValue>,
}

impl CountryHistory {
    /// The last `n` years.
    pub fn recent(&self, n: usize) -> &[YearValue] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetValue {
    pub dataset: Dataset,
    pub year: String,
    pub value: Cell,
}

/// Latest value of one country across every dataset that has it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySnapshot {
    pub country: String,
    pub values: Vec<DatasetValue>,
}

impl CountrySnapshot {
    pub fn get(&self, dataset: Dataset) -> Option<&DatasetValue> {
        self.values.iter().find(|v| v.dataset == dataset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorShares {
    pub year: String,
    pub agriculture: Option<f64>,
    pub industry: Option<f64>,
    pub services: Option<f64>,
    /// Sum of the three shares, missing ones counted as zero.
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorBreakdown {
    pub country: String,
    pub years: Vec<SectorShares>,
}

/// Latest-year value for every row of `dataset`, skipping missing cells.
pub fn latest_values(reg: &Registry, dataset: Dataset) -> Result<LatestValues> {
    latest_of(dataset, reg.table(dataset)?)
}

/// Same as [`latest_values`] for a table outside a registry.
pub fn latest_of(dataset: Dataset, table: &Table) -> Result<LatestValues> {
    table.identifier_column()?;
    let Some(year) = table.latest_column() else {
        return Ok(LatestValues {
            dataset,
            year: None,
            values: Vec::new(),
        });
    };

    let values = table
        .rows()
        .filter_map(|row| {
            let country = row.key()?;
            let value = row.get(year);
            (!value.is_missing()).then(|| Observation {
                country,
                value: value.clone(),
            })
        })
        .collect();

    Ok(LatestValues {
        dataset,
        year: Some(year.to_string()),
        values,
    })
}

fn country_row<'a>(table: &'a Table, country: &str) -> Result<Row<'a>> {
    table.identifier_column()?;
    table
        .row_for(country)
        .ok_or_else(|| ExplorerError::country_not_found(country))
}

fn history_of(dataset: Dataset, table: &Table, row: Row<'_>, country: &str) -> CountryHistory {
    let points = table
        .value_columns()
        .into_iter()
        .map(|year| YearValue {
            year: year.to_string(),
            value: row.get(year).clone(),
        })
        .collect();
    CountryHistory {
        dataset,
        country: country.to_string(),
        points,
    }
}

/// Full history of `country` in `dataset`.
pub fn country_history(reg: &Registry, dataset: Dataset, country: &str) -> Result<CountryHistory> {
    let table = reg.table(dataset)?;
    let row = country_row(table, country)?;
    Ok(history_of(dataset, table, row, country))
}

/// Full history of every row in `dataset`, in row order.
pub fn all_histories(reg: &Registry, dataset: Dataset) -> Result<Vec<CountryHistory>> {
    let table = reg.table(dataset)?;
    table.identifier_column()?;
    Ok(table
        .rows()
        .filter_map(|row| {
            let country = row.key()?;
            Some(history_of(dataset, table, row, &country))
        })
        .collect())
}

/// Value of `country` in `dataset` for one year label.
pub fn country_value_at(
    reg: &Registry,
    dataset: Dataset,
    country: &str,
    year: &str,
) -> Result<Cell> {
    let table = reg.table(dataset)?;
    let row = country_row(table, country)?;
    if !table.is_value_column(year) {
        let range = table.year_range();
        return Err(ExplorerError::InvalidYear {
            dataset: dataset.as_str().to_string(),
            year: year.to_string(),
            first: range.map(|(a, _)| a.to_string()),
            last: range.map(|(_, b)| b.to_string()),
        });
    }
    Ok(row.get(year).clone())
}

/// Latest value of `country` in every dataset. Datasets lacking the country or its latest value
/// are left out.
pub fn country_all_data(reg: &Registry, country: &str) -> CountrySnapshot {
    let values = reg
        .datasets()
        .filter_map(|dataset| {
            let table = reg.table(dataset).ok()?;
            let year = table.latest_column()?;
            let value = table.row_for(country)?.get(year);
            (!value.is_missing()).then(|| DatasetValue {
                dataset,
                year: year.to_string(),
                value: value.clone(),
            })
        })
        .collect();
    CountrySnapshot {
        country: country.to_string(),
        values,
    }
}

fn year_label(cell: &Cell) -> String {
    match *cell {
        Cell::Number(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            format!("{}", v as i64)
        }
        _ => cell.to_string(),
    }
}

fn shares_of(row: Row<'_>, year: String) -> SectorShares {
    let [agriculture, industry, services] = SECTOR_COLUMNS.map(|c| row.get(c).as_f64());
    let total: f64 = [agriculture, industry, services]
        .iter()
        .map(|v| v.unwrap_or(0.0))
        .sum();
    SectorShares {
        year,
        agriculture,
        industry,
        services,
        total,
    }
}

/// Agriculture / industry / services shares for `country`.
///
/// Long-format tables (with an `ano` column) yield one entry per matching row; otherwise the
/// single matching row is reported under the latest value column.
pub fn sector_breakdown(reg: &Registry, country: &str) -> Result<SectorBreakdown> {
    let table = reg.table(Dataset::SetoresEconomicos)?;
    table.identifier_column()?;

    let years: Vec<SectorShares> = if table.has_column("ano") {
        table
            .rows_for(country)
            .map(|row| shares_of(row, year_label(row.get("ano"))))
            .collect()
    } else {
        let label = table.latest_column().unwrap_or_default().to_string();
        table
            .row_for(country)
            .map(|row| shares_of(row, label))
            .into_iter()
            .collect()
    };

    if years.is_empty() {
        return Err(ExplorerError::country_not_found(country));
    }
    Ok(SectorBreakdown {
        country: country.to_string(),
        years,
    })
}
