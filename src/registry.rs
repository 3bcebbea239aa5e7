//! The dataset registry: the five loaded tables plus the canonical country list.
//!
//! A [`Registry`] is built once and then handed by reference to every query and statistic.
//! Nothing in it changes after construction.

use crate::error::{ExplorerError, Result};
use crate::models::Dataset;
use crate::storage::TableSource;
use crate::table::Table;
use ahash::AHashSet;
use std::collections::BTreeMap;

/// Tag returned for countries outside [`COUNTRY_TAGS`].
pub const UNKNOWN_TAG: &str = "[??]";

/// Known country names and their display tags.
pub const COUNTRY_TAGS: &[(&str, &str)] = &[
    ("Argentina", "[ARG]"),
    ("Australia", "[AUS]"),
    ("Brazil", "[BRA]"),
    ("Canada", "[CAN]"),
    ("Chile", "[CHL]"),
    ("China", "[CHN]"),
    ("Cuba", "[CUB]"),
    ("Germany", "[DEU]"),
    ("Egypt", "[EGY]"),
    ("UK", "[GBR]"),
    ("India", "[IND]"),
    ("Japan", "[JPN]"),
    ("South Korea", "[KOR]"),
    ("Mexico", "[MEX]"),
    ("Nigeria", "[NGA]"),
    ("Russia", "[RUS]"),
    ("Sweden", "[SWE]"),
    ("USA", "[USA]"),
    ("South Africa", "[ZAF]"),
    ("Switzerland", "[CHE]"),
];

/// Display tag for a country, or [`UNKNOWN_TAG`].
pub fn tag_for(country: &str) -> &'static str {
    COUNTRY_TAGS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, tag)| *tag)
        .unwrap_or(UNKNOWN_TAG)
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: BTreeMap<Dataset, Table>,
    countries: Vec<String>,
}

impl Registry {
    /// Load every dataset from `source`. The first failure aborts the whole load.
    pub fn load<S: TableSource + ?Sized>(source: &S) -> Result<Self> {
        let mut tables = Vec::with_capacity(Dataset::ALL.len());
        for dataset in Dataset::ALL {
            let table = source.load_table(dataset)?;
            log::debug!(
                "loaded {}: {} rows, {} value columns",
                dataset,
                table.len(),
                table.value_columns().len()
            );
            if table.latest_column().is_none() {
                log::warn!("{} has no value columns", dataset);
            }
            tables.push((dataset, table));
        }
        let reg = Self::from_tables(tables)?;
        log::info!("all datasets loaded, {} countries available", reg.countries.len());
        Ok(reg)
    }

    /// Build from already-loaded tables. The country list comes from the reference table when
    /// it is among them, and is empty otherwise. Repeated names keep their first position.
    pub fn from_tables<I>(tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Dataset, Table)>,
    {
        let tables: BTreeMap<Dataset, Table> = tables.into_iter().collect();
        let countries = match tables.get(&Dataset::REFERENCE) {
            Some(reference) => {
                reference.identifier_column()?;
                let mut seen = AHashSet::new();
                reference
                    .rows()
                    .filter_map(|r| r.key())
                    .filter(|k| seen.insert(k.clone()))
                    .collect()
            }
            None => Vec::new(),
        };
        Ok(Self { tables, countries })
    }

    /// Table by dataset name.
    pub fn get_table(&self, name: &str) -> Result<&Table> {
        let dataset: Dataset = name.parse()?;
        self.table(dataset)
    }

    pub fn table(&self, dataset: Dataset) -> Result<&Table> {
        self.tables
            .get(&dataset)
            .ok_or_else(|| ExplorerError::dataset_not_found(dataset.as_str()))
    }

    /// Datasets present, in menu order.
    pub fn datasets(&self) -> impl Iterator<Item = Dataset> + '_ {
        self.tables.keys().copied()
    }

    /// Canonical country list in reference-table row order.
    pub fn country_list(&self) -> &[String] {
        &self.countries
    }

    pub fn tag_for(&self, country: &str) -> &'static str {
        tag_for(country)
    }

    /// Resolve user input to a country in the list: a 1-based index, an exact name, or a
    /// case-insensitive name.
    pub fn resolve_country(&self, input: &str) -> Result<&str> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.countries.get(i))
                .map(String::as_str)
                .ok_or_else(|| ExplorerError::country_not_found(input));
        }
        self.countries
            .iter()
            .find(|c| c.as_str() == input)
            .or_else(|| self.countries.iter().find(|c| c.eq_ignore_ascii_case(input)))
            .map(String::as_str)
            .ok_or_else(|| ExplorerError::country_not_found(input))
    }
}
