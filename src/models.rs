use crate::error::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One table cell as read from a source.
///
/// Sources mix numbers, free text and blanks in the same column, so every cell is
/// classified once at load time and numeric filtering happens at the statistic boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

/// Raw spellings treated as "no value".
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

impl Cell {
    /// Classify a raw text field.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if MISSING_MARKERS.contains(&s) {
            return Cell::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(s.to_string()),
        }
    }

    /// Numeric value, if this is a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Cell::Number(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text form used as a lookup key (country names, `ano` labels).
    pub fn as_key(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}

/// The closed set of datasets the explorer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    ExpectativaVida,
    ForcaTrabalho,
    Pib,
    Populacao,
    SetoresEconomicos,
}

/// How a dataset's values are meant to be read; drives formatting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Years,
    Percent,
    Currency,
    Headcount,
}

impl Dataset {
    /// All datasets in menu order.
    pub const ALL: [Dataset; 5] = [
        Dataset::ExpectativaVida,
        Dataset::ForcaTrabalho,
        Dataset::Pib,
        Dataset::Populacao,
        Dataset::SetoresEconomicos,
    ];

    /// Dataset whose identifier column defines the canonical country list.
    pub const REFERENCE: Dataset = Dataset::ExpectativaVida;

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::ExpectativaVida => "expectativa_vida",
            Dataset::ForcaTrabalho => "forca_trabalho",
            Dataset::Pib => "pib",
            Dataset::Populacao => "populacao",
            Dataset::SetoresEconomicos => "setores_economicos",
        }
    }

    /// File name inside a data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::ExpectativaVida => "expectativa_vida.csv",
            Dataset::ForcaTrabalho => "forca_de_trabalho.csv",
            Dataset::Pib => "pib_per_capita.csv",
            Dataset::Populacao => "populacao.csv",
            Dataset::SetoresEconomicos => "setores_economicos.csv",
        }
    }

    /// Human-readable title.
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::ExpectativaVida => "Life expectancy",
            Dataset::ForcaTrabalho => "Labor force participation",
            Dataset::Pib => "GDP per capita",
            Dataset::Populacao => "Population",
            Dataset::SetoresEconomicos => "Economic sectors (agriculture, industry, services)",
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            Dataset::ExpectativaVida => ValueKind::Years,
            Dataset::ForcaTrabalho | Dataset::SetoresEconomicos => ValueKind::Percent,
            Dataset::Pib => ValueKind::Currency,
            Dataset::Populacao => ValueKind::Headcount,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Dataset::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| ExplorerError::dataset_not_found(s.trim()))
    }
}
