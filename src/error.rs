//! Error taxonomy shared by the loader, the registry, and both engines.
//!
//! Only [`ExplorerError::Load`] and [`ExplorerError::Schema`] are hard failures; everything
//! else is a "no result" signal the caller is expected to report and move on from.

use thiserror::Error;

/// What kind of thing a [`ExplorerError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Dataset,
    Country,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundKind::Dataset => f.write_str("dataset"),
            NotFoundKind::Country => f.write_str("country"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("failed to load dataset `{dataset}`: {reason}")]
    Load { dataset: String, reason: String },

    #[error("{kind} `{name}` not found")]
    NotFound { kind: NotFoundKind, name: String },

    #[error("year `{year}` is not available in `{dataset}` (valid period: {})", fmt_range(.first, .last))]
    InvalidYear {
        dataset: String,
        year: String,
        first: Option<String>,
        last: Option<String>,
    },

    #[error("{statistic} is not computable: {reason}")]
    InsufficientData {
        statistic: &'static str,
        reason: String,
    },

    #[error("table `{table}` has no usable schema: {reason}")]
    Schema { table: String, reason: String },
}

fn fmt_range(first: &Option<String>, last: &Option<String>) -> String {
    match (first, last) {
        (Some(a), Some(b)) => format!("{a} - {b}"),
        _ => "none".to_string(),
    }
}

impl ExplorerError {
    pub fn dataset_not_found(name: impl Into<String>) -> Self {
        ExplorerError::NotFound {
            kind: NotFoundKind::Dataset,
            name: name.into(),
        }
    }

    pub fn country_not_found(name: impl Into<String>) -> Self {
        ExplorerError::NotFound {
            kind: NotFoundKind::Country,
            name: name.into(),
        }
    }

    pub fn insufficient(statistic: &'static str, reason: impl Into<String>) -> Self {
        ExplorerError::InsufficientData {
            statistic,
            reason: reason.into(),
        }
    }

    /// True for the "no result" family: missing keys, bad year labels, too little data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExplorerError::NotFound { .. }
                | ExplorerError::InvalidYear { .. }
                | ExplorerError::InsufficientData { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
