//! lmx_rs
//!
//! A small Rust library for exploring labor-market indicator tables (life expectancy, labor
//! force participation, GDP per capita, population, economic sectors), each keyed by country
//! and year. Pairs with the `lmx` CLI.
//!
//! ### Features
//! - Load differently-shaped per-indicator CSV tables into one uniform table model
//! - Latest-year snapshots, per-country histories and single-year lookups
//! - Cross-country statistics: mean, variance, weighted mean, Pearson correlation
//! - Export snapshots as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use lmx_rs::{CsvDirectory, Dataset, Registry};
//!
//! let reg = Registry::load(&CsvDirectory::new("dados"))?;
//! let gdp = lmx_rs::query::latest_values(&reg, Dataset::Pib)?;
//! println!("{} countries in {:?}", gdp.len(), gdp.year);
//! let corr = lmx_rs::analysis::correlation(&reg, Dataset::Pib, Dataset::ExpectativaVida)?;
//! println!("r = {:.3} ({} {})", corr.r, corr.strength, corr.direction);
//! # Ok::<(), lmx_rs::ExplorerError>(())
//! ```

pub mod analysis;
pub mod error;
pub mod format;
pub mod models;
pub mod query;
pub mod registry;
pub mod stats;
pub mod storage;
pub mod table;

pub use error::{ExplorerError, Result};
pub use models::{Cell, Dataset};
pub use registry::Registry;
pub use storage::{CsvDirectory, TableSource};
pub use table::Table;
