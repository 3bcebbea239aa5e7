use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lmx_rs::analysis::{self, computable};
use lmx_rs::format::{format_value, sector_table, trim_float};
use lmx_rs::{query, storage};
use lmx_rs::{CsvDirectory, Dataset, Registry};
use serde::Serialize;
use std::path::PathBuf;

/// Years shown by `country --dataset` when no single year is requested.
const HISTORY_YEARS: usize = 15;

#[derive(Parser, Debug)]
#[command(
    name = "lmx",
    version,
    about = "Explore labor-market indicators (life expectancy, labor force, GDP, population, sectors) by country"
)]
struct Cli {
    /// Directory holding the five dataset CSV files.
    #[arg(long, env = "LMX_DATA_DIR", default_value = "dados", global = true)]
    data_dir: PathBuf,
    /// Print results as pretty JSON instead of text.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available countries with their tags.
    Countries,
    /// Latest-year value of one dataset for every country (and optionally save it).
    Latest(LatestArgs),
    /// Data for one country: all datasets, one dataset's history, or a single year.
    Country(CountryArgs),
    /// Agriculture / industry / services shares for one country.
    Sectors {
        /// Country name or its number in `countries`.
        country: String,
    },
    /// Descriptive statistics of a dataset's latest year.
    Summary {
        dataset: String,
    },
    /// Mean of VALUE weighted by WEIGHT across countries present in both.
    WeightedMean {
        value: String,
        weight: String,
    },
    /// Pearson correlation between two datasets across countries.
    Correlate {
        x: String,
        y: String,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct LatestArgs {
    /// Dataset name (expectativa_vida, forca_trabalho, pib, populacao, setores_economicos).
    dataset: String,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct CountryArgs {
    /// Country name or its number in `countries`.
    country: String,
    /// Restrict to one dataset.
    #[arg(short, long)]
    dataset: Option<String>,
    /// Single year label (requires --dataset).
    #[arg(short, long, requires = "dataset")]
    year: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let reg = Registry::load(&CsvDirectory::new(&cli.data_dir))
        .with_context(|| format!("loading datasets from {}", cli.data_dir.display()))?;

    match cli.cmd {
        Command::Countries => cmd_countries(&reg, cli.json),
        Command::Latest(args) => cmd_latest(&reg, args, cli.json),
        Command::Country(args) => cmd_country(&reg, args, cli.json),
        Command::Sectors { country } => {
            let country = reg.resolve_country(&country)?;
            let b = query::sector_breakdown(&reg, country)?;
            emit(cli.json, &b, || {
                format!("{} {}\n{}", reg.tag_for(country), country, sector_table(&b))
            })
        }
        Command::Summary { dataset } => {
            let ds: Dataset = dataset.parse()?;
            let Some(s) = computable(analysis::describe(&reg, ds))? else {
                return not_computable(ds.as_str());
            };
            emit(cli.json, &s, || {
                let mut out = format!(
                    "{} ({})\n  countries: {} (skipped {})\n  min: {}\n  max: {}\n  mean: {}\n  median: {}\n",
                    ds.label(),
                    s.year.as_deref().unwrap_or("-"),
                    s.count,
                    s.skipped,
                    trim_float(s.min),
                    trim_float(s.max),
                    trim_float(s.mean),
                    trim_float(s.median),
                );
                match (s.variance, s.std_dev) {
                    (Some(v), Some(sd)) => out.push_str(&format!(
                        "  variance: {}\n  std dev: {}",
                        trim_float(v),
                        trim_float(sd)
                    )),
                    _ => out.push_str("  variance: not computable"),
                }
                out
            })
        }
        Command::WeightedMean { value, weight } => {
            let (v, w): (Dataset, Dataset) = (value.parse()?, weight.parse()?);
            let Some(m) = computable(analysis::weighted_mean(&reg, v, w))? else {
                return not_computable("weighted mean");
            };
            emit(cli.json, &m, || {
                format!(
                    "weighted mean of {} ({}) by {} ({}): {} over {} countries",
                    v,
                    m.value_year.as_deref().unwrap_or("-"),
                    w,
                    m.weight_year.as_deref().unwrap_or("-"),
                    trim_float(m.value),
                    m.count
                )
            })
        }
        Command::Correlate { x, y } => {
            let (dx, dy): (Dataset, Dataset) = (x.parse()?, y.parse()?);
            let Some(c) = computable(analysis::correlation(&reg, dx, dy))? else {
                return not_computable("correlation");
            };
            emit(cli.json, &c, || {
                format!(
                    "r({} {}, {} {}) = {:.4} over {} countries: {} {}",
                    dx,
                    c.x_year.as_deref().unwrap_or("-"),
                    dy,
                    c.y_year.as_deref().unwrap_or("-"),
                    c.r,
                    c.count,
                    c.strength,
                    c.direction
                )
            })
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn not_computable(what: &str) -> Result<()> {
    println!("{what}: not computable (not enough numeric data)");
    Ok(())
}

fn cmd_countries(reg: &Registry, json: bool) -> Result<()> {
    let list = reg.country_list();
    emit(json, &list, || {
        let mut out = format!("{} countries available:", list.len());
        for (i, c) in list.iter().enumerate() {
            out.push_str(&format!("\n{:2}. {} {}", i + 1, reg.tag_for(c), c));
        }
        out
    })
}

fn cmd_latest(reg: &Registry, args: LatestArgs, json: bool) -> Result<()> {
    let ds: Dataset = args.dataset.parse()?;
    let latest = query::latest_values(reg, ds)?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&latest, path)?,
            "json" => storage::save_json(&latest, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", latest.len(), path.display());
    }

    emit(json, &latest, || match latest.year.as_deref() {
        None => format!("{}: no data columns available", ds.label()),
        Some(year) => {
            let mut out = format!("{} - all countries, year {}", ds.label(), year);
            for o in &latest.values {
                out.push_str(&format!(
                    "\n{} {}: {}",
                    reg.tag_for(&o.country),
                    o.country,
                    format_value(ds, &o.value)
                ));
            }
            out
        }
    })
}

fn cmd_country(reg: &Registry, args: CountryArgs, json: bool) -> Result<()> {
    let country = reg.resolve_country(&args.country)?;
    let tag = reg.tag_for(country);

    let Some(ds) = args.dataset.as_deref() else {
        let snap = query::country_all_data(reg, country);
        return emit(json, &snap, || {
            let mut out = format!("{tag} {country}");
            for v in &snap.values {
                out.push_str(&format!(
                    "\n  {} ({}): {}",
                    v.dataset.label(),
                    v.year,
                    format_value(v.dataset, &v.value)
                ));
            }
            out
        });
    };
    let ds: Dataset = ds.parse()?;

    if let Some(year) = args.year.as_deref() {
        let cell = query::country_value_at(reg, ds, country, year)?;
        return emit(json, &cell, || {
            format!("{tag} {country} - {} {year}: {}", ds.label(), format_value(ds, &cell))
        });
    }

    let hist = query::country_history(reg, ds, country)?;
    emit(json, &hist, || {
        let mut out = format!("{tag} {country} - {}", ds.label());
        for p in hist.recent(HISTORY_YEARS).iter().filter(|p| !p.value.is_missing()) {
            out.push_str(&format!("\n{:<8} {}", p.year, format_value(ds, &p.value)));
        }
        out
    })
}
