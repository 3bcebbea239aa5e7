//! Text rendering for values and result structs.
//!
//! Kept separate from the engines so they only ever hand out plain data.

use crate::models::{Cell, Dataset, ValueKind};
use crate::query::SectorBreakdown;
use num_format::{Locale, ToFormattedString};

/// Fixed decimals with thousands separators, e.g. `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut res = match int_part.parse::<u64>() {
        Ok(int_val) => int_val.to_formatted_string(&Locale::en),
        // beyond u64: leave the digits ungrouped
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if n.is_sign_negative() && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{res}")
    } else {
        res
    }
}

/// Render a number the way the dataset is read: currency, headcount, percent or years.
pub fn format_kind(kind: ValueKind, v: f64) -> String {
    match kind {
        ValueKind::Currency => {
            let body = format_number(v, 2);
            match body.strip_prefix('-') {
                Some(rest) => format!("-${rest}"),
                None => format!("${body}"),
            }
        }
        ValueKind::Headcount => format!("{} people", format_number(v.trunc(), 0)),
        ValueKind::Percent => format!("{}%", trim_float(v)),
        ValueKind::Years => format!("{} years", trim_float(v)),
    }
}

/// Render a cell of `dataset`. Text cells are shown verbatim, missing ones as `n/a`.
pub fn format_value(dataset: Dataset, cell: &Cell) -> String {
    match cell {
        Cell::Number(v) => format_kind(dataset.value_kind(), *v),
        Cell::Text(s) => s.clone(),
        Cell::Missing => "n/a".to_string(),
    }
}

/// Up to 4 decimals, trailing zeros trimmed.
pub fn trim_float(x: f64) -> String {
    if !x.is_finite() {
        return "NA".to_string();
    }
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn pct(v: Option<f64>) -> String {
    v.map(|x| format!("{:.2}%", x)).unwrap_or_else(|| "n/a".into())
}

/// Two-column sector table per year with a computed total row.
pub fn sector_table(b: &SectorBreakdown) -> String {
    let mut out = String::new();
    for s in &b.years {
        out.push_str(&format!("{}\n", s.year));
        out.push_str(&format!("  {:<14}{:>10}\n", "Sector", "Share"));
        out.push_str(&format!("  {:<14}{:>10}\n", "Agriculture", pct(s.agriculture)));
        out.push_str(&format!("  {:<14}{:>10}\n", "Industry", pct(s.industry)));
        out.push_str(&format!("  {:<14}{:>10}\n", "Services", pct(s.services)));
        out.push_str(&format!("  {:<14}{:>10}\n", "Total", format!("{:.1}%", s.total)));
    }
    out
}
