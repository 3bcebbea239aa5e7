use lmx_rs::table::Table;
use lmx_rs::{Cell, ExplorerError};

#[test]
fn identifier_column_follows_name_pais_country_priority() {
    let t = Table::from_text_rows(
        "t",
        &["country", "pais", "name", "2020"],
        &[vec!["a", "b", "c", "1"]],
    );
    assert_eq!(t.identifier_column().unwrap(), "name");

    let t = Table::from_text_rows("t", &["country", "pais", "2020"], &[]);
    assert_eq!(t.identifier_column().unwrap(), "pais");

    let t = Table::from_text_rows("t", &["geo", "country", "2020"], &[]);
    assert_eq!(t.identifier_column().unwrap(), "country");
}

#[test]
fn missing_identifier_is_a_schema_error() {
    let t = Table::from_text_rows("orphan", &["geo", "2019", "2020"], &[vec!["x", "1", "2"]]);
    match t.identifier_column() {
        Err(ExplorerError::Schema { table, .. }) => assert_eq!(table, "orphan"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn value_columns_skip_structural_and_identifier_variants() {
    let t = Table::from_text_rows(
        "t",
        &["geo", "name", "1990", "country", "ano", "2000", "2010"],
        &[],
    );
    assert_eq!(t.value_columns(), vec!["1990", "2000", "2010"]);
    assert_eq!(t.latest_column(), Some("2010"));
    assert_eq!(t.year_range(), Some(("1990", "2010")));
    assert!(t.is_value_column("2000"));
    assert!(!t.is_value_column("ano"));
}

#[test]
fn table_without_value_columns_is_valid() {
    let t = Table::from_text_rows("t", &["geo", "name"], &[vec!["bra", "Brazil"]]);
    assert!(t.value_columns().is_empty());
    assert_eq!(t.latest_column(), None);
    assert_eq!(t.year_range(), None);
}

#[test]
fn first_duplicate_identifier_wins() {
    let t = Table::from_text_rows(
        "t",
        &["name", "2020"],
        &[vec!["Brazil", "1"], vec!["Brazil", "2"], vec!["Chile", "3"]],
    );
    assert_eq!(t.row_for("Brazil").unwrap().get("2020"), &Cell::Number(1.0));
    assert_eq!(t.rows_for("Brazil").count(), 2);
    assert!(t.row_for("Peru").is_none());
}

#[test]
fn short_rows_are_padded_with_missing() {
    let t = Table::from_text_rows("t", &["name", "2019", "2020"], &[vec!["Chile", "4"]]);
    let row = t.row_for("Chile").unwrap();
    assert_eq!(row.get("2019"), &Cell::Number(4.0));
    assert!(row.get("2020").is_missing());
    assert!(row.get("no_such_column").is_missing());
}

#[test]
fn cells_are_classified_once() {
    assert_eq!(Cell::parse(""), Cell::Missing);
    assert_eq!(Cell::parse(" NA "), Cell::Missing);
    assert_eq!(Cell::parse("nan"), Cell::Missing);
    assert_eq!(Cell::parse(" 12.5 "), Cell::Number(12.5));
    assert_eq!(Cell::parse("-3"), Cell::Number(-3.0));
    assert_eq!(Cell::parse("1.2M"), Cell::Text("1.2M".into()));
    assert_eq!(Cell::parse("1.2M").as_f64(), None);
    assert_eq!(Cell::Number(2.0).as_key().as_deref(), Some("2"));
    assert_eq!(Cell::Missing.as_key(), None);
}
