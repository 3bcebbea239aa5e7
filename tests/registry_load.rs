use lmx_rs::error::NotFoundKind;
use lmx_rs::registry::{UNKNOWN_TAG, tag_for};
use lmx_rs::table::Table;
use lmx_rs::{CsvDirectory, Dataset, ExplorerError, Registry};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("expectativa_vida.csv"),
        "geo,name,2019,2020\nbra,Brazil,75.3,75.9\nchl,Chile,80.1,\nxyz,Atlantis,70,71\n",
    )
    .unwrap();
    fs::write(
        dir.join("forca_de_trabalho.csv"),
        "name,2019,2020\nBrazil,62.1,60.3\nChile,61,59.5\n",
    )
    .unwrap();
    fs::write(
        dir.join("pib_per_capita.csv"),
        "country,2018,2021\nBrazil,9000,8900.5\nChile,15000,16000\n",
    )
    .unwrap();
    fs::write(
        dir.join("populacao.csv"),
        "geo,name,2020\nbra,Brazil,212559409\nchl,Chile,19116209\n",
    )
    .unwrap();
    fs::write(
        dir.join("setores_economicos.csv"),
        "pais,ano,agricultura,industria,servicos\nBrazil,2019,5.9,17.9,63\nBrazil,2020,6.6,17.7,62.8\n",
    )
    .unwrap();
}

#[test]
fn loads_all_datasets_and_keeps_reference_row_order() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let reg = Registry::load(&CsvDirectory::new(dir.path())).unwrap();

    assert_eq!(reg.country_list(), ["Brazil", "Chile", "Atlantis"]);
    // stable across calls
    assert_eq!(reg.country_list(), reg.country_list());
    assert_eq!(reg.datasets().collect::<Vec<_>>(), Dataset::ALL.to_vec());

    let pib = reg.get_table("pib").unwrap();
    assert_eq!(pib.identifier_column().unwrap(), "country");
    assert_eq!(pib.latest_column(), Some("2021"));
}

#[test]
fn unknown_dataset_is_not_found() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let reg = Registry::load(&CsvDirectory::new(dir.path())).unwrap();
    match reg.get_table("gdp") {
        Err(ExplorerError::NotFound { kind, name }) => {
            assert_eq!(kind, NotFoundKind::Dataset);
            assert_eq!(name, "gdp");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn one_missing_file_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("populacao.csv")).unwrap();
    let err = Registry::load(&CsvDirectory::new(dir.path())).unwrap_err();
    match &err {
        ExplorerError::Load { dataset, reason } => {
            assert_eq!(dataset, "populacao");
            assert!(reason.contains("populacao.csv"), "reason: {reason}");
        }
        other => panic!("expected Load, got {other:?}"),
    }
    assert!(!err.is_recoverable());
}

#[test]
fn reference_without_identifier_is_a_schema_error() {
    let t = Table::from_text_rows("expectativa_vida", &["geo", "2020"], &[vec!["bra", "75"]]);
    let err = Registry::from_tables([(Dataset::ExpectativaVida, t)]).unwrap_err();
    assert!(matches!(err, ExplorerError::Schema { .. }));
}

#[test]
fn registry_without_reference_has_empty_country_list() {
    let t = Table::from_text_rows("pib", &["name", "2020"], &[vec!["Brazil", "1"]]);
    let reg = Registry::from_tables([(Dataset::Pib, t)]).unwrap();
    assert!(reg.country_list().is_empty());
    assert!(reg.table(Dataset::Pib).is_ok());
    assert!(matches!(
        reg.table(Dataset::Populacao),
        Err(ExplorerError::NotFound { .. })
    ));
}

#[test]
fn tags_fall_back_to_sentinel() {
    assert_eq!(tag_for("Brazil"), "[BRA]");
    assert_eq!(tag_for("UK"), "[GBR]");
    assert_eq!(tag_for("Switzerland"), "[CHE]");
    assert_eq!(tag_for("Atlantis"), UNKNOWN_TAG);
    assert_eq!(tag_for(""), "[??]");
    assert_eq!(Registry::default().tag_for("brazil"), "[??]");
}

#[test]
fn resolve_country_by_number_or_name() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let reg = Registry::load(&CsvDirectory::new(dir.path())).unwrap();

    assert_eq!(reg.resolve_country("2").unwrap(), "Chile");
    assert_eq!(reg.resolve_country("Brazil").unwrap(), "Brazil");
    assert_eq!(reg.resolve_country(" atlantis ").unwrap(), "Atlantis");
    assert!(matches!(
        reg.resolve_country("0"),
        Err(ExplorerError::NotFound { .. })
    ));
    assert!(matches!(
        reg.resolve_country("4"),
        Err(ExplorerError::NotFound { .. })
    ));
    assert!(reg.resolve_country("Peru").unwrap_err().is_recoverable());
}

#[test]
fn dataset_names_parse() {
    assert_eq!("pib".parse::<Dataset>().unwrap(), Dataset::Pib);
    assert_eq!(
        " SETORES_ECONOMICOS ".parse::<Dataset>().unwrap(),
        Dataset::SetoresEconomicos
    );
    assert!("gdp".parse::<Dataset>().is_err());
    assert_eq!(Dataset::ForcaTrabalho.file_name(), "forca_de_trabalho.csv");
}
