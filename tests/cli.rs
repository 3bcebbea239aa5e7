use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_data(dir: &Path) {
    fs::write(
        dir.join("expectativa_vida.csv"),
        "geo,name,2019,2020\nbra,Brazil,75.3,75.9\nchl,Chile,80.1,80.6\nxyz,Atlantis,70,\n",
    )
    .unwrap();
    fs::write(
        dir.join("forca_de_trabalho.csv"),
        "name,2019,2020\nBrazil,62.1,60.3\nChile,61,59.5\n",
    )
    .unwrap();
    fs::write(
        dir.join("pib_per_capita.csv"),
        "country,2021\nBrazil,8900.5\nChile,16000\n",
    )
    .unwrap();
    fs::write(dir.join("populacao.csv"), "name,2020\nBrazil,212559409\n").unwrap();
    fs::write(
        dir.join("setores_economicos.csv"),
        "pais,ano,agricultura,industria,servicos\nBrazil,2020,6.6,17.7,62.8\n",
    )
    .unwrap();
}

fn lmx(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lmx").unwrap();
    cmd.env("LMX_DATA_DIR", dir);
    cmd
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("lmx").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("lmx"));
}

#[test]
fn lists_countries_with_tags() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    lmx(dir.path())
        .arg("countries")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. [BRA] Brazil"))
        .stdout(predicate::str::contains(" 3. [??] Atlantis"));
}

#[test]
fn latest_as_json_and_exported() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    let out = dir.path().join("gdp.csv");
    lmx(dir.path())
        .args(["--json", "latest", "pib", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"year\": \"2021\""));
    let txt = fs::read_to_string(&out).unwrap();
    assert!(txt.contains("pib,Chile,2021,16000"));
}

#[test]
fn country_history_and_invalid_year() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    lmx(dir.path())
        .args(["country", "Brazil", "--dataset", "pib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$8,900.50"));
    lmx(dir.path())
        .args(["country", "1", "--dataset", "expectativa_vida", "--year", "1990"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid period: 2019 - 2020"));
}

#[test]
fn correlation_reports_labels() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    lmx(dir.path())
        .args(["correlate", "expectativa_vida", "expectativa_vida"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strong positive"));
}

#[test]
fn insufficient_data_is_not_a_failure() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    lmx(dir.path())
        .args(["correlate", "populacao", "pib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not computable"));
}

#[test]
fn missing_data_directory_fails_at_startup() {
    let dir = tempdir().unwrap();
    lmx(&dir.path().join("nope"))
        .arg("countries")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading datasets"));
}

#[test]
fn unknown_dataset_fails() {
    let dir = tempdir().unwrap();
    write_data(dir.path());
    lmx(dir.path())
        .args(["summary", "gdp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dataset `gdp` not found"));
}
