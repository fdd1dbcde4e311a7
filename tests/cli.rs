use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn rdash() -> Command {
    Command::cargo_bin("rdash").unwrap()
}

#[test]
fn cli_shows_help() {
    rdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn options_lists_regions_and_years() {
    rdash()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Oceania (2 countries)"))
        .stdout(predicate::str::contains("World (32 countries)"))
        .stdout(predicate::str::contains("Years: 1952..2007"));
}

#[test]
fn show_prints_title_cards_and_page() {
    rdash()
        .args(["show", "--region", "Europe", "--country", "Norway", "--sort", "value:desc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Europe, Norway\n"))
        .stdout(predicate::str::contains("Total Cars"))
        .stdout(predicate::str::contains("page 1 of 3 (36 rows, 15 per page)"));
}

#[test]
fn show_rejects_country_outside_region() {
    rdash()
        .args(["show", "--region", "Asia", "--country", "Norway"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not part of region"));
}

#[test]
fn show_rejects_bad_units_and_years() {
    rdash().args(["show", "--units", "horses"]).assert().failure();
    rdash().args(["show", "--years", "2007:1952"]).assert().failure();
    rdash().args(["show", "--years", "soon"]).assert().failure();
}

#[test]
fn export_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("asia.json");
    rdash()
        .args(["export", "--region", "Asia", "--units", "euro", "--years", "2002:2007", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 2 rows"));
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
}

#[test]
fn export_without_known_extension_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("asia.txt");
    rdash()
        .args(["export", "--region", "Asia", "--units", "euro", "--years", "2002:2007", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 2 rows"));
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("year,region,unit,value"));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn plot_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    rdash()
        .args(["plot", "--region", "World", "--out"])
        .arg(&out)
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("<svg"));
}

#[test]
fn config_and_data_flags_are_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("tiny.csv");
    fs::write(
        &data,
        "country,continent,year,lifeExp,pop,gdpPercap\nA,R,2000,1,10000,100\nB,R,2000,2,20000,200\n",
    )
    .unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "locale = \"de\"\n").unwrap();

    rdash()
        .args(["show", "--config"])
        .arg(&cfg)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("R\n"))
        .stdout(predicate::str::contains("30.000"));
}

#[test]
fn broken_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("bad.toml");
    fs::write(&cfg, "plot_bgcolor = \"blue\"\n").unwrap();
    rdash().args(["options", "--config"]).arg(&cfg).assert().failure();
}
