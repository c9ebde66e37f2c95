use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Result<Command, Box<dyn Error>> {
    Ok(Command::cargo_bin("uclad-cli")?)
}

#[test]
fn search_prints_relative_locations_in_walk_order() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/.git"))?;
    fs::write(dir.path().join("a/x.txt"), "foo BAR")?;
    fs::write(dir.path().join("a/.git/y.txt"), "foo")?;
    fs::write(dir.path().join("b.txt"), "nothing here\n  FOO later")?;

    cli()?
        .args(["search", "foo", "--root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("a/x.txt:1:1: foo BAR\nb.txt:2:3:   FOO later\n")
                .and(predicate::str::contains("Search \"foo\" (2 hits in 2 files scanned)"))
                .and(predicate::str::contains(".git").not()),
        );

    Ok(())
}

#[test]
fn search_defaults_to_the_workspace_root() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("notes.md"), "Hello world")?;

    cli()?
        .args(["--workspace", dir.path().to_str().unwrap(), "search", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.md:1:1: Hello world"));

    Ok(())
}

#[test]
fn search_without_hits_still_succeeds() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "alpha")?;

    cli()?
        .args(["search", "omega", "--root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("No matches found.\n"));

    Ok(())
}

#[test]
fn search_honours_config_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("vendor"))?;
    fs::create_dir_all(dir.path().join("node_modules"))?;
    fs::write(dir.path().join("vendor/lib.js"), "needle")?;
    fs::write(dir.path().join("node_modules/dep.js"), "needle")?;
    let config = dir.path().join("search.json");
    fs::write(&config, r#"{ "excluded_directories": ["vendor"] }"#)?;

    cli()?
        .args([
            "search",
            "needle",
            "--root",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("node_modules/dep.js:1:1")
                .and(predicate::str::contains("vendor/").not()),
        );

    Ok(())
}

#[test]
fn search_rejects_missing_root_and_empty_query() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing");

    cli()?
        .args(["search", "x", "--root", missing.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot read search root"));

    cli()?
        .args(["search", "", "--root", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));

    Ok(())
}

#[test]
fn ls_lists_directories_first() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("src"))?;
    fs::create_dir(dir.path().join("docs"))?;
    fs::write(dir.path().join("README.md"), "")?;
    fs::write(dir.path().join("app.js"), "")?;

    cli()?
        .args(["ls", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("docs/\nsrc/\napp.js\nREADME.md\n"));

    Ok(())
}

#[test]
fn locate_converts_both_ways() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("poem.txt");
    fs::write(&file, "first line\nsécond line\n")?;

    cli()?
        .args(["locate", file.to_str().unwrap(), "--offset", "14"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Ln 2, Col 3 (offset 14)\n"));

    cli()?
        .args([
            "locate",
            file.to_str().unwrap(),
            "--line",
            "2",
            "--column",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("Ln 2, Col 3 (offset 14)\n"));

    cli()?
        .args(["locate", file.to_str().unwrap(), "--offset", "999"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Ln 3, Col 1 (offset 24)\n"));

    Ok(())
}

#[test]
fn locate_requires_a_position() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("a.txt");
    fs::write(&file, "abc")?;

    cli()?
        .args(["locate", file.to_str().unwrap(), "--line", "1"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn new_creates_an_empty_file_once() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    cli()?
        .args(["new", dir.path().to_str().unwrap(), "index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html [HTML]"));
    assert_eq!(fs::read_to_string(dir.path().join("index.html"))?, "");

    cli()?
        .args(["new", dir.path().to_str().unwrap(), "index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to create index.html"));

    Ok(())
}
