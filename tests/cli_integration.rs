#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn songbook(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("songbook"));
    cmd.current_dir(dir)
        .env("SONGBOOK_CONFIG_DIR", dir.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("SONGBOOK_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &Path, args: &[&str]) {
    songbook(dir).arg("add").args(args).assert().success();
}

#[test]
fn add_then_list() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["千本桜", "-p", "花玲", "-l", "日语", "-g", "流行"]);

    songbook(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("千本桜"))
        .stdout(predicate::str::contains("花玲"))
        .stdout(predicate::str::contains("无歌回记录"));

    assert!(temp.path().join("playlist.json").exists());
}

#[test]
fn add_without_performer_is_rejected() {
    let temp = TempDir::new().unwrap();
    songbook(temp.path())
        .args(["add", "Lonely"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!temp.path().join("playlist.json").exists());
}

#[test]
fn unknown_language_filter_matches_untagged_songs() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Tagged", "-p", "花玲", "-l", "日语"]);
    add(temp.path(), &["Untagged", "-p", "花玲"]);

    songbook(temp.path())
        .args(["list", "--language", "未知"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untagged"))
        .stdout(predicate::str::contains("Tagged ").not());

    songbook(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("languages 日语, 未知"));
}

#[test]
fn search_words_all_have_to_match() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Moonlight", "-p", "Ann"]);
    add(temp.path(), &["Moon River", "-p", "Bob"]);

    songbook(temp.path())
        .args(["list", "moon", "ann"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moonlight"))
        .stdout(predicate::str::contains("Moon River").not());

    songbook(temp.path())
        .args(["list", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No songs match the current filters"));
}

#[test]
fn csv_export_escapes_fields() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Hello, World", "-p", "花玲"]);

    songbook(temp.path())
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 songs"));

    let csv = fs::read_to_string(temp.path().join("花玲歌单.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("歌名,歌手,语言,风格,演唱次数,最近演唱"));
    assert!(lines.next().unwrap().starts_with("\"Hello, World\",花玲,"));
}

#[test]
fn export_carries_field_criteria() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Sung", "-p", "花玲", "--live", "2024-01-01,https://b23.tv/a"]);
    add(temp.path(), &["Quiet", "-p", "花玲"]);
    add(temp.path(), &["Elsewhere", "-p", "Bob", "--live", "2024-02-01,https://b23.tv/b"]);

    songbook(temp.path())
        .args(["export", "--performer", "花玲", "--min", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 songs"));

    let csv = fs::read_to_string(temp.path().join("花玲歌单.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("Sung,花玲,"));
}

#[test]
fn export_then_import_json() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["One", "-p", "花玲"]);
    add(temp.path(), &["Two", "-p", "花玲"]);

    let out = temp.path().join("backup.json");
    songbook(temp.path())
        .args(["export", "-f", "json", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    songbook(temp.path())
        .args(["import", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("成功导入 2 首歌曲"));

    songbook(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 首歌曲"))
        .stdout(predicate::str::contains("1 位歌手"));
}

#[test]
fn invalid_import_leaves_catalog_unchanged() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Keep", "-p", "花玲"]);
    let before = fs::read_to_string(temp.path().join("playlist.json")).unwrap();

    let bad = temp.path().join("bad.json");
    fs::write(&bad, "{not json").unwrap();
    songbook(temp.path())
        .args(["import", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("解析JSON失败"));

    let txt = temp.path().join("songs.txt");
    fs::write(&txt, "whatever").unwrap();
    songbook(temp.path())
        .args(["import", txt.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("不支持的文件格式"));

    let after = fs::read_to_string(temp.path().join("playlist.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn delete_twice_is_harmless() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["Gone", "-p", "花玲"]);

    let catalog = fs::read_to_string(temp.path().join("playlist.json")).unwrap();
    let songs: serde_json::Value = serde_json::from_str(&catalog).unwrap();
    let id = songs[0]["id"].as_str().unwrap().to_string();

    songbook(temp.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Song deleted"));

    songbook(temp.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No song with id"));
}

#[test]
fn malformed_catalog_is_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("playlist.json");
    fs::write(&catalog, "[{broken").unwrap();

    songbook(temp.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("无法加载歌单数据"))
        .stdout(predicate::str::contains("No songs found."));

    songbook(temp.path())
        .args(["add", "New", "-p", "花玲"])
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&catalog).unwrap(), "[{broken");
}

#[test]
fn catalog_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    let other = temp.path().join("nested").join("mine.json");

    songbook(temp.path())
        .args(["--catalog", other.to_str().unwrap(), "add", "Elsewhere", "-p", "花玲"])
        .assert()
        .success();

    assert!(other.exists());
    assert!(!temp.path().join("playlist.json").exists());
}

#[test]
fn config_set_and_get() {
    let temp = TempDir::new().unwrap();

    songbook(temp.path())
        .args(["config", "export-name", "backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export-name set to backup"));

    songbook(temp.path())
        .args(["config", "export-name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup"));

    songbook(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog = playlist.json"));

    songbook(temp.path())
        .args(["config", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key: nope"));
}

#[test]
fn clear_with_yes_empties_catalog() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["A", "-p", "x"]);
    add(temp.path(), &["B", "-p", "y"]);

    songbook(temp.path())
        .args(["clear", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 songs"));

    songbook(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No songs found."));
}

#[test]
fn grouped_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    songbook(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}
