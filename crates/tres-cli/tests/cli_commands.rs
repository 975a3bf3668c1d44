//! Integration tests for the tres CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Write a roster with a trespasser, a soft target, and a hard one.
fn test_roster() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    fs::write(
        &path,
        r#"{
  "actors": [
    {
      "id": "vex",
      "name": "Vex",
      "type": "trespasser",
      "system": {
        "stats": { "dexterity": 2, "knowledge": 1, "stamina": 4, "wounds": 3 },
        "resources": { "stamina": { "value": 9 }, "wounds": { "value": 0 } }
      },
      "items": [
        {
          "id": "bow",
          "name": "Bow",
          "type": "weapon",
          "system": { "stat": "dexterity", "damage": "3", "mag": 2, "description": "Yew" }
        },
        { "id": "rope", "name": "Rope", "system": {} }
      ]
    },
    {
      "id": "brute",
      "name": "Brute",
      "type": "npc",
      "system": {
        "stats": { "evade": -100, "armor": 5, "wounds": 4 },
        "resources": { "wounds": { "value": 0, "max": 4 } },
        "derived": { "minorWounds": 2 }
      }
    },
    {
      "id": "wall",
      "name": "Wall",
      "type": "vehicle",
      "system": { "stats": { "evade": 100 } }
    }
  ]
}
"#,
    )
    .unwrap();
    (dir, path)
}

fn read_actor(path: &Path, id: &str) -> Value {
    let roster: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    roster["actors"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == id)
        .cloned()
        .unwrap()
}

fn tres() -> Command {
    Command::cargo_bin("tres").unwrap()
}

// ---------------------------------------------------------------------------
// derive
// ---------------------------------------------------------------------------

#[test]
fn derive_prints_pools() {
    let (_dir, path) = test_roster();
    tres()
        .args(["derive", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Vex")
                .and(predicate::str::contains("4/4"))
                .and(predicate::str::contains("0/3"))
                .and(predicate::str::contains("3 actors")),
        );
}

#[test]
fn derive_without_write_leaves_file() {
    let (_dir, path) = test_roster();
    let before = fs::read_to_string(&path).unwrap();
    tres()
        .args(["derive", path.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn derive_write_saves_clamped_values() {
    let (_dir, path) = test_roster();
    tres()
        .args(["derive", path.to_str().unwrap(), "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let vex = read_actor(&path, "vex");
    let stamina = &vex["system"]["resources"]["stamina"];
    assert_eq!(stamina["value"], 4);
    assert_eq!(stamina["max"], 4);
    assert_eq!(stamina["baseMax"], 4);
    assert_eq!(vex["system"]["resources"]["fate"]["max"], 0);
    assert_eq!(vex["items"][0]["system"]["description"], "Yew");
    assert_eq!(vex["items"][1]["type"], "gear");
}

#[test]
fn derive_rejects_bad_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    fs::write(&path, "{ not json").unwrap();
    tres()
        .args(["derive", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roster"));
}

#[test]
fn derive_missing_file_fails() {
    tres()
        .args(["derive", "/nonexistent/roster.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read roster"));
}

// ---------------------------------------------------------------------------
// challenge
// ---------------------------------------------------------------------------

#[test]
fn challenge_builds_formula() {
    let (_dir, path) = test_roster();
    tres()
        .args([
            "challenge",
            path.to_str().unwrap(),
            "--actor",
            "Vex",
            "--boons",
            "2",
            "--modifier",
            "+1",
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("KNOWLEDGE")
                .and(predicate::str::contains("1d20 + 2d6 + 1 + 1"))
                .and(predicate::str::contains("Total:")),
        );
}

#[test]
fn challenge_clamps_boons_and_reads_negative_modifier() {
    let (_dir, path) = test_roster();
    tres()
        .args([
            "challenge",
            path.to_str().unwrap(),
            "-a",
            "Vex",
            "-s",
            "dexterity",
            "--boons",
            "9",
            "--modifier",
            "-2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1d20 + 3d6 - 2 + 2"));
}

#[test]
fn challenge_is_reproducible_with_seed() {
    let (_dir, path) = test_roster();
    let run = || {
        tres()
            .args(["challenge", path.to_str().unwrap(), "-a", "Vex", "--seed", "42"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn challenge_default_stat_from_config() {
    let (dir, path) = test_roster();
    let config = dir.path().join("rules.json");
    fs::write(&config, r#"{ "defaultChallengeStat": "dexterity" }"#).unwrap();
    tres()
        .args([
            "challenge",
            path.to_str().unwrap(),
            "-a",
            "Vex",
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("DEXTERITY").and(predicate::str::contains("1d20 + 2")),
        );
}

#[test]
fn challenge_unknown_actor_fails() {
    let (_dir, path) = test_roster();
    tres()
        .args(["challenge", path.to_str().unwrap(), "-a", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no actor named 'Nobody'"));
}

// ---------------------------------------------------------------------------
// attack
// ---------------------------------------------------------------------------

#[test]
fn attack_wounds_and_spends_ammo() {
    let (_dir, path) = test_roster();
    tres()
        .args([
            "attack",
            path.to_str().unwrap(),
            "-a",
            "Vex",
            "-w",
            "Bow",
            "-t",
            "Brute",
            "--write",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("HIT")
                .and(predicate::str::contains("vs Armor 5"))
                .and(predicate::str::contains("1 Wound(s)")),
        );

    let brute = read_actor(&path, "brute");
    assert_eq!(brute["system"]["resources"]["wounds"]["value"], 1);
    assert_eq!(brute["system"]["derived"]["minorWounds"], 0);
    let vex = read_actor(&path, "vex");
    assert_eq!(vex["items"][0]["system"]["mag"], 1);
}

#[test]
fn attack_miss_changes_nothing() {
    let (_dir, path) = test_roster();
    tres()
        .args([
            "attack",
            path.to_str().unwrap(),
            "-a",
            "Vex",
            "-w",
            "Bow",
            "-t",
            "Wall",
            "--write",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MISS").and(predicate::str::contains("Damage").not()));

    let vex = read_actor(&path, "vex");
    assert_eq!(vex["items"][0]["system"]["mag"], 2);
}

#[test]
fn attack_without_weapon_warns() {
    let (_dir, path) = test_roster();
    tres()
        .args(["attack", path.to_str().unwrap(), "-a", "Vex"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Select a weapon to attack with."));
}

#[test]
fn attack_unknown_weapon_fails() {
    let (_dir, path) = test_roster();
    tres()
        .args(["attack", path.to_str().unwrap(), "-a", "Vex", "-w", "Cannon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no item named 'Cannon'"));
}

#[test]
fn attack_unknown_target_fails() {
    let (_dir, path) = test_roster();
    tres()
        .args([
            "attack",
            path.to_str().unwrap(),
            "-a",
            "Vex",
            "-w",
            "Bow",
            "-t",
            "Ghost",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no actor named 'Ghost'"));
}

// ---------------------------------------------------------------------------
// sheets
// ---------------------------------------------------------------------------

#[test]
fn sheets_lists_registrations() {
    tres()
        .arg("sheets")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("actor-sheet.hbs")
                .and(predicate::str::contains("760x640"))
                .and(predicate::str::contains("item-sheet.hbs"))
                .and(predicate::str::contains("actor: vehicle")),
        );
}
