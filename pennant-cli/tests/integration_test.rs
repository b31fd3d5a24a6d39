//! Integration tests for the pennant binary
//!
//! Drives a league file through a full year: init, new season, simulation,
//! standings and end of season.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn league_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "pennant-cli-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn pennant(league: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pennant"))
        .arg("--league")
        .arg(league)
        .args(["--seed", "7"])
        .args(args)
        .output()
        .expect("failed to run pennant")
}

fn pennant_json(league: &Path, args: &[&str]) -> Value {
    let mut full = args.to_vec();
    full.push("--json");
    let output = pennant(league, &full);
    assert!(
        output.status.success(),
        "pennant {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ============================================================================
// COMMANDS
// ============================================================================

#[test]
fn test_full_year_through_cli() {
    let league = league_path("year");

    let clubs = pennant_json(&league, &["init"]);
    assert_eq!(clubs.as_array().map(|c| c.len()), Some(28));

    let created = pennant_json(&league, &["new-season", "--year", "2025"]);
    let upper = created[0]["season"]["id"].as_u64().unwrap();
    let lower = created[1]["season"]["id"].as_u64().unwrap();
    assert_eq!(created[0]["fixture_count"], 198);
    let (upper, lower) = (upper.to_string(), lower.to_string());

    let round = pennant_json(&league, &["sim-round", "--season", &upper]);
    assert_eq!(round["matches_played"], 9);
    assert_eq!(round["round_advanced"], true);

    let status = pennant_json(&league, &["status", "--season", &upper]);
    assert_eq!(status["current_round"], 2);

    let season = pennant_json(&league, &["sim-season", "--season", &upper]);
    assert_eq!(season["rounds_simulated"], 21);
    pennant_json(&league, &["sim-season", "--season", &lower]);

    let ladder = pennant_json(&league, &["ladder", "--season", &upper]);
    assert_eq!(ladder[0]["position"], 1);
    assert_eq!(ladder.as_array().map(|l| l.len()), Some(18));

    let finals = pennant_json(&league, &["finals", "--season", &upper]);
    assert_eq!(finals["qualifying_finals"][0]["label"], "QF1");

    let zones = pennant_json(&league, &["zones", "--season", &lower]);
    assert_eq!(zones["relegation_zone"].as_array().map(|z| z.len()), Some(2));

    let advance = pennant_json(&league, &["advance", "--season", &upper]);
    assert_eq!(advance["advanced"], false);
    assert_eq!(advance["reason"], "Season is complete");

    let rollover = pennant_json(
        &league,
        &["end-season", "--upper", &upper, "--lower", &lower],
    );
    assert_eq!(rollover["clubs_relegated"], 2);
    assert_eq!(rollover["clubs_promoted"], 2);

    let active = pennant_json(&league, &["active"]);
    assert_eq!(active.as_array().map(|a| a.len()), Some(0));

    let _ = std::fs::remove_file(&league);
}

#[test]
fn test_fixture_commands() {
    let league = league_path("fixtures");
    pennant_json(&league, &["init"]);
    let created = pennant_json(
        &league,
        &["new-season", "--year", "2025", "--tier", "lower", "--no-fixtures"],
    );
    let season = created[0]["season"]["id"].as_u64().unwrap().to_string();
    assert_eq!(created[0]["fixtures_generated"], false);

    let fixtures = pennant_json(&league, &["fixtures", "--season", &season]);
    assert_eq!(fixtures.as_array().map(|f| f.len()), Some(100));

    // Generating again is refused
    let again = pennant(&league, &["fixtures", "--season", &season]);
    assert!(!again.status.success());

    let regenerated = pennant_json(&league, &["fixtures", "--season", &season, "--regenerate"]);
    assert_eq!(regenerated.as_array().map(|f| f.len()), Some(100));

    let round = pennant_json(&league, &["round", "--season", &season, "--round", "3"]);
    assert_eq!(round["fixtures"].as_array().map(|f| f.len()), Some(5));

    let cleared = pennant_json(&league, &["fixtures", "--season", &season, "--clear"]);
    assert_eq!(cleared["removed"], 100);

    let _ = std::fs::remove_file(&league);
}

#[test]
fn test_sim_match_and_errors() {
    let league = league_path("match");
    pennant_json(&league, &["init"]);

    let report = pennant_json(
        &league,
        &["sim-match", "--home", "1", "--away", "2", "--conditions", "wet"],
    );
    assert_eq!(report["conditions"], "wet");
    assert_eq!(report["quarters"].as_array().map(|q| q.len()), Some(4));

    let same = pennant(&league, &["sim-match", "--home", "1", "--away", "1"]);
    assert!(!same.status.success());

    let missing = pennant(&league, &["status", "--season", "99"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("season 99 not found"));

    // init refuses to clobber an existing league
    let clobber = pennant(&league, &["init"]);
    assert!(!clobber.status.success());

    let _ = std::fs::remove_file(&league);
}

#[test]
fn test_game_status_form_and_stats() {
    let league = league_path("overview");
    pennant_json(&league, &["init"]);

    let empty = pennant_json(&league, &["game-status"]);
    assert_eq!(empty["state"], "no_active_seasons");

    let created = pennant_json(&league, &["new-season", "--year", "2025"]);
    let upper = created[0]["season"]["id"].as_u64().unwrap().to_string();

    let status = pennant_json(&league, &["game-status"]);
    assert_eq!(status["state"], "active");
    assert_eq!(status["total_active_seasons"], 2);
    assert_eq!(status["next_actions"][0]["action"], "simulate_round");
    assert_eq!(status["next_actions"][0]["round"], 1);

    let round = pennant_json(&league, &["sim-round", "--season", &upper]);
    let fixture = round["results"][0]["fixture_id"].as_u64().unwrap().to_string();
    let home = round["results"][0]["home_id"].as_u64().unwrap().to_string();

    let stats = pennant_json(&league, &["stats", "--fixture", &fixture]);
    assert_eq!(stats.as_array().map(|s| s.len()), Some(44));

    let form = pennant_json(&league, &["form", "--club", &home]);
    assert_eq!(form["recent_form"].as_str().map(|f| f.len()), Some(1));
    assert_eq!(form["recent_results"][0]["at_home"], true);
    assert!(form["ladder_position"].is_u64());
    assert!(!form["key_players"].as_array().unwrap().is_empty());

    let text = pennant(&league, &["game-status"]);
    assert!(text.status.success());
    assert!(String::from_utf8_lossy(&text.stdout).contains("Simulate round 2"));

    let missing = pennant(&league, &["form", "--club", "999"]);
    assert!(!missing.status.success());

    let _ = std::fs::remove_file(&league);
}

#[test]
fn test_rivalry_option_schedules_pair() {
    let league = league_path("rivalry");
    let clubs = pennant_json(&league, &["init"]);
    let upper: Vec<&Value> = clubs
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["tier"] == "Upper")
        .collect();
    let (home, away) = (&upper[0], &upper[1]);
    let pair = format!(
        "{},{}",
        home["name"].as_str().unwrap(),
        away["name"].as_str().unwrap()
    );

    let created = pennant_json(
        &league,
        &["new-season", "--year", "2025", "--tier", "upper", "--rivalry", &pair],
    );
    let season = created[0]["season"]["id"].as_u64().unwrap().to_string();

    // 18 clubs cycle in 17 rounds; the rivalry opens each extra round
    for round in 18..=22 {
        let fixtures = pennant_json(
            &league,
            &["round", "--season", &season, "--round", &round.to_string()],
        );
        let scheduled = fixtures["fixtures"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["home_id"] == home["id"] && f["away_id"] == away["id"]);
        assert!(scheduled, "rivalry missing from round {}", round);
    }

    let bad = pennant(&league, &["active", "--rivalry", "no-comma"]);
    assert!(!bad.status.success());

    let _ = std::fs::remove_file(&league);
}
