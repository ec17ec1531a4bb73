//! End-to-end analysis over fixture cross-seed databases.

use std::collections::BTreeSet;

use pollinator_core::testing::fixtures::CrossSeedFixture;
use pollinator_core::{
    analyze, load_records, run_analysis, AnalysisError, AnalysisReport, Config,
    CrossSeedDatabase, DatabaseError, MatchStatus, TorrentEntry,
};

const HASH_X: &str = "1111111111111111111111111111111111111111";
const HASH_Y: &str = "2222222222222222222222222222222222222222";

fn config_for(fixture: &CrossSeedFixture, universe: &[&str]) -> Config {
    let mut config = Config::default();
    config.database.path = fixture.path().to_path_buf();
    config.trackers.universe = universe.iter().map(|s| s.to_string()).collect();
    config
}

fn codes(set: &BTreeSet<pollinator_core::CanonicalTracker>) -> Vec<&str> {
    set.iter().map(|t| t.as_str()).collect()
}

fn find<'a>(report: &'a AnalysisReport, id: &str) -> Option<&'a TorrentEntry> {
    report.entries.iter().find(|e| e.torrent_id == id)
}

/// X matched on AITHER and HUNO, Y matched on all three.
fn two_torrents() -> CrossSeedFixture {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "Movie.X.2021.mkv", Some("/data/movies"));
    fixture.add_torrent(HASH_Y, "Movie.Y.2022.mkv", Some("/data/movies"));

    fixture.add_decision(HASH_X, "https://aither.cc/torrents/download/1", "MATCH", 1_000);
    fixture.add_decision(HASH_X, "https://hawke.uno/torrents/download/2", "MATCH_SIZE_ONLY", 1_000);
    fixture.add_decision(HASH_X, "https://blutopia.cc/torrents/download/3", "NO_MATCH", 1_000);

    fixture.add_decision(HASH_Y, "https://aither.cc/torrents/download/4", "MATCH", 1_000);
    fixture.add_decision(HASH_Y, "https://blutopia.cc/torrents/download/5", "MATCH_PARTIAL", 1_000);
    fixture.add_decision(HASH_Y, "https://hawke.uno/torrents/download/6", "MATCH", 1_000);
    fixture
}

#[test]
fn test_missing_one_tracker_is_retained() {
    let fixture = two_torrents();
    let report = run_analysis(&config_for(&fixture, &["AITHER", "BLU", "HUNO"])).unwrap();

    let x = find(&report, HASH_X).expect("X should be retained");
    assert_eq!(codes(&x.missing_from), vec!["BLU"]);
    assert_eq!(codes(&x.found_on), vec!["AITHER", "HUNO"]);
    assert_eq!(x.file_path, "/data/movies/Movie.X.2021.mkv");
}

#[test]
fn test_found_everywhere_is_excluded() {
    let fixture = two_torrents();
    let report = run_analysis(&config_for(&fixture, &["AITHER", "BLU", "HUNO"])).unwrap();

    assert!(find(&report, HASH_Y).is_none());
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.torrents_analyzed, 2);
    assert_eq!(report.torrents_in_database, 2);
}

#[test]
fn test_empty_universe_is_not_an_error() {
    let fixture = two_torrents();
    let report = run_analysis(&config_for(&fixture, &[])).unwrap();

    assert!(!report.has_trackers());
    assert!(report.entries.is_empty());
}

#[test]
fn test_spellings_collapse_to_one_tracker() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "Show.S01", Some("/data/tv"));
    fixture.add_decision(HASH_X, "blutopia.cc", "MATCH", 1_000);
    fixture.add_decision(HASH_X, "BLU", "MATCH", 2_000);

    let report = run_analysis(&config_for(&fixture, &["BLU", "AITHER"])).unwrap();

    let x = find(&report, HASH_X).unwrap();
    assert_eq!(codes(&x.found_on), vec!["BLU"]);
    assert_eq!(codes(&x.missing_from), vec!["AITHER"]);
}

#[test]
fn test_missing_database_is_reported_with_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.database.path = dir.path().join("absent.db");
    config.trackers.universe = vec!["BLU".to_string()];

    let err = run_analysis(&config).unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Database(DatabaseError::NotFound { .. })
    ));
    assert!(err.to_string().contains("absent.db"));
}

#[test]
fn test_found_and_missing_partition_universe() {
    let fixture = two_torrents();
    fixture.add_torrent("3333", "Other.mkv", None);
    fixture.add_decision("3333", "https://torrentleech.org/x", "MATCH", 1);
    fixture.add_decision("3333", "https://unknown.example/x", "MATCH", 1);

    let config = config_for(&fixture, &["AITHER", "BLU", "HUNO"]);
    let report = run_analysis(&config).unwrap();
    let universe: BTreeSet<_> = report.universe.iter().cloned().collect();

    assert!(!report.entries.is_empty());
    for entry in &report.entries {
        assert!(entry.found_on.is_disjoint(&entry.missing_from));
        let union: BTreeSet<_> = entry.found_on.union(&entry.missing_from).cloned().collect();
        assert_eq!(union, universe);
        assert!(!entry.missing_from.is_empty());
    }
}

#[test]
fn test_result_independent_of_row_order() {
    let forward = CrossSeedFixture::new();
    let backward = CrossSeedFixture::new();
    let decisions = [
        (HASH_X, "https://aither.cc/1", "NO_MATCH", 1_000),
        (HASH_X, "https://aither.cc/1", "MATCH", 2_000),
        (HASH_X, "https://blutopia.cc/2", "MATCH", 1_000),
        (HASH_X, "https://blutopia.cc/2", "NO_MATCH", 1_000),
        (HASH_Y, "https://hawke.uno/3", "MATCH", 5_000),
    ];
    for fixture in [&forward, &backward] {
        fixture.add_torrent(HASH_X, "X.mkv", Some("/d"));
        fixture.add_torrent(HASH_Y, "Y.mkv", Some("/d"));
    }
    for (hash, guid, decision, seen) in decisions {
        forward.add_decision(hash, guid, decision, seen);
    }
    for (hash, guid, decision, seen) in decisions.iter().rev() {
        backward.add_decision(hash, guid, decision, *seen);
    }

    let universe = ["AITHER", "BLU", "HUNO"];
    let a = run_analysis(&config_for(&forward, &universe)).unwrap();
    let b = run_analysis(&config_for(&backward, &universe)).unwrap();

    assert_eq!(a.entries, b.entries);
    let x = find(&a, HASH_X).unwrap();
    assert_eq!(codes(&x.found_on), vec!["AITHER", "BLU"]);
}

#[test]
fn test_latest_decision_wins() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "X.mkv", Some("/d"));
    fixture.add_decision(HASH_X, "https://blutopia.cc/1", "MATCH", 1_000);
    fixture.add_decision(HASH_X, "https://blutopia.cc/1", "NO_MATCH", 9_000);

    let report = run_analysis(&config_for(&fixture, &["BLU"])).unwrap();

    let x = find(&report, HASH_X).unwrap();
    assert!(x.found_on.is_empty());
    assert_eq!(codes(&x.missing_from), vec!["BLU"]);
}

#[test]
fn test_info_hash_exists_counts_only_when_enabled() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "X.mkv", Some("/d"));
    fixture.add_decision(HASH_X, "https://blutopia.cc/1", "INFO_HASH_ALREADY_EXISTS", 1);

    let mut config = config_for(&fixture, &["BLU"]);
    let report = run_analysis(&config).unwrap();
    assert_eq!(report.entries.len(), 1);

    config.analysis.count_existing_info_hash = true;
    let report = run_analysis(&config).unwrap();
    assert!(report.entries.is_empty());
}

#[test]
fn test_unmapped_trackers_are_listed_not_counted() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "X.mkv", Some("/d"));
    fixture.add_decision(HASH_X, "https://mystery.example/t/1", "MATCH", 1);
    fixture.add_decision(HASH_X, "https://blutopia.cc/1", "NO_MATCH", 1);

    let report = run_analysis(&config_for(&fixture, &["BLU"])).unwrap();

    assert!(report.unmapped_trackers.contains("mystery.example"));
    let x = find(&report, HASH_X).unwrap();
    assert_eq!(codes(&x.missing_from), vec!["BLU"]);
}

#[test]
fn test_discover_uses_observed_trackers() {
    let fixture = two_torrents();
    let mut config = config_for(&fixture, &[]);
    config.trackers.discover = true;

    let report = run_analysis(&config).unwrap();

    let universe: Vec<&str> = report.universe.iter().map(|t| t.as_str()).collect();
    assert_eq!(universe, vec!["AITHER", "BLU", "HUNO"]);
    assert_eq!(report.entries.len(), 1);
}

#[test]
fn test_aliases_add_tracker_to_analysis() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent(HASH_X, "X.mkv", Some("/d"));
    fixture.add_decision(HASH_X, "https://newsite.example/t/1", "MATCH", 1);

    let mut config = config_for(&fixture, &["NEW", "BLU"]);
    config
        .trackers
        .aliases
        .insert("NEW".to_string(), vec!["newsite.example".to_string()]);

    let table = config.trackers.table();
    let db = CrossSeedDatabase::open(fixture.path()).unwrap();
    let report = analyze(&db, &config, &table).unwrap();

    let x = find(&report, HASH_X).unwrap();
    assert_eq!(codes(&x.found_on), vec!["NEW"]);
    assert_eq!(codes(&x.missing_from), vec!["BLU"]);
}

#[test]
fn test_old_schema_uses_name_as_path() {
    let fixture = CrossSeedFixture::without_save_path();
    fixture.add_torrent(HASH_X, "Old.Schema.mkv", None);
    fixture.add_decision(HASH_X, "BLU", "NO_MATCH", 1);

    let report = run_analysis(&config_for(&fixture, &["BLU"])).unwrap();

    assert_eq!(find(&report, HASH_X).unwrap().file_path, "Old.Schema.mkv");
}

#[test]
fn test_info_hash_case_is_deduplicated() {
    let fixture = CrossSeedFixture::new();
    fixture.add_torrent("ABCDEF", "X.mkv", Some("/d"));
    fixture.add_torrent("abcdef", "X.mkv", Some("/d"));
    fixture.add_decision("ABCDEF", "https://aither.cc/1", "MATCH", 1);
    fixture.add_decision("abcdef", "https://blutopia.cc/1", "NO_MATCH", 1);

    let report = run_analysis(&config_for(&fixture, &["AITHER", "BLU"])).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].torrent_id, "abcdef");
}

#[test]
fn test_load_records_reads_joined_rows() {
    let fixture = two_torrents();

    let records = load_records(fixture.path()).unwrap();

    assert_eq!(records.len(), 6);
    let x_blu = records
        .iter()
        .find(|r| r.torrent_id == HASH_X && r.tracker_raw.contains("blutopia"))
        .expect("X decision on BLU");
    assert_eq!(x_blu.file_path, "/data/movies/Movie.X.2021.mkv");
    assert_eq!(x_blu.status, MatchStatus::NoMatch);
    assert!(x_blu.observed_at.is_some());
}

#[test]
fn test_load_records_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.db");
    assert!(matches!(
        load_records(&missing),
        Err(DatabaseError::NotFound { .. })
    ));

    let fixture = CrossSeedFixture::empty();
    fixture.execute("CREATE TABLE client_searchee (info_hash TEXT, name TEXT);");
    let err = load_records(fixture.path()).unwrap_err();
    assert!(matches!(err, DatabaseError::Unreadable { .. }));
    assert!(err.to_string().contains("decision"));
}
