mod common;

use common::*;
use spotistats::{
    analytics::normalize::*,
    error::StatsError,
    types::{RawArtist, RawArtistRef, RawPlayHistoryItem, RawTrack},
};

fn assert_malformed<T: std::fmt::Debug>(result: Result<T, StatsError>, expected_record: &str) {
    match result {
        Err(StatsError::MalformedUpstreamData { record, .. }) => {
            assert_eq!(record, expected_record)
        }
        other => panic!("expected malformed data error, got {other:?}"),
    }
}

#[test]
fn test_normalize_track() {
    let track = normalize_track(&raw_track("abc", "Hyperballad", "Björk", 64), 0).unwrap();

    assert_eq!(track.id.as_deref(), Some("abc"));
    assert_eq!(track.name, "Hyperballad");
    assert_eq!(track.artist, "Björk");
    assert_eq!(track.popularity, Some(64));
}

#[test]
fn test_normalize_track_uses_primary_artist() {
    let mut raw = raw_track("abc", "Duet", "Lead", 40);
    raw.artists.as_mut().unwrap().push(RawArtistRef {
        id: None,
        name: Some("Featured".to_string()),
    });

    assert_eq!(normalize_track(&raw, 0).unwrap().artist, "Lead");
}

#[test]
fn test_normalize_track_missing_popularity() {
    let mut raw = raw_track("abc", "Demo", "Someone", 0);
    raw.popularity = None;

    assert_eq!(normalize_track(&raw, 0).unwrap().popularity, None);
}

#[test]
fn test_normalize_track_rejects_bad_records() {
    let mut missing_name = raw_track("t1", "", "x", 10);
    missing_name.name = None;
    assert_malformed(normalize_track(&missing_name, 2), "track[2] (id t1)");

    let blank_name = raw_track("t1", "   ", "x", 10);
    assert_malformed(normalize_track(&blank_name, 0), "track[0] (id t1)");

    let mut no_artists = raw_track("t2", "Song", "x", 10);
    no_artists.artists = Some(Vec::new());
    assert_malformed(normalize_track(&no_artists, 1), "track[1] (id t2)");

    let mut no_id_no_name = raw_track("t3", "Song", "x", 10);
    no_id_no_name.id = None;
    no_id_no_name.name = None;
    assert_malformed(normalize_track(&no_id_no_name, 4), "track[4]");
}

#[test]
fn test_normalize_track_without_id() {
    let mut local_file = raw_track("x", "Home Recording", "Me", 0);
    local_file.id = None;
    local_file.popularity = None;

    let track = normalize_track(&local_file, 0).unwrap();
    assert_eq!(track.id, None);
    assert_eq!(track.name, "Home Recording");

    let mut blank_id = raw_track("x", "Demo", "Me", 0);
    blank_id.id = Some("  ".to_string());
    assert_eq!(normalize_track(&blank_id, 0).unwrap().id, None);
}

#[test]
fn test_normalize_track_popularity_range() {
    assert!(normalize_track(&raw_track("a", "n", "x", 0), 0).is_ok());
    assert!(normalize_track(&raw_track("a", "n", "x", 100), 0).is_ok());
    assert_malformed(normalize_track(&raw_track("a", "n", "x", 101), 0), "track[0] (id a)");
    assert_malformed(normalize_track(&raw_track("a", "n", "x", -1), 0), "track[0] (id a)");
}

#[test]
fn test_normalize_tracks_fails_on_first_bad_record() {
    let raw = vec![
        raw_track("ok", "Fine", "x", 10),
        RawTrack::default(),
        raw_track("late", "Also Fine", "x", 10),
    ];

    assert_malformed(normalize_tracks(&raw), "track[1]");
}

#[test]
fn test_normalize_artists() {
    let artists = normalize_artists(&[raw_artist("Portishead"), raw_artist("Massive Attack")]).unwrap();
    let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Portishead", "Massive Attack"]);

    let nameless = RawArtist {
        id: Some("x".to_string()),
        name: None,
    };
    assert_malformed(normalize_artists(&[nameless]), "artist[0] (id x)");
}

#[test]
fn test_parse_timestamp_forms() {
    let zulu = parse_timestamp("2024-03-10T08:15:00.123Z").unwrap();
    assert_eq!(zulu, at("2024-03-10T08:15:00.123Z"));

    let offset = parse_timestamp("2024-03-10T10:15:00+02:00").unwrap();
    assert_eq!(offset, at("2024-03-10T08:15:00Z"));

    let naive = parse_timestamp("2024-03-10T08:15:00").unwrap();
    assert_eq!(naive, at("2024-03-10T08:15:00Z"));

    assert!(parse_timestamp("yesterday").is_none());
    assert!(parse_timestamp("").is_none());
}

#[test]
fn test_normalize_play() {
    let event = normalize_play(&raw_play("Roads", "Portishead", "2024-01-02T21:05:00Z"), 0).unwrap();

    assert_eq!(event.track.name, "Roads");
    assert_eq!(event.track.artist, "Portishead");
    assert_eq!(event.played_at, at("2024-01-02T21:05:00Z"));
    assert_eq!(event.hour(), 21);
}

#[test]
fn test_normalize_play_rejects_bad_timestamp() {
    let raw = raw_play("Roads", "Portishead", "02/01/2024 21:05");
    assert_malformed(normalize_play(&raw, 3), "play[3] (id Roads_id)");

    let mut missing = raw_play("Roads", "Portishead", "2024-01-02T21:05:00Z");
    missing.played_at = None;
    assert_malformed(normalize_play(&missing, 0), "play[0] (id Roads_id)");
}

#[test]
fn test_normalize_play_missing_track() {
    let raw = RawPlayHistoryItem {
        track: None,
        played_at: Some("2024-01-02T21:05:00Z".to_string()),
    };
    assert_malformed(normalize_play(&raw, 5), "play[5]");
}

#[test]
fn test_normalize_plays_keeps_order() {
    let raw = vec![
        raw_play("Newest", "x", "2024-01-03T10:00:00Z"),
        raw_play("Oldest", "y", "2024-01-01T10:00:00Z"),
    ];
    let events = normalize_plays(&raw).unwrap();
    assert_eq!(events[0].track.name, "Newest");
    assert_eq!(events[1].track.name, "Oldest");
}

#[test]
fn test_normalize_features_skips_missing_entries() {
    let raw = vec![Some(raw_feature("a", 0.2)), None, Some(raw_feature("c", 0.9))];
    let features = normalize_features(&raw).unwrap();

    let ids: Vec<&str> = features.iter().map(|f| f.track_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn test_normalize_features_range() {
    let mut loud = raw_feature("a", 0.5);
    loud.energy = Some(1.2);
    assert_malformed(normalize_features(&[Some(loud)]), "audio_features[0] (id a)");

    let mut missing = raw_feature("b", 0.5);
    missing.danceability = None;
    assert_malformed(normalize_features(&[None, Some(missing)]), "audio_features[1] (id b)");

    let mut nan = raw_feature("c", 0.5);
    nan.valence = Some(f64::NAN);
    assert_malformed(normalize_features(&[Some(nan)]), "audio_features[0] (id c)");
}

#[test]
fn test_attach_features_pairs_by_id() {
    let tracks = vec![
        track("1", "One", "x", 10),
        track("2", "Two", "x", 20),
        track("3", "Three", "x", 30),
    ];
    let features = vec![feature("3", 0.9, 0.1, 0.1), feature("1", 0.1, 0.1, 0.1)];

    let pairs = attach_features(&tracks, &features);
    let matched: Vec<(&str, f64)> = pairs
        .iter()
        .map(|(t, f)| (t.name.as_str(), f.valence))
        .collect();
    assert_eq!(matched, vec![("One", 0.1), ("Three", 0.9)]);
}

#[test]
fn test_attach_features_skips_tracks_without_id() {
    let mut local = track("1", "Local", "x", 10);
    local.id = None;
    let tracks = vec![local, track("2", "Catalog", "x", 20)];
    let features = vec![feature("1", 0.5, 0.5, 0.5), feature("2", 0.7, 0.5, 0.5)];

    let pairs = attach_features(&tracks, &features);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.name, "Catalog");
}
