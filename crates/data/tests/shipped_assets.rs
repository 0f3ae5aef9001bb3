use dreamroster_core::{CardSource, Region, Role};
use dreamroster_data::{find_showcase, load_game_data, load_catalog};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "dreamroster-{tag}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(dir.join("players")).expect("mkdir");
    dir
}

#[test]
fn shipped_catalog_covers_every_role_and_region() {
    let data = load_game_data(&assets_dir()).expect("load assets");
    assert!(data.catalog.count() > 0);
    for role in Role::ALL {
        assert!(!data.catalog.list_by_role(role).is_empty(), "{role}");
    }
    for region in Region::ALL {
        let cards = data.catalog.list_by_region(region);
        assert!(!cards.is_empty(), "{region}");
        assert!(cards.iter().all(|card| card.region == region));
    }
    assert!(data.catalog.find_by_id("faker-t1-2024").is_some());
}

#[test]
fn shipped_palette_knows_catalog_teams() {
    let data = load_game_data(&assets_dir()).expect("load assets");
    for card in data.catalog.cards() {
        assert!(data.palette.get(&card.team).is_some(), "{}", card.team);
    }
}

#[test]
fn shipped_showcases_are_playable() {
    let data = load_game_data(&assets_dir()).expect("load assets");
    for name in ["T1 2024", "DWG 2020", "SSW 2014", "G2 2019", "FPX 2019"] {
        let roster = find_showcase(&data.showcases, name).expect(name);
        assert_eq!(roster.cards.len(), 5);
    }
}

#[test]
fn catalog_with_a_missing_role_fails_to_load() {
    let dir = temp_dir("missing-role");
    let top_only = r#"[{"id":"zeus-t1-2024","name":"Zeus","team":"T1","region":"LCK","role":"Top","year":"2024"}]"#;
    fs::write(dir.join("players/lck.json"), top_only).expect("write");
    for stem in ["lpl", "lec", "lcs"] {
        fs::write(dir.join(format!("players/{stem}.json")), "[]").expect("write");
    }
    let err = load_catalog(&dir).unwrap_err();
    assert!(format!("{err:#}").contains("no cards for role Jungle"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn mistagged_region_names_the_file() {
    let dir = temp_dir("mistagged");
    let lpl_card = r#"[{"id":"rookie-ig-2018","name":"Rookie","team":"IG","region":"LPL","role":"Mid","year":"2018"}]"#;
    fs::write(dir.join("players/lck.json"), lpl_card).expect("write");
    let err = load_catalog(&dir).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("lck.json"), "{message}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_error_carries_the_path() {
    let dir = temp_dir("empty");
    let err = load_catalog(&dir).unwrap_err();
    assert!(format!("{err:#}").contains("read "));
    let _ = fs::remove_dir_all(&dir);
}
