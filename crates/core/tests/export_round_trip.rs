use dungeon_core::export::DungeonFile;
use dungeon_core::{
    Algorithm, DungeonError, DungeonRng, LevelConfig, RoomTag, TemplateCatalog, export_dungeon,
    generate_level, import_dungeon, load_dungeon, save_dungeon,
};
use tempfile::tempdir;

#[test]
fn every_algorithm_survives_a_file_round_trip() {
    let catalog = TemplateCatalog::builtin();
    let dir = tempdir().expect("tempdir");

    for algorithm in Algorithm::ALL {
        let config = LevelConfig::with_algorithm(algorithm);
        let level = generate_level(&config, &catalog, &mut DungeonRng::new(90))
            .expect("generation succeeds");
        let path = dir.path().join(format!("{}.json", algorithm.name()));

        save_dungeon(&level.dungeon, &path).expect("save");
        let loaded = load_dungeon(&path).expect("load");

        assert_eq!(loaded.grid, level.dungeon.grid, "{} grid changed", algorithm.name());
        assert_eq!(loaded.rooms.len(), level.dungeon.rooms.len());
        for (loaded_room, room) in loaded.rooms.iter().zip(&level.dungeon.rooms) {
            assert_eq!(loaded_room.tag, RoomTag::Normal);
            assert_eq!((loaded_room.x, loaded_room.y), (room.x, room.y));
            assert_eq!((loaded_room.width, loaded_room.height), (room.width, room.height));
        }
    }
}

#[test]
fn exported_document_has_the_expected_shape() {
    let catalog = TemplateCatalog::builtin();
    let level = generate_level(&LevelConfig::default(), &catalog, &mut DungeonRng::new(5))
        .expect("generation succeeds");
    let json = export_dungeon(&level.dungeon).expect("export");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["format_version"], 1);
    assert_eq!(value["width"], 80);
    assert_eq!(value["height"], 45);
    assert_eq!(value["cells"].as_str().map(str::len), Some(80 * 45));
    assert_eq!(value["cells_sha256"].as_str().map(str::len), Some(64));
    assert!(value["rooms"][0].get("tag").is_none());

    let file: DungeonFile = serde_json::from_str(&json).expect("typed parse");
    assert_eq!(file.rooms.len(), level.dungeon.rooms.len());
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(matches!(import_dungeon("{"), Err(DungeonError::Json(_))));

    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.json");
    assert!(matches!(load_dungeon(&missing), Err(DungeonError::Io(_))));
}
