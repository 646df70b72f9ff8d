use contactgraph::config::*;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = ContactGraphConfig::default();
    assert_eq!(config.search.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!config.search.first_hit_only);
    assert_eq!(config.server.max_results, 20);
    assert_eq!(config.log.log_level, "info");
    assert!(config.data.file.is_none());
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(&dir.path().join("nope.json")).unwrap();
    assert_eq!(loaded, ContactGraphConfig::default());
}

#[test]
fn test_partial_json_uses_wire_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("configuration.json");
    std::fs::write(
        &path,
        r#"{
            "data": { "file": "./data/contacts.txt" },
            "search": { "maxDepth": 3, "firstHitOnly": true },
            "log": { "logLevel": "debug" }
        }"#,
    )
    .unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.search.max_depth, 3);
    assert!(loaded.search.first_hit_only);
    assert_eq!(loaded.log.log_level, "debug");
    assert_eq!(loaded.log.name, "contactgraph");
    assert_eq!(
        loaded.data.file.as_deref(),
        Some(std::path::Path::new("./data/contacts.txt"))
    );
    assert_eq!(loaded.server.max_results, 20);
}

#[test]
fn test_toml_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contactgraph.toml");
    std::fs::write(&path, "[search]\nmaxDepth = 2\n\n[server]\nmaxResults = 5\n").unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.search.max_depth, 2);
    assert_eq!(loaded.server.max_results, 5);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    for name in ["config/configuration.json", "config/contactgraph.toml"] {
        let path = dir.path().join(name);
        let mut config = ContactGraphConfig::default();
        config.search.max_depth = 7;
        config.data.file = Some("edges.txt".into());

        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config, "roundtrip failed for {name}");
        assert!(!path.with_extension("tmp").exists());
    }
}
