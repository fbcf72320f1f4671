use std::path::PathBuf;
use tplat_domain::config::{
    CatalogConfig, DEFAULT_OVERLAY_DIRECTORY, LoggingConfig, OverlayBackendKind, OverlayConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let overlay = OverlayConfig::default();
    assert_eq!(overlay.directory, DEFAULT_OVERLAY_DIRECTORY);
    assert_eq!(overlay.backend, OverlayBackendKind::Memory);

    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "tplat");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());
}

#[test]
fn catalog_config_deserializes() {
    let raw = json!({
        "overlay": { "directory": "overrides", "backend": "filesystem", "data_dir": "/tmp/tplat" },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: CatalogConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.overlay.directory, "overrides");
    assert_eq!(cfg.overlay.backend, OverlayBackendKind::Filesystem);
    assert_eq!(cfg.overlay.data_dir, PathBuf::from("/tmp/tplat"));
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.name, "tplat");
}

#[test]
fn catalog_config_is_copy_on_write() {
    let shared = CatalogConfig::default();
    let mut local = shared.clone();
    local.overlay.directory = "other".to_owned();

    assert_eq!(shared.overlay.directory, DEFAULT_OVERLAY_DIRECTORY);
    assert_eq!(local.overlay.directory, "other");
}
