use tempfile::tempdir;
use tplat::catalog::{Contribution, ContributionSink};
use tplat::domain::config::{CatalogConfig, OverlayBackendKind};
use tplat::domain::{PlatformDescriptor, TargetDescriptor};
use tplat::{InitError, open_service};

fn cap_5_8() -> Contribution {
    let common = TargetDescriptor::builder().id("cap-5.8").name("cap").version("5.8").build();
    Contribution::Platform(PlatformDescriptor::builder().common(common).build())
}

#[test]
fn memory_backend_by_default() {
    let service = open_service(&CatalogConfig::default()).unwrap();
    assert_eq!(service.override_directory(), "targetplatforms");

    service.register(cap_5_8());
    service.disable_platform("cap-5.8").unwrap();
    assert!(!service.get_platform("cap-5.8").unwrap().unwrap().enabled);
}

#[test]
fn filesystem_backend_persists_under_data_dir() {
    let dir = tempdir().unwrap();
    let mut config = CatalogConfig::default();
    config.overlay.backend = OverlayBackendKind::Filesystem;
    config.overlay.data_dir = dir.path().join("data");
    config.overlay.directory = "overrides".to_owned();

    {
        let service = open_service(&config).unwrap();
        assert_eq!(service.override_directory(), "overrides");
        service.restrict_platform("cap-5.8").unwrap();
    }
    assert!(dir.path().join("data").join("overrides").is_dir());

    let service = open_service(&config).unwrap();
    service.register(cap_5_8());
    assert!(service.get_platform("cap-5.8").unwrap().unwrap().restricted);
}

#[test]
fn store_identifier_is_passed_through() {
    let dir = tempdir().unwrap();
    for identifier in ["TargetPlatforms", "target-platforms"] {
        let mut config = CatalogConfig::default();
        config.overlay.backend = OverlayBackendKind::Filesystem;
        config.overlay.data_dir = dir.path().to_path_buf();
        config.overlay.directory = identifier.to_owned();

        let on_disk = open_service(&config).unwrap();
        assert_eq!(on_disk.override_directory(), identifier);

        config.overlay.backend = OverlayBackendKind::Memory;
        assert_eq!(open_service(&config).unwrap().override_directory(), identifier);
    }
}

#[test]
fn empty_store_identifier_fails_startup() {
    let dir = tempdir().unwrap();
    let mut config = CatalogConfig::default();
    config.overlay.backend = OverlayBackendKind::Filesystem;
    config.overlay.data_dir = dir.path().to_path_buf();
    config.overlay.directory = String::new();

    assert!(matches!(open_service(&config), Err(InitError::Storage { .. })));
}
