use std::fs;
use std::time::Duration;
use tplat_domain::config::LoggingConfig;
use tplat_logger::Logger;

#[test]
fn from_config_installs_json_file_logging() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        name: "catalog-from-config".to_owned(),
        level: "debug".to_owned(),
        console: false,
        path: Some(log_dir.clone()),
        json: true,
        ..LoggingConfig::default()
    };

    let logger = Logger::from_config(&config)?;
    assert!(logger.guard().is_some());

    tracing::info!(id = "cap-5.8", "Register target platform");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let content = fs::read_to_string(log_file)?;
    assert!(content.contains("\"id\":\"cap-5.8\""), "JSON line should carry the field");
    Ok(())
}

#[test]
fn from_config_rejects_unknown_level() {
    let config = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    assert!(Logger::from_config(&config).is_err());
}
