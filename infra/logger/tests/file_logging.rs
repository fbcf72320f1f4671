use std::time::Duration;
use tempfile::tempdir;
use tplat_logger::{LevelFilter, Logger, Rotation};

#[test]
fn catalog_events_reach_the_rolling_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let logs = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("tplat-file")
        .console(false)
        .path(&logs)
        .rotation(Rotation::NEVER)
        .level(LevelFilter::DEBUG)
        .init()?;
    assert!(logger.guard().is_some());

    tracing::debug!(id = "dm-5.3.0", "Overlay updated");
    tracing::trace!("below the threshold");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let mut content = String::new();
    for entry in std::fs::read_dir(&logs)?.flatten() {
        content.push_str(&std::fs::read_to_string(entry.path())?);
    }
    assert!(content.contains("Overlay updated"));
    assert!(content.contains("dm-5.3.0"));
    assert!(!content.contains("below the threshold"));
    Ok(())
}
