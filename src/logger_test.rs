use super::*;

#[test]
fn test_level_for() {
    assert_eq!(level_for(0), LevelFilter::Warn);
    assert_eq!(level_for(1), LevelFilter::Info);
    assert_eq!(level_for(2), LevelFilter::Debug);
    assert_eq!(level_for(7), LevelFilter::Trace);
}

#[test]
fn test_logger_enabled() {
    let logger = Logger {
        level: LevelFilter::Info,
        start: time::Instant::now(),
    };
    let debug = Metadata::builder().level(Level::Debug).build();
    let warn = Metadata::builder().level(Level::Warn).build();
    assert!(!logger.enabled(&debug));
    assert!(logger.enabled(&warn));
}
