#![allow(missing_docs, unused_results)]

//! The process-wide logger is shared state, so everything runs in one test.

use rusqlite::Connection;
use sqlog::{LogLevel, LogReader, SqlogError, global, log_assert, log_error, log_info, log_warning};

#[test]
fn global_logger_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("global.db");

    // misuse before initialize
    assert!(matches!(global::terminate().unwrap_err(), SqlogError::NotInitialized));
    assert!(matches!(
        global::log("early", LogLevel::Error, None, None, 0, None, None).unwrap_err(),
        SqlogError::NotInitialized
    ));
    assert!(matches!(
        global::initialize("").unwrap_err(),
        SqlogError::InvalidArgument(_)
    ));
    assert!(global::table_name().is_none());

    // level survives across the lifecycle
    global::set_level(LogLevel::Warning);
    assert!(global::set_level_code(9).is_err());
    assert_eq!(global::get_level(), LogLevel::Warning);

    global::initialize(&path).unwrap();
    assert!(matches!(
        global::initialize(&path).unwrap_err(),
        SqlogError::AlreadyInitialized
    ));
    let table = global::table_name().unwrap();

    log_info!("dropped", None, None).unwrap();
    assert_eq!(global::pending(), 0);
    log_warning!("disk nearly full", Some("storage"), Some("92%")).unwrap();
    log_error!("request failed", Some("http"), None).unwrap();
    let (ready, degraded) = (true, true);
    log_assert!(ready, None, None).unwrap();
    log_assert!(!degraded, Some("health"), None).unwrap();
    global::log("explicit", LogLevel::Error, Some("a.rs"), Some("f"), 0, None, None).unwrap();
    assert_eq!(global::pending(), 4);

    global::flush().unwrap();
    assert_eq!(global::pending(), 0);
    global::terminate().unwrap();
    assert!(global::table_name().is_none());

    let conn = Connection::open(&path).unwrap();
    let rows = LogReader::new(&conn).read(&table).unwrap();
    let messages: Vec<_> = rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        ["disk nearly full", "request failed", "Assertion failed!", "explicit"]
    );

    let warning = &rows[0];
    assert_eq!(warning.level, "Warning");
    assert_eq!(warning.tag.as_deref(), Some("storage"));
    assert_eq!(warning.supplemental_data.as_deref(), Some("92%"));
    assert!(warning.file_name.as_deref().unwrap().ends_with("global.rs"));
    assert_eq!(warning.function_name.as_deref(), Some("global"));
    assert!(warning.line_number.unwrap() > 0);

    assert_eq!(rows[2].level, "Error");
    assert_eq!(rows[2].tag.as_deref(), Some("health"));
    assert_eq!(rows[3].line_number, Some(0));

    assert_eq!(global::result_to_string(-2), "Not initialized");
    assert_eq!(global::result_to_string(-17), "Unknown error code");
}
