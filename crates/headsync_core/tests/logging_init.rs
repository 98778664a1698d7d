use headsync_core::{init_logging, logging_status, LoggingError};

#[test]
fn init_logging_is_idempotent_and_rejects_reconfiguration() {
    let log_dir = tempfile::tempdir().expect("create temp log dir");
    let log_dir_str = log_dir
        .path()
        .join("logs")
        .to_str()
        .expect("temp dir should be valid UTF-8")
        .to_string();
    let other_dir = tempfile::tempdir().expect("create second temp dir");
    let other_dir_str = other_dir
        .path()
        .to_str()
        .expect("temp dir should be valid UTF-8")
        .to_string();

    assert!(logging_status().is_none());
    init_logging("info", &log_dir_str).expect("first init should succeed");
    init_logging(" INFO ", &log_dir_str).expect("same config should be idempotent");

    let level_err = init_logging("debug", &log_dir_str).expect_err("level switch must fail");
    assert!(matches!(level_err, LoggingError::Conflict { .. }));
    let dir_err = init_logging("info", &other_dir_str).expect_err("dir switch must fail");
    assert!(dir_err.to_string().contains("refusing to switch"));

    let status = logging_status().expect("logging should be active");
    assert_eq!(status.level, "info");
    assert_eq!(status.log_dir.to_str(), Some(log_dir_str.as_str()));
    assert!(log_dir.path().join("logs").is_dir());
}
