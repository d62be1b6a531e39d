use notes_core::{init_logging, logging_status, CoreConfig, NoteService};

#[test]
fn stderr_logging_initializes_once_and_services_log_through_it() {
    let config = CoreConfig {
        log_level: "warn".to_string(),
        log_dir: None,
        ..CoreConfig::default()
    };

    init_logging(&config).expect("stderr init should succeed");
    init_logging(&config).expect("same config should be idempotent");

    let (level, dir) = logging_status().expect("logging should be active");
    assert_eq!(level, "warn");
    assert!(dir.is_none());

    let mut service = NoteService::new();
    assert!(service.delete(1).is_err());
}

#[test]
fn unsupported_level_is_rejected_before_init() {
    let config = CoreConfig {
        log_level: "verbose".to_string(),
        ..CoreConfig::default()
    };
    let err = init_logging(&config).unwrap_err();
    assert!(err.contains("unsupported log level"));
}
