use vitae_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_site_boot_cannot_replace_the_subscriber() {
    let first = Logger::builder()
        .name("vitae-first")
        .level_name("warn")
        .env_filter("vitae=debug")
        .init()
        .expect("first init should succeed");
    assert_eq!(first.level(), LevelFilter::WARN);

    let err = Logger::builder()
        .name("vitae-second")
        .level_name("trace")
        .init()
        .expect_err("the global subscriber is already set");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
    assert!(err.to_string().starts_with("Tracing subscriber error: "));
    assert_eq!(first.name(), "vitae-first");
}
