use vitae_logger::{LevelFilter, Logger};

#[test]
fn page_logging_section_configures_the_console_logger() {
    let logger = Logger::builder()
        .name("vitae-console")
        .level_name("debug")
        .level_name("loud")
        .env_filter("vitae=debug,vitae_platform=warn")
        .console(true)
        .init()
        .expect("logger should initialize");

    assert_eq!(logger.name(), "vitae-console");
    assert_eq!(logger.level(), LevelFilter::DEBUG, "an unknown name keeps the last valid one");
    tracing::debug!(target: "vitae", "site logger ready");
}
