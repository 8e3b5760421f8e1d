use log::LevelFilter;
use log4rs::config::Config as LoggerConfig;
use log4rs::Handle;

pub fn init_logs(log_level: LevelFilter) -> Handle {
    let config = build_logger_config(log_level).expect("unable to configure logger");
    log4rs::init_config(config).expect("can't init log4rs")
}

pub fn build_logger_config(
    log_level: LevelFilter,
) -> Result<LoggerConfig, log4rs::config::runtime::ConfigErrors> {
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Root};

    LoggerConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(ConsoleAppender::builder().build())))
        .build(Root::builder().appender("stdout").build(log_level))
}
