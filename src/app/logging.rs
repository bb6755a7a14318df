//! logging stuff
use {
    crate::{config::options::LoggingFormat, getopt, utils::string_to_log_level},
    color_eyre::Result,
    tracing::{debug, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// setup logging from the `[logging]` config section
///
/// logs go to stderr so command output on stdout stays clean
pub fn setup() -> Result<()> {
    if !getopt!(logging.enable) {
        return Ok(());
    }

    let level = getopt!(logging.level);
    if level.eq_ignore_ascii_case("off") {
        return Ok(());
    }

    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(string_to_log_level(&level))
        .with_ansi(getopt!(logging.asni))
        .with_line_number(getopt!(logging.line_numbers))
        .with_target(getopt!(logging.event_targets));

    match getopt!(logging.format) {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    debug!("Logging setup successfully");
    Ok(())
}
