//! misc helpers
use tracing::Level;

/// the longest theme identifier we accept
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// check whether a string is shaped like a theme id
///
/// theme ids are lowercase ascii letters, digits, `-` and `_`, and at most
/// [`MAX_IDENTIFIER_LEN`] long. this says nothing about whether the catalog
/// actually has a theme with that id.
pub fn is_theme_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// convert a string into a log level
pub fn string_to_log_level(lvl: &str) -> tracing::Level {
    match lvl.to_lowercase().as_str() {
        "d" | "debug" | "dbg" => Level::DEBUG,
        "t" | "trace" | "trc" => Level::TRACE,
        "e" | "error" | "err" => Level::ERROR,
        "i" | "info" | "inf" => Level::INFO,
        "w" | "warn" | "wrn" => Level::WARN,
        _ => Level::ERROR,
    }
}

/// a guard that runs a closure when dropped
///
/// used by the [`crate::defer`] macro
pub struct DeferGuard<F: FnOnce()> {
    /// the closure to run
    pub func: Option<F>,
}

impl<F: FnOnce()> Drop for DeferGuard<F> {
    fn drop(&mut self) {
        if let Some(func) = self.func.take() {
            func();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_identifiers() {
        assert!(is_theme_identifier("luxury"));
        assert!(is_theme_identifier("dark-mode_2"));
        assert!(!is_theme_identifier(""));
        assert!(!is_theme_identifier("Luxury"));
        assert!(!is_theme_identifier("lux ury"));
        assert!(!is_theme_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(string_to_log_level("WARN"), Level::WARN);
        assert_eq!(string_to_log_level("dbg"), Level::DEBUG);
        assert_eq!(string_to_log_level("nonsense"), Level::ERROR);
    }
}
