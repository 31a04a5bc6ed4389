//! Utilities: logging (dynamic level), the `Reporter` seam used by the command
//! parser, and a tiny ANSI color helper (respects NO_COLOR).
//!
//! Key items:
//!   init_logging / derive_level
//!   Reporter / ConsoleReporter
//!   output::color

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Logging helpers.
pub mod logging {
    use super::*;
    use crate::utils::output::{Color, color};

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Info = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "ERROR",
                LogLevel::Info => "INFO",
                LogLevel::Debug => "DEBUG",
                LogLevel::Trace => "TRACE",
            }
        }

        fn tint(&self) -> Color {
            match self {
                LogLevel::Error => Color::Red,
                LogLevel::Info => Color::Green,
                LogLevel::Debug => Color::Cyan,
                LogLevel::Trace => Color::Magenta,
            }
        }
    }

    static GLOBAL_LEVEL: OnceLock<AtomicU8> = OnceLock::new();

    fn level_cell() -> &'static AtomicU8 {
        GLOBAL_LEVEL.get_or_init(|| AtomicU8::new(LogLevel::Info as u8))
    }

    /// Set the process-wide threshold; anything noisier is dropped.
    pub fn init_logging(level: LogLevel) {
        level_cell().store(level as u8, Ordering::Relaxed);
    }

    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn timestamp() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }

    pub(crate) fn enabled(level: LogLevel) -> bool {
        level as u8 <= level_cell().load(Ordering::Relaxed)
    }

    pub fn log(level: LogLevel, msg: impl AsRef<str>) {
        if enabled(level) {
            let tag = color(level.tint(), level.as_str());
            // errors go to stderr so piped stdout stays clean
            if level == LogLevel::Error {
                eprintln!("[{}][{}] {}", tag, timestamp(), msg.as_ref());
            } else {
                println!("[{}][{}] {}", tag, timestamp(), msg.as_ref());
            }
        }
    }

    pub fn error(msg: impl AsRef<str>) {
        log(LogLevel::Error, msg);
    }
    pub fn info(msg: impl AsRef<str>) {
        log(LogLevel::Info, msg);
    }
    pub fn debug(msg: impl AsRef<str>) {
        log(LogLevel::Debug, msg);
    }
    pub fn trace(msg: impl AsRef<str>) {
        log(LogLevel::Trace, msg);
    }

    #[macro_export]
    macro_rules! log_error {
        ($($t:tt)*) => { $crate::utils::logging::error(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_info {
        ($($t:tt)*) => { $crate::utils::logging::info(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_debug {
        ($($t:tt)*) => { $crate::utils::logging::debug(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_trace {
        ($($t:tt)*) => { $crate::utils::logging::trace(format!($($t)*)) };
    }

    /// Sink for outcome messages produced by the command parser.
    ///
    /// The parser never writes to the global logger itself; it is handed a
    /// reporter at construction so callers (and tests) decide where text goes.
    pub trait Reporter {
        fn info(&self, msg: &str);
        fn error(&self, msg: &str);
        fn debug(&self, _msg: &str) {}
    }

    /// Reporter backed by the process-wide leveled logger.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ConsoleReporter;

    impl Reporter for ConsoleReporter {
        fn info(&self, msg: &str) {
            info(msg);
        }
        fn error(&self, msg: &str) {
            error(msg);
        }
        fn debug(&self, msg: &str) {
            debug(msg);
        }
    }
}

pub use logging::{ConsoleReporter, Reporter, derive_level, init_logging};

/// Output related helpers.
pub mod output {
    /// Simple ansi color wrapper (disable via NO_COLOR).
    pub fn color(c: Color, text: impl AsRef<str>) -> String {
        if std::env::var_os("NO_COLOR").is_some() {
            return text.as_ref().to_string();
        }
        format!("{}{}{}", c.as_code(), text.as_ref(), "\x1b[0m")
    }

    #[derive(Copy, Clone)]
    pub enum Color {
        Red,
        Green,
        Cyan,
        Magenta,
        Bold,
    }
    impl Color {
        fn as_code(&self) -> &'static str {
            match self {
                Color::Red => "\x1b[31m",
                Color::Green => "\x1b[32m",
                Color::Cyan => "\x1b[36m",
                Color::Magenta => "\x1b[35m",
                Color::Bold => "\x1b[1m",
            }
        }
    }
}


// End of utils module.
