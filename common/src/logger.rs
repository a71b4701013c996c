use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static UNINITIALIZED_WARNED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let formatted = format_line(&timestamp, self.prefix.as_deref(), level, file, line, message);
        match level {
            LogLevel::Info => println!("{}", formatted),
            LogLevel::Warn => eprintln!("{}", formatted),
        }
    }
}

fn format_line(
    timestamp: &str,
    prefix: Option<&str>,
    level: LogLevel,
    file: &str,
    line: u32,
    message: &str,
) -> String {
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match prefix {
        Some(prefix) => format!(
            "[{}][{}][{}][{}:{}] {}",
            timestamp, prefix, level.tag(), file_name, line, message
        ),
        None => format!("[{}][{}][{}:{}] {}", timestamp, level.tag(), file_name, line, message),
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
        return;
    }

    if !UNINITIALIZED_WARNED.swap(true, Ordering::Relaxed) {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
    // Warnings still reach stderr, without a prefix.
    if level == LogLevel::Warn {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        eprintln!("{}", format_line(&timestamp, None, level, file, line, message));
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Warn, file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let line = format_line("ts", None, LogLevel::Info, "common/src/games/pool.rs", 12, "hello");
        assert_eq!(line, "[ts][INFO][pool.rs:12] hello");
    }

    #[test]
    fn test_format_line_with_prefix() {
        let line = format_line("ts", Some("Watch"), LogLevel::Warn, "C:\\src\\main.rs", 3, "boom");
        assert_eq!(line, "[ts][Watch][WARN][main.rs:3] boom");
    }

    #[test]
    fn test_log_before_init_warns_once() {
        log(LogLevel::Info, file!(), line!(), "dropped");
        log(LogLevel::Warn, file!(), line!(), "still printed");
        assert!(LOGGER.get().is_none());
        assert!(UNINITIALIZED_WARNED.load(Ordering::Relaxed));
    }
}
