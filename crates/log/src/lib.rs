//! Leveled stderr logging shared by the beryd crates.
//!
//! Output goes to stderr as either plain text or one JSON object per line.
//! Tests can collect records emitted on their own thread with [`capture`].

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::json;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ParseError::Level(raw.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Text = 0,
    Json = 1,
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseError::Format(raw.to_string())),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    Level(String),
    Format(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Level(raw) => {
                write!(f, "invalid log level '{raw}' (expected error|warn|info|debug|trace)")
            }
            ParseError::Format(raw) => write!(f, "invalid log format '{raw}' (expected text|json)"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Text,
            timestamps: true,
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);
static LOG_FORMAT: AtomicU8 = AtomicU8::new(Format::Text as u8);
static LOG_TIMESTAMPS: AtomicBool = AtomicBool::new(true);

pub fn init(config: LogConfig) {
    LOG_LEVEL.store(config.level as u8, Ordering::Relaxed);
    LOG_FORMAT.store(config.format as u8, Ordering::Relaxed);
    LOG_TIMESTAMPS.store(config.timestamps, Ordering::Relaxed);
}

pub fn max_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

#[derive(Clone, Debug)]
pub struct CapturedLog {
    pub ts_ms: u64,
    pub level: Level,
    pub target: &'static str,
    pub msg: String,
}

thread_local! {
    static CAPTURE: RefCell<Option<Vec<CapturedLog>>> = const { RefCell::new(None) };
}

/// Records every log emitted on the current thread until the guard drops.
///
/// Captured records include levels filtered out of stderr output.
pub fn capture() -> CaptureGuard {
    CAPTURE.with(|slot| *slot.borrow_mut() = Some(Vec::new()));
    CaptureGuard { _private: () }
}

pub struct CaptureGuard {
    _private: (),
}

impl CaptureGuard {
    pub fn records(&self) -> Vec<CapturedLog> {
        CAPTURE.with(|slot| slot.borrow().clone().unwrap_or_default())
    }

    /// Messages logged at exactly `level`, oldest first.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .map(|record| record.msg)
            .collect()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE.with(|slot| *slot.borrow_mut() = None);
    }
}

fn capturing() -> bool {
    CAPTURE.with(|slot| slot.borrow().is_some())
}

pub fn enabled(level: Level) -> bool {
    level <= max_level() || capturing()
}

pub fn log(level: Level, target: &'static str, args: fmt::Arguments<'_>) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let ts_ms: u64 = now.as_millis().try_into().unwrap_or(u64::MAX);

    if capturing() {
        let record = CapturedLog {
            ts_ms,
            level,
            target,
            msg: args.to_string(),
        };
        CAPTURE.with(|slot| {
            if let Some(records) = slot.borrow_mut().as_mut() {
                records.push(record);
            }
        });
    }

    if level > max_level() {
        return;
    }

    let mut out = io::stderr().lock();
    let format = match LOG_FORMAT.load(Ordering::Relaxed) {
        1 => Format::Json,
        _ => Format::Text,
    };
    match format {
        Format::Text => {
            if LOG_TIMESTAMPS.load(Ordering::Relaxed) {
                let _ = write!(out, "{} ", format_timestamp(now));
            }
            let _ = writeln!(out, "{level} {target}: {args}");
        }
        Format::Json => {
            let line = json!({
                "ts_ms": ts_ms,
                "level": level.as_str(),
                "target": target,
                "msg": args.to_string(),
            });
            let _ = writeln!(out, "{line}");
        }
    }
}

#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {{
        if $crate::enabled($level) {
            $crate::log($level, module_path!(), format_args!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Error, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Warn, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Info, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::log_at!($crate::Level::Debug, $($arg)*);
    }};
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn format_timestamp(since_epoch: Duration) -> String {
    const SECS_PER_DAY: u64 = 86_400;
    let secs = since_epoch.as_secs();
    let (year, month, day) = civil_from_days((secs / SECS_PER_DAY) as i64);
    let secs_of_day = secs % SECS_PER_DAY;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60,
        since_epoch.subsec_millis()
    )
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days_since_unix_epoch: i64) -> (i32, u32, u32) {
    let z = days_since_unix_epoch + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = (yoe as i32) + (era as i32) * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (y + i32::from(m <= 2), m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level() {
        assert_eq!("info".parse::<Level>(), Ok(Level::Info));
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!(
            "nope".parse::<Level>(),
            Err(ParseError::Level("nope".to_string()))
        );
    }

    #[test]
    fn parse_format() {
        assert_eq!("text".parse::<Format>(), Ok(Format::Text));
        assert_eq!("JSON".parse::<Format>(), Ok(Format::Json));
        assert!("nope".parse::<Format>().is_err());
    }

    #[test]
    fn timestamps_are_utc() {
        assert_eq!(
            format_timestamp(Duration::from_millis(1_231_006_505_042)),
            "2009-01-03T18:15:05.042Z"
        );
        assert_eq!(format_timestamp(Duration::ZERO), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn capture_sees_filtered_levels_on_this_thread() {
        let guard = capture();
        log_debug!("resolved {} inputs", 4);
        log_error!("broken");
        assert_eq!(guard.messages(Level::Debug), vec!["resolved 4 inputs"]);
        assert_eq!(guard.messages(Level::Error), vec!["broken"]);

        let other = std::thread::spawn(|| {
            log_info!("elsewhere");
            capturing()
        });
        assert!(!other.join().unwrap());
        assert!(guard.messages(Level::Info).is_empty());

        drop(guard);
        assert!(!capturing());
    }
}
