//! Leveled logging for the Stella toolchain.
//!
//! A small, dependency-free logger shared by the syntax and type checking
//! crates. Messages carry the module path of the call site and go to
//! standard error, so they never interleave with program output.
//!
//! The level is global and atomic. It defaults to [`Level::Warn`] and can be
//! configured from the `STELLA_LOG` environment variable with
//! [`init_from_env`].
//!
//! # Example
//!
//! ```
//! use stella_log::{debug, info, warn, Level};
//!
//! stella_log::set_level(Level::Debug);
//!
//! let decls = 3;
//! info!("checking {} declarations", decls);
//! debug!("scope depth: {}", 1);
//! warn!("position already attached");
//! ```

use std::fmt::{self, Arguments};
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable read by [`init_from_env`].
pub const ENV_VAR: &str = "STELLA_LOG";

/// Log levels, ordered from most severe to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures the caller has to act on.
    Error = 0,
    /// Contract violations that were tolerated.
    Warn = 1,
    /// Pass-level summaries.
    Info = 2,
    /// Per-declaration progress.
    Debug = 3,
    /// Per-node detail.
    Trace = 4,
}

impl Level {
    const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid log level '{}' (expected error, warn, info, debug or trace)",
            self.input
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case.
    ///
    /// ```
    /// use stella_log::Level;
    ///
    /// assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
    /// assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError {
                input: trimmed.to_string(),
            })
    }
}

/// The process-wide logger.
///
/// Holds the maximum enabled level and whether output is colored. Obtain it
/// with [`logger`].
pub struct Logger {
    level: AtomicU8,
    colored: AtomicU8,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            colored: AtomicU8::new(1),
        }
    }

    /// Sets the most verbose level that is still written.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Enables or disables ANSI colors.
    pub fn set_colored(&self, colored: bool) {
        self.colored.store(u8::from(colored), Ordering::Relaxed);
    }

    /// Returns `true` if messages at `level` are written.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    fn write(&self, level: Level, target: &str, args: Arguments<'_>) {
        const RESET: &str = "\x1b[0m";

        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        // A closed stderr must not take the compiler down with it.
        let _ = if self.colored.load(Ordering::Relaxed) == 1 {
            writeln!(out, "{}[{level}]{RESET} {target}: {args}", level.color_code())
        } else {
            writeln!(out, "[{level}] {target}: {args}")
        };
    }
}

static LOGGER: Logger = Logger::new(Level::Warn);

/// Returns the global logger.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Sets the global level.
pub fn set_level(level: Level) {
    LOGGER.set_level(level);
}

/// Configures the global logger from `STELLA_LOG`.
///
/// An unset variable leaves the current level untouched. `STELLA_LOG=off`
/// keeps only errors. Returns the level in effect afterwards.
///
/// # Errors
///
/// Returns [`ParseLevelError`] if the variable holds something that is not a
/// level name; the level is left unchanged in that case.
pub fn init_from_env() -> Result<Level, ParseLevelError> {
    match std::env::var(ENV_VAR) {
        Ok(value) if value.trim().eq_ignore_ascii_case("off") => {
            set_level(Level::Error);
        }
        Ok(value) => set_level(value.parse()?),
        Err(_) => {}
    }
    Ok(LOGGER.level())
}

#[doc(hidden)]
pub fn __log(level: Level, target: &str, args: Arguments<'_>) {
    LOGGER.write(level, target, args);
}

/// Logs at an explicit level.
///
/// ```
/// use stella_log::{log, Level};
///
/// log!(level: Level::Info, "lowered {} annotations", 4);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::logger().enabled(level) {
            $crate::__log(level, module_path!(), format_args!($($arg)*));
        }
    }};
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
