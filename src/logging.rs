//! PokerAI Engine — Logging
//!
//! The engine never reads a global log level. Callers hand it a [`Journal`]
//! (level + sink); the default sink forwards to the `log` facade so an
//! `env_logger` installed by the host prints it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::{Level, LevelFilter};

pub const LOG_TARGET: &str = "pokerai";

/// Level used when none is configured, by both `Journal` and `EngineConfig`.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Destination for engine log lines.
pub trait Sink: Send + Sync {
    fn record(&self, level: Level, message: fmt::Arguments<'_>);
}

/// Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Sink for LogSink {
    fn record(&self, level: Level, message: fmt::Arguments<'_>) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }
}

impl Sink for MemorySink {
    fn record(&self, level: Level, message: fmt::Arguments<'_>) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

/// A level filter bound to a sink. Cheap to clone into workers.
#[derive(Clone)]
pub struct Journal {
    level: LevelFilter,
    sink: Arc<dyn Sink>,
}

impl Journal {
    pub fn new(level: LevelFilter, sink: Arc<dyn Sink>) -> Self {
        Self { level, sink }
    }

    pub fn silent() -> Self {
        Self::new(LevelFilter::Off, Arc::new(LogSink))
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    #[inline]
    pub fn log(&self, level: Level, message: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.sink.record(level, message);
        }
    }

    #[inline]
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log(Level::Debug, message);
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL, Arc::new(LogSink))
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal").field("level", &self.level).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filters_lines() {
        let sink = Arc::new(MemorySink::default());
        let journal = Journal::new(LevelFilter::Info, sink.clone());

        journal.debug(format_args!("hidden"));
        journal.log(Level::Info, format_args!("shown {}", 1));

        assert_eq!(sink.lines(), vec![(Level::Info, "shown 1".to_string())]);
    }

    #[test]
    fn test_default_level_matches_config() {
        let journal = Journal::default();
        let config = crate::config::EngineConfig::default();
        assert_eq!(journal.level, config.log_level);
        assert!(journal.enabled(Level::Debug));
        assert!(!journal.enabled(Level::Trace));
    }

    #[test]
    fn test_silent_journal() {
        let journal = Journal::silent();
        assert!(!journal.enabled(Level::Error));
    }
}
