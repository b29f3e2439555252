use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, Sink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Log, LogLevel};

type SinkRef = Arc<dyn Sink>;

/// The configured level and everything more severe.
impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        let level = match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        };
        LevelFilter::MoreSevereEqual(level)
    }
}

/// Request failures are warnings, so they land on stderr next to fatal errors.
fn console_sinks() -> spdlog::Result<Vec<SinkRef>> {
    let split = [
        (StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn)),
        (StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn)),
    ];

    let mut sinks: Vec<SinkRef> = Vec::with_capacity(split.len());
    for (stream, filter) in split {
        let sink = StdStreamSink::builder()
            .std_stream(stream)
            .level_filter(filter)
            .build()?;
        sinks.push(Arc::new(sink));
    }
    Ok(sinks)
}

fn daily_file_sink(location: &Path) -> spdlog::Result<SinkRef> {
    let sink = RotatingFileSink::builder()
        .base_path(location)
        .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
        .max_files(60)
        .rotate_on_open(false)
        .build()?;
    Ok(Arc::new(sink))
}

/// A `[log]` section without a location still logs, to the console.
fn log_sinks(log: &Log) -> spdlog::Result<Vec<SinkRef>> {
    let mut sinks = vec![];
    if let Some(location) = &log.location {
        sinks.push(daily_file_sink(location)?);
    }
    if log.log_to_console || sinks.is_empty() {
        sinks.extend(console_sinks()?);
    }
    Ok(sinks)
}

/// Without a `[log]` section the default console logger stays in place.
pub fn configure_logger(log: Option<&Log>) -> spdlog::Result<()> {
    let Some(log) = log else {
        return Ok(());
    };

    let mut builder = Logger::builder();
    for sink in log_sinks(log)? {
        builder.sink(sink);
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(log.level.into());

    spdlog::set_default_logger(logger);

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn log(location: Option<&Path>, log_to_console: bool) -> Log {
        Log {
            level: LogLevel::Info,
            log_to_console,
            location: location.map(Path::to_path_buf),
        }
    }

    #[test]
    fn test_level_filter() {
        let filter = LevelFilter::from(LogLevel::Warn);
        assert!(filter.test(Level::Error));
        assert!(filter.test(Level::Warn));
        assert!(!filter.test(Level::Info));
        assert!(LevelFilter::from(LogLevel::Trace).test(Level::Trace));
    }

    #[test]
    fn test_sinks_per_section() {
        let dir = TempDir::new().unwrap();
        let location = dir.path().join("folio.log");

        assert_eq!(log_sinks(&log(None, false)).unwrap().len(), 2);
        assert_eq!(log_sinks(&log(Some(&location), false)).unwrap().len(), 1);
        assert_eq!(log_sinks(&log(Some(&location), true)).unwrap().len(), 3);
    }

    #[test]
    fn test_no_log_section_is_a_noop() {
        assert!(configure_logger(None).is_ok());
    }
}
