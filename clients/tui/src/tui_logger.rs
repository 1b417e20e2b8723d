use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Lines kept for the log panel before the oldest are dropped.
const CAPACITY: usize = 100;

pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Routes `log` records into a shared ring buffer instead of stdout, which
/// the terminal UI owns.
pub struct TuiLogger {
    log_buffer: LogBuffer,
    level: LevelFilter,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, LogBuffer) {
        let log_buffer = Arc::new(Mutex::new(VecDeque::with_capacity(CAPACITY)));
        (
            TuiLogger {
                log_buffer: log_buffer.clone(),
                level,
            },
            log_buffer,
        )
    }

    /// Install as the global logger.
    pub fn install(level: LevelFilter) -> Result<LogBuffer, log::SetLoggerError> {
        let (logger, buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;
        Ok(buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = match record.level() {
            Level::Info => format!("{}", record.args()),
            level => format!("[{level}] {}", record.args()),
        };
        if let Ok(mut buffer) = self.log_buffer.lock() {
            if buffer.len() == CAPACITY {
                buffer.pop_front();
            }
            buffer.push_back(msg);
        }
    }

    fn flush(&self) {}
}
