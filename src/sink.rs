#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// Operator-facing message sink injected into the controller.
pub trait LogSink {
    fn log(&mut self, level: LogLevel, message: &str);

    fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Forwards everything to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }
}
