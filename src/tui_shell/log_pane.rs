use std::collections::VecDeque;
use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;

use crate::sink::{LogLevel, LogSink, TracingSink};

#[derive(Clone, Debug)]
pub(super) struct LogEntry {
    pub(super) ts: String,
    pub(super) level: LogLevel,
    pub(super) message: String,
}

/// Bounded scroll buffer behind the "Info" pane. Every entry is also sent to
/// the tracing log file.
#[derive(Debug)]
pub(super) struct LogPane {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogPane {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub(super) fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for LogPane {
    fn log(&mut self, level: LogLevel, message: &str) {
        TracingSink.log(level, message);
        for line in message.lines() {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(LogEntry {
                ts: clock_ts(),
                level,
                message: line.to_string(),
            });
        }
    }
}

fn clock_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[hour padding:zero]:[minute padding:zero]:[second padding:zero]")
            .expect("valid time format")
    })
}

fn fmt_clock(ts: OffsetDateTime) -> String {
    ts.format(clock_format())
        .unwrap_or_else(|_| "--:--:--".to_string())
}

fn clock_ts() -> String {
    fmt_clock(OffsetDateTime::now_utc())
}
