//! Report Output
//!
//! The listing is a sequence of lines, each indented with spaces to show
//! its depth. Components write through [`ReportSink`]; where the lines end
//! up (screen, log file, memory) is the sink's business.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Append-only line writer
pub trait ReportSink {
    /// Append one line (without trailing newline)
    fn write_line(&mut self, line: &str);

    /// Push buffered lines to their destination
    fn flush(&mut self) {}
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

/// An absent sink drops every line
impl<S: ReportSink> ReportSink for Option<S> {
    fn write_line(&mut self, line: &str) {
        if let Some(sink) = self {
            sink.write_line(line);
        }
    }

    fn flush(&mut self) {
        if let Some(sink) = self {
            sink.flush();
        }
    }
}

/// Format one line indented by `indent` spaces and append it
pub fn emit<S: ReportSink + ?Sized>(sink: &mut S, indent: usize, args: fmt::Arguments<'_>) {
    let mut line = String::with_capacity(indent + 32);
    let _ = write!(line, "{:width$}{}", "", args, width = indent);
    sink.write_line(&line);
}

/// Collects lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines with their indentation stripped
    pub fn trimmed(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.trim_start()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ReportSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(String::from(line));
    }
}

/// Writes every line to two sinks, first `A` then `B`
#[derive(Debug, Default)]
pub struct TeeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: ReportSink, B: ReportSink> TeeSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: ReportSink, B: ReportSink> ReportSink for TeeSink<A, B> {
    fn write_line(&mut self, line: &str) {
        self.first.write_line(line);
        self.second.write_line(line);
    }

    fn flush(&mut self) {
        self.first.flush();
        self.second.flush();
    }
}

/// Forwards every line to the `log` facade at `level`
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    pub level: log::Level,
}

impl LogSink {
    pub const fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Info)
    }
}

impl ReportSink for LogSink {
    fn write_line(&mut self, line: &str) {
        log::log!(self.level, "{}", line);
    }
}

/// Column at which a line's text starts
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_indents_with_spaces() {
        let mut sink = MemorySink::new();
        emit(&mut sink, 0, format_args!("\\{}", "Device"));
        emit(&mut sink, 4, format_args!("full path = {}", "\\Device\\CdRom0"));
        assert_eq!(sink.lines(), ["\\Device", "    full path = \\Device\\CdRom0"]);
        assert_eq!(indent_of(&sink.lines()[1]), 4);
        assert_eq!(sink.trimmed()[1], "full path = \\Device\\CdRom0");
    }

    #[test]
    fn test_tee_keeps_order_in_both() {
        let mut tee = TeeSink::new(MemorySink::new(), Some(MemorySink::new()));
        tee.write_line("a");
        tee.write_line("b");
        tee.flush();
        let (first, second) = tee.into_inner();
        assert_eq!(first.lines(), ["a", "b"]);
        assert_eq!(second.unwrap().lines(), ["a", "b"]);
    }

    #[test]
    fn test_absent_sink_drops_lines() {
        let mut sink: Option<MemorySink> = None;
        sink.write_line("dropped");
        assert!(sink.is_none());
    }

    /// Logger keeping every record it sees
    struct CaptureLogger {
        records: spin::Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.records.lock().push((record.level(), alloc::format!("{}", record.args())));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        records: spin::Mutex::new(Vec::new()),
    };

    #[test]
    fn test_log_sink_forwards_lines() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let mut sink = LogSink::default();
        assert_eq!(sink.level, log::Level::Info);
        sink.write_line("   \\Harddisk0 - Type = Disk");
        LogSink::new(log::Level::Warn).write_line("  \\Device - Type = Dire");
        sink.flush();

        let records = CAPTURE.records.lock();
        let info = (log::Level::Info, String::from("   \\Harddisk0 - Type = Disk"));
        let warn = (log::Level::Warn, String::from("  \\Device - Type = Dire"));
        assert!(records.contains(&info));
        assert!(records.contains(&warn));
    }
}
