//! Output sinks.
//!
//! The `print` native and diagnostic rendering write through a sink; enum
//! dispatch keeps the common path free of vtable indirection. The buffer
//! variant captures into memory and is the primary test collaborator.

use parking_lot::Mutex;
use std::sync::Arc;

/// Destination for engine output.
pub enum OutputSink {
    /// Writes straight to stdout (default).
    Stdout,
    /// Captures into a buffer, read back with [`OutputSink::contents`].
    Buffer(Mutex<String>),
    /// Discards everything.
    Silent,
}

impl OutputSink {
    /// Write a string slice.
    pub fn write_str(&self, s: &str) {
        match self {
            Self::Stdout => print!("{s}"),
            Self::Buffer(buf) => buf.lock().push_str(s),
            Self::Silent => {}
        }
    }

    /// Write a single character.
    pub fn write_char(&self, c: char) {
        match self {
            Self::Stdout => print!("{c}"),
            Self::Buffer(buf) => buf.lock().push(c),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for sinks that don't capture.
    pub fn contents(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

/// A sink shared between the host and the engine.
pub type SharedSink = Arc<OutputSink>;

/// Sink writing to stdout.
pub fn stdout_sink() -> SharedSink {
    Arc::new(OutputSink::Stdout)
}

/// Sink capturing into memory.
pub fn buffer_sink() -> SharedSink {
    Arc::new(OutputSink::Buffer(Mutex::new(String::new())))
}

/// Sink discarding all output.
pub fn silent_sink() -> SharedSink {
    Arc::new(OutputSink::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_captures_strings_and_chars() {
        let sink = buffer_sink();
        sink.write_str("ab");
        sink.write_char('c');
        assert_eq!(sink.contents(), "abc");
    }

    #[test]
    fn buffer_clear_empties_contents() {
        let sink = buffer_sink();
        sink.write_str("abc");
        sink.clear();
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn silent_discards_output() {
        let sink = silent_sink();
        sink.write_str("abc");
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn stdout_contents_are_empty() {
        let sink = stdout_sink();
        assert_eq!(sink.contents(), "");
    }
}
