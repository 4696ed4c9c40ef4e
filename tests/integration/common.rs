use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Write sink shared between a spinner and the test inspecting its output
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("spinner wrote invalid UTF-8")
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub const CLEAR_LINE: &str = "\r\x1b[K";

/// One segment of spinner output between two line clears.
#[derive(Debug, PartialEq, Eq)]
pub struct Segment {
    /// What was drawn, with ANSI styling removed
    pub visible: String,
    pub backspaces: usize,
    pub deletes: usize,
}

/// Split output at every line clear.
///
/// Each segment holds whatever was drawn after the previous clear, followed by
/// the backspaces and deletes of the erase that removed it. The final segment
/// is what remains on screen (empty or the final message).
pub fn segments(output: &str) -> Vec<Segment> {
    output
        .split(CLEAR_LINE)
        .map(|piece| {
            let without_deletes = piece.trim_end_matches('\u{7f}');
            let deletes = piece.len() - without_deletes.len();
            let drawn = without_deletes.trim_end_matches('\u{8}');
            let backspaces = without_deletes.len() - drawn.len();
            Segment {
                visible: strip_ansi(drawn),
                backspaces,
                deletes,
            }
        })
        .collect()
}

/// Glyphs of every drawn frame, in order, assuming no prefix or suffix.
pub fn frames(output: &str) -> Vec<String> {
    let segments = segments(output);
    let drawn = segments.len().saturating_sub(1);
    segments
        .into_iter()
        .take(drawn)
        .map(|segment| segment.visible.trim_end().to_string())
        .filter(|frame| !frame.is_empty())
        .collect()
}

/// Every erase removed exactly the characters that were visible.
pub fn assert_exact_erases(output: &str) {
    let segments = segments(output);
    let drawn = segments.len().saturating_sub(1);
    for segment in &segments[..drawn] {
        let width = segment.visible.chars().count();
        assert_eq!(segment.backspaces, width, "backspaces for {:?}", segment.visible);
        assert_eq!(segment.deletes, width, "deletes for {:?}", segment.visible);
    }
}

pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
