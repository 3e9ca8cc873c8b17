use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::color::Color;
use crate::error::{Error, Result};

/// Output consumer for finished frames.
///
/// A sink receives an ordered buffer of exactly the strip's pixel
/// count and makes it observable, be that hardware transmission or an
/// on-screen drawing. Flushing is synchronous from the strip's point
/// of view; rejected buffers surface as [`Error::SinkUnavailable`] and
/// any retry policy belongs to the caller's render loop.
pub trait Sink {
    fn flush(&mut self, colors: &[Color]) -> Result<()>;
}

/// Records flushed frames in memory.
///
/// Useful for tests and headless runs. The frame store is shared, so a
/// handle obtained with [`frames()`](MemorySink::frames) stays valid
/// after the sink moved into a strip.
#[derive(Default)]
pub struct MemorySink {
    frames: Arc<Mutex<Vec<Vec<Color>>>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// Shared handle on the recorded frames, newest last.
    pub fn frames(&self) -> Arc<Mutex<Vec<Vec<Color>>>> {
        Arc::clone(&self.frames)
    }
}

impl Sink for MemorySink {
    fn flush(&mut self, colors: &[Color]) -> Result<()> {
        self.frames.lock().unwrap().push(colors.to_vec());
        Ok(())
    }
}

/// Monitor emulation: draws the strip as a row of colored block
/// characters on stdout.
///
/// Every flush redraws the same line in place, so a tick loop shows up
/// as an animated strip. Requires a terminal with 24-bit color
/// support. Alpha is baked over black before drawing since a terminal
/// cell has no transparency.
pub struct TerminalSink<W: Write = std::io::Stdout> {
    out: W,
}

impl TerminalSink {
    pub fn new() -> TerminalSink {
        TerminalSink {
            out: std::io::stdout(),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        TerminalSink::new()
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_writer(out: W) -> TerminalSink<W> {
        TerminalSink { out }
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn flush(&mut self, colors: &[Color]) -> Result<()> {
        let mut line = String::with_capacity(colors.len() * 20 + 8);
        line.push('\r');
        for color in colors {
            // Alpha baking pass
            let baked = color.blend_over(Color::BLACK);
            line.push_str(&format!(
                "\x1b[38;2;{};{};{}m\u{2588}",
                baked.r, baked.g, baked.b
            ));
        }
        line.push_str("\x1b[0m");

        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|err| Error::SinkUnavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_frames() {
        let mut sink = MemorySink::new();
        let frames = sink.frames();
        sink.flush(&[Color::RED, Color::GREEN]).unwrap();
        sink.flush(&[Color::BLUE, Color::BLUE]).unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![Color::RED, Color::GREEN]);
        assert_eq!(frames[1], vec![Color::BLUE, Color::BLUE]);
    }

    #[test]
    fn terminal_sink_bakes_alpha_over_black() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.flush(&[Color::RED.with_alpha(128)]).unwrap();

        let drawn = String::from_utf8(sink.out.clone()).unwrap();
        assert!(drawn.contains("\x1b[38;2;128;0;0m"));
        assert!(drawn.ends_with("\x1b[0m"));
    }
}
