//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are redrawn whole, and only when they differ from the last one sent.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        Ok(())
    }

    /// Force the next draw to be sent even if unchanged (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer. Returns false if it matched the previous frame.
    pub fn draw(&mut self, fb: FrameBuffer) -> Result<bool> {
        if self.last.as_ref() == Some(&fb) {
            return Ok(false);
        }
        self.buf.clear();
        encode_frame_into(&fb, &mut self.buf)?;
        self.flush_buf()?;
        self.last = Some(fb);
        Ok(true)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// Style changes are only emitted when the style differs from the previous cell.
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<CellStyle> = None;
    for (y, row) in fb.rows().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for cell in row {
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_text() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(0, 0, "HELLO", CellStyle::default());
        fb.put_str(0, 1, "WORLD", CellStyle::default().bold());

        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("HELLO"));
        assert!(text.contains("WORLD"));
        assert!(text.contains("\r\n"));
    }

    #[test]
    fn test_style_is_emitted_once_per_run() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ABCD", CellStyle::default());

        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);

        // A single run keeps the four glyphs adjacent in the output
        assert!(text.contains("ABCD"));
    }
}
