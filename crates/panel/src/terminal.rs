//! TerminalPanel: a flip-dot panel simulated in the terminal.
//!
//! Each dot is two terminal columns wide. The hardware numbers its columns from
//! the viewer's right, so hardware column 0 is drawn at the right edge.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::dots::{PANEL_COLS, PANEL_ROWS};
use crate::renderer::DotSink;

const DOT_ON: &str = "● ";
const DOT_OFF: &str = "· ";
const DOT_WIDTH: u16 = 2;

pub struct TerminalPanel<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    /// Top-left corner of the dot area (inside the border)
    origin: (u16, u16),
}

impl TerminalPanel {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPanel<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(16 * 1024),
            origin: (1, 1),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, and the panel outline.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.queue_border()?;
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
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn queue_border(&mut self) -> Result<()> {
        let inner = "─".repeat(PANEL_COLS * DOT_WIDTH as usize);
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        self.buf.queue(SetForegroundColor(Color::DarkGrey))?;
        self.buf.queue(cursor::MoveTo(left, top))?;
        self.buf.queue(Print(format!("┌{inner}┐")))?;
        for row in 0..PANEL_ROWS as u16 {
            self.buf.queue(cursor::MoveTo(left, self.origin.1 + row))?;
            self.buf.queue(Print('│'))?;
            self.buf
                .queue(cursor::MoveTo(self.origin.0 + PANEL_COLS as u16 * DOT_WIDTH, self.origin.1 + row))?;
            self.buf.queue(Print('│'))?;
        }
        self.buf.queue(cursor::MoveTo(left, self.origin.1 + PANEL_ROWS as u16))?;
        self.buf.queue(Print(format!("└{inner}┘")))?;
        self.buf.queue(ResetColor)?;
        Ok(())
    }

    /// Terminal position of hardware dot `(row, col)`
    fn dot_position(&self, row: usize, col: usize) -> (u16, u16) {
        let x = self.origin.0 + (PANEL_COLS - 1 - col) as u16 * DOT_WIDTH;
        let y = self.origin.1 + row as u16;
        (x, y)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl<W: Write> DotSink for TerminalPanel<W> {
    fn flip(&mut self, row: usize, col: usize, on: bool) -> Result<()> {
        anyhow::ensure!(
            row < PANEL_ROWS && col < PANEL_COLS,
            "dot ({row}, {col}) is off the panel"
        );
        let (x, y) = self.dot_position(row, col);
        self.buf.queue(cursor::MoveTo(x, y))?;
        if on {
            self.buf.queue(SetForegroundColor(Color::Yellow))?;
            self.buf.queue(Print(DOT_ON))?;
        } else {
            self.buf.queue(SetForegroundColor(Color::DarkGrey))?;
            self.buf.queue(Print(DOT_OFF))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.buf.queue(ResetColor)?;
        self.flush_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dots::DotImage;
    use crate::renderer::PanelRenderer;

    #[test]
    fn hardware_column_zero_is_rightmost() {
        let panel = TerminalPanel::with_writer(Vec::new());
        assert_eq!(panel.dot_position(0, 0), (1 + 31 * 2, 1));
        assert_eq!(panel.dot_position(11, 31), (1, 12));
    }

    #[test]
    fn flips_are_buffered_until_flush() {
        let mut panel = TerminalPanel::with_writer(Vec::new());
        panel.flip(3, 4, true).unwrap();
        assert!(panel.writer().is_empty());

        DotSink::flush(&mut panel).unwrap();
        let out = String::from_utf8(panel.writer().clone()).unwrap();
        assert!(out.contains(DOT_ON));
    }

    #[test]
    fn renderer_writes_through_terminal_panel() {
        let mut renderer = PanelRenderer::new(TerminalPanel::with_writer(Vec::new()));
        renderer.draw_image(&DotImage::text("GO")).unwrap();
        let out = String::from_utf8(renderer.sink().writer().clone()).unwrap();
        assert!(out.contains(DOT_ON));
        assert!(out.contains(DOT_OFF));
    }

    #[test]
    fn off_panel_dot_is_an_error() {
        let mut panel = TerminalPanel::with_writer(Vec::new());
        assert!(panel.flip(0, PANEL_COLS, true).is_err());
    }
}
