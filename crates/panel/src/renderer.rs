//! PanelRenderer: pushes dot images to a flip-dot sink.
//!
//! Flipping a dot is slow and audible, so the renderer remembers what the panel
//! shows and only actuates dots that change.

use anyhow::Result;
use tracing::trace;

use flipdot_tetris_core::Frame;

use crate::dots::{DotImage, PANEL_COLS, PANEL_ROWS};

/// Physical dot actuation.
///
/// `col` is the hardware column, which runs opposite to the image column.
pub trait DotSink {
    fn flip(&mut self, row: usize, col: usize, on: bool) -> Result<()>;

    /// Called once after every batch of flips
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: DotSink + ?Sized> DotSink for &mut S {
    fn flip(&mut self, row: usize, col: usize, on: bool) -> Result<()> {
        (**self).flip(row, col, on)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

pub struct PanelRenderer<S> {
    sink: S,
    /// What the panel currently shows; `None` means unknown
    last: Option<DotImage>,
}

impl<S: DotSink> PanelRenderer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last: None }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Image last pushed to the panel, if known
    pub fn shown(&self) -> Option<&DotImage> {
        self.last.as_ref()
    }

    /// Force the next draw to actuate every dot.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a composed game frame. Returns the number of dots flipped.
    pub fn draw_frame(&mut self, frame: &Frame) -> Result<usize> {
        self.draw_image(&DotImage::from_frame(frame))
    }

    /// Draw an image, flipping only the dots that differ from what is shown.
    pub fn draw_image(&mut self, image: &DotImage) -> Result<usize> {
        let mut flips = 0;
        for row in 0..PANEL_ROWS {
            for col in 0..PANEL_COLS {
                let on = image.get(row, col).unwrap_or(false);
                let shown = self.last.as_ref().and_then(|last| last.get(row, col));
                if shown == Some(on) {
                    continue;
                }
                if let Err(err) = self.sink.flip(row, PANEL_COLS - 1 - col, on) {
                    // Part of the panel may have changed; trust nothing next time.
                    self.last = None;
                    return Err(err);
                }
                flips += 1;
            }
        }
        self.sink.flush()?;
        self.last = Some(*image);
        trace!(flips, "panel updated");
        Ok(flips)
    }

    /// Drive every dot to `on`, regardless of what is shown
    pub fn fill(&mut self, on: bool) -> Result<usize> {
        self.invalidate();
        self.draw_image(&DotImage::filled(on))
    }

    /// Show up to five characters of text
    pub fn draw_text(&mut self, text: &str) -> Result<usize> {
        self.draw_image(&DotImage::text(text))
    }
}

/// One recorded actuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub row: usize,
    pub col: usize,
    pub on: bool,
}

/// Sink that records flips and tracks the resulting hardware state
#[derive(Debug, Clone)]
pub struct RecordingSink {
    flips: Vec<Flip>,
    flushes: usize,
    panel: [[bool; PANEL_COLS]; PANEL_ROWS],
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            flips: Vec::new(),
            flushes: 0,
            panel: [[false; PANEL_COLS]; PANEL_ROWS],
        }
    }

    pub fn flips(&self) -> &[Flip] {
        &self.flips
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Forget recorded flips, keep the hardware state
    pub fn clear_flips(&mut self) {
        self.flips.clear();
    }

    /// Hardware dot state at `(row, col)`, in hardware columns
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.panel[row][col]
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DotSink for RecordingSink {
    fn flip(&mut self, row: usize, col: usize, on: bool) -> Result<()> {
        anyhow::ensure!(
            row < PANEL_ROWS && col < PANEL_COLS,
            "dot ({row}, {col}) is off the panel"
        );
        self.flips.push(Flip { row, col, on });
        self.panel[row][col] = on;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
