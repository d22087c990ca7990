//! TerminalRenderer: flushes a [`Surface`] to the real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full repaint. After that only spans of glyphs that changed are written.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::surface::{Rgb, Style, Surface};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; None forces a full repaint.
    shown: Option<Surface>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
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

    /// Repaint everything on the next draw, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `frame`, then swap it with the previously shown surface.
    ///
    /// The caller gets the old surface back in `frame` and can draw the next
    /// frame into it, so steady-state drawing never clones.
    pub fn draw_swap(&mut self, frame: &mut Surface) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_changes_into(&prev, frame, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_frame_into(frame, &mut self.buf)?;
                prev.resize(frame.width(), frame.height());
                prev
            }
            None => {
                encode_frame_into(frame, &mut self.buf)?;
                Surface::new(frame.width(), frame.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut shown, frame);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full repaint of `frame` into `out` without touching stdout.
pub fn encode_frame_into(frame: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style: Option<Style> = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..frame.width() {
            let glyph = frame.get(x, y).unwrap_or_default();
            if style != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the spans that differ between `prev` and `next`.
///
/// Both surfaces must have the same dimensions.
pub fn encode_changes_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut style: Option<Style> = None;

    for (x, y, len) in changed_spans(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if style != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    if style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Runs of changed glyphs as `(x, y, len)`, left to right, top to bottom.
fn changed_spans<'a>(prev: &'a Surface, next: &'a Surface) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Glyph;

    #[test]
    fn changed_spans_coalesce_adjacent_glyphs() {
        let a = Surface::new(6, 2);
        let mut b = Surface::new(6, 2);
        for x in 1..=3 {
            b.put(x, 0, 'X', Style::default());
        }
        b.put(5, 1, 'Y', Style::default());

        let spans: Vec<_> = changed_spans(&a, &b).collect();
        assert_eq!(spans, vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn identical_surfaces_encode_nothing() {
        let mut a = Surface::new(4, 4);
        a.fill(Glyph::new('#', Style::default()));
        let b = a.clone();

        let mut out = Vec::new();
        encode_changes_into(&a, &b, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn full_frame_contains_every_glyph() {
        let mut s = Surface::new(3, 1);
        s.text(0, 0, "abc", Style::default());

        let mut out = Vec::new();
        encode_frame_into(&s, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc"));
    }

    #[test]
    fn rgb_maps_to_terminal_colour() {
        assert_eq!(
            to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
