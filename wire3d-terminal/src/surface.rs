/// Crossterm-backed character surface
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};
use log::warn;
use nalgebra::Point2;
use std::io::{self, stdout, Stdout, Write};
use wire3d_core::raster::{EDGE_GLYPH, VERTEX_GLYPH};
use wire3d_core::{Surface, Viewport};

/// Draws glyphs into a terminal, clipped to both the viewport and the terminal size
///
/// A surface created with [`TerminalSurface::acquire`] owns the alternate screen and
/// hides the cursor until it is dropped.
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    columns: u16,
    rows: u16,
    owns_screen: bool,
}

impl TerminalSurface<Stdout> {
    /// Switch stdout to the alternate screen
    pub fn acquire(viewport: Viewport) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

        let mut surface = Self::with_writer(
            out,
            clip(viewport.width, columns),
            clip(viewport.height, rows),
        );
        surface.owns_screen = true;
        surface.clear()?;
        surface.refresh()?;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface over any writer, without touching terminal modes
    pub fn with_writer(out: W, columns: u16, rows: u16) -> Self {
        Self {
            out,
            columns,
            rows,
            owns_screen: false,
        }
    }

    fn cell(&self, at: Point2<i32>) -> Option<(u16, u16)> {
        let column = u16::try_from(at.x).ok()?;
        let row = u16::try_from(at.y).ok()?;
        (column < self.columns && row < self.rows).then_some((column, row))
    }
}

fn clip(pixels: u32, cells: u16) -> u16 {
    u16::try_from(pixels).unwrap_or(u16::MAX).min(cells)
}

/// Color based on glyph role
fn color_for(glyph: char) -> Color {
    match glyph {
        VERTEX_GLYPH => Color::Cyan,
        EDGE_GLYPH => Color::White,
        _ => Color::Yellow,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn put(&mut self, at: Point2<i32>, glyph: char) -> io::Result<()> {
        if let Some((column, row)) = self.cell(at) {
            self.out
                .queue(cursor::MoveTo(column, row))?
                .queue(SetForegroundColor(color_for(glyph)))?
                .queue(Print(glyph))?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (u32::from(self.columns), u32::from(self.rows))
    }

    /// Messages are always yellow, whatever glyphs they contain
    fn print(&mut self, at: Point2<i32>, text: &str) -> io::Result<()> {
        if let Some((column, row)) = self.cell(at) {
            let room = usize::from(self.columns - column);
            let visible: String = text.chars().take(room).collect();
            self.out
                .queue(cursor::MoveTo(column, row))?
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(visible))?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if !self.owns_screen {
            return;
        }

        // Cleanup
        if let Err(err) = execute!(
            self.out,
            ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show
        ) {
            warn!("failed to restore terminal: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::Command;

    fn encoded(command: impl Command) -> String {
        let mut buf = Vec::new();
        buf.queue(command).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_clip_to_terminal() {
        assert_eq!(clip(1880, 200), 200);
        assert_eq!(clip(40, 200), 40);
        assert_eq!(clip(u32::MAX, 80), 80);
    }

    #[test]
    fn test_put_skips_cells_outside() {
        let mut surface = TerminalSurface::with_writer(Vec::new(), 10, 4);
        surface.put(Point2::new(10, 0), 'H').unwrap();
        surface.put(Point2::new(0, 4), 'H').unwrap();
        surface.put(Point2::new(-1, 2), 'H').unwrap();
        assert!(surface.out.is_empty());

        surface.put(Point2::new(9, 3), '@').unwrap();
        let written = String::from_utf8(surface.out.clone()).unwrap();
        assert!(written.ends_with('@'));
    }

    #[test]
    fn test_message_text_ignores_glyph_colors() {
        let mut surface = TerminalSurface::with_writer(Vec::new(), 80, 24);
        surface.print(Point2::new(0, 0), "Error opening file: H@.ppm").unwrap();
        let written = String::from_utf8(surface.out.clone()).unwrap();

        assert!(written.contains(&encoded(SetForegroundColor(Color::Yellow))));
        assert!(!written.contains(&encoded(SetForegroundColor(Color::Cyan))));
        assert!(!written.contains(&encoded(SetForegroundColor(Color::White))));
        assert!(written.contains("Error opening file: H@.ppm"));
    }

    #[test]
    fn test_print_clips_at_right_edge() {
        let mut surface = TerminalSurface::with_writer(Vec::new(), 6, 2);
        surface.print(Point2::new(2, 1), "abcdef").unwrap();
        let written = String::from_utf8(surface.out.clone()).unwrap();
        assert!(written.ends_with("abcd"));

        let mut outside = TerminalSurface::with_writer(Vec::new(), 6, 2);
        outside.print(Point2::new(0, 2), "abc").unwrap();
        assert!(outside.out.is_empty());
    }

    #[test]
    fn test_drop_restores_owned_screen() {
        let mut buf = Vec::new();
        {
            let mut surface = TerminalSurface::with_writer(&mut buf, 10, 4);
            surface.owns_screen = true;
        }
        let written = String::from_utf8(buf).unwrap();
        assert!(written.contains(&encoded(terminal::LeaveAlternateScreen)));
        assert!(written.contains(&encoded(cursor::Show)));

        let mut borrowed = Vec::new();
        drop(TerminalSurface::with_writer(&mut borrowed, 10, 4));
        assert!(borrowed.is_empty());
    }

    #[test]
    fn test_glyph_colors() {
        assert_eq!(color_for('@'), Color::Cyan);
        assert_eq!(color_for('H'), Color::White);
        assert_eq!(color_for('E'), Color::Yellow);
    }
}
