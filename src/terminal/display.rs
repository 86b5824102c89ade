//! Framebuffer-to-terminal blit

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::rasterizer::{Framebuffer, SHADE_LEVELS};

/// Glyph ramp indexed by shade: background first, then rising density
const SHADE_GLYPHS: [char; SHADE_LEVELS as usize] =
    [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

fn shade_color(index: u8) -> Color {
    // Grayscale alongside the glyph ramp so terminals with color
    // support reinforce the density gradient
    let v = (index as u16 * 255 / (SHADE_LEVELS as u16 - 1)) as u8;
    Color::Rgb { r: v, g: v, b: v }
}

/// Owns the raw-mode terminal for the lifetime of the run.
///
/// Keeps the previous frame's shade buffer so the blit only rewrites
/// cells that changed.
pub struct TerminalDisplay {
    out: Stdout,
    width: usize,
    height: usize,
    prev_shade: Vec<u8>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut out = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self {
            out,
            width: width as usize,
            height: height as usize,
            prev_shade: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Record a new terminal size; the next blit repaints everything
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.prev_shade.clear();
    }

    /// Write the framebuffer's shade indices to the terminal.
    ///
    /// The framebuffer is read-only here; only cells whose shade
    /// changed since the previous frame are redrawn.
    pub fn blit(&mut self, fb: &Framebuffer) -> io::Result<()> {
        let full_repaint = self.prev_shade.len() != fb.shade.len();

        let mut last_shade = u8::MAX;
        for y in 0..fb.height.min(self.height) {
            for x in 0..fb.width.min(self.width) {
                let idx = y * fb.width + x;
                let shade = fb.shade[idx];
                if !full_repaint && shade == self.prev_shade[idx] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x as u16, y as u16))?;
                if shade != last_shade {
                    queue!(self.out, SetForegroundColor(shade_color(shade)))?;
                    last_shade = shade;
                }
                queue!(self.out, Print(SHADE_GLYPHS[shade as usize % SHADE_GLYPHS.len()]))?;
            }
        }
        self.out.flush()?;

        self.prev_shade.clear();
        self.prev_shade.extend_from_slice(&fb.shade);
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        // Best-effort restore; the process is exiting either way
        let _ = execute!(self.out, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_ramp_covers_all_shades() {
        assert_eq!(SHADE_GLYPHS.len(), SHADE_LEVELS as usize);
        assert_eq!(SHADE_GLYPHS[0], ' ');
        // Ramp is strictly distinct so adjacent shades stay readable
        for pair in SHADE_GLYPHS.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_shade_color_endpoints() {
        assert_eq!(shade_color(0), Color::Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            shade_color(SHADE_LEVELS - 1),
            Color::Rgb { r: 255, g: 255, b: 255 }
        );
    }
}
