use indicatif::{ProgressBar, ProgressStyle};

use super::Indicator;
use super::glyphs::Glyph;

/// Terminal rendering of the node's 5x5 LED matrix, drawn on an
/// indicatif spinner line so it coexists with log output.
pub struct MatrixPanel {
    bar: ProgressBar,
    pixels: [[u8; 5]; 5],
}

pub mod templates {
    pub const PANEL: &str = "{spinner:.green} {prefix:.bold} {msg}";
}

impl MatrixPanel {
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template(templates::PANEL)
                .unwrap(),
        );
        bar.set_prefix(label.to_string());
        let panel = Self {
            bar,
            pixels: [[0; 5]; 5],
        };
        panel.repaint();
        panel
    }

    fn repaint(&self) {
        let rows: Vec<String> = self
            .pixels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&p| if p > 0 { '█' } else { '·' })
                    .collect()
            })
            .collect();
        self.bar.set_message(rows.join("|"));
    }

    /// Leave the panel line in the scrollback on shutdown.
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl Indicator for MatrixPanel {
    fn show(&mut self, glyph: &Glyph) {
        self.pixels = glyph.0;
        self.repaint();
    }

    fn clear(&mut self) {
        self.pixels = [[0; 5]; 5];
        self.repaint();
    }

    fn set_pixel(&mut self, x: usize, y: usize) {
        if x < 5 && y < 5 {
            self.pixels[y][x] = 9;
            self.repaint();
        }
    }

    fn fill_until(&mut self, x: usize, y: usize) {
        self.pixels = [[0; 5]; 5];
        for row in 0..5 {
            for col in 0..5 {
                self.pixels[row][col] = 9;
                if col == x && row == y {
                    self.repaint();
                    return;
                }
            }
        }
        self.repaint();
    }
}
