//! Troop info window: the overlay that holds the summary text
//!
//! The window caches its text and only re-measures and redraws when the
//! text actually changes. Redraws are the expensive part, so repeated
//! `set_text` calls with the same text are free.
//!
//! # Layout
//!
//! ```text
//! +--------------------------------+  ^
//! |  standard_padding              |  |
//! |    [pad] Slime (10)    [pad]   |  | lines * line_height
//! |    [pad] Bat (8)       [pad]   |  |   + 2 * standard_padding
//! |    [pad] 18 exp / 8G   [pad]   |  |
//! |                                |  |
//! +--------------------------------+  v
//! ```

use super::surface::{Size, TextSurface};
use crate::config::OverlayStyle;
use log::debug;

/// Computes the window size that fits `text`
///
/// Lines are measured one at a time; `measure_line` only handles a single
/// line. Empty text still counts as one (empty) line.
pub fn measure_text(text: &str, style: &OverlayStyle, measure_line: impl Fn(&str) -> u32) -> Size {
    let frame = style.standard_padding * 2;
    let lines: Vec<&str> = text.split('\n').collect();
    let content_width = lines
        .iter()
        .map(|&line| measure_line(line) + style.text_padding * 2)
        .max()
        .unwrap_or(0);

    Size {
        width: content_width + frame,
        height: lines.len() as u32 * style.line_height + frame,
    }
}

pub struct TroopInfoWindow<S> {
    surface: S,
    text: String,
    size: Size,
    position: (i32, i32),
    visible: bool,
}

impl<S: TextSurface> TroopInfoWindow<S> {
    /// Wraps a fresh surface. Starts hidden with empty text.
    ///
    /// Sizing uses the surface's own metrics, the same ones it draws with.
    pub fn new(mut surface: S) -> Self {
        let size = measure_text("", &surface.style(), |line| surface.measure_line(line));
        surface.resize(size);
        surface.set_visible(false);
        TroopInfoWindow {
            surface,
            text: String::new(),
            size,
            position: (0, 0),
            visible: false,
        }
    }

    /// Replaces the text. Returns `true` if the window was redrawn.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.redraw();
        true
    }

    fn redraw(&mut self) {
        let surface = &self.surface;
        let style = surface.style();
        self.size = measure_text(&self.text, &style, |line| surface.measure_line(line));

        self.surface.resize(self.size);
        self.surface.clear();

        if !self.text.is_empty() {
            let x = style.text_padding as i32;
            for (row, line) in self.text.split('\n').enumerate() {
                let y = row as i32 * style.line_height as i32;
                self.surface.draw_text(line, x, y);
            }
        }

        debug!(
            "Troop window redrawn at {}x{} ({} bytes of text)",
            self.size.width,
            self.size.height,
            self.text.len()
        );
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        self.surface.set_position(x, y);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.surface.set_visible(visible);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hides the window and hands back its surface
    pub fn into_surface(mut self) -> S {
        self.set_visible(false);
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::surface::testing::{RecordingSurface, CHAR_WIDTH};

    fn window() -> TroopInfoWindow<RecordingSurface> {
        TroopInfoWindow::new(RecordingSurface::default())
    }

    #[test]
    fn test_new_window_is_hidden_and_empty() {
        let window = window();
        assert!(!window.is_visible());
        assert_eq!(window.text(), "");
        assert_eq!(window.size(), Size::new(48, 72));
        assert!(!window.surface().visible);
    }

    #[test]
    fn test_size_fits_widest_line() {
        let mut window = window();
        assert!(window.set_text("Slime (10)\nBat (8)\n18 exp / 8G"));

        // widest line is 11 chars
        let style = OverlayStyle::default();
        let expected_width = 11 * CHAR_WIDTH + style.text_padding * 2 + style.standard_padding * 2;
        let expected_height = 3 * style.line_height + style.standard_padding * 2;
        assert_eq!(window.size(), Size::new(expected_width, expected_height));
        assert_eq!(window.surface().size, window.size());
    }

    #[test]
    fn test_lines_drawn_one_per_row() {
        let mut window = window();
        window.set_text("Slime (10)\n8G");
        let lines = &window.surface().lines;
        assert_eq!(
            lines,
            &vec![("Slime (10)".to_string(), 6, 0), ("8G".to_string(), 6, 36)]
        );
    }

    #[test]
    fn test_same_text_is_not_redrawn() {
        let mut window = window();
        assert!(window.set_text("8G"));
        let size = window.size();
        let clears = window.surface().clears;

        assert!(!window.set_text("8G"));
        assert_eq!(window.size(), size);
        assert_eq!(window.surface().clears, clears);
    }

    #[test]
    fn test_back_to_empty_text_shrinks() {
        let mut window = window();
        window.set_text("Slime (10)");
        assert!(window.set_text(""));
        assert_eq!(window.size(), Size::new(48, 72));
        assert!(window.surface().lines.is_empty());
    }

    #[test]
    fn test_sizes_with_surface_metrics() {
        let style = OverlayStyle {
            line_height: 18,
            text_padding: 4,
            standard_padding: 6,
        };
        let mut window = TroopInfoWindow::new(RecordingSurface::with_style(style));
        window.set_text("8G\n18 exp");

        let expected_width = 6 * CHAR_WIDTH + 4 * 2 + 6 * 2;
        assert_eq!(window.size(), Size::new(expected_width, 2 * 18 + 6 * 2));
        assert_eq!(window.surface().lines[1], ("18 exp".to_string(), 4, 18));
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        let style = OverlayStyle::default();
        let size = measure_text("", &style, |line| line.len() as u32);
        assert_eq!(
            size,
            Size::new(
                style.text_padding * 2 + style.standard_padding * 2,
                style.line_height + style.standard_padding * 2
            )
        );
    }

    #[test]
    fn test_measure_text_with_custom_style() {
        let style = OverlayStyle {
            line_height: 10,
            text_padding: 1,
            standard_padding: 2,
        };
        let size = measure_text("ab\nabcd", &style, |line| line.len() as u32);
        assert_eq!(size, Size::new(4 + 2 + 4, 20 + 4));
    }

    #[test]
    fn test_visibility_and_position_forwarded() {
        let mut window = window();
        window.set_visible(true);
        window.set_position(-5, 12);
        assert!(window.surface().visible);
        assert_eq!(window.surface().position, (-5, 12));
        assert_eq!(window.position(), (-5, 12));

        let surface = window.into_surface();
        assert!(!surface.visible);
    }
}
