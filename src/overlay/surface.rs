//! Host rendering and lifecycle contracts
//!
//! Overlays never draw pixels themselves. They drive a [`TextSurface`]
//! supplied by the host through an [`OverlayHost`].

use crate::config::OverlayStyle;

/// Pixel size of an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }
}

/// Screen placement of a character sprite
///
/// `x` is the horizontal center and `y` the bottom edge, matching how
/// character sprites are anchored on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SpriteBounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        SpriteBounds {
            x,
            y,
            width,
            height,
        }
    }
}

/// A drawable rectangle the overlay renders into
pub trait TextSurface {
    /// Window metrics this surface draws with; overlays size themselves by it
    fn style(&self) -> OverlayStyle;

    /// Width in pixels of a single line of text
    fn measure_line(&self, line: &str) -> u32;

    /// Sets the outer size and recreates the (empty) content buffer
    fn resize(&mut self, size: Size);

    /// Wipes the content buffer
    fn clear(&mut self);

    /// Draws one line of text with its top-left at `(x, y)` in content space
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Screen-space position of the top-left corner
    fn set_position(&mut self, x: i32, y: i32);

    fn set_visible(&mut self, visible: bool);
}

/// Where overlay surfaces come from
pub trait OverlayHost {
    type Surface: TextSurface;

    /// Creates a surface attached to the scene's overlay layer.
    /// Returns `None` while the scene has no such layer yet.
    fn create_surface(&mut self) -> Option<Self::Surface>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Surface double that records what the overlay asked for
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub style: OverlayStyle,
        pub size: Size,
        pub position: (i32, i32),
        pub visible: bool,
        pub clears: usize,
        pub resizes: usize,
        pub lines: Vec<(String, i32, i32)>,
    }

    /// Every character is 10px wide
    pub const CHAR_WIDTH: u32 = 10;

    impl RecordingSurface {
        pub fn with_style(style: OverlayStyle) -> Self {
            RecordingSurface {
                style,
                ..Default::default()
            }
        }
    }

    impl TextSurface for RecordingSurface {
        fn style(&self) -> OverlayStyle {
            self.style
        }

        fn measure_line(&self, line: &str) -> u32 {
            line.chars().count() as u32 * CHAR_WIDTH
        }

        fn resize(&mut self, size: Size) {
            self.size = size;
            self.resizes += 1;
            self.lines.clear();
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.lines.clear();
        }

        fn draw_text(&mut self, text: &str, x: i32, y: i32) {
            self.lines.push((text.to_string(), x, y));
        }

        fn set_position(&mut self, x: i32, y: i32) {
            self.position = (x, y);
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    /// Host double whose overlay layer can be switched on
    #[derive(Debug, Default)]
    pub struct TestHost {
        pub layer_ready: bool,
        pub created: usize,
    }

    impl TestHost {
        pub fn ready() -> Self {
            TestHost {
                layer_ready: true,
                created: 0,
            }
        }
    }

    impl OverlayHost for TestHost {
        type Surface = RecordingSurface;

        fn create_surface(&mut self) -> Option<RecordingSurface> {
            if !self.layer_ready {
                return None;
            }
            self.created += 1;
            Some(RecordingSurface::default())
        }
    }
}
