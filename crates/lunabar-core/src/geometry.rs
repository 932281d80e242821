//! Screen geometry for anchoring the popup window beneath the tray button.
//!
//! All rectangles live in one global screen coordinate space with the y axis
//! growing upward (the window server's convention on macOS): `min_y` is the
//! bottom edge of a rectangle, `max_y` the top edge.

/// Vertical gap between the tray button and the popup window.
pub const ANCHOR_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }
}

/// One physical or logical screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    pub bounds: Rect,
}

/// The set of connected displays plus the designated primary.
///
/// Displays may be non-contiguous; a point belongs to at most one of them.
#[derive(Debug, Clone)]
pub struct DisplayLayout {
    pub displays: Vec<Display>,
    pub primary: Display,
}

impl DisplayLayout {
    pub fn new(displays: Vec<Display>, primary: Display) -> Self {
        Self { displays, primary }
    }

    /// The display whose bounds contain `point`, falling back to the primary
    /// when no display does (e.g. the anchor sits on a just-disconnected
    /// screen).
    pub fn display_containing(&self, point: Point) -> Display {
        self.displays
            .iter()
            .copied()
            .find(|d| d.bounds.contains(point))
            .unwrap_or_else(|| {
                tracing::warn!(?point, "no display contains point, using primary");
                self.primary
            })
    }
}

/// Compute the popup frame: horizontally centered under `anchor`, just below
/// it (y-up convention), clamped into the display that holds the anchor.
///
/// The returned size is always exactly `window`; only the origin is adjusted.
/// When the window is larger than the display the origin clamps to the
/// display minimum and the rectangle overflows past the far edge.
pub fn place_below(anchor: Rect, window: Size, layout: &DisplayLayout) -> Rect {
    let display = layout.display_containing(anchor.origin());
    let screen = display.bounds;

    let candidate_x = anchor.mid_x() - window.width / 2.0;
    let candidate_y = anchor.min_y() - window.height - ANCHOR_GAP;

    let x = clamp(candidate_x, screen.min_x(), screen.max_x() - window.width);
    let y = clamp(candidate_y, screen.min_y(), screen.max_y() - window.height);

    Rect::new(x, y, window.width, window.height)
}

/// Clamp with `min` winning when the interval is inverted (window larger than
/// the display).
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(displays: &[Rect]) -> DisplayLayout {
        let displays: Vec<Display> = displays.iter().map(|&bounds| Display { bounds }).collect();
        let primary = displays[0];
        DisplayLayout::new(displays, primary)
    }

    #[test]
    fn centers_below_anchor_when_room() {
        let layout = layout(&[Rect::new(0.0, 0.0, 2000.0, 1100.0)]);
        let anchor = Rect::new(980.0, 1078.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 300.0, height: 400.0 }, &layout);
        assert_eq!(frame, Rect::new(842.0, 673.0, 300.0, 400.0));
    }

    #[test]
    fn clamps_to_right_edge() {
        // Worked example: anchor near the right edge of a 1000-wide display.
        let layout = layout(&[Rect::new(0.0, 0.0, 1000.0, 1080.0)]);
        let anchor = Rect::new(900.0, 1060.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 500.0, height: 450.0 }, &layout);
        assert_eq!(frame, Rect::new(500.0, 605.0, 500.0, 450.0));
    }

    #[test]
    fn clamps_to_left_edge() {
        let layout = layout(&[Rect::new(0.0, 0.0, 1000.0, 1080.0)]);
        let anchor = Rect::new(4.0, 1060.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 500.0, height: 450.0 }, &layout);
        assert_eq!(frame.x, 0.0);
    }

    #[test]
    fn result_is_contained_in_chosen_display() {
        let layout = layout(&[
            Rect::new(0.0, 0.0, 1440.0, 900.0),
            Rect::new(1440.0, -200.0, 1920.0, 1080.0),
        ]);
        let anchor = Rect::new(3300.0, 860.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 500.0, height: 450.0 }, &layout);
        let screen = layout.displays[1].bounds;
        assert!(frame.min_x() >= screen.min_x() && frame.max_x() <= screen.max_x());
        assert!(frame.min_y() >= screen.min_y() && frame.max_y() <= screen.max_y());
    }

    #[test]
    fn falls_back_to_primary_when_anchor_off_screen() {
        let layout = layout(&[Rect::new(0.0, 0.0, 1000.0, 1000.0)]);
        let anchor = Rect::new(5000.0, 5000.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 400.0, height: 300.0 }, &layout);
        let screen = layout.primary.bounds;
        assert!(frame.min_x() >= screen.min_x() && frame.max_x() <= screen.max_x());
        assert!(frame.min_y() >= screen.min_y() && frame.max_y() <= screen.max_y());
    }

    #[test]
    fn oversized_window_clamps_to_display_minimum() {
        let layout = layout(&[Rect::new(0.0, 0.0, 800.0, 600.0)]);
        let anchor = Rect::new(400.0, 580.0, 24.0, 22.0);
        let frame = place_below(anchor, Size { width: 1200.0, height: 900.0 }, &layout);
        assert_eq!((frame.x, frame.y), (0.0, 0.0));
        assert_eq!(frame.size(), Size { width: 1200.0, height: 900.0 });
    }

    #[test]
    fn size_never_altered() {
        let layout = layout(&[Rect::new(0.0, 0.0, 1000.0, 1000.0)]);
        let anchor = Rect::new(500.0, 990.0, 24.0, 22.0);
        let window = Size { width: 500.0, height: 450.0 };
        let frame = place_below(anchor, window, &layout);
        assert_eq!(frame.size(), window);
    }
}
