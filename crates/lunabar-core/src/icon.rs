//! Tray icon rasterization.
//!
//! The tray button shows a miniature calendar page: the short weekday name
//! over the day-of-month numeral on a rounded-rectangle background. Rendering
//! is a pure function of the date, so the scheduler can regenerate the icon
//! every midnight and swap it on the tray atomically.

use chrono::{Datelike, NaiveDate, Weekday};

/// Logical icon edge in pixels (square).
pub const ICON_SIZE: u32 = 22;

const CORNER_RADIUS: f64 = 5.0;
const BACKGROUND: [u8; 4] = [198, 40, 40, 255];
const FOREGROUND: [u8; 4] = [255, 255, 255, 255];

/// The two date components the icon depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDate {
    pub day_of_month: u32,
    pub weekday: Weekday,
}

impl From<NaiveDate> for IconDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day_of_month: date.day(),
            weekday: date.weekday(),
        }
    }
}

/// Fixed-size RGBA bitmap, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Short weekday name as shown on the icon.
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Render the tray icon for `date`. Same input, byte-identical output.
pub fn render(date: IconDate) -> IconBitmap {
    let mut canvas = Canvas::new(ICON_SIZE, ICON_SIZE);
    canvas.fill_rounded_rect(CORNER_RADIUS, BACKGROUND);

    // Weekday abbreviation, 3x5 glyphs, top-centered.
    let abbrev = weekday_abbrev(date.weekday).to_ascii_uppercase();
    canvas.draw_text_small(&abbrev, 3, FOREGROUND);

    // Day numeral, 5x7 glyphs, centered in the lower band.
    let day = date.day_of_month.min(31).to_string();
    canvas.draw_text_large(&day, 11, FOREGROUND);

    IconBitmap {
        width: canvas.width,
        height: canvas.height,
        rgba: canvas.pixels,
    }
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Fill the whole canvas, leaving the four corners rounded off.
    fn fill_rounded_rect(&mut self, radius: f64, color: [u8; 4]) {
        let w = self.width as i32;
        let h = self.height as i32;
        for y in 0..h {
            for x in 0..w {
                if Self::inside_rounded(x, y, w, h, radius) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn inside_rounded(x: i32, y: i32, w: i32, h: i32, radius: f64) -> bool {
        let r = radius;
        let fx = x as f64 + 0.5;
        let fy = y as f64 + 0.5;
        let cx = fx.clamp(r, w as f64 - r);
        let cy = fy.clamp(r, h as f64 - r);
        let dx = fx - cx;
        let dy = fy - cy;
        dx * dx + dy * dy <= r * r
    }

    /// 3x5 microfont, one blank column between glyphs, centered horizontally.
    fn draw_text_small(&mut self, text: &str, top: i32, color: [u8; 4]) {
        let glyphs: Vec<[u8; 5]> = text.chars().map(glyph_small).collect();
        let total = (glyphs.len() as i32) * 4 - 1;
        let mut x0 = (self.width as i32 - total) / 2;
        for glyph in glyphs {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100 >> col) != 0 {
                        self.set_pixel(x0 + col, top + row as i32, color);
                    }
                }
            }
            x0 += 4;
        }
    }

    /// 5x7 digit font, one blank column between glyphs, centered horizontally.
    fn draw_text_large(&mut self, text: &str, top: i32, color: [u8; 4]) {
        let glyphs: Vec<[u8; 7]> = text.chars().map(glyph_digit).collect();
        let total = (glyphs.len() as i32) * 6 - 1;
        let mut x0 = (self.width as i32 - total) / 2;
        for glyph in glyphs {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..5 {
                    if bits & (0b10000 >> col) != 0 {
                        self.set_pixel(x0 + col, top + row as i32, color);
                    }
                }
            }
            x0 += 6;
        }
    }
}

/// 3x5 glyphs for the letters appearing in English weekday abbreviations.
fn glyph_small(c: char) -> [u8; 5] {
    match c {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        _ => [0; 5],
    }
}

fn glyph_digit(c: char) -> [u8; 7] {
    match c {
        '0' => [
            0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
        ],
        '1' => [
            0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ],
        '2' => [
            0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111,
        ],
        '3' => [
            0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110,
        ],
        '4' => [
            0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
        ],
        '5' => [
            0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
        ],
        '6' => [
            0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110,
        ],
        '7' => [
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
        ],
        '8' => [
            0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
        ],
        '9' => [
            0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100,
        ],
        _ => [0; 7],
    }
}
