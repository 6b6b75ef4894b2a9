//! Shelf packing with a growing sheet.
//!
//! Glyphs are placed left to right along the current shelf. When the next
//! glyph would push the right edge past the width limit, a new shelf starts
//! at the current sheet height, which is the bottom of the tallest glyph
//! placed so far. The sheet grows to fit every placement and never shrinks.
//!
//! With a safety edge every glyph reserves one extra column to its right
//! and one extra row below it. The edge is part of the bounds arithmetic
//! but not of the glyph's reported size.

/// Position assigned to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

/// Deterministic shelf packer.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    max_width: u32,
    edge: u32,
    cursor_x: u32,
    cursor_y: u32,
    sheet_width: u32,
    sheet_height: u32,
}

impl ShelfPacker {
    /// Create an empty packer. `safe_edge` reserves one transparent pixel
    /// after every glyph on both axes.
    pub fn new(max_width: u32, safe_edge: bool) -> Self {
        Self {
            max_width,
            edge: u32::from(safe_edge),
            cursor_x: 0,
            cursor_y: 0,
            sheet_width: 0,
            sheet_height: 0,
        }
    }

    /// Width limit of the sheet.
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Padding pixels reserved after each glyph.
    pub fn edge(&self) -> u32 {
        self.edge
    }

    /// Current sheet size.
    pub fn size(&self) -> (u32, u32) {
        (self.sheet_width, self.sheet_height)
    }

    /// Current cursor position.
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Assign a position to a `width x height` glyph and grow the sheet.
    ///
    /// Glyphs with zero area are not placed: they get `(0, 0)` and leave
    /// the packer untouched. Returns `None` if the glyph is wider than the
    /// sheet limit.
    pub fn place(&mut self, width: u32, height: u32) -> Option<Placement> {
        if width == 0 || height == 0 {
            return Some(Placement::default());
        }
        if width > self.max_width {
            return None;
        }

        let right = self.cursor_x + width + self.edge;
        if right <= self.max_width {
            self.sheet_width = self.sheet_width.max(right);
        } else {
            // Start a new shelf below everything placed so far.
            self.cursor_x = 0;
            self.cursor_y = self.sheet_height;
            // A glyph exactly as wide as the limit drops its edge column.
            let right = (width + self.edge).min(self.max_width);
            self.sheet_width = self.sheet_width.max(right);
        }

        let placement = Placement {
            x: self.cursor_x,
            y: self.cursor_y,
        };

        let bottom = self.cursor_y + height + self.edge;
        self.sheet_height = self.sheet_height.max(bottom);
        self.cursor_x += width + self.edge;

        Some(placement)
    }
}
