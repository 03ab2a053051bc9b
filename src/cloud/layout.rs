use ab_glyph::{Font, PxScale, ScaleFont, point};

/// Shrink factor applied when a word does not fit at its current size
const SHRINK: f32 = 0.9;

/// Distance in pixels between two turns of the placement spiral
const RING_SPACING: f32 = 4.0;

/// Distance in pixels between two probes along the spiral
const ARC_STEP: f32 = 3.0;

/// Coverage above which a glyph pixel counts as drawn
const DRAWN: f32 = 0.05;

/// Anti-aliased coverage of one word rendered at one size
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    coverage: Vec<f32>,
}

impl GlyphMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; (width * height) as usize],
        }
    }

    /// Rasterizes `text` with `font` at `size` pixels
    pub fn render<F: Font>(font: &F, text: &str, size: f32) -> Self {
        let scaled = font.as_scaled(PxScale::from(size));
        let ascent = scaled.ascent();

        let mut caret = 0.0f32;
        let mut glyphs = Vec::new();
        let mut previous = None;
        for c in text.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph.id);
            }
            glyph.position = point(caret, ascent);
            caret += scaled.h_advance(glyph.id);
            previous = Some(glyph.id);
            glyphs.push(glyph);
        }

        let width = caret.ceil().max(1.0) as u32;
        let height = (ascent - scaled.descent()).ceil().max(1.0) as u32;
        let mut mask = Self::new(width, height);

        for glyph in glyphs {
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, c| {
                let px = bounds.min.x as i64 + x as i64;
                let py = bounds.min.y as i64 + y as i64;
                mask.add(px, py, c);
            });
        }
        mask
    }

    fn add(&mut self, x: i64, y: i64, c: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as u32 * self.width + x as u32) as usize;
        self.coverage[i] = (self.coverage[i] + c).min(1.0);
    }

    #[cfg(test)]
    fn set(&mut self, x: u32, y: u32, c: f32) {
        self.add(x as i64, y as i64, c);
    }

    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        self.coverage[(y * self.width + x) as usize]
    }

    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|c| *c <= DRAWN)
    }
}

/// Pixels already taken by placed words, with a summed-area table for
/// constant-time "is this rectangle free" queries
#[derive(Debug, Clone)]
pub struct Occupancy {
    width: u32,
    height: u32,
    filled: Vec<bool>,
    integral: Vec<u32>,
}

impl Occupancy {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filled: vec![false; (width * height) as usize],
            integral: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    /// Whether the `w`x`h` rectangle at (`x`, `y`) lies on the canvas and
    /// contains no drawn pixel
    pub fn is_free(&self, x: i64, y: i64, w: u32, h: u32) -> bool {
        if x < 0 || y < 0 || x + w as i64 > self.width as i64 || y + h as i64 > self.height as i64 {
            return false;
        }
        let (x0, y0) = (x as u32, y as u32);
        let (x1, y1) = (x0 + w, y0 + h);
        let stride = self.width + 1;
        let at = |x: u32, y: u32| self.integral[(y * stride + x) as usize] as i64;
        at(x1, y1) - at(x0, y1) - at(x1, y0) + at(x0, y0) == 0
    }

    /// Walks an elliptical spiral out from the canvas centre and returns the
    /// first free top-left corner for a `w`x`h` box
    pub fn find_position(&self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }
        let cx = (self.width - w) as f32 / 2.0;
        let cy = (self.height - h) as f32 / 2.0;
        let aspect = self.width as f32 / self.height as f32;

        let mut angle = 0.0f32;
        loop {
            let radius = angle * RING_SPACING / std::f32::consts::TAU;
            if radius * aspect > self.width as f32 && radius > self.height as f32 {
                return None;
            }
            let x = (cx + radius * aspect * angle.cos()).round() as i64;
            let y = (cy + radius * angle.sin()).round() as i64;
            if self.is_free(x, y, w, h) {
                return Some((x as u32, y as u32));
            }
            angle += ARC_STEP / radius.max(1.0);
        }
    }

    /// Marks the drawn pixels of `mask` placed at (`x`, `y`) as taken
    pub fn occupy(&mut self, x: u32, y: u32, mask: &GlyphMask) {
        for my in 0..mask.height {
            for mx in 0..mask.width {
                let (px, py) = (x + mx, y + my);
                if px < self.width && py < self.height && mask.coverage(mx, my) > DRAWN {
                    self.filled[(py * self.width + px) as usize] = true;
                }
            }
        }
        self.rebuild_integral();
    }

    fn rebuild_integral(&mut self) {
        let stride = self.width + 1;
        for y in 0..self.height {
            let mut row = 0u32;
            for x in 0..self.width {
                row += self.filled[(y * self.width + x) as usize] as u32;
                let above = self.integral[(y * stride + x + 1) as usize];
                self.integral[((y + 1) * stride + x + 1) as usize] = above + row;
            }
        }
    }
}

/// Where one word ended up on the canvas
#[derive(Debug, Clone)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub font_size: f32,
    pub mask: GlyphMask,
}

/// Places `text` starting at `font_size`, shrinking until it fits or drops
/// below `min_font_size`. `margin` pixels are kept free on each side.
pub fn place_word<F: Font>(
    font: &F,
    occupancy: &Occupancy,
    text: &str,
    font_size: f32,
    min_font_size: f32,
    margin: u32,
) -> Option<Placement> {
    let mut size = font_size;
    while size >= min_font_size.max(1.0) {
        let mask = GlyphMask::render(font, text, size);
        if !mask.is_blank() {
            let (w, h) = (mask.width + 2 * margin, mask.height + 2 * margin);
            if let Some((x, y)) = occupancy.find_position(w, h) {
                return Some(Placement {
                    x: x + margin,
                    y: y + margin,
                    font_size: size,
                    mask,
                });
            }
        }
        size = (size * SHRINK).floor();
    }
    None
}

/// Font size of the next word given the previous word's size and counts.
///
/// `relative_scaling` 0 keeps sizes purely rank-based, 1 makes them
/// proportional to frequency.
pub fn next_font_size(previous_size: f32, count: usize, previous_count: usize, relative_scaling: f32) -> f32 {
    let ratio = count as f32 / previous_count.max(1) as f32;
    ((relative_scaling * ratio + (1.0 - relative_scaling)) * previous_size).round()
}
