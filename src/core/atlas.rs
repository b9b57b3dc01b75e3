use super::crop::UvRect;
use glam::Vec2;

/// Grid packing of equally sized tiles into one square-ish texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    pub tile_w: u32,
    pub tile_h: u32,
    pub columns: u32,
    pub rows: u32,
    pub capacity: usize,
}

impl AtlasLayout {
    /// Lay out `count` tiles of `tile_w x tile_h` texels within `max_dim`,
    /// halving the tile size until the grid fits. Always holds at least one
    /// tile so an empty catalog still yields a bindable texture.
    pub fn new(count: usize, tile_w: u32, tile_h: u32, max_dim: u32) -> Self {
        let count = count.max(1) as u64;
        let max_dim = max_dim.max(1);
        let mut tw = tile_w.clamp(1, max_dim);
        let mut th = tile_h.clamp(1, max_dim);
        loop {
            let max_cols = (max_dim / tw).max(1) as u64;
            let max_rows = (max_dim / th).max(1) as u64;
            // Prefer a roughly square texture.
            let ideal = ((count as f64 * th as f64 / tw as f64).sqrt().ceil() as u64).max(1);
            let columns = ideal.min(max_cols).min(count);
            let rows = count.div_ceil(columns);
            if rows <= max_rows || (tw == 1 && th == 1) {
                let rows = rows.min(max_rows);
                return Self {
                    tile_w: tw,
                    tile_h: th,
                    columns: columns as u32,
                    rows: rows as u32,
                    capacity: (columns * rows) as usize,
                };
            }
            tw = (tw / 2).max(1);
            th = (th / 2).max(1);
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.columns * self.tile_w
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rows * self.tile_h
    }

    /// Texel origin of a slot, or `None` past capacity.
    pub fn origin(&self, slot: usize) -> Option<(u32, u32)> {
        if slot >= self.capacity {
            return None;
        }
        let col = slot as u32 % self.columns;
        let row = slot as u32 / self.columns;
        Some((col * self.tile_w, row * self.tile_h))
    }

    /// Normalized rectangle covering a slot.
    pub fn uv_rect(&self, slot: usize) -> Option<UvRect> {
        let (x, y) = self.origin(slot)?;
        let size = Vec2::new(self.width() as f32, self.height() as f32);
        Some(UvRect {
            offset: Vec2::new(x as f32, y as f32) / size,
            repeat: Vec2::new(self.tile_w as f32, self.tile_h as f32) / size,
        })
    }
}
