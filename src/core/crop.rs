use glam::Vec2;

/// Normalized sample rectangle inside a source image (`offset + repeat <= 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub offset: Vec2,
    pub repeat: Vec2,
}

impl UvRect {
    pub const FULL: UvRect = UvRect {
        offset: Vec2::ZERO,
        repeat: Vec2::ONE,
    };

    /// Resolve against a concrete image size as `(sx, sy, sw, sh)` in pixels.
    pub fn source_px(&self, width: u32, height: u32) -> (f64, f64, f64, f64) {
        let w = width as f64;
        let h = height as f64;
        (
            self.offset.x as f64 * w,
            self.offset.y as f64 * h,
            self.repeat.x as f64 * w,
            self.repeat.y as f64 * h,
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.offset + self.repeat * 0.5
    }
}

/// Centered square crop for an image of the given size.
///
/// Wide images keep the middle `1/aspect` of their width, tall images the
/// middle `aspect` of their height. Returns `None` for empty images.
pub fn square_crop(width: u32, height: u32) -> Option<UvRect> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(square_crop_for_aspect(width as f32 / height as f32))
}

pub fn square_crop_for_aspect(aspect: f32) -> UvRect {
    if aspect > 1.0 {
        let span = 1.0 / aspect;
        UvRect {
            offset: Vec2::new((1.0 - span) / 2.0, 0.0),
            repeat: Vec2::new(span, 1.0),
        }
    } else {
        UvRect {
            offset: Vec2::new(0.0, (1.0 - aspect) / 2.0),
            repeat: Vec2::new(1.0, aspect),
        }
    }
}
