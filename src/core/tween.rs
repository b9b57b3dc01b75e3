/// A continuous scalar that chases its target with exponential decay.
///
/// Each [`Smoothed::step`] moves `current` a fixed fraction `k` of the
/// remaining distance toward `target`. For `0 < k < 1` the sequence is
/// monotone, never overshoots and never lands on the target in a single
/// step; it converges to within floating-point precision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
}

impl Smoothed {
    pub const fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn step(&mut self, k: f32) {
        self.current = approach(self.current, self.target, k);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        (self.target - self.current).abs()
    }
}

#[inline]
pub fn approach(current: f32, target: f32, k: f32) -> f32 {
    debug_assert!(k > 0.0 && k < 1.0, "decay constant must be in (0, 1)");
    current + (target - current) * k
}
