use crate::core::Interval;

/// Values an [`Animator`](super::Animator) can blend between.
pub trait Interpolate: Copy + PartialEq {
    #[must_use]
    fn add(self, other: Self) -> Self;
    #[must_use]
    fn sub(self, other: Self) -> Self;
    #[must_use]
    fn scale(self, factor: f64) -> Self;

    /// `self + (to - self) * progress`.
    #[must_use]
    fn lerp(self, to: Self, progress: f64) -> Self {
        self.add(to.sub(self).scale(progress))
    }
}

impl Interpolate for f64 {
    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }
}

impl Interpolate for f32 {
    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn scale(self, factor: f64) -> Self {
        (f64::from(self) * factor) as f32
    }
}

impl<T: Interpolate> Interpolate for Interval<T> {
    fn add(self, other: Self) -> Self {
        Self {
            min: self.min.add(other.min),
            max: self.max.add(other.max),
        }
    }

    fn sub(self, other: Self) -> Self {
        Self {
            min: self.min.sub(other.min),
            max: self.max.sub(other.max),
        }
    }

    fn scale(self, factor: f64) -> Self {
        Self {
            min: self.min.scale(factor),
            max: self.max.scale(factor),
        }
    }
}

/// Quadratic ease-out: fast start, gentle landing.
#[must_use]
pub fn ease_out_quad(progress: f64) -> f64 {
    let remaining = 1.0 - progress;
    1.0 - remaining * remaining
}
