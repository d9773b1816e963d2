use serde::{Deserialize, Serialize};

/// Kind of pending work coalesced until the next rendering tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// Axis matrices or channel colors changed.
    Transform,
    XValues,
    /// Stacked weights or baselines changed; vertex Y data must be rebuilt.
    YValues,
    TimeLegend,
    ValueLegend,
    Selection,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Transform => 1 << 0,
            Self::XValues => 1 << 1,
            Self::YValues => 1 << 2,
            Self::TimeLegend => 1 << 3,
            Self::ValueLegend => 1 << 4,
            Self::Selection => 1 << 5,
        }
    }
}

/// Bitmask of invalidation topics used for selective redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Transform.bit()
        | InvalidationTopic::XValues.bit()
        | InvalidationTopic::YValues.bit()
        | InvalidationTopic::TimeLegend.bit()
        | InvalidationTopic::ValueLegend.bit()
        | InvalidationTopic::Selection.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.bits & other.bits) != 0
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        self.intersects(Self::from_topic(topic))
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn insert(&mut self, topic: InvalidationTopic) {
        self.bits |= topic.bit();
    }

    /// Returns the pending topics and clears them.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
