//! Display banding. Aggregators produce plain numbers; the row builder tags
//! them with a [`Tier`] and the renderer decides what a tier looks like.

use common::config::Thresholds;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tier {
    #[default]
    Normal,
    /// Below the healthy range, or stale.
    Flagged,
    Elevated,
    High,
}

impl Tier {
    pub fn flagged_if(cond: bool) -> Self {
        if cond {
            Self::Flagged
        } else {
            Self::Normal
        }
    }
}

/// `< flag_below` is Flagged, `>= high_from` High, `>= elevated_from` Elevated.
pub fn tier<T: PartialOrd + Copy>(value: T, thresholds: &Thresholds<T>) -> Tier {
    if thresholds.flag_below.is_some_and(|low| value < low) {
        Tier::Flagged
    } else if thresholds.high_from.is_some_and(|high| value >= high) {
        Tier::High
    } else if thresholds.elevated_from.is_some_and(|mid| value >= mid) {
        Tier::Elevated
    } else {
        Tier::Normal
    }
}

/// A value together with its display tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banded<T> {
    pub value: T,
    pub tier: Tier,
}

impl<T> Banded<T> {
    pub fn new(value: T, tier: Tier) -> Self {
        Self { value, tier }
    }
}
