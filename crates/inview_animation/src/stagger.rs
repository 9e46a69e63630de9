//! Stagger groups
//!
//! A container carrying the stagger attribute fans its direct animated
//! children out in time: each child's delay is its rank times the group's
//! per-child increment. The rank depends on where the stagger starts.

/// Where a stagger starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StaggerFrom {
    /// Animate first to last
    #[default]
    First,
    /// Animate last to first
    Last,
    /// Animate from center outward
    Center,
}

impl StaggerFrom {
    /// Parse an attribute value; anything unrecognized starts from `first`
    pub fn from_name(name: &str) -> Self {
        match name {
            "last" => StaggerFrom::Last,
            "center" => StaggerFrom::Center,
            _ => StaggerFrom::First,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaggerFrom::First => "first",
            StaggerFrom::Last => "last",
            StaggerFrom::Center => "center",
        }
    }
}

/// Stagger configuration for a parent container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay increment between consecutive ranks (ms)
    pub duration: u32,
    pub from: StaggerFrom,
}

impl StaggerConfig {
    pub fn new(duration: u32, from: StaggerFrom) -> Self {
        Self { duration, from }
    }

    /// Extra delay (ms) for the child at `index` of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> f64 {
        stagger_rank(self.from, index, total) * f64::from(self.duration)
    }
}

/// Rank of a child within its group
///
/// - `first`: the child index
/// - `last`: the distance from the final child
/// - `center`: the distance from the middle, which is fractional for an even
///   number of children so both middle children share the smallest rank
pub fn stagger_rank(from: StaggerFrom, index: usize, total: usize) -> f64 {
    match from {
        StaggerFrom::First => index as f64,
        StaggerFrom::Last => total.saturating_sub(1).saturating_sub(index) as f64,
        StaggerFrom::Center => {
            let center = total.saturating_sub(1) as f64 / 2.0;
            (index as f64 - center).abs()
        }
    }
}
