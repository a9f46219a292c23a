use serde::{Deserialize, Serialize};

/// Four-momentum stored as three-momentum plus invariant mass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector {
    /// Momentum along x.
    pub px: f64,
    /// Momentum along y.
    pub py: f64,
    /// Momentum along z.
    pub pz: f64,
    /// Invariant mass, assumed non-negative.
    pub mass: f64,
}

impl LorentzVector {
    /// Creates a four-momentum from its components.
    pub const fn new(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        Self { px, py, pz, mass }
    }

    /// Total energy `sqrt(px² + py² + pz² + m²)`.
    pub fn energy(&self) -> f64 {
        (self.p2() + self.mass * self.mass).sqrt()
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Squared magnitude of the three-momentum.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Returns a copy with the three-momentum scaled by `factor`; the mass is kept.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.px * factor, self.py * factor, self.pz * factor, self.mass)
    }
}

/// Spatial point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// z coordinate.
    pub z: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Point in space-time at which a candidate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpacetimePoint {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// z coordinate.
    pub z: f64,
    /// Time coordinate.
    pub t: f64,
}

impl SpacetimePoint {
    /// Creates a space-time point from its coordinates.
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    /// Drops the time coordinate.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y, self.z)
    }
}

/// Inclusive, non-empty range of positions in the candidate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    first: usize,
    last: usize,
}

impl IndexRange {
    /// Creates the range `[first, last]`, or `None` when `last < first`.
    pub fn new(first: usize, last: usize) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    /// Creates a range covering exactly one position.
    pub const fn single(index: usize) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    /// First position of the range.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last position of the range (inclusive).
    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always false; ranges are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns whether `index` lies inside the range.
    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }

    /// Iterates over the covered positions in increasing order.
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}
