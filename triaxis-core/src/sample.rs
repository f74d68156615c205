//! Three-axis sample type
//!
//! A `Sample` is one reading from an x/y/z sensor. It is plain data: `Copy`,
//! no identity beyond its value. Arrival order is tracked by the buffer and
//! the session, never by the sample itself.

use core::fmt;

/// One 3-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Sample {
    /// All-zero sample
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Sample from its three components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component for the given axis
    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Components in x, y, z order
    pub const fn components(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Sample {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32, f32)> for Sample {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

/// Renders as `X: 0.12, Y: -0.40, Z: 0.93`
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {:.2}, Y: {:.2}, Z: {:.2}", self.x, self.y, self.z)
    }
}

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Axis {
    /// First component
    X = 0,
    /// Second component
    Y = 1,
    /// Third component
    Z = 2,
}

impl Axis {
    /// Every axis, in x, y, z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Upper-case axis letter
    pub const fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of axes, stored as bit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSet(u8);

impl AxisSet {
    /// No axes
    pub const fn empty() -> Self {
        Self(0)
    }

    /// X, Y and Z
    pub const fn all() -> Self {
        Self(0b111)
    }

    /// Add `axis`; inserting twice is a no-op
    pub fn insert(&mut self, axis: Axis) {
        self.0 |= axis.bit();
    }

    /// True when `axis` is in the set
    pub const fn contains(&self, axis: Axis) -> bool {
        self.0 & axis.bit() != 0
    }

    /// True when no axis is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of axes in the set
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Axes in x, y, z order
    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(move |axis| self.contains(*axis))
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, axis) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(axis.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        let sample = Sample::new(0.123, -0.4, 0.929);
        assert_eq!(sample.to_string(), "X: 0.12, Y: -0.40, Z: 0.93");
    }

    #[test]
    fn axis_access() {
        let sample = Sample::from([1.0, 2.0, 3.0]);
        assert_eq!(sample.axis(Axis::X), 1.0);
        assert_eq!(sample.axis(Axis::Z), 3.0);
        assert_eq!(sample.components(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn axis_set_flags() {
        let mut set = AxisSet::empty();
        assert!(set.is_empty());

        set.insert(Axis::Z);
        set.insert(Axis::X);
        set.insert(Axis::X);

        assert_eq!(set.len(), 2);
        assert!(set.contains(Axis::X));
        assert!(!set.contains(Axis::Y));
        assert_eq!(set.to_string(), "X,Z");
        assert_eq!(AxisSet::all().len(), 3);
    }
}
