use std::fmt;

/// Unique identifier for a combatant tracked by the turn engine.
///
/// Identifiers are opaque strings (e.g. `"player_1"`, `"hostile_2"`) so they
/// can round-trip through scenario files unchanged.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(String);

impl CombatantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombatantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CombatantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Continuous world position. `y` is the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane position (`y = 0`).
    pub const fn flat(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Euclidean distance including height.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance on the ground plane, ignoring height.
    pub fn planar_distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Unit vector on the ground plane pointing from `self` towards `other`.
    ///
    /// Returns [`Position::ORIGIN`] when both points coincide.
    pub fn direction_to(&self, other: &Position) -> Position {
        let distance = self.planar_distance(other);
        if distance <= f32::EPSILON {
            return Position::ORIGIN;
        }
        Position::new(
            (other.x - self.x) / distance,
            0.0,
            (other.z - self.z) / distance,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Integer resource meter (e.g. hit points) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current over maximum, clamped to `[0, 1]`. A zero maximum reads as empty.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.maximum as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 10.0, 4.0);
        assert_eq!(a.planar_distance(&b), 5.0);
        assert!(a.distance(&b) > 5.0);
    }

    #[test]
    fn test_resource_fraction_is_clamped() {
        assert_eq!(ResourceMeter::new(15, 10).fraction(), 1.0);
        assert_eq!(ResourceMeter::new(-3, 10).fraction(), 0.0);
        assert_eq!(ResourceMeter::new(5, 0).fraction(), 0.0);
        assert_eq!(ResourceMeter::new(5, 10).fraction(), 0.5);
    }
}
