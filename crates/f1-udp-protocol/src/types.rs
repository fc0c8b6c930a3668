//! Small value types shared by several payloads.

use serde::Serialize;

/// Three-component vector in the game's world or local frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Wheel position within a [`WheelArray`].
///
/// The discriminant is the wire slot: every four-element wheel array in the
/// protocol is ordered rear-left, rear-right, front-left, front-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Wheel {
    RearLeft = 0,
    RearRight = 1,
    FrontLeft = 2,
    FrontRight = 3,
}

impl Wheel {
    /// All wheels in wire order.
    pub const ALL: [Wheel; 4] = [
        Wheel::RearLeft,
        Wheel::RearRight,
        Wheel::FrontLeft,
        Wheel::FrontRight,
    ];

    pub fn slot(self) -> usize {
        usize::from(self as u8)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Wheel::RearLeft => "rl",
            Wheel::RearRight => "rr",
            Wheel::FrontLeft => "fl",
            Wheel::FrontRight => "fr",
        }
    }
}

/// Per-wheel values in fixed RL, RR, FL, FR order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WheelArray<T>(pub [T; 4]);

impl<T: Copy> WheelArray<T> {
    pub fn get(&self, wheel: Wheel) -> T {
        let [rl, rr, fl, fr] = self.0;
        match wheel {
            Wheel::RearLeft => rl,
            Wheel::RearRight => rr,
            Wheel::FrontLeft => fl,
            Wheel::FrontRight => fr,
        }
    }

    pub fn rear_left(&self) -> T {
        self.get(Wheel::RearLeft)
    }

    pub fn rear_right(&self) -> T {
        self.get(Wheel::RearRight)
    }

    pub fn front_left(&self) -> T {
        self.get(Wheel::FrontLeft)
    }

    pub fn front_right(&self) -> T {
        self.get(Wheel::FrontRight)
    }

    /// Pairs of `(wheel, value)` in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (Wheel, T)> + '_ {
        Wheel::ALL.into_iter().zip(self.0)
    }
}

impl<T> From<[T; 4]> for WheelArray<T> {
    fn from(values: [T; 4]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_slots_follow_wire_order() {
        let slots: Vec<usize> = Wheel::ALL.iter().map(|w| w.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_wheel_array_accessors() {
        let arr = WheelArray([10u16, 20, 30, 40]);
        assert_eq!(arr.rear_left(), 10);
        assert_eq!(arr.rear_right(), 20);
        assert_eq!(arr.front_left(), 30);
        assert_eq!(arr.front_right(), 40);
        let names: Vec<&str> = arr.iter().map(|(w, _)| w.short_name()).collect();
        assert_eq!(names, vec!["rl", "rr", "fl", "fr"]);
    }

    #[test]
    fn test_vector_magnitude() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-6);
    }
}
