//! Meeting status and its indicator colour.

use std::fmt;

/// Derived meeting status, recomputed on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    OutOfOffice,
    Busy,
    Free,
}

/// An RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const OFF: Colour = Colour { r: 0, g: 0, b: 0 };
    pub const RED: Colour = Colour { r: 255, g: 0, b: 0 };
    pub const GREEN: Colour = Colour { r: 0, g: 255, b: 0 };
}

impl Status {
    pub fn colour(self) -> Colour {
        match self {
            Status::OutOfOffice => Colour::OFF,
            Status::Busy => Colour::RED,
            Status::Free => Colour::GREEN,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::OutOfOffice => "OUT OF OFFICE",
            Status::Busy => "BUSY",
            Status::Free => "FREE",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
