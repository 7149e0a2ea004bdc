//! Privileged out-of-process pointer channel
//!
//! Only the request shape lives here. Discovering and establishing the
//! channel is the host's business; the engine probes it once and then
//! sends absolute-position requests through it.

use crate::motion::Position;

/// Button state bits carried by a [`PointerRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonFlags(pub u16);

impl ButtonFlags {
    pub const NONE: Self = Self(0);
    pub const LEFT_DOWN: Self = Self(1);
    pub const LEFT_UP: Self = Self(2);
    pub const RIGHT_DOWN: Self = Self(4);
    pub const RIGHT_UP: Self = Self(8);
    pub const MIDDLE_DOWN: Self = Self(16);
    pub const MIDDLE_UP: Self = Self(32);
    pub const X1_DOWN: Self = Self(64);
    pub const X1_UP: Self = Self(128);
    pub const X2_DOWN: Self = Self(256);
    pub const X2_UP: Self = Self(512);
    pub const WHEEL: Self = Self(1024);
    pub const HORIZONTAL_WHEEL: Self = Self(2048);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ButtonFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One request sent over the channel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerRequest {
    pub x: i32,
    pub y: i32,
    pub button_flags: ButtonFlags,
}

impl PointerRequest {
    /// Plain movement to `target` with no button change
    pub fn movement(target: Position) -> Self {
        Self {
            x: target.x,
            y: target.y,
            button_flags: ButtonFlags::NONE,
        }
    }

    pub fn target(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Request/response link to an elevated pointer service
pub trait PrivilegedChannel: Send + Sync {
    /// Attempt to establish the link; returns whether it is now connected
    fn try_connect(&self) -> bool;

    fn is_connected(&self) -> bool;

    /// Deliver a request; true when the far side acknowledged it
    fn send(&self, request: PointerRequest) -> bool;
}
