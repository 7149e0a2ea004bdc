//! Output backends
//!
//! The interchangeable ways of actually displacing the pointer. Which
//! variants exist is a capability of the host: the privileged channel is
//! only selectable once it has been probed successfully.

pub mod channel;
pub mod dispatcher;
pub mod platform;
pub mod selector;
pub mod simulated;

use std::fmt;

pub use channel::{ButtonFlags, PointerRequest, PrivilegedChannel};
pub use dispatcher::Dispatcher;
pub use platform::PointerPlatform;
pub use selector::{BackendSelector, FixedSelector, RandomSelector};
pub use simulated::{PointerCall, SimulatedChannel, SimulatedPointer};

/// Output backend variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Relative synthetic input event with a one-pixel wobble
    SyntheticEvent,
    /// Absolute placement with no delay
    DirectPlacement,
    /// Absolute request over the privileged channel
    PrivilegedChannel,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::SyntheticEvent,
        BackendKind::DirectPlacement,
        BackendKind::PrivilegedChannel,
    ];
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::SyntheticEvent => "synthetic event",
            BackendKind::DirectPlacement => "direct placement",
            BackendKind::PrivilegedChannel => "privileged channel",
        };
        f.write_str(name)
    }
}
