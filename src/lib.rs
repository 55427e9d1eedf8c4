// Timed State Library - Wall-Clock Timeout Layer for Hierarchical State Machines
// This exposes the core components for embedding and testing

pub mod clock;
pub mod state;
pub mod telemetry;
pub mod time_format;
pub mod timed_state;

#[cfg(test)]
pub mod mocks;

// Re-export key types for easy access
pub use clock::{Clock, ManualClock, SystemClock};
pub use state::{CompositeState, StateNode, TransitionError};
pub use telemetry::init_telemetry;
pub use timed_state::{TimedState, TimeoutCallback};
