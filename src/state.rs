// Seams to the state-machine base - the timed state only ever sees these traits

use thiserror::Error;

/// Lifecycle hooks invoked by the state-machine driver.
///
/// The driver calls `on_enter` when a node becomes the active state,
/// `on_tick` on every scheduler tick while it stays active, and `on_exit`
/// when the machine moves away. All hooks run synchronously on the driver's
/// thread of control.
pub trait StateNode {
    fn on_enter(&mut self);
    fn on_tick(&mut self);
    fn on_exit(&mut self);
}

/// Capability of a composite state to advance to its next child state.
///
/// Implementations must not synchronously re-enter the child that requested
/// the transition; the driver applies the switch on its own turn.
pub trait CompositeState {
    fn next_sub_state(&mut self) -> Result<(), TransitionError>;
}

/// Why a composite state refused to advance.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("no further sub-state to advance to")]
    Exhausted,
    #[error("composite state is not running")]
    NotRunning,
    #[error("transition failed: {0}")]
    Other(String),
}
