// Mock implementations for testing - no side effects

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::state::{CompositeState, TransitionError};

/// Parent stub that counts transition requests.
#[derive(Debug, Default)]
pub struct RecordingParent {
    pub transitions: u32,
}

impl CompositeState for RecordingParent {
    fn next_sub_state(&mut self) -> Result<(), TransitionError> {
        self.transitions += 1;
        Ok(())
    }
}

/// Parent stub whose transition always fails.
#[derive(Debug, Default)]
pub struct FailingParent {
    pub attempts: u32,
}

impl CompositeState for FailingParent {
    fn next_sub_state(&mut self) -> Result<(), TransitionError> {
        self.attempts += 1;
        Err(TransitionError::Exhausted)
    }
}

/// Downgrade a concrete parent cell to the weak trait-object handle a
/// [`crate::TimedState`] expects, leaving the caller's strong handle intact.
pub fn weak_parent<P>(parent: &Rc<RefCell<P>>) -> Weak<RefCell<dyn CompositeState>>
where
    P: CompositeState + 'static,
{
    let erased: Rc<RefCell<dyn CompositeState>> = parent.clone();
    Rc::downgrade(&erased)
}
