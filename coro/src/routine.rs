//! Routine step functions, yield values and lifecycle handles.

use std::cell::Cell;
use std::rc::Rc;

/// What a routine waits for before its next resumption.
///
/// The first yield of a routine also picks its queue: `Frame`/`Seconds`
/// bind it to the logical tick, `FixedFrame`/`FixedSeconds` to the
/// fixed-timestep tick, for the rest of its life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wait {
    /// Resume on the next logical tick.
    Frame,
    /// Resume on the first logical tick at or after this many seconds.
    Seconds(f64),
    /// Resume on the next fixed-timestep tick.
    FixedFrame,
    /// Resume on the first fixed-timestep tick at or after this many seconds.
    FixedSeconds(f64),
}

impl Wait {
    pub(crate) fn is_fixed(&self) -> bool {
        matches!(self, Wait::FixedFrame | Wait::FixedSeconds(_))
    }

    pub(crate) fn delay(&self) -> f64 {
        match self {
            Wait::Frame | Wait::FixedFrame => 0.0,
            Wait::Seconds(s) | Wait::FixedSeconds(s) => *s,
        }
    }
}

/// Result of one routine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Suspend and resume after the given wait.
    Yield(Wait),
    /// The routine has finished.
    Done,
}

/// A cooperative routine: a step function resumed by the scheduler.
///
/// A resumption runs to the next yield point without interruption; the
/// scheduler cannot cancel a routine mid-step.
pub trait Routine {
    fn step(&mut self) -> Step;
}

impl<F: FnMut() -> Step> Routine for F {
    fn step(&mut self) -> Step {
        self()
    }
}

/// Lifecycle of a scheduled routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineState {
    Created,
    Running,
    Cancelled,
    Completed,
}

pub(crate) struct Shared {
    state: Cell<RoutineState>,
    cancel_requested: Cell<bool>,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            state: Cell::new(RoutineState::Created),
            cancel_requested: Cell::new(false),
        }
    }

    pub(crate) fn set_state(&self, state: RoutineState) {
        self.state.set(state);
    }

    pub(crate) fn state(&self) -> RoutineState {
        self.state.get()
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel_requested.get()
    }
}

/// Observer and cancellation handle for a spawned routine.
///
/// Cancellation is checked at resumption boundaries only: a cancelled
/// routine transitions to [`RoutineState::Cancelled`] and leaves its queue
/// on the next tick that would have considered it.
#[derive(Clone)]
pub struct RoutineHandle {
    shared: Rc<Shared>,
}

impl RoutineHandle {
    pub(crate) fn new(shared: Rc<Shared>) -> Self {
        Self { shared }
    }

    pub fn state(&self) -> RoutineState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state() == RoutineState::Running
    }

    /// Request cancellation before the next resumption.
    pub fn cancel(&self) {
        self.shared.cancel_requested.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_queue_binding() {
        assert!(!Wait::Frame.is_fixed());
        assert!(!Wait::Seconds(1.0).is_fixed());
        assert!(Wait::FixedFrame.is_fixed());
        assert!(Wait::FixedSeconds(0.5).is_fixed());
    }

    #[test]
    fn frame_waits_have_no_delay() {
        assert_eq!(Wait::Frame.delay(), 0.0);
        assert_eq!(Wait::Seconds(2.5).delay(), 2.5);
    }

    #[test]
    fn handle_reflects_shared_state() {
        let shared = Rc::new(Shared::new());
        let handle = RoutineHandle::new(shared.clone());

        assert_eq!(handle.state(), RoutineState::Created);
        shared.set_state(RoutineState::Running);
        assert!(handle.is_running());

        handle.cancel();
        assert!(shared.cancel_requested());
    }
}
