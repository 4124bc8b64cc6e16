//! Two-queue cooperative scheduler pumped by external host ticks.
//!
//! The host calls [`Scheduler::update`] once per logical frame and
//! [`Scheduler::fixed_update`] once per fixed-timestep frame, each with the
//! elapsed seconds since the previous call of the same kind. Everything runs
//! synchronously on whichever thread the tick callback arrives on.

use std::rc::Rc;

use crate::routine::{Routine, RoutineHandle, RoutineState, Shared, Step, Wait};

struct Entry {
    routine: Box<dyn Routine>,
    shared: Rc<Shared>,
    /// Seconds left until the next resumption. A wait is a minimum, not a
    /// deadline: the routine resumes on the first tick where this reaches
    /// zero.
    remaining: f64,
}

#[derive(Default)]
pub struct Scheduler {
    logical: Vec<Entry>,
    fixed: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a routine, running its first step immediately.
    ///
    /// The kind of the first yield binds the routine to the logical or the
    /// fixed queue for its whole life. A routine that returns [`Step::Done`]
    /// from its first step completes without ever being queued.
    pub fn spawn(&mut self, mut routine: impl Routine + 'static) -> RoutineHandle {
        let shared = Rc::new(Shared::new());
        let handle = RoutineHandle::new(shared.clone());

        shared.set_state(RoutineState::Running);
        match routine.step() {
            Step::Done => {
                shared.set_state(RoutineState::Completed);
            }
            Step::Yield(wait) => {
                let entry = Entry {
                    routine: Box::new(routine),
                    shared,
                    remaining: wait.delay(),
                };
                if wait.is_fixed() {
                    self.fixed.push(entry);
                } else {
                    self.logical.push(entry);
                }
            }
        }
        handle
    }

    /// Pump the logical queue with the elapsed frame time in seconds.
    pub fn update(&mut self, dt: f64) {
        Self::pump(&mut self.logical, dt);
    }

    /// Pump the fixed-timestep queue with the fixed step in seconds.
    pub fn fixed_update(&mut self, dt: f64) {
        Self::pump(&mut self.fixed, dt);
    }

    fn pump(queue: &mut Vec<Entry>, dt: f64) {
        let mut i = 0;
        while i < queue.len() {
            let entry = &mut queue[i];

            // Cancellation is honored before the resumption, never mid-step.
            if entry.shared.cancel_requested() {
                entry.shared.set_state(RoutineState::Cancelled);
                log::debug!("routine cancelled");
                queue.remove(i);
                continue;
            }

            entry.remaining -= dt;
            if entry.remaining > 0.0 {
                i += 1;
                continue;
            }

            match entry.routine.step() {
                Step::Done => {
                    entry.shared.set_state(RoutineState::Completed);
                    queue.remove(i);
                }
                Step::Yield(wait) => {
                    entry.remaining = wait.delay();
                    i += 1;
                }
            }
        }
    }

    /// Routines currently parked in the logical queue.
    pub fn logical_len(&self) -> usize {
        self.logical.len()
    }

    /// Routines currently parked in the fixed-timestep queue.
    pub fn fixed_len(&self) -> usize {
        self.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logical.is_empty() && self.fixed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_routine(counter: Rc<Cell<u32>>, steps: u32, wait: Wait) -> impl FnMut() -> Step {
        let mut left = steps;
        move || {
            counter.set(counter.get() + 1);
            left -= 1;
            if left == 0 {
                Step::Done
            } else {
                Step::Yield(wait)
            }
        }
    }

    #[test]
    fn first_step_runs_on_spawn() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();

        scheduler.spawn(counting_routine(counter.clone(), 3, Wait::Frame));
        assert_eq!(counter.get(), 1);
        assert_eq!(scheduler.logical_len(), 1);
    }

    #[test]
    fn done_on_first_step_never_queues() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.spawn(|| Step::Done);

        assert_eq!(handle.state(), RoutineState::Completed);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn frame_wait_resumes_every_tick() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.spawn(counting_routine(counter.clone(), 3, Wait::Frame));

        scheduler.update(0.016);
        assert_eq!(counter.get(), 2);
        scheduler.update(0.016);
        assert_eq!(counter.get(), 3);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn first_yield_binds_queue() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.spawn(counting_routine(counter.clone(), 2, Wait::FixedFrame));

        assert_eq!(scheduler.fixed_len(), 1);
        assert_eq!(scheduler.logical_len(), 0);

        // Logical ticks do not touch the fixed queue.
        scheduler.update(1.0);
        assert_eq!(counter.get(), 1);

        scheduler.fixed_update(0.02);
        assert_eq!(counter.get(), 2);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn one_second_delay_timing() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.spawn(counting_routine(counter.clone(), 2, Wait::Seconds(1.0)));
        assert_eq!(counter.get(), 1);

        // Three quarter-second ticks: 0.75s elapsed, still waiting.
        scheduler.update(0.25);
        scheduler.update(0.25);
        scheduler.update(0.25);
        assert_eq!(counter.get(), 1);

        // First tick at/after the full second resumes.
        scheduler.update(0.25);
        assert_eq!(counter.get(), 2);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn completion_removes_in_same_tick() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        let handle = scheduler.spawn(counting_routine(counter.clone(), 2, Wait::Frame));

        assert_eq!(scheduler.logical_len(), 1);
        scheduler.update(0.016);
        assert_eq!(scheduler.logical_len(), 0);
        assert_eq!(handle.state(), RoutineState::Completed);
    }

    #[test]
    fn cancellation_checked_before_resumption() {
        let counter = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        let handle = scheduler.spawn(counting_routine(counter.clone(), 10, Wait::Frame));
        assert_eq!(counter.get(), 1);

        handle.cancel();
        scheduler.update(0.016);

        // Never stepped again after the cancellation request.
        assert_eq!(counter.get(), 1);
        assert_eq!(handle.state(), RoutineState::Cancelled);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn is_running_during_waits() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.spawn(|| Step::Yield(Wait::Seconds(5.0)));

        assert!(handle.is_running());
        scheduler.update(1.0);
        assert!(handle.is_running());
    }

    #[test]
    fn multiple_routines_progress_independently() {
        let fast = Rc::new(Cell::new(0));
        let slow = Rc::new(Cell::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.spawn(counting_routine(fast.clone(), 5, Wait::Frame));
        scheduler.spawn(counting_routine(slow.clone(), 2, Wait::Seconds(1.0)));

        scheduler.update(0.5);
        scheduler.update(0.5);
        assert_eq!(fast.get(), 3);
        assert_eq!(slow.get(), 2);
    }
}
