//! Scheduler tests written against the public API only, driving the two
//! tick callbacks the way a host main loop would.

use std::cell::Cell;
use std::rc::Rc;

use saffron_coro::{RoutineState, Scheduler, Step, Wait};

/// A routine that records the logical time of each resumption.
struct TimestampRoutine {
    clock: Rc<Cell<f64>>,
    log: Rc<Cell<Vec<f64>>>,
    steps_left: u32,
    wait: Wait,
}

impl TimestampRoutine {
    fn record(&self) {
        let mut log = self.log.take();
        log.push(self.clock.get());
        self.log.set(log);
    }
}

impl saffron_coro::Routine for TimestampRoutine {
    fn step(&mut self) -> Step {
        self.record();
        self.steps_left -= 1;
        if self.steps_left == 0 {
            Step::Done
        } else {
            Step::Yield(self.wait)
        }
    }
}

#[test]
fn delayed_routine_fires_at_the_right_tick() {
    let clock = Rc::new(Cell::new(0.0));
    let log = Rc::new(Cell::new(Vec::new()));
    let mut scheduler = Scheduler::new();

    scheduler.spawn(TimestampRoutine {
        clock: clock.clone(),
        log: log.clone(),
        steps_left: 3,
        wait: Wait::Seconds(1.0),
    });

    // Quarter-second ticks; 0.25 is exact in binary so the elapsed time
    // hits the 1s boundary without rounding noise.
    for _ in 0..12 {
        clock.set(clock.get() + 0.25);
        scheduler.update(0.25);
    }

    let timestamps = log.take();
    assert_eq!(timestamps.len(), 3);
    // Spawn step, then the first ticks at/after 1s and 2s of waiting.
    assert_eq!(timestamps, [0.0, 1.0, 2.0]);
}

#[test]
fn logical_and_fixed_queues_are_independent() {
    let logical_runs = Rc::new(Cell::new(0));
    let fixed_runs = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();

    let counter = logical_runs.clone();
    scheduler.spawn(move || {
        counter.set(counter.get() + 1);
        Step::Yield(Wait::Frame)
    });

    let counter = fixed_runs.clone();
    scheduler.spawn(move || {
        counter.set(counter.get() + 1);
        Step::Yield(Wait::FixedFrame)
    });

    for _ in 0..3 {
        scheduler.update(0.016);
    }
    scheduler.fixed_update(0.02);

    assert_eq!(logical_runs.get(), 4);
    assert_eq!(fixed_runs.get(), 2);
}

#[test]
fn cancelled_mid_wait_never_resumes() {
    let runs = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();

    let counter = runs.clone();
    let handle = scheduler.spawn(move || {
        counter.set(counter.get() + 1);
        Step::Yield(Wait::Seconds(10.0))
    });

    scheduler.update(1.0);
    handle.cancel();
    scheduler.update(20.0);

    assert_eq!(runs.get(), 1);
    assert_eq!(handle.state(), RoutineState::Cancelled);
    assert!(scheduler.is_empty());
}

#[test]
fn handle_observes_completion() {
    let mut scheduler = Scheduler::new();
    let mut remaining = 2;
    let handle = scheduler.spawn(move || {
        remaining -= 1;
        if remaining == 0 {
            Step::Done
        } else {
            Step::Yield(Wait::Frame)
        }
    });

    assert!(handle.is_running());
    scheduler.update(0.016);
    assert_eq!(handle.state(), RoutineState::Completed);
    assert!(!handle.is_running());
}
