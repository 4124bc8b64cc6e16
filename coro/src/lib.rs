//! Cooperative coroutine scheduling for a scripting host.
//!
//! Routines are plain step functions resumed by a [`Scheduler`] that the
//! host pumps from its frame callbacks: one logical tick per rendered frame
//! and one fixed-timestep tick per physics step. Each routine yields a
//! [`Wait`] describing when it wants to run next; the kind of its first
//! yield decides which of the two queues owns it.
//!
//! ```ignore
//! let mut scheduler = Scheduler::new();
//! let handle = scheduler.spawn(|| {
//!     // ... one step of work ...
//!     Step::Yield(Wait::Seconds(1.0))
//! });
//!
//! // Per frame, from the host:
//! scheduler.update(dt);
//! scheduler.fixed_update(fixed_dt);
//!
//! handle.cancel();
//! ```
//!
//! Routine failures are silent from the scheduler's point of view: a
//! finished or cancelled routine just stops being resumed, and its fate is
//! observable through its [`RoutineHandle`].

mod routine;
mod scheduler;

pub use routine::{Routine, RoutineHandle, RoutineState, Step, Wait};
pub use scheduler::Scheduler;
