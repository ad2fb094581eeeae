//! Frame-driven timekeeping: fixed-step ticks and cancellable one-shot timers.

pub mod scheduler;
pub mod timer;

pub use scheduler::{tick_interval, FixedStepScheduler, Simulation};
pub use timer::{TimerQueue, TimerToken};
