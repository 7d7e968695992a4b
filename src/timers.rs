//! One-shot delayed callbacks.

use gloo_timers::callback::Timeout;
use log::debug;

pub trait Scheduler {
    /// Run `task` once, `delay_ms` from now. There is no cancellation.
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser scheduler backed by `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        debug!("Scheduling one-shot timeout in {} ms", delay_ms);
        // Dropping a Timeout cancels it; forget hands ownership to the JS side.
        Timeout::new(delay_ms, task).forget();
    }
}
