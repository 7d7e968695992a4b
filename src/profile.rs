//! Profile detection state.
//!
//! [`ProfileState`] holds the single "profile detected" flag. It starts false,
//! flips to true once, and never resets. Interested parties either register a
//! callback with [`ProfileState::on_detected`] or await
//! [`ProfileState::detected`].
//!
//! Detection itself sits behind [`ProfileDetector`]; the only implementation
//! today is [`DelayedDetector`], which flips the flag after a fixed delay.

use crate::timers::Scheduler;
use futures::channel::oneshot;
use futures::FutureExt;
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

type Listener = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct ProfileState {
    detected: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
    waiters: RefCell<Vec<oneshot::Sender<()>>>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_detected(&self) -> bool {
        self.detected.get()
    }

    /// Set the flag and notify everyone waiting on it.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn mark_detected(&self) -> bool {
        if self.detected.replace(true) {
            debug!("Profile already detected, ignoring");
            return false;
        }
        info!("Profile detected");

        // Take the lists first so a listener may register further listeners.
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners {
            listener();
        }
        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        for waiter in waiters {
            let _ = waiter.send(());
        }
        true
    }

    /// Run `callback` once the profile is detected. Runs it right away if the
    /// flag is already set.
    pub fn on_detected(&self, callback: impl FnOnce() + 'static) {
        if self.is_detected() {
            callback();
        } else {
            self.listeners.borrow_mut().push(Box::new(callback));
        }
    }

    /// Resolves once the profile is detected.
    pub fn detected(&self) -> impl Future<Output = ()> {
        let (tx, rx) = oneshot::channel();
        if self.is_detected() {
            let _ = tx.send(());
        } else {
            self.waiters.borrow_mut().push(tx);
        }
        // A dropped sender means the state went away undetected; nothing to wait for.
        rx.map(|_| ())
    }
}

/// Source of the "profile detected" signal.
pub trait ProfileDetector {
    /// Begin detection. Implementations call `state.mark_detected()` when the
    /// profile shows up.
    fn start(&self, state: Rc<ProfileState>);
}

/// Flips the flag once after a fixed delay.
pub struct DelayedDetector<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
}

impl<S: Scheduler> DelayedDetector<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        DelayedDetector {
            scheduler,
            delay_ms,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl<S: Scheduler> ProfileDetector for DelayedDetector<S> {
    fn start(&self, state: Rc<ProfileState>) {
        debug!("Simulating profile detection in {} ms", self.delay_ms);
        self.scheduler.schedule_once(
            self.delay_ms,
            Box::new(move || {
                state.mark_detected();
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::ManualClock;
    use futures::executor::block_on;

    #[test]
    fn flag_flips_once() {
        let state = ProfileState::new();
        assert!(!state.is_detected());
        assert!(state.mark_detected());
        assert!(state.is_detected());
        assert!(!state.mark_detected());
        assert!(state.is_detected());
    }

    #[test]
    fn listeners_fire_once_on_flip() {
        let state = ProfileState::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.on_detected(move || counter.set(counter.get() + 1));
        assert_eq!(hits.get(), 0);

        state.mark_detected();
        state.mark_detected();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn late_listener_runs_immediately() {
        let state = ProfileState::new();
        state.mark_detected();
        let hit = Rc::new(Cell::new(false));
        let flag = hit.clone();
        state.on_detected(move || flag.set(true));
        assert!(hit.get());
    }

    #[test]
    fn detected_future_resolves_after_flip() {
        let state = Rc::new(ProfileState::new());
        let waiting = state.detected();
        state.mark_detected();
        block_on(waiting);

        // Already detected: resolves straight away.
        block_on(state.detected());
    }

    #[test]
    fn delayed_detector_waits_for_full_delay() {
        let clock = ManualClock::new();
        let state = Rc::new(ProfileState::new());
        let detector = DelayedDetector::new(clock.clone(), 3000);
        detector.start(state.clone());

        clock.advance_time(2999);
        assert!(!state.is_detected());
        clock.advance_time(1);
        assert!(state.is_detected());
    }
}
