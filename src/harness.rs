//! Headless host for driving the page logic without a browser.
//!
//! [`MemoryDom`] is a tiny id-indexed document holding selects, buttons and
//! plain elements. [`ManualClock`] is a [`Scheduler`] whose time only moves
//! when [`ManualClock::advance_time`] is called, so delayed callbacks run
//! deterministically.
//!
//! ```
//! use base_station_page::harness::{ManualClock, MemoryDom};
//! use base_station_page::{DelayedDetector, PageConfig, PageInitializer, ProfileState};
//! use std::rc::Rc;
//!
//! let dom = MemoryDom::new().with_select("age").with_button("openOtherSiteButton");
//! let clock = ManualClock::new();
//! let page = Rc::new(PageInitializer::new(
//!     dom.clone(),
//!     DelayedDetector::new(clock.clone(), 3000),
//!     Rc::new(ProfileState::new()),
//!     PageConfig::default(),
//! ));
//! page.on_load().unwrap();
//! assert_eq!(dom.is_disabled("openOtherSiteButton"), Some(true));
//! clock.advance_time(3000);
//! assert_eq!(dom.is_disabled("openOtherSiteButton"), Some(false));
//! ```

use crate::dom::Dom;
use crate::timers::Scheduler;
use crate::{AgeOption, PageError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Node {
    Select {
        // (value, label)
        options: Vec<(String, String)>,
        selected: Option<usize>,
    },
    Button {
        disabled: bool,
    },
    Other,
}

#[derive(Debug, Default)]
struct DocumentState {
    nodes: HashMap<String, Node>,
    location: Option<String>,
}

/// In-memory document. Clones share the same underlying state.
#[derive(Debug, Default, Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<DocumentState>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(self, id: &str, node: Node) -> Self {
        self.inner.borrow_mut().nodes.insert(id.to_string(), node);
        self
    }

    /// Add an empty `<select>`.
    pub fn with_select(self, id: &str) -> Self {
        self.insert(
            id,
            Node::Select {
                options: Vec::new(),
                selected: None,
            },
        )
    }

    /// Add an enabled `<button>`.
    pub fn with_button(self, id: &str) -> Self {
        self.insert(id, Node::Button { disabled: false })
    }

    /// Add an element that is neither a select nor a button.
    pub fn with_element(self, id: &str) -> Self {
        self.insert(id, Node::Other)
    }

    /// `(value, label)` pairs of a select, in document order.
    pub fn options(&self, id: &str) -> Option<Vec<(String, String)>> {
        match self.inner.borrow().nodes.get(id) {
            Some(Node::Select { options, .. }) => Some(options.clone()),
            _ => None,
        }
    }

    pub fn is_disabled(&self, id: &str) -> Option<bool> {
        match self.inner.borrow().nodes.get(id) {
            Some(Node::Button { disabled }) => Some(*disabled),
            _ => None,
        }
    }

    /// Last location set through [`Dom::navigate`].
    pub fn location(&self) -> Option<String> {
        self.inner.borrow().location.clone()
    }

    /// Pick the option whose value equals `value`, as a user would.
    pub fn choose(&self, id: &str, value: &str) -> Result<()> {
        let mut doc = self.inner.borrow_mut();
        match doc.nodes.get_mut(id) {
            Some(Node::Select { options, selected }) => {
                let idx = options
                    .iter()
                    .position(|(v, _)| v == value)
                    .ok_or_else(|| PageError::InvalidAge(value.to_string()))?;
                *selected = Some(idx);
                Ok(())
            }
            Some(_) => Err(wrong_kind(id, "select")),
            None => Err(PageError::MissingElement(id.to_string())),
        }
    }

    /// Simulated click: runs `handler` unless the button is disabled.
    /// Returns whether the handler ran.
    pub fn click(&self, id: &str, handler: impl FnOnce()) -> Result<bool> {
        let enabled = match self.inner.borrow().nodes.get(id) {
            Some(Node::Button { disabled }) => !*disabled,
            Some(_) => true,
            None => return Err(PageError::MissingElement(id.to_string())),
        };
        if enabled {
            handler();
        }
        Ok(enabled)
    }
}

fn wrong_kind(id: &str, expected: &'static str) -> PageError {
    PageError::WrongElementKind {
        id: id.to_string(),
        expected,
    }
}

impl Dom for MemoryDom {
    fn contains(&self, id: &str) -> bool {
        self.inner.borrow().nodes.contains_key(id)
    }

    fn append_option(&self, select_id: &str, option: &AgeOption) -> Result<bool> {
        match self.inner.borrow_mut().nodes.get_mut(select_id) {
            Some(Node::Select { options, .. }) => {
                options.push((option.value_attr(), option.label.clone()));
                Ok(true)
            }
            Some(_) => Err(wrong_kind(select_id, "select")),
            None => Ok(false),
        }
    }

    fn selected_value(&self, select_id: &str) -> Result<Option<String>> {
        match self.inner.borrow().nodes.get(select_id) {
            // A single-choice select shows its first option until one is picked.
            Some(Node::Select { options, selected }) => {
                Ok(options.get(selected.unwrap_or(0)).map(|(v, _)| v.clone()))
            }
            Some(_) => Err(wrong_kind(select_id, "select")),
            None => Ok(None),
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<bool> {
        match self.inner.borrow_mut().nodes.get_mut(id) {
            Some(Node::Button { disabled: current }) => {
                *current = disabled;
                Ok(true)
            }
            Some(_) => Err(wrong_kind(id, "button")),
            None => Ok(false),
        }
    }

    fn navigate(&self, path: &str) -> Result<()> {
        self.inner.borrow_mut().location = Some(path.to_string());
        Ok(())
    }
}

struct PendingTask {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

/// Virtual clock. Clones share the same timeline.
#[derive(Default, Clone)]
pub struct ManualClock {
    inner: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on this clock.
    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Move time forward by `delta_ms`, running every task that falls due in
    /// order of due time, then scheduling order. Returns how many ran.
    pub fn advance_time(&self, delta_ms: u64) -> usize {
        let target = self.now().saturating_add(delta_ms);
        let mut ran = 0;
        loop {
            let next = {
                let mut state = self.inner.borrow_mut();
                let idx = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let pending = state.tasks.remove(i);
                    state.now = pending.due;
                    pending.task
                })
            };
            // Borrow released: tasks may schedule more work on this clock.
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
        ran
    }
}

impl Scheduler for ManualClock {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut state = self.inner.borrow_mut();
        let due = state.now + delay_ms as u64;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.tasks.push(PendingTask { due, seq, task });
    }
}
