//! Page-side logic for the base station's registration page.
//!
//! Fills the age dropdown, keeps the "open other site" button disabled until a
//! profile is detected, and navigates away on request. The browser bindings
//! live in [`web`]; everything else is host-agnostic so it runs natively under
//! the [`harness`].

use std::fmt;

pub mod config;
pub mod dom;
pub mod harness;
pub mod initializer;
pub mod profile;
pub mod timers;
pub mod utils;
pub mod web;

pub use config::PageConfig;
pub use dom::Dom;
pub use initializer::PageInitializer;
pub use profile::{DelayedDetector, ProfileDetector, ProfileState};
pub use timers::{Scheduler, TimeoutScheduler};

use config::{MAX_AGE, MIN_AGE};

// Error type for everything the page logic can fail on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    AgeOutOfRange(i64),
    InvalidAge(String),
    MissingElement(String),
    /// The id resolved, but not to the element kind the operation needs.
    WrongElementKind {
        id: String,
        expected: &'static str,
    },
    /// The host environment threw while performing a DOM operation.
    Host(String),
    Config(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::AgeOutOfRange(value) => write!(
                f,
                "Age {} is out of range ({}-{})",
                value, MIN_AGE, MAX_AGE
            ),
            PageError::InvalidAge(input) => write!(f, "Invalid age value: {:?}", input),
            PageError::MissingElement(id) => write!(f, "No element with id '{}'", id),
            PageError::WrongElementKind { id, expected } => {
                write!(f, "Element '{}' is not a <{}>", id, expected)
            }
            PageError::Host(msg) => write!(f, "Host error: {}", msg),
            PageError::Config(msg) => write!(f, "Invalid page config: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

pub type Result<T> = std::result::Result<T, PageError>;

/// A single entry of the age dropdown. The label is always the decimal form of
/// the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgeOption {
    pub value: u8,
    pub label: String,
}

impl AgeOption {
    pub fn new(value: i64) -> Result<Self> {
        if value < MIN_AGE as i64 || value > MAX_AGE as i64 {
            return Err(PageError::AgeOutOfRange(value));
        }
        let value = value as u8;
        Ok(AgeOption {
            value,
            label: value.to_string(),
        })
    }

    /// The string stored in the option's `value` attribute.
    pub fn value_attr(&self) -> String {
        self.value.to_string()
    }
}

/// All age options in ascending order, `MIN_AGE..=MAX_AGE`.
pub fn age_options() -> impl Iterator<Item = AgeOption> {
    (MIN_AGE..=MAX_AGE).map(|value| AgeOption {
        value,
        label: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_options_cover_range_without_gaps() {
        let options: Vec<AgeOption> = age_options().collect();
        assert_eq!(options.len(), 99);
        for (i, option) in options.iter().enumerate() {
            assert_eq!(option.value as usize, i + 1);
            assert_eq!(option.label, option.value_attr());
        }
        assert_eq!(options.first().map(|o| o.label.as_str()), Some("1"));
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("99"));
    }

    #[test]
    fn age_option_rejects_out_of_range() {
        assert_eq!(AgeOption::new(0), Err(PageError::AgeOutOfRange(0)));
        assert_eq!(AgeOption::new(100), Err(PageError::AgeOutOfRange(100)));
        assert_eq!(AgeOption::new(-3), Err(PageError::AgeOutOfRange(-3)));
        let opt = AgeOption::new(42).unwrap();
        assert_eq!(opt.value, 42);
        assert_eq!(opt.label, "42");
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            PageError::AgeOutOfRange(120).to_string(),
            "Age 120 is out of range (1-99)"
        );
        assert_eq!(
            PageError::WrongElementKind {
                id: "age".into(),
                expected: "select"
            }
            .to_string(),
            "Element 'age' is not a <select>"
        );
    }
}
