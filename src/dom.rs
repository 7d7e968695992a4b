//! The slice of the host document the page logic touches.
//!
//! Lookups are by element id. Methods that act on an element report whether it
//! existed so callers decide if absence is fine.

use crate::{AgeOption, Result};

pub trait Dom {
    /// Whether an element with this id is present.
    fn contains(&self, id: &str) -> bool;

    /// Append `option` to the `<select>` with this id.
    ///
    /// Returns `Ok(false)` if no such element exists.
    fn append_option(&self, select_id: &str, option: &AgeOption) -> Result<bool>;

    /// Current value of the `<select>`, `None` if absent or nothing selected.
    fn selected_value(&self, select_id: &str) -> Result<Option<String>>;

    /// Set the `disabled` attribute of the button with this id.
    ///
    /// Returns `Ok(false)` if no such element exists.
    fn set_disabled(&self, id: &str, disabled: bool) -> Result<bool>;

    /// Point the page location at `path`.
    fn navigate(&self, path: &str) -> Result<()>;
}
