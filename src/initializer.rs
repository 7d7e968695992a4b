//! Page start-up: fills the age dropdown, keeps the navigation button in sync
//! with the profile flag, and navigates on request.

use crate::config::PageConfig;
use crate::dom::Dom;
use crate::profile::{ProfileDetector, ProfileState};
use crate::utils::parse_age;
use crate::{age_options, AgeOption, Result};
use log::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;

pub struct PageInitializer<D: Dom, P: ProfileDetector> {
    dom: D,
    detector: P,
    state: Rc<ProfileState>,
    config: PageConfig,
    detection_started: Cell<bool>,
}

impl<D: Dom, P: ProfileDetector> PageInitializer<D, P> {
    pub fn new(dom: D, detector: P, state: Rc<ProfileState>, config: PageConfig) -> Self {
        PageInitializer {
            dom,
            detector,
            state,
            config,
            detection_started: Cell::new(false),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn state(&self) -> &Rc<ProfileState> {
        &self.state
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Append one option per age to the age select, ascending.
    ///
    /// Returns how many options were appended: 0 when the select is absent.
    /// Existing options are left alone, so calling this twice doubles the list.
    pub fn populate_age_dropdown(&self) -> Result<usize> {
        let id = &self.config.age_select_id;
        if !self.dom.contains(id) {
            debug!("No '{}' element, skipping age dropdown", id);
            return Ok(0);
        }

        let mut appended = 0;
        for option in age_options() {
            if !self.dom.append_option(id, &option)? {
                break;
            }
            appended += 1;
        }
        debug!("Appended {} age options to '{}'", appended, id);
        Ok(appended)
    }

    /// Disable the button unless a profile has been detected. No-op when the
    /// button is absent.
    pub fn update_button_state(&self) -> Result<()> {
        let disabled = !self.state.is_detected();
        if self.dom.set_disabled(&self.config.button_id, disabled)? {
            debug!(
                "Button '{}' {}",
                self.config.button_id,
                if disabled { "disabled" } else { "enabled" }
            );
        }
        Ok(())
    }

    /// Navigate to the other site. The button's disabled state only stops UI
    /// clicks; a direct call always navigates.
    pub fn open_other_site(&self) -> Result<()> {
        info!("Navigating to {}", self.config.other_site_path);
        self.dom.navigate(&self.config.other_site_path)
    }

    /// The age currently chosen in the dropdown.
    pub fn selected_age(&self) -> Result<Option<AgeOption>> {
        match self.dom.selected_value(&self.config.age_select_id)? {
            Some(value) if !value.is_empty() => parse_age(&value).map(Some),
            _ => Ok(None),
        }
    }
}

impl<D: Dom + 'static, P: ProfileDetector + 'static> PageInitializer<D, P> {
    /// Page-load handler.
    ///
    /// Fills the dropdown, syncs the button (disabled until detection), and
    /// starts profile detection. Detection starts at most once per
    /// initializer.
    ///
    /// A broken dropdown or button does not stop the other steps; the first
    /// such error is returned once detection has been started.
    pub fn on_load(self: &Rc<Self>) -> Result<()> {
        let mut first_error = None;
        if let Err(e) = self.populate_age_dropdown() {
            warn!("Could not populate age dropdown: {}", e);
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.update_button_state() {
            warn!("Could not sync button state: {}", e);
            first_error.get_or_insert(e);
        }

        if self.detection_started.replace(true) {
            warn!("Page already loaded, not restarting profile detection");
            return first_error.map_or(Ok(()), Err);
        }

        let page = Rc::downgrade(self);
        self.state.on_detected(move || {
            if let Some(page) = page.upgrade() {
                if let Err(e) = page.update_button_state() {
                    warn!("Failed to update button after detection: {}", e);
                }
            }
        });
        self.detector.start(self.state.clone());
        first_error.map_or(Ok(()), Err)
    }
}
