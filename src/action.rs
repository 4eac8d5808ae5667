// SPDX-License-Identifier: MPL-2.0
//! Named actions the HUD buttons bind to.
//!
//! Actions are owned here, never by buttons: a button stores the action
//! *name* and the host routes state both ways. [`ActionRegistry::set_checked`]
//! returns the applied change so the host can forward it synchronously to
//! the scene (`HudScene::on_action_state_changed`) in the same call stack,
//! so there is no hidden signal wiring, only explicit data flow.

use std::collections::BTreeMap;

/// An externally-owned command or toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    /// Human-readable label shown in hover tooltips.
    pub label: String,
    /// Shortcut text shown bracketed after the label.
    pub shortcut: Option<String>,
    pub checkable: bool,
    pub checked: bool,
}

impl Action {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            shortcut: None,
            checkable: false,
            checked: false,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn checkable(mut self, checked: bool) -> Self {
        self.checkable = true;
        self.checked = checked;
        self
    }
}

/// A state change applied to a checkable action, to be forwarded to the
/// scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionChange {
    pub name: String,
    pub checked: bool,
}

/// Lookup-by-name store for all actions the HUD references.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
    triggered: Vec<String>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: Action) {
        self.actions.insert(action.name.clone(), action);
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.actions.get(name).is_some_and(|a| a.checked)
    }

    /// Sets a checkable action's state. Returns the change when the value
    /// actually moved, `None` for unknown actions, non-checkable actions,
    /// or no-op writes (which keeps notification loops from echoing).
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Option<ActionChange> {
        let action = self.actions.get_mut(name)?;
        if !action.checkable || action.checked == checked {
            return None;
        }
        action.checked = checked;
        Some(ActionChange {
            name: name.to_string(),
            checked,
        })
    }

    /// Flips a checkable action.
    pub fn toggle(&mut self, name: &str) -> Option<ActionChange> {
        let next = !self.is_checked(name);
        self.set_checked(name, next)
    }

    /// Records a trigger; the host drains these each frame and performs the
    /// side effects.
    pub fn trigger(&mut self, name: &str) {
        if self.actions.contains_key(name) {
            self.triggered.push(name.to_string());
        }
    }

    pub fn take_triggered(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_checked_reports_change_once() {
        let mut registry = ActionRegistry::new();
        registry.add(Action::new("actionGrid", "Equatorial grid").checkable(false));

        let change = registry.set_checked("actionGrid", true);
        assert_eq!(
            change,
            Some(ActionChange {
                name: "actionGrid".into(),
                checked: true
            })
        );
        // Writing the same value again is a no-op.
        assert_eq!(registry.set_checked("actionGrid", true), None);
    }

    #[test]
    fn unknown_action_is_a_silent_no_op() {
        let mut registry = ActionRegistry::new();
        assert_eq!(registry.set_checked("actionMissing", true), None);
        assert!(!registry.is_checked("actionMissing"));
    }

    #[test]
    fn non_checkable_action_rejects_state_writes() {
        let mut registry = ActionRegistry::new();
        registry.add(Action::new("actionShot", "Screenshot"));
        assert_eq!(registry.set_checked("actionShot", true), None);
    }

    #[test]
    fn triggers_are_drained_in_order() {
        let mut registry = ActionRegistry::new();
        registry.add(Action::new("actionA", "A"));
        registry.add(Action::new("actionB", "B"));
        registry.trigger("actionA");
        registry.trigger("actionB");
        registry.trigger("actionUnknown");

        assert_eq!(registry.take_triggered(), vec!["actionA", "actionB"]);
        assert!(registry.take_triggered().is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut registry = ActionRegistry::new();
        registry.add(Action::new("actionGrid", "Grid").checkable(true));
        registry.toggle("actionGrid");
        assert!(!registry.is_checked("actionGrid"));
        registry.toggle("actionGrid");
        assert!(registry.is_checked("actionGrid"));
    }
}
