//! Bound fields: the host form element a widget reads from and writes to.

use std::fmt;

/// Notification emitted after a widget rewrote its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Field value at the time of the notification.
    pub value: String,
}

/// The widget's only persistence channel.
///
/// Widgets always call [`set_value`](BoundField::set_value) before
/// [`emit_change`](BoundField::emit_change), so listeners observe the new value.
pub trait BoundField {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);
    fn emit_change(&mut self);
}

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// In-memory hidden input with change listeners.
#[derive(Default)]
pub struct HiddenInput {
    value: String,
    listeners: Vec<Listener>,
}

impl HiddenInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for change notifications.
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl BoundField for HiddenInput {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn emit_change(&mut self) {
        let event = ChangeEvent {
            value: self.value.clone(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for HiddenInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiddenInput")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_see_value_set_before_emit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut input = HiddenInput::new();
        let sink = Rc::clone(&seen);
        input.on_change(move |event| sink.borrow_mut().push(event.value.clone()));

        input.set_value("a".to_string());
        input.emit_change();
        input.set_value("b".to_string());
        input.emit_change();

        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(input.value(), "b");
        assert_eq!(input.listener_count(), 1);
    }
}
