//! Events delivered to element listeners.

use std::borrow::Cow;

use super::ElementId;

/// Name of the pointer activation event.
pub const CLICK: &str = "click";
/// Name of the key press event.
pub const KEYDOWN: &str = "keydown";

/// An event aimed at a single element.
///
/// Dispatch bubbles from `target` through its ancestors, so listeners on a
/// container also see events aimed at its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: Cow<'static, str>,
    target: ElementId,
    key: Option<String>,
}

impl Event {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, target: ElementId) -> Self {
        Self {
            name: name.into(),
            target,
            key: None,
        }
    }

    #[must_use]
    pub fn click(target: ElementId) -> Self {
        Self::new(CLICK, target)
    }

    /// A `keydown` event carrying a key name such as `"Escape"`.
    #[must_use]
    pub fn key_down(target: ElementId, key: impl Into<String>) -> Self {
        Self {
            name: Cow::Borrowed(KEYDOWN),
            target,
            key: Some(key.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element the event was originally aimed at.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_carries_key() {
        let event = Event::key_down(ElementId::default(), "Escape");
        assert_eq!(event.name(), KEYDOWN);
        assert_eq!(event.key(), Some("Escape"));
    }

    #[test]
    fn click_has_no_key() {
        let event = Event::click(ElementId::default());
        assert_eq!(event.name(), CLICK);
        assert_eq!(event.key(), None);
    }
}
