//! The modal widget collaborator.
//!
//! Dialog markup is handed to a widget that owns presentation: showing,
//! hiding, backdrop and keyboard dismissal. The widget is injected through
//! [`ModalFactory`] so the flows never reach for a global library object,
//! and tests can substitute their own.
//!
//! [`HeadlessModal`] is the in-memory widget used by the tests and the
//! `mprompt` binary. It keeps a visibility flag, toggles the `show` class and
//! emits the lifecycle events a real widget would; it renders nothing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::dom::{Document, ElementId, Event, CLICK, KEYDOWN};
use crate::error::{DialogError, Result};

/// Queued on the wrapper once the widget has finished showing.
pub const SHOWN_EVENT: &str = "shown.bs.modal";
/// Queued on the wrapper once the widget has finished hiding, transitions
/// included. Never delivered from inside [`ModalWidget::hide`].
pub const HIDDEN_EVENT: &str = "hidden.bs.modal";

/// Behavioural options forwarded to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalConfig {
    /// Clicking the backdrop dismisses the dialog.
    pub backdrop: bool,
    /// Pressing Escape dismisses the dialog.
    pub keyboard: bool,
    /// Move focus to the dialog when it opens.
    pub focus: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            backdrop: true,
            keyboard: true,
            focus: true,
        }
    }
}

/// Control object for one bound dialog.
pub trait ModalWidget {
    fn show(&self, document: &Document);

    /// Start hiding. Completion is reported by queueing [`HIDDEN_EVENT`] on
    /// the bound element.
    fn hide(&self, document: &Document);
}

/// Binds a widget to freshly built dialog markup.
pub trait ModalFactory {
    fn create(
        &self,
        document: &Document,
        element: ElementId,
        config: ModalConfig,
    ) -> Result<Rc<dyn ModalWidget>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

#[derive(Debug)]
pub struct HeadlessModal {
    element: ElementId,
    config: ModalConfig,
    visibility: Cell<Visibility>,
}

impl HeadlessModal {
    /// Bind to `element`, registering the backdrop and Escape listeners.
    pub fn bind(document: &Document, element: ElementId, config: ModalConfig) -> Result<Rc<Self>> {
        let modal = Rc::new(Self {
            element,
            config,
            visibility: Cell::new(Visibility::Hidden),
        });

        let backdrop = Rc::clone(&modal);
        document.add_event_listener(element, CLICK, move |doc, event| {
            // Clicks on the dialog's own content bubble here too; only a
            // click on the wrapper itself is a backdrop click.
            if event.target() == backdrop.element && backdrop.config.backdrop {
                log::debug!("Backdrop click dismisses {:?}", backdrop.element);
                backdrop.hide(doc);
            }
        })?;

        let keyboard = Rc::clone(&modal);
        document.add_event_listener(element, KEYDOWN, move |doc, event| {
            if event.key() == Some("Escape") && keyboard.config.keyboard {
                log::debug!("Escape dismisses {:?}", keyboard.element);
                keyboard.hide(doc);
            }
        })?;

        Ok(modal)
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn config(&self) -> ModalConfig {
        self.config
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }
}

impl ModalWidget for HeadlessModal {
    fn show(&self, document: &Document) {
        if self.visibility.replace(Visibility::Shown) == Visibility::Shown {
            return;
        }
        if let Err(err) = document.add_class(self.element, "show") {
            log::warn!("Cannot show modal: {err}");
            return;
        }
        if self.config.focus {
            if let Err(err) = document.focus(self.element) {
                log::warn!("Cannot focus modal: {err}");
            }
        }
        document.queue(Event::new(SHOWN_EVENT, self.element));
    }

    fn hide(&self, document: &Document) {
        if self.visibility.replace(Visibility::Hidden) == Visibility::Hidden {
            return;
        }
        if let Err(err) = document.remove_class(self.element, "show") {
            log::warn!("Cannot hide modal: {err}");
            return;
        }
        document.queue(Event::new(HIDDEN_EVENT, self.element));
    }
}

/// Factory for [`HeadlessModal`]s. Clones share the record of created
/// widgets, which only tracks widgets that are still alive.
#[derive(Debug, Clone, Default)]
pub struct HeadlessModalFactory {
    failure: Option<String>,
    instances: Rc<RefCell<Vec<Weak<HeadlessModal>>>>,
}

impl HeadlessModalFactory {
    /// A factory whose every `create` fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            instances: Rc::default(),
        }
    }

    /// Widgets created so far that are still alive, oldest first. A widget
    /// dies once its dialog markup is removed and no handle refers to it.
    #[must_use]
    pub fn instances(&self) -> Vec<Rc<HeadlessModal>> {
        self.instances
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }
}

impl ModalFactory for HeadlessModalFactory {
    fn create(
        &self,
        document: &Document,
        element: ElementId,
        config: ModalConfig,
    ) -> Result<Rc<dyn ModalWidget>> {
        if let Some(reason) = &self.failure {
            return Err(DialogError::Widget(reason.clone()));
        }
        let modal = HeadlessModal::bind(document, element, config)?;
        let mut instances = self.instances.borrow_mut();
        instances.retain(|instance| instance.strong_count() > 0);
        instances.push(Rc::downgrade(&modal));
        drop(instances);
        Ok(modal)
    }
}
