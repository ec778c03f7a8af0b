//! The confirm and alert flows.
//!
//! Every call builds an independent dialog: its own markup, widget and
//! one-shot channel. The returned [`Response`] resolves as soon as a footer
//! button is pressed, before the widget finishes hiding. The markup is
//! removed later, when the widget reports [`HIDDEN_EVENT`].
//!
//! Dismissing a dialog through the widget (backdrop click, Escape) without
//! pressing a button counts as the negative answer: `false` for confirm,
//! `()` for alert.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;

use crate::builder::{create_modal, DialogHandle};
use crate::dom::{Document, ElementId, CLICK};
use crate::error::{DialogError, Result};
use crate::options::{
    AlertOptions, ConfirmOptions, DialogDefaults, ModalOptions, PartialAlertOptions,
    PartialConfirmOptions,
};
use crate::widget::{ModalFactory, HIDDEN_EVENT};

/// Pending answer of a confirm dialog.
pub type Confirmation = Response<bool>;
/// Pending acknowledgement of an alert dialog.
pub type Acknowledgement = Response<()>;

/// The answer to an open dialog.
///
/// Resolves once, with the value of the pressed button or the dismissal
/// value. Fails with [`DialogError::Dropped`] only if the dialog's listeners
/// were freed without answering, e.g. the wrapper was removed by hand.
#[derive(Debug)]
pub struct Response<T> {
    handle: DialogHandle,
    receiver: oneshot::Receiver<T>,
}

impl<T> Response<T> {
    #[must_use]
    pub fn handle(&self) -> &DialogHandle {
        &self.handle
    }

    #[must_use]
    pub fn wrapper(&self) -> ElementId {
        self.handle.wrapper()
    }
}

impl<T> Future for Response<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            .map(|answer| answer.map_err(|oneshot::Canceled| DialogError::Dropped))
    }
}

/// Sender shared by every listener of one dialog; the first one to fire
/// takes it.
struct Responder<T>(RefCell<Option<oneshot::Sender<T>>>);

impl<T> Responder<T> {
    fn new(sender: oneshot::Sender<T>) -> Rc<Self> {
        Rc::new(Self(RefCell::new(Some(sender))))
    }

    /// Returns `false` when the dialog was already answered.
    fn answer(&self, value: T) -> bool {
        let Some(sender) = self.0.borrow_mut().take() else {
            return false;
        };
        if sender.send(value).is_err() {
            log::debug!("Dialog answered after its response was dropped");
        }
        true
    }
}

/// Opens dialogs in a document, binding each to a widget from `factory`.
#[derive(Debug)]
pub struct Dialogs<F> {
    document: Document,
    factory: F,
    defaults: DialogDefaults,
}

impl<F: ModalFactory> Dialogs<F> {
    pub fn new(document: Document, factory: F) -> Self {
        Self {
            document,
            factory,
            defaults: DialogDefaults::default(),
        }
    }

    /// Replace the built-in option defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: DialogDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[must_use]
    pub fn defaults(&self) -> &DialogDefaults {
        &self.defaults
    }

    /// Build a dialog without showing it or wiring any button.
    pub fn create_modal(&self, options: &ModalOptions, footer: &[ElementId]) -> Result<DialogHandle> {
        create_modal(&self.document, &self.factory, options, footer)
    }

    /// Ask a yes/no question. Accepts a title or a [`PartialConfirmOptions`].
    pub fn confirm(&self, options: impl Into<PartialConfirmOptions>) -> Result<Confirmation> {
        let options = ConfirmOptions::merge(&self.defaults.confirm, options.into());
        let cancel = self.button(&options.cancel_text, &options.cancel_class)?;
        let confirm = self.button(&options.confirm_text, &options.confirm_class)?;
        self.open(&options.modal, vec![(cancel, false), (confirm, true)], false)
    }

    /// Show a message with a single OK button. Accepts a title or a
    /// [`PartialAlertOptions`].
    pub fn alert(&self, options: impl Into<PartialAlertOptions>) -> Result<Acknowledgement> {
        let options = AlertOptions::merge(&self.defaults.alert, options.into());
        let ok = self.button(&options.ok_text, &options.ok_class)?;
        self.open(&options.modal, vec![(ok, ())], ())
    }

    fn button(&self, label: &str, class: &str) -> Result<ElementId> {
        let button = self.document.create_element("button");
        self.document.set_class_name(button, &format!("btn {class}"))?;
        self.document.set_text(button, label)?;
        Ok(button)
    }

    fn open<T>(
        &self,
        options: &ModalOptions,
        buttons: Vec<(ElementId, T)>,
        dismissed: T,
    ) -> Result<Response<T>>
    where
        T: Clone + 'static,
    {
        let footer: Vec<ElementId> = buttons.iter().map(|(button, _)| *button).collect();
        let handle = match create_modal(&self.document, &self.factory, options, &footer) {
            Ok(handle) => handle,
            Err(err) => {
                // On widget failure the footer went away with the wrapper;
                // otherwise the buttons are still detached.
                for button in footer {
                    self.document.remove(button);
                }
                return Err(err);
            }
        };

        let (sender, receiver) = oneshot::channel();
        let responder = Responder::new(sender);
        let wrapper = handle.wrapper();

        let on_hidden = Rc::clone(&responder);
        self.document
            .add_event_listener(wrapper, HIDDEN_EVENT, move |doc, _| {
                if on_hidden.answer(dismissed.clone()) {
                    log::debug!("Dialog {wrapper:?} dismissed without an answer");
                }
                doc.remove(wrapper);
                log::debug!("Removed dialog {wrapper:?}");
            })?;

        for (button, value) in buttons {
            let responder = Rc::clone(&responder);
            let widget = handle.clone();
            self.document.add_event_listener(button, CLICK, move |doc, _| {
                widget.hide(doc);
                if !responder.answer(value.clone()) {
                    log::warn!("Dialog {wrapper:?} was already answered");
                }
            })?;
        }

        handle.show(&self.document);
        Ok(Response { handle, receiver })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{footer_buttons, resolved, setup};

    #[test]
    fn confirm_button_resolves_true() {
        let (doc, dialogs) = setup();
        let mut answer = dialogs.confirm(PartialConfirmOptions::default()).unwrap();
        let [cancel, confirm] = footer_buttons(&doc, answer.wrapper())[..] else {
            panic!("expected two buttons");
        };
        assert_eq!(doc.text(cancel).as_deref(), Some("Cancel"));
        assert_eq!(doc.text(confirm).as_deref(), Some("Confirm"));

        assert!((&mut answer).now_or_never().is_none());
        doc.click(confirm);
        assert!(resolved(answer));
    }

    #[test]
    fn cancel_button_resolves_false() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm("Leave?").unwrap();
        let cancel = footer_buttons(&doc, answer.wrapper())[0];
        doc.click(cancel);
        assert!(!resolved(answer));
    }

    #[test]
    fn ok_button_resolves_alert() {
        let (doc, dialogs) = setup();
        let ack = dialogs.alert("Saved").unwrap();
        let ok = footer_buttons(&doc, ack.wrapper())[0];
        assert_eq!(doc.class_name(ok).as_deref(), Some("btn btn-primary"));
        doc.click(ok);
        resolved(ack);
    }

    #[test]
    fn unit_options_open_default_dialogs() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm(()).unwrap();
        let title = doc.find_by_class(answer.wrapper(), "modal-title")[0];
        assert_eq!(doc.text(title).as_deref(), Some("Confirm"));
        let message = doc.find_by_tag(answer.wrapper(), "p")[0];
        assert_eq!(
            doc.text(message).as_deref(),
            Some("Are you sure you want to do this?")
        );
        let confirm = footer_buttons(&doc, answer.wrapper())[1];
        doc.click(confirm);
        assert!(resolved(answer));

        let ack = dialogs.alert(()).unwrap();
        let title = doc.find_by_class(ack.wrapper(), "modal-title")[0];
        assert_eq!(doc.text(title).as_deref(), Some("Alert"));
        let ok = footer_buttons(&doc, ack.wrapper())[0];
        assert_eq!(doc.text(ok).as_deref(), Some("OK"));
        doc.click(ok);
        resolved(ack);
    }

    #[test]
    fn answer_precedes_teardown() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm("Continue?").unwrap();
        let wrapper = answer.wrapper();
        doc.click(footer_buttons(&doc, wrapper)[1]);

        // Still in the document until the widget finishes hiding.
        assert!(doc.contains(wrapper));
        assert!(resolved(answer));
        doc.run_pending();
        assert!(!doc.contains(wrapper));
    }

    #[test]
    fn second_click_keeps_first_answer() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm("Continue?").unwrap();
        let buttons = footer_buttons(&doc, answer.wrapper());
        doc.click(buttons[1]);
        doc.click(buttons[0]);
        assert!(resolved(answer));
    }

    #[test]
    fn escape_dismissal_counts_as_cancel() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm("Continue?").unwrap();
        let wrapper = answer.wrapper();
        doc.key_down(wrapper, "Escape");
        doc.run_pending();
        assert!(!resolved(answer));
        assert!(!doc.exists(wrapper));
    }

    #[test]
    fn removing_markup_by_hand_drops_response() {
        let (doc, dialogs) = setup();
        let answer = dialogs.confirm("Continue?").unwrap();
        doc.remove(answer.wrapper());
        let outcome = futures::executor::block_on(answer);
        assert!(matches!(outcome, Err(DialogError::Dropped)));
    }

    #[test]
    fn configured_defaults_apply() {
        let (doc, dialogs) = setup();
        let dialogs = dialogs.with_defaults(DialogDefaults::from_overrides(
            PartialConfirmOptions::new().confirm_text("Yes").cancel_text("No"),
            PartialAlertOptions::default(),
        ));
        let answer = dialogs.confirm(PartialConfirmOptions::default()).unwrap();
        let texts: Vec<_> = footer_buttons(&doc, answer.wrapper())
            .into_iter()
            .filter_map(|button| doc.text(button))
            .collect();
        assert_eq!(texts, ["No", "Yes"]);
    }
}
