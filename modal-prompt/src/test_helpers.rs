//! Test helpers for the dialog flows.
//!
//! Dialogs are opened against a fresh [`Document`] with the headless widget,
//! so tests drive them with `click`/`key_down` and deliver the widget's
//! lifecycle events with `run_pending`.

use futures::FutureExt;

use crate::dialogs::{Dialogs, Response};
use crate::dom::{Document, ElementId};
use crate::widget::HeadlessModalFactory;

/// A document and a dialog host bound to it.
pub(crate) fn setup() -> (Document, Dialogs<HeadlessModalFactory>) {
    let doc = Document::new();
    let dialogs = Dialogs::new(doc.clone(), HeadlessModalFactory::default());
    (doc, dialogs)
}

/// Footer buttons of the dialog rooted at `wrapper`, in order.
pub(crate) fn footer_buttons(doc: &Document, wrapper: ElementId) -> Vec<ElementId> {
    let footer = doc
        .find_by_class(wrapper, "modal-footer")
        .into_iter()
        .next()
        .expect("dialog should have a footer");
    doc.children(footer)
}

/// The value a response already resolved to.
///
/// # Panics
///
/// Panics if the response is still pending or was dropped.
pub(crate) fn resolved<T>(response: Response<T>) -> T {
    response
        .now_or_never()
        .expect("response should be resolved")
        .expect("dialog should have been answered")
}
