//! modal-prompt - `alert` and `confirm` dialogs on top of a modal widget
//!
//! This crate builds Bootstrap-style modal markup, hands it to an injected
//! modal widget and returns a future that resolves with the user's answer.
//!
//! ## Quick Start
//!
//! ```
//! use futures::FutureExt;
//! use modal_prompt::{Dialogs, Document, HeadlessModalFactory};
//!
//! let document = Document::new();
//! let dialogs = Dialogs::new(document.clone(), HeadlessModalFactory::default());
//!
//! let answer = dialogs.confirm("Delete this file?")?;
//! let buttons = document.find_by_tag(answer.wrapper(), "button");
//! document.click(buttons[1]);
//!
//! assert_eq!(answer.now_or_never().transpose()?, Some(true));
//! # Ok::<(), modal_prompt::DialogError>(())
//! ```
//!
//! ## Architecture
//!
//! Everything runs on one thread, driven by events:
//!
//! 1. Options are merged field by field over the defaults
//! 2. The markup is built in a [`Document`] and bound to a widget from a
//!    [`ModalFactory`]
//! 3. Button clicks hide the widget and answer the dialog immediately
//! 4. The widget's `hidden.bs.modal` event, delivered on a later turn of the
//!    event loop ([`Document::run_pending`]), removes the markup

pub mod builder;
pub mod config;
pub mod dialogs;
pub mod dom;
pub mod error;
pub mod options;
pub mod widget;

#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use builder::{create_modal, DialogHandle};
pub use config::PromptConfig;
pub use dialogs::{Acknowledgement, Confirmation, Dialogs, Response};
pub use dom::{Document, ElementId, Event};
pub use error::{DialogError, Result};
pub use options::{
    AlertOptions, ConfirmOptions, DialogDefaults, ModalOptions, PartialAlertOptions,
    PartialConfirmOptions, PartialModalOptions,
};
pub use widget::{HeadlessModal, HeadlessModalFactory, ModalConfig, ModalFactory, ModalWidget};
