//! Error type shared by the element model, the dialog builder and the flows.

use crate::dom::ElementId;

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// The modal widget factory refused to bind to the dialog markup.
    #[error("failed to create modal widget: {0}")]
    Widget(String),
    #[error("element {0:?} is not part of the document")]
    UnknownElement(ElementId),
    #[error("cannot append {child:?} to {parent:?}: the child contains the parent")]
    Hierarchy { parent: ElementId, child: ElementId },
    /// The dialog was torn down without ever producing an answer.
    #[error("dialog was dropped before it was answered")]
    Dropped,
}

pub type Result<T, E = DialogError> = std::result::Result<T, E>;
