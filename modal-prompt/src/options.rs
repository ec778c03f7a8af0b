//! Dialog option records and their defaults.
//!
//! Each dialog kind has a fully resolved record (`ConfirmOptions`,
//! `AlertOptions`) and a caller-facing partial record where every field is
//! optional. Resolution is a right-biased, field-by-field merge: a field the
//! caller set wins, everything else keeps the default.
//!
//! The message is three-state. In a resolved record `None` means "no body at
//! all" and `Some("")` means "an empty paragraph". In a partial record the
//! outer `Option` says whether the caller mentioned the message at all, so
//! `Some(None)` (a JSON `null`) removes a default message.

use serde::{Deserialize, Deserializer};

use crate::widget::ModalConfig;

/// Options shared by every dialog kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOptions {
    pub title: String,
    pub message: Option<String>,
    pub centered: bool,
    pub fade: bool,
    pub close_on_backdrop_click: bool,
    pub close_on_esc: bool,
    pub focus: bool,
}

impl ModalOptions {
    fn with_text(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: Some(message.to_string()),
            centered: true,
            fade: true,
            close_on_backdrop_click: true,
            close_on_esc: true,
            focus: true,
        }
    }

    /// Resolve `partial` against `defaults`.
    #[must_use]
    pub fn merge(defaults: &Self, partial: PartialModalOptions) -> Self {
        Self {
            title: partial.title.unwrap_or_else(|| defaults.title.clone()),
            message: partial.message.unwrap_or_else(|| defaults.message.clone()),
            centered: partial.centered.unwrap_or(defaults.centered),
            fade: partial.fade.unwrap_or(defaults.fade),
            close_on_backdrop_click: partial
                .close_on_backdrop_click
                .unwrap_or(defaults.close_on_backdrop_click),
            close_on_esc: partial.close_on_esc.unwrap_or(defaults.close_on_esc),
            focus: partial.focus.unwrap_or(defaults.focus),
        }
    }

    /// The subset of options the widget itself consumes.
    #[must_use]
    pub fn widget_config(&self) -> ModalConfig {
        ModalConfig {
            backdrop: self.close_on_backdrop_click,
            keyboard: self.close_on_esc,
            focus: self.focus,
        }
    }
}

/// Caller-supplied overrides for [`ModalOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialModalOptions {
    pub title: Option<String>,
    #[serde(deserialize_with = "present")]
    pub message: Option<Option<String>>,
    pub centered: Option<bool>,
    pub fade: Option<bool>,
    pub close_on_backdrop_click: Option<bool>,
    pub close_on_esc: Option<bool>,
    pub focus: Option<bool>,
}

/// Marks a key that appeared in the input, even with a `null` value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Builder methods for the shared fields of a partial record.
macro_rules! modal_setters {
    ($ty:ty) => {
        impl $ty {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            #[must_use]
            pub fn title(mut self, title: impl Into<String>) -> Self {
                self.modal.title = Some(title.into());
                self
            }

            #[must_use]
            pub fn message(mut self, message: impl Into<String>) -> Self {
                self.modal.message = Some(Some(message.into()));
                self
            }

            /// Drop the message body entirely, default message included.
            #[must_use]
            pub fn without_message(mut self) -> Self {
                self.modal.message = Some(None);
                self
            }

            #[must_use]
            pub fn centered(mut self, centered: bool) -> Self {
                self.modal.centered = Some(centered);
                self
            }

            #[must_use]
            pub fn fade(mut self, fade: bool) -> Self {
                self.modal.fade = Some(fade);
                self
            }

            #[must_use]
            pub fn close_on_backdrop_click(mut self, close: bool) -> Self {
                self.modal.close_on_backdrop_click = Some(close);
                self
            }

            #[must_use]
            pub fn close_on_esc(mut self, close: bool) -> Self {
                self.modal.close_on_esc = Some(close);
                self
            }

            #[must_use]
            pub fn focus(mut self, focus: bool) -> Self {
                self.modal.focus = Some(focus);
                self
            }
        }
    };
}

/// Fully resolved options for a confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub modal: ModalOptions,
    pub confirm_text: String,
    pub cancel_text: String,
    pub confirm_class: String,
    pub cancel_class: String,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            modal: ModalOptions::with_text("Confirm", "Are you sure you want to do this?"),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            confirm_class: "btn-primary".to_string(),
            cancel_class: "btn-secondary".to_string(),
        }
    }
}

impl ConfirmOptions {
    #[must_use]
    pub fn merge(defaults: &Self, partial: PartialConfirmOptions) -> Self {
        Self {
            modal: ModalOptions::merge(&defaults.modal, partial.modal),
            confirm_text: partial
                .confirm_text
                .unwrap_or_else(|| defaults.confirm_text.clone()),
            cancel_text: partial
                .cancel_text
                .unwrap_or_else(|| defaults.cancel_text.clone()),
            confirm_class: partial
                .confirm_class
                .unwrap_or_else(|| defaults.confirm_class.clone()),
            cancel_class: partial
                .cancel_class
                .unwrap_or_else(|| defaults.cancel_class.clone()),
        }
    }
}

/// Caller-supplied overrides for [`ConfirmOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialConfirmOptions {
    #[serde(flatten)]
    pub modal: PartialModalOptions,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
    pub confirm_class: Option<String>,
    pub cancel_class: Option<String>,
}

modal_setters!(PartialConfirmOptions);

impl PartialConfirmOptions {
    #[must_use]
    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn confirm_class(mut self, class: impl Into<String>) -> Self {
        self.confirm_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn cancel_class(mut self, class: impl Into<String>) -> Self {
        self.cancel_class = Some(class.into());
        self
    }
}

/// A bare title asks the question itself, so the default message is
/// replaced by an empty one.
impl From<&str> for PartialConfirmOptions {
    fn from(title: &str) -> Self {
        Self::new().title(title).message("")
    }
}

impl From<String> for PartialConfirmOptions {
    fn from(title: String) -> Self {
        Self::new().title(title).message("")
    }
}

/// No overrides at all: `dialogs.confirm(())`.
impl From<()> for PartialConfirmOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

/// Fully resolved options for an alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertOptions {
    pub modal: ModalOptions,
    pub ok_text: String,
    pub ok_class: String,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            modal: ModalOptions::with_text("Alert", ""),
            ok_text: "OK".to_string(),
            ok_class: "btn-primary".to_string(),
        }
    }
}

impl AlertOptions {
    #[must_use]
    pub fn merge(defaults: &Self, partial: PartialAlertOptions) -> Self {
        Self {
            modal: ModalOptions::merge(&defaults.modal, partial.modal),
            ok_text: partial.ok_text.unwrap_or_else(|| defaults.ok_text.clone()),
            ok_class: partial.ok_class.unwrap_or_else(|| defaults.ok_class.clone()),
        }
    }
}

/// Caller-supplied overrides for [`AlertOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialAlertOptions {
    #[serde(flatten)]
    pub modal: PartialModalOptions,
    pub ok_text: Option<String>,
    pub ok_class: Option<String>,
}

modal_setters!(PartialAlertOptions);

impl PartialAlertOptions {
    #[must_use]
    pub fn ok_text(mut self, text: impl Into<String>) -> Self {
        self.ok_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn ok_class(mut self, class: impl Into<String>) -> Self {
        self.ok_class = Some(class.into());
        self
    }
}

impl From<&str> for PartialAlertOptions {
    fn from(title: &str) -> Self {
        Self::new().title(title)
    }
}

impl From<String> for PartialAlertOptions {
    fn from(title: String) -> Self {
        Self::new().title(title)
    }
}

impl From<()> for PartialAlertOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

/// Defaults applied to every dialog opened through a
/// [`Dialogs`](crate::Dialogs) host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogDefaults {
    pub confirm: ConfirmOptions,
    pub alert: AlertOptions,
}

impl DialogDefaults {
    /// Layer configured overrides on top of the built-in defaults.
    #[must_use]
    pub fn from_overrides(confirm: PartialConfirmOptions, alert: PartialAlertOptions) -> Self {
        let builtin = Self::default();
        Self {
            confirm: ConfirmOptions::merge(&builtin.confirm, confirm),
            alert: AlertOptions::merge(&builtin.alert, alert),
        }
    }
}
