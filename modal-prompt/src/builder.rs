//! Builds Bootstrap modal markup and binds a widget to it.

use std::fmt;
use std::rc::Rc;

use crate::dom::{Document, ElementId};
use crate::error::{DialogError, Result};
use crate::options::ModalOptions;
use crate::widget::{ModalFactory, ModalWidget};

/// A bound widget together with the wrapper element it controls.
#[derive(Clone)]
pub struct DialogHandle {
    widget: Rc<dyn ModalWidget>,
    wrapper: ElementId,
}

impl fmt::Debug for DialogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogHandle")
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}

impl DialogHandle {
    /// Root element of the dialog markup, the one to remove on teardown.
    #[must_use]
    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    pub fn show(&self, document: &Document) {
        self.widget.show(document);
    }

    pub fn hide(&self, document: &Document) {
        self.widget.hide(document);
    }
}

/// Build the dialog tree for `options`, attach it to the body and bind a
/// widget from `factory` to it.
///
/// `footer` elements are moved into the footer in order. The produced markup:
///
/// ```text
/// div.modal[.fade] tabindex=-1
/// └─ div.modal-dialog[.modal-dialog-centered]
///    └─ div.modal-content
///       ├─ div.modal-header > h5.modal-title
///       ├─ div.modal-body > p        (only when a message is present)
///       └─ div.modal-footer > footer…
/// ```
///
/// When building, attaching or the factory fails, the wrapper is removed
/// again before the error is returned; footer elements already moved into
/// it go with it.
pub fn create_modal<F>(
    document: &Document,
    factory: &F,
    options: &ModalOptions,
    footer: &[ElementId],
) -> Result<DialogHandle>
where
    F: ModalFactory + ?Sized,
{
    if let Some(&missing) = footer.iter().find(|&&el| !document.exists(el)) {
        return Err(DialogError::UnknownElement(missing));
    }

    let wrapper = document.create_element("div");
    let attached = build_markup(document, wrapper, options, footer)
        .and_then(|()| document.append_to_body(wrapper));
    if let Err(err) = attached {
        log::warn!("Building modal markup failed: {err}");
        document.remove(wrapper);
        return Err(err);
    }

    match factory.create(document, wrapper, options.widget_config()) {
        Ok(widget) => {
            log::debug!("Created modal {wrapper:?} titled {:?}", options.title);
            Ok(DialogHandle { widget, wrapper })
        }
        Err(err) => {
            log::warn!("Modal widget creation failed: {err}");
            document.remove(wrapper);
            Err(err)
        }
    }
}

fn build_markup(
    document: &Document,
    wrapper: ElementId,
    options: &ModalOptions,
    footer_elements: &[ElementId],
) -> Result<()> {
    let element = |tag: &str, class: &str| -> Result<ElementId> {
        let el = document.create_element(tag);
        document.set_class_name(el, class)?;
        Ok(el)
    };

    document.set_class_name(wrapper, if options.fade { "modal fade" } else { "modal" })?;
    document.set_tab_index(wrapper, -1)?;

    let dialog = element(
        "div",
        if options.centered {
            "modal-dialog modal-dialog-centered"
        } else {
            "modal-dialog"
        },
    )?;
    document.append_child(wrapper, dialog)?;

    let content = element("div", "modal-content")?;
    document.append_child(dialog, content)?;

    let header = element("div", "modal-header")?;
    document.append_child(content, header)?;

    let title = element("h5", "modal-title")?;
    document.set_text(title, options.title.as_str())?;
    document.append_child(header, title)?;

    if let Some(message) = &options.message {
        let body = element("div", "modal-body")?;
        document.append_child(content, body)?;

        let paragraph = document.create_element("p");
        document.set_text(paragraph, message.as_str())?;
        document.append_child(body, paragraph)?;
    }

    let footer = element("div", "modal-footer")?;
    document.append_child(content, footer)?;
    for &el in footer_elements {
        document.append_child(footer, el)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AlertOptions, ConfirmOptions};
    use crate::widget::{HeadlessModalFactory, ModalConfig, Visibility};

    fn build(options: &ModalOptions, footer: &[ElementId]) -> (Document, DialogHandle) {
        let doc = Document::new();
        let handle = create_modal(&doc, &HeadlessModalFactory::default(), options, footer).unwrap();
        (doc, handle)
    }

    #[test]
    fn builds_bootstrap_markup() {
        let (doc, handle) = build(&ConfirmOptions::default().modal, &[]);
        assert_eq!(
            doc.outer_html(handle.wrapper()).unwrap(),
            concat!(
                r#"<div class="modal fade" tabindex="-1">"#,
                r#"<div class="modal-dialog modal-dialog-centered">"#,
                r#"<div class="modal-content">"#,
                r#"<div class="modal-header"><h5 class="modal-title">Confirm</h5></div>"#,
                r#"<div class="modal-body"><p>Are you sure you want to do this?</p></div>"#,
                r#"<div class="modal-footer"></div>"#,
                "</div></div></div>",
            )
        );
        assert!(doc.contains(handle.wrapper()));
        assert_eq!(doc.parent(handle.wrapper()), Some(doc.body()));
    }

    #[test]
    fn layout_flags_drop_optional_classes() {
        let mut options = AlertOptions::default().modal;
        options.fade = false;
        options.centered = false;
        let (doc, handle) = build(&options, &[]);
        let wrapper = handle.wrapper();
        assert_eq!(doc.class_name(wrapper).as_deref(), Some("modal"));
        let dialog = doc.find_by_class(wrapper, "modal-dialog")[0];
        assert_eq!(doc.class_name(dialog).as_deref(), Some("modal-dialog"));
    }

    #[test]
    fn absent_message_omits_body() {
        let mut options = AlertOptions::default().modal;
        options.message = None;
        let (doc, handle) = build(&options, &[]);
        assert!(doc.find_by_class(handle.wrapper(), "modal-body").is_empty());
        assert!(doc.find_by_tag(handle.wrapper(), "p").is_empty());
    }

    #[test]
    fn empty_message_keeps_empty_paragraph() {
        let (doc, handle) = build(&AlertOptions::default().modal, &[]);
        let paragraphs = doc.find_by_tag(handle.wrapper(), "p");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(doc.text(paragraphs[0]).as_deref(), Some(""));
    }

    #[test]
    fn title_is_set_verbatim() {
        let mut options = AlertOptions::default().modal;
        options.title = "<i>Heads up</i>".to_string();
        let (doc, handle) = build(&options, &[]);
        let title = doc.find_by_class(handle.wrapper(), "modal-title")[0];
        assert_eq!(doc.text(title).as_deref(), Some("<i>Heads up</i>"));
    }

    #[test]
    fn footer_elements_keep_their_order() {
        let doc = Document::new();
        let first = doc.create_element("button");
        let second = doc.create_element("button");
        let handle = create_modal(
            &doc,
            &HeadlessModalFactory::default(),
            &AlertOptions::default().modal,
            &[first, second],
        )
        .unwrap();
        let footer = doc.find_by_class(handle.wrapper(), "modal-footer")[0];
        assert_eq!(doc.children(footer), vec![first, second]);
    }

    #[test]
    fn forwards_behaviour_options_to_widget() {
        let doc = Document::new();
        let factory = HeadlessModalFactory::default();
        let mut options = ConfirmOptions::default().modal;
        options.close_on_esc = false;
        create_modal(&doc, &factory, &options, &[]).unwrap();

        let instances = factory.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(
            instances[0].config(),
            ModalConfig {
                backdrop: true,
                keyboard: false,
                focus: true,
            }
        );
        assert_eq!(instances[0].visibility(), Visibility::Hidden);
    }

    #[test]
    fn widget_failure_leaves_no_markup_behind() {
        let doc = Document::new();
        let button = doc.create_element("button");
        let err = create_modal(
            &doc,
            &HeadlessModalFactory::failing("widget library missing"),
            &AlertOptions::default().modal,
            &[button],
        )
        .unwrap_err();
        assert!(matches!(err, DialogError::Widget(_)));
        assert!(doc.children(doc.body()).is_empty());
        assert!(!doc.exists(button));
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn failed_build_leaves_document_as_it_was() {
        let doc = Document::new();
        let body = doc.body();
        let err = create_modal(
            &doc,
            &HeadlessModalFactory::default(),
            &AlertOptions::default().modal,
            &[body],
        )
        .unwrap_err();
        assert!(matches!(err, DialogError::Hierarchy { child, .. } if child == body));
        assert_eq!(doc.parent(body), None);
        assert!(doc.children(body).is_empty());
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn unknown_footer_element_is_rejected() {
        let doc = Document::new();
        let stale = doc.create_element("button");
        doc.remove(stale);
        let err = create_modal(
            &doc,
            &HeadlessModalFactory::default(),
            &AlertOptions::default().modal,
            &[stale],
        )
        .unwrap_err();
        assert!(matches!(err, DialogError::UnknownElement(id) if id == stale));
        assert_eq!(doc.element_count(), 1);
    }
}
