//! In-memory element tree standing in for the browser document.
//!
//! A [`Document`] is a cheap, clonable handle to a single-threaded arena of
//! elements rooted at `body`. Dialog markup is built here, listeners are
//! attached to elements, and events are either dispatched immediately (user
//! input) or queued and delivered by [`Document::run_pending`], which plays
//! the role of a later turn of the host event loop.
//!
//! Removing an element frees its whole subtree, including every listener
//! registered on it. Closures captured by those listeners are dropped at
//! that point.

mod event;
mod html;

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{DialogError, Result};

pub use event::{Event, CLICK, KEYDOWN};

new_key_type! {
    /// Handle to an element owned by a [`Document`].
    pub struct ElementId;
}

/// Listener callback. Receives the document so handlers never need to
/// capture it.
pub type Handler = Rc<dyn Fn(&Document, &Event)>;

struct Listener {
    event: Cow<'static, str>,
    handler: Handler,
}

struct Element {
    tag: String,
    classes: Vec<String>,
    text: String,
    tab_index: Option<i32>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    listeners: Vec<Listener>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            text: String::new(),
            tab_index: None,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

struct Tree {
    elements: SlotMap<ElementId, Element>,
    body: ElementId,
    pending: VecDeque<Event>,
    focused: Option<ElementId>,
}

impl Tree {
    fn get(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(id).ok_or(DialogError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or(DialogError::UnknownElement(id))
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.elements.get(id).and_then(|el| el.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.elements.get_mut(id).and_then(|el| el.parent.take()) else {
            return;
        };
        if let Some(parent) = self.elements.get_mut(parent) {
            parent.children.retain(|&child| child != id);
        }
    }

    /// Pre-order walk of the descendants of `root`, `root` excluded.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .elements
            .get(root)
            .map(|el| el.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.elements.get(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }
}

/// Shared handle to an element tree.
#[derive(Clone)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("Document")
            .field("elements", &tree.elements.len())
            .field("pending", &tree.pending.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document containing only `body`.
    #[must_use]
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let body = elements.insert(Element::new("body"));
        Self {
            tree: Rc::new(RefCell::new(Tree {
                elements,
                body,
                pending: VecDeque::new(),
                focused: None,
            })),
        }
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.tree.borrow().body
    }

    /// Number of live elements, `body` included. Detached elements that have
    /// not been removed still count.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.tree.borrow().elements.len()
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> ElementId {
        self.tree.borrow_mut().elements.insert(Element::new(tag))
    }

    /// Append `child` as the last child of `parent`, moving it out of its
    /// current parent first. The body is the root and never gets a parent.
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.get(parent)?;
        tree.get(child)?;
        if child == tree.body || tree.is_ancestor_or_self(child, parent) {
            return Err(DialogError::Hierarchy { parent, child });
        }
        tree.detach(child);
        tree.get_mut(child)?.parent = Some(parent);
        tree.get_mut(parent)?.children.push(child);
        Ok(())
    }

    pub fn append_to_body(&self, child: ElementId) -> Result<()> {
        self.append_child(self.body(), child)
    }

    /// Detach `id` and free its subtree. Returns `false` when the element no
    /// longer exists. The body cannot be removed.
    pub fn remove(&self, id: ElementId) -> bool {
        let removed: Vec<Element> = {
            let mut tree = self.tree.borrow_mut();
            if id == tree.body || !tree.elements.contains_key(id) {
                return false;
            }
            tree.detach(id);
            let mut doomed = tree.descendants(id);
            doomed.push(id);
            if tree.focused.is_some_and(|focused| doomed.contains(&focused)) {
                tree.focused = None;
            }
            doomed
                .into_iter()
                .filter_map(|el| tree.elements.remove(el))
                .collect()
        };
        // Listener closures may own arbitrary state; drop them with the tree
        // released.
        drop(removed);
        true
    }

    /// Whether the element is still allocated, attached or not.
    #[must_use]
    pub fn exists(&self, id: ElementId) -> bool {
        self.tree.borrow().elements.contains_key(id)
    }

    /// Whether the element is attached under `body`.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        let tree = self.tree.borrow();
        tree.elements.contains_key(id) && tree.is_ancestor_or_self(tree.body, id)
    }

    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<String> {
        self.tree.borrow().elements.get(id).map(|el| el.tag.clone())
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.tree.borrow().elements.get(id).and_then(|el| el.parent)
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.tree
            .borrow()
            .elements
            .get(id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    /// Replace the class list with the whitespace-separated tokens of
    /// `class_name`. Duplicate tokens are kept once.
    pub fn set_class_name(&self, id: ElementId, class_name: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(id)?;
        el.classes.clear();
        for token in class_name.split_whitespace() {
            if !el.classes.iter().any(|class| class == token) {
                el.classes.push(token.to_string());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn class_name(&self, id: ElementId) -> Option<String> {
        self.tree
            .borrow()
            .elements
            .get(id)
            .map(|el| el.classes.join(" "))
    }

    pub fn add_class(&self, id: ElementId, class: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(id)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&self, id: ElementId, class: &str) -> Result<()> {
        self.tree
            .borrow_mut()
            .get_mut(id)?
            .classes
            .retain(|c| c != class);
        Ok(())
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.tree
            .borrow()
            .elements
            .get(id)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// Set the element's text content verbatim.
    pub fn set_text(&self, id: ElementId, text: impl Into<String>) -> Result<()> {
        self.tree.borrow_mut().get_mut(id)?.text = text.into();
        Ok(())
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<String> {
        self.tree.borrow().elements.get(id).map(|el| el.text.clone())
    }

    pub fn set_tab_index(&self, id: ElementId, tab_index: i32) -> Result<()> {
        self.tree.borrow_mut().get_mut(id)?.tab_index = Some(tab_index);
        Ok(())
    }

    #[must_use]
    pub fn tab_index(&self, id: ElementId) -> Option<i32> {
        self.tree
            .borrow()
            .elements
            .get(id)
            .and_then(|el| el.tab_index)
    }

    /// Descendants of `root` carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .filter(|&id| {
                tree.elements
                    .get(id)
                    .is_some_and(|el| el.classes.iter().any(|c| c == class))
            })
            .collect()
    }

    /// Descendants of `root` with the given tag, in document order.
    #[must_use]
    pub fn find_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .filter(|&id| {
                tree.elements
                    .get(id)
                    .is_some_and(|el| el.tag.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    pub fn focus(&self, id: ElementId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.get(id)?;
        tree.focused = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.tree.borrow().focused
    }

    /// Register `handler` for events named `event` reaching `id`, either
    /// aimed at it or bubbling up from a descendant.
    pub fn add_event_listener<H>(
        &self,
        id: ElementId,
        event: impl Into<Cow<'static, str>>,
        handler: H,
    ) -> Result<()>
    where
        H: Fn(&Document, &Event) + 'static,
    {
        self.tree.borrow_mut().get_mut(id)?.listeners.push(Listener {
            event: event.into(),
            handler: Rc::new(handler),
        });
        Ok(())
    }

    /// Deliver `event` synchronously, bubbling from its target to `body`.
    ///
    /// The propagation path and its listeners are collected before any
    /// handler runs, so handlers may freely mutate the tree (including
    /// removing the target).
    pub fn dispatch(&self, event: &Event) {
        let handlers: Vec<Handler> = {
            let tree = self.tree.borrow();
            if !tree.elements.contains_key(event.target()) {
                log::debug!("Dropping {} event for removed element", event.name());
                return;
            }
            let mut handlers = Vec::new();
            let mut current = Some(event.target());
            while let Some(id) = current {
                let Some(el) = tree.elements.get(id) else {
                    break;
                };
                handlers.extend(
                    el.listeners
                        .iter()
                        .filter(|listener| listener.event == event.name())
                        .map(|listener| Rc::clone(&listener.handler)),
                );
                current = el.parent;
            }
            handlers
        };
        for handler in handlers {
            handler(self, event);
        }
    }

    /// Dispatch a click aimed at `id`.
    pub fn click(&self, id: ElementId) {
        self.dispatch(&Event::click(id));
    }

    /// Dispatch a key press aimed at `id`.
    pub fn key_down(&self, id: ElementId, key: &str) {
        self.dispatch(&Event::key_down(id, key));
    }

    /// Queue `event` for delivery by [`Document::run_pending`].
    pub fn queue(&self, event: Event) {
        self.tree.borrow_mut().pending.push_back(event);
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.tree.borrow().pending.is_empty()
    }

    /// Deliver queued events in order until the queue is empty, including
    /// events queued by the handlers themselves. Returns how many were
    /// delivered.
    pub fn run_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.tree.borrow_mut().pending.pop_front();
            let Some(event) = next else {
                return delivered;
            };
            self.dispatch(&event);
            delivered += 1;
        }
    }
}
