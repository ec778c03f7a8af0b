//! Markup serialization for inspecting built dialogs.

use std::fmt::Write as _;

use super::{Document, ElementId, Tree};

impl Document {
    /// Serialize `id` and its subtree as HTML. Returns `None` for an unknown
    /// element.
    ///
    /// Text content is escaped, so `<b>` set through [`Document::set_text`]
    /// comes back as `&lt;b&gt;`. Attributes are limited to what the model
    /// stores: `class` and `tabindex`.
    #[must_use]
    pub fn outer_html(&self, id: ElementId) -> Option<String> {
        let tree = self.tree.borrow();
        tree.elements.get(id)?;
        let mut out = String::new();
        write_element(&tree, id, &mut out);
        Some(out)
    }
}

fn write_element(tree: &Tree, id: ElementId, out: &mut String) {
    let Some(el) = tree.elements.get(id) else {
        return;
    };
    let _ = write!(out, "<{}", el.tag);
    if !el.classes.is_empty() {
        out.push_str(" class=\"");
        escape_into(&el.classes.join(" "), out);
        out.push('"');
    }
    if let Some(tab_index) = el.tab_index {
        let _ = write!(out, " tabindex=\"{tab_index}\"");
    }
    out.push('>');
    escape_into(&el.text, out);
    for &child in &el.children {
        write_element(tree, child, out);
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
