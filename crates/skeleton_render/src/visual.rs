//! Host-neutral placeholder tree and its HTML serialization.

use serde::{Deserialize, Serialize};

/// One rendered node: an element with classes, inline styles and children,
/// or captured markup reproduced byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualNode {
    Element {
        tag: String,
        classes: Vec<String>,
        /// Declarations in insertion order; a later duplicate wins.
        styles: Vec<(String, String)>,
        children: Vec<VisualNode>,
    },
    Markup { html: String },
}

impl VisualNode {
    pub fn element(tag: &str) -> Self {
        Self::Element {
            tag: tag.to_owned(),
            classes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn markup(html: &str) -> Self {
        Self::Markup {
            html: html.to_owned(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if let Self::Element { classes, .. } = &mut self {
            classes.push(class.to_owned());
        }
        self
    }

    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push_child(child);
        self
    }

    /// Set `property`, replacing an earlier value in place.
    pub fn set_style(&mut self, property: &str, value: &str) {
        if let Self::Element { styles, .. } = self {
            if let Some(entry) = styles.iter_mut().find(|(name, _)| name == property) {
                value.clone_into(&mut entry.1);
            } else {
                styles.push((property.to_owned(), value.to_owned()));
            }
        }
    }

    pub fn push_child(&mut self, child: Self) {
        if let Self::Element { children, .. } = self {
            children.push(child);
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Markup { .. } => None,
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        match self {
            Self::Element { styles, .. } => styles
                .iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value.as_str()),
            Self::Markup { .. } => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Self::Element { classes, .. } => classes.iter().any(|name| name == class),
            Self::Markup { .. } => false,
        }
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            Self::Markup { .. } => &[],
        }
    }

    /// Pre-order walk over this node and its descendants.
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Serialize to HTML. Markup nodes are emitted unchanged.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

fn write_node(out: &mut String, node: &VisualNode) {
    match node {
        VisualNode::Markup { html } => out.push_str(html),
        VisualNode::Element {
            tag,
            classes,
            styles,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            if !classes.is_empty() {
                out.push_str(" class=\"");
                out.push_str(&escape_attr(&classes.join(" ")));
                out.push('"');
            }
            if !styles.is_empty() {
                let declarations = styles
                    .iter()
                    .map(|(property, value)| format!("{property}: {value};"))
                    .collect::<Vec<_>>()
                    .join(" ");
                out.push_str(" style=\"");
                out.push_str(&escape_attr(&declarations));
                out.push('"');
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
