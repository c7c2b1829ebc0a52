//! Owned snapshot of a laid-out element tree.
//!
//! Lets the pipeline run without a live rendering surface: a host (or a
//! test) captures geometry, resolved style and content once, as JSON or
//! programmatically, and the snapshot answers [`ElementView`] reads.

use anyhow::{Context as _, Error, anyhow};
use indextree::{Arena, NodeId};
use serde::Deserialize;
use serde_json::Value;
use skeleton_core::{Rect, StyleSnapshot};
use skeleton_measure::{ElementView, ImageState};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One captured element.
#[derive(Debug, Clone, Default)]
pub struct SnapshotElement {
    pub tag: String,
    pub attrs: SmallVec<(String, String), 4>,
    pub rect: Rect,
    pub style: StyleSnapshot,
    /// Own text, emitted before the children when serialized.
    pub text: String,
    pub image: Option<ImageState>,
    /// Geometry and style reads fail, as they can mid-layout.
    pub unreadable: bool,
}

impl SnapshotElement {
    pub fn new(tag: &str, rect: Rect) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            rect,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        text.clone_into(&mut self.text);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleSnapshot) -> Self {
        self.style = style;
        self
    }
}

/// Arena-backed element tree implementing [`ElementView`].
#[derive(Debug)]
pub struct SnapshotTree {
    arena: Arena<SnapshotElement>,
    root: NodeId,
    location: Option<String>,
}

impl SnapshotTree {
    pub fn new(root: SnapshotElement) -> Self {
        let mut arena = Arena::new();
        Self {
            root: arena.new_node(root),
            arena,
            location: None,
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: SnapshotElement) -> NodeId {
        let id = self.arena.new_node(element);
        parent.append(id, &mut self.arena);
        id
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = Some(location.to_owned());
    }

    pub fn get(&self, id: NodeId) -> Option<&SnapshotElement> {
        self.arena.get(id).map(|node| node.get())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SnapshotElement> {
        self.arena.get_mut(id).map(|node| node.get_mut())
    }

    /// Parse a snapshot from JSON.
    ///
    /// Accepts either an element object or a document object
    /// `{"location": ..., "root": {...}}`. Element objects take `tag`,
    /// `rect`, `style`, `attrs`, `text`, `image`, `unreadable` and
    /// `children`, all optional except `tag`.
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe an element tree.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(json).context("parsing snapshot JSON")?;
        Self::from_json_value(value)
    }

    /// # Errors
    /// Returns an error if the value does not describe an element tree.
    pub fn from_json_value(value: Value) -> Result<Self, Error> {
        let document: DocumentRecord = if value.get("root").is_some() {
            serde_json::from_value(value).context("reading snapshot document")?
        } else {
            DocumentRecord {
                location: None,
                root: serde_json::from_value(value).context("reading snapshot element")?,
            }
        };
        let DocumentRecord { location, root } = document;
        let (element, children) = root.into_parts()?;
        let mut tree = Self::new(element);
        tree.location = location;
        let root_id = tree.root;
        for child in children {
            tree.append_record(root_id, child)?;
        }
        log::trace!("loaded snapshot with {} elements", tree.arena.len());
        Ok(tree)
    }

    fn append_record(&mut self, parent: NodeId, record: ElementRecord) -> Result<(), Error> {
        let (element, children) = record.into_parts()?;
        let id = self.append(parent, element);
        for child in children {
            self.append_record(id, child)?;
        }
        Ok(())
    }

    fn element(&self, id: NodeId) -> Result<&SnapshotElement, Error> {
        self.get(id).ok_or_else(|| anyhow!("node {id:?} is not in the snapshot"))
    }

    /// Like [`Self::element`], failing for elements captured as unreadable.
    fn laid_out(&self, id: NodeId) -> Result<&SnapshotElement, Error> {
        let element = self.element(id)?;
        if element.unreadable {
            return Err(anyhow!("<{}> has no layout available", element.tag));
        }
        Ok(element)
    }

    fn write_outer_html(&self, id: NodeId, out: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value, true));
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }
        out.push_str(&escape(&element.text, false));
        for child in id.children(&self.arena) {
            self.write_outer_html(child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl ElementView for SnapshotTree {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.arena.get(element)?.parent()
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        self.arena.get(element)?.previous_sibling()
    }

    fn children(&self, element: NodeId) -> Vec<NodeId> {
        element.children(&self.arena).collect()
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.get(element).map_or("", |node| node.tag.as_str())
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get(element)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn attributes(&self, element: NodeId) -> Vec<(String, String)> {
        self.get(element)
            .map(|node| node.attrs.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn own_text(&self, element: NodeId) -> String {
        self.get(element)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn bounding_box(&self, element: NodeId) -> Result<Rect, Error> {
        Ok(self.laid_out(element)?.rect)
    }

    fn computed_style(&self, element: NodeId) -> Result<StyleSnapshot, Error> {
        Ok(self.laid_out(element)?.style.clone())
    }

    fn outer_html(&self, element: NodeId) -> Result<String, Error> {
        self.element(element)?;
        let mut out = String::new();
        self.write_outer_html(element, &mut out);
        Ok(out)
    }

    fn image_state(&self, element: NodeId) -> Option<ImageState> {
        self.get(element)?.image.clone()
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    location: Option<String>,
    root: ElementRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct ImageRecord {
    natural_width: u32,
    natural_height: u32,
    current_src: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ElementRecord {
    tag: String,
    rect: Rect,
    style: StyleSnapshot,
    attrs: BTreeMap<String, String>,
    text: String,
    image: Option<ImageRecord>,
    unreadable: bool,
    children: Vec<ElementRecord>,
}

impl ElementRecord {
    fn into_parts(self) -> Result<(SnapshotElement, Vec<Self>), Error> {
        if self.tag.trim().is_empty() {
            return Err(anyhow!("snapshot element without a tag"));
        }
        let element = SnapshotElement {
            tag: self.tag.trim().to_ascii_lowercase(),
            attrs: self.attrs.into_iter().collect(),
            rect: self.rect,
            style: self.style,
            text: self.text,
            image: self.image.map(|image| ImageState {
                natural_width: image.natural_width,
                natural_height: image.natural_height,
                current_src: image.current_src,
            }),
            unreadable: self.unreadable,
        };
        Ok((element, self.children))
    }
}
