//! Index-addressed element tree for unit tests.

use crate::view::{ElementView, ImageState};
use anyhow::{Error, anyhow};
use skeleton_core::{Rect, StyleSnapshot};

#[derive(Debug, Default)]
pub struct FixtureNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub rect: Rect,
    pub style: StyleSnapshot,
    pub text: String,
    pub image: Option<ImageState>,
    pub unreadable: bool,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct FixtureTree {
    nodes: Vec<FixtureNode>,
    pub location: Option<String>,
}

impl FixtureTree {
    pub fn add(&mut self, parent: Option<usize>, tag: &str, rect: Rect) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FixtureNode {
            tag: tag.to_owned(),
            rect,
            parent,
            ..FixtureNode::default()
        });
        if let Some(parent_node) = parent.and_then(|index| self.nodes.get_mut(index)) {
            parent_node.children.push(id);
        }
        id
    }

    /// # Panics
    /// Panics on an unknown id; fixtures are built by hand.
    #[allow(clippy::panic, reason = "Fixture misuse should fail the test loudly")]
    pub fn node_mut(&mut self, id: usize) -> &mut FixtureNode {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => panic!("unknown fixture node {id}"),
        }
    }

    pub fn set_attr(&mut self, id: usize, name: &str, value: &str) {
        self.node_mut(id).attrs.push((name.to_owned(), value.to_owned()));
    }

    fn node(&self, id: usize) -> Result<&FixtureNode, Error> {
        self.nodes.get(id).ok_or_else(|| anyhow!("unknown fixture node {id}"))
    }
}

impl ElementView for FixtureTree {
    type Handle = usize;

    fn parent(&self, element: usize) -> Option<usize> {
        self.nodes.get(element)?.parent
    }

    fn previous_sibling_element(&self, element: usize) -> Option<usize> {
        let siblings = &self.nodes.get(self.parent(element)?)?.children;
        let position = siblings.iter().position(|id| *id == element)?;
        siblings.get(position.checked_sub(1)?).copied()
    }

    fn children(&self, element: usize) -> Vec<usize> {
        self.nodes
            .get(element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, element: usize) -> &str {
        self.nodes.get(element).map_or("", |node| node.tag.as_str())
    }

    fn attr(&self, element: usize, name: &str) -> Option<&str> {
        self.nodes
            .get(element)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn attributes(&self, element: usize) -> Vec<(String, String)> {
        self.nodes
            .get(element)
            .map(|node| node.attrs.clone())
            .unwrap_or_default()
    }

    fn own_text(&self, element: usize) -> String {
        self.nodes
            .get(element)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn bounding_box(&self, element: usize) -> Result<Rect, Error> {
        Ok(self.node(element)?.rect)
    }

    fn computed_style(&self, element: usize) -> Result<StyleSnapshot, Error> {
        let node = self.node(element)?;
        if node.unreadable {
            return Err(anyhow!("style of <{}> not ready", node.tag));
        }
        Ok(node.style.clone())
    }

    fn outer_html(&self, element: usize) -> Result<String, Error> {
        let node = self.node(element)?;
        let inner: String = node
            .children
            .iter()
            .map(|child| self.outer_html(*child))
            .collect::<Result<_, _>>()?;
        Ok(format!("<{tag}>{}{inner}</{tag}>", node.text, tag = node.tag))
    }

    fn image_state(&self, element: usize) -> Option<ImageState> {
        self.nodes.get(element)?.image.clone()
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
