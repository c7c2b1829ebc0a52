//! Recursive measurement pass.

use crate::image::{effective_image_box, is_unloaded_image};
use crate::selectors::IgnoreList;
use crate::view::ElementView;
use anyhow::{Context as _, Error};
use skeleton_core::{MeasurementNode, PASSTHROUGH_ATTRIBUTE, SkeletonConfig};

/// One measurement pass over a host tree.
///
/// Holds the compiled ignore selectors so they are parsed once per pass.
/// Nothing here outlives the call that created it.
pub struct Measurer<'view, V: ElementView> {
    view: &'view V,
    config: &'view SkeletonConfig,
    ignore: IgnoreList,
}

impl<'view, V: ElementView> Measurer<'view, V> {
    pub fn new(view: &'view V, config: &'view SkeletonConfig) -> Self {
        Self {
            view,
            config,
            ignore: IgnoreList::compile(&config.ignore_selectors),
        }
    }

    /// Measure `element` at `depth`.
    ///
    /// `Ok(None)` means the element contributes nothing: too deep, ignored,
    /// invisible or zero-sized. Read failures of descendants are absorbed;
    /// only a failure reading `element` itself is returned.
    ///
    /// # Errors
    /// Returns an error if the geometry, style or markup of `element` cannot
    /// be read.
    pub fn measure(
        &self,
        element: V::Handle,
        depth: usize,
    ) -> Result<Option<MeasurementNode>, Error> {
        if depth > self.config.max_depth {
            log::trace!("depth {depth} exceeds max depth, truncating");
            return Ok(None);
        }
        if self.in_passthrough_subtree(element) {
            return self.measure_passthrough(element).map(Some);
        }
        if self.ignore.matches(self.view, element) {
            log::debug!("<{}> matches an ignore selector", self.view.tag_name(element));
            return Ok(None);
        }

        let tag = self.view.tag_name(element);
        let measured = self
            .view
            .bounding_box(element)
            .with_context(|| format!("reading the box of <{tag}>"))?;
        let style = self
            .view
            .computed_style(element)
            .with_context(|| format!("reading the style of <{tag}>"))?;

        let rect = if is_unloaded_image(self.view, element) {
            effective_image_box(self.view, element, &style, measured)
        } else {
            measured
        };
        if rect.is_empty() || style.is_hidden() {
            log::trace!("<{tag}> is invisible or empty, omitting");
            return Ok(None);
        }

        let children = self
            .view
            .children(element)
            .into_iter()
            .filter_map(|child| self.measure_child(child, depth.saturating_add(1)))
            .collect();

        let mut node = MeasurementNode::new(tag, rect, style);
        node.text = self.view.own_text(element).trim().to_owned();
        node.attributes = self.view.attributes(element).into_iter().collect();
        node.children = children;
        Ok(Some(node))
    }

    /// A child read failure only removes that child.
    fn measure_child(&self, child: V::Handle, depth: usize) -> Option<MeasurementNode> {
        self.measure(child, depth).unwrap_or_else(|err| {
            log::debug!("treating unreadable element as absent: {err:#}");
            None
        })
    }

    /// True if the element or any ancestor carries the escape-hatch marker.
    fn in_passthrough_subtree(&self, element: V::Handle) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if self.view.attr(node, PASSTHROUGH_ATTRIBUTE).is_some() {
                return true;
            }
            current = self.view.parent(node);
        }
        false
    }

    /// Record box, style and markup; children are not visited.
    fn measure_passthrough(&self, element: V::Handle) -> Result<MeasurementNode, Error> {
        let tag = self.view.tag_name(element);
        let rect = self
            .view
            .bounding_box(element)
            .with_context(|| format!("reading the box of passthrough <{tag}>"))?;
        let style = self
            .view
            .computed_style(element)
            .with_context(|| format!("reading the style of passthrough <{tag}>"))?;
        let markup = self
            .view
            .outer_html(element)
            .with_context(|| format!("serializing passthrough <{tag}>"))?;
        let mut node = MeasurementNode::new(tag, rect, style);
        node.text = self.view.own_text(element).trim().to_owned();
        node.attributes = self.view.attributes(element).into_iter().collect();
        node.passthrough_markup = Some(markup);
        Ok(node)
    }
}
