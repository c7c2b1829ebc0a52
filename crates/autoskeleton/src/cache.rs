//! One blueprint per loading episode.

use crate::generate_blueprint;
use skeleton_core::{SkeletonConfig, SkeletonNode};
use skeleton_measure::ElementView;
use skeleton_render::{Renderer, VisualNode};
use std::sync::Arc;

/// Holds the blueprint measured when content started loading until the
/// content is ready.
///
/// A new episode supersedes the previous blueprint wholesale. When the
/// measurement pass fails nothing is kept and nothing is rendered.
#[derive(Debug, Default)]
pub struct BlueprintCache {
    config: SkeletonConfig,
    blueprint: Option<Arc<SkeletonNode>>,
    loading: bool,
}

impl BlueprintCache {
    pub fn new(config: SkeletonConfig) -> Self {
        Self {
            config,
            blueprint: None,
            loading: false,
        }
    }

    pub const fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Measure and classify `root` for a new loading episode.
    pub fn begin_loading<V: ElementView>(
        &mut self,
        view: &V,
        root: V::Handle,
    ) -> Option<Arc<SkeletonNode>> {
        self.loading = true;
        self.blueprint = match generate_blueprint(view, root, &self.config) {
            Ok(blueprint) => blueprint.map(Arc::new),
            Err(err) => {
                log::error!("skeleton generation failed, showing no skeleton: {err:#}");
                None
            }
        };
        self.blueprint()
    }

    /// The current episode's blueprint, if one was produced.
    pub fn blueprint(&self) -> Option<Arc<SkeletonNode>> {
        self.blueprint.as_ref().map(Arc::clone)
    }

    /// Placeholder visuals while loading; `None` once content is ready.
    pub fn render(&self) -> Option<VisualNode> {
        if !self.loading {
            return None;
        }
        Renderer::new(&self.config).render(self.blueprint.as_deref()?)
    }

    /// Content is ready: drop the blueprint and hand it back.
    pub fn finish_loading(&mut self) -> Option<Arc<SkeletonNode>> {
        self.loading = false;
        self.blueprint.take()
    }
}
