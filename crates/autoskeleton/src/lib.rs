//! Automatic loading skeletons.
//!
//! Measures a laid-out element tree through an [`ElementView`], infers a
//! blueprint of placeholder roles and renders it into layout-preserving
//! placeholder visuals:
//!
//! ```
//! use autoskeleton::{SkeletonConfig, SnapshotTree, generate_skeleton};
//!
//! let tree = SnapshotTree::from_json_str(
//!     r#"{"tag": "p", "text": "Hello", "rect": {"width": 200, "height": 19}}"#,
//! )?;
//! let html = generate_skeleton(&tree, tree.root(), &SkeletonConfig::default())?
//!     .map(|visual| visual.to_html());
//! assert!(html.is_some_and(|html| html.contains("skeleton-text")));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Timing (when to measure, debouncing, fading placeholders out) belongs to
//! the caller; every function here is synchronous and self-contained.

#![forbid(unsafe_code)]

mod cache;
mod snapshot;

pub use cache::BlueprintCache;
pub use snapshot::{SnapshotElement, SnapshotTree};

pub use skeleton_classify::{Classifier, RuleSet, ScoringRule, classify};
pub use skeleton_core::{
    Animation, MeasurementNode, PreservedStyles, Rect, SkeletonConfig, SkeletonKind, SkeletonNode,
    StyleSnapshot,
};
pub use skeleton_measure::{ElementView, ImageState, measure_root};
pub use skeleton_render::{DisplayList, VisualNode, render, render_html, stylesheet};

use anyhow::{Context as _, Error};

/// Measure `root` and classify the result.
///
/// `Ok(None)` when the root is ignored, hidden or zero-sized. Unreadable
/// descendants are left out of the blueprint.
///
/// # Errors
/// Returns an error if the root element cannot be read. Callers should show
/// no skeleton rather than retry with partial data.
pub fn generate_blueprint<V: ElementView>(
    view: &V,
    root: V::Handle,
    config: &SkeletonConfig,
) -> Result<Option<SkeletonNode>, Error> {
    let Some(measurement) = measure_root(view, root, config).context("measuring skeleton root")?
    else {
        log::debug!("skeleton root contributes nothing");
        return Ok(None);
    };
    log::debug!(
        "measured {} elements under <{}>",
        measurement.subtree_len(),
        measurement.tag
    );
    Ok(Some(classify(&measurement, config)))
}

/// [`generate_blueprint`] followed by rendering.
///
/// # Errors
/// Returns an error if the root element cannot be read.
pub fn generate_skeleton<V: ElementView>(
    view: &V,
    root: V::Handle,
    config: &SkeletonConfig,
) -> Result<Option<VisualNode>, Error> {
    Ok(generate_blueprint(view, root, config)?.and_then(|blueprint| render(&blueprint, config)))
}

/// Parse a partial configuration; missing fields keep their defaults.
///
/// # Errors
/// Returns an error if `json` is not a configuration object.
pub fn config_from_json(json: &str) -> Result<SkeletonConfig, Error> {
    serde_json::from_str(json).context("parsing skeleton configuration")
}
