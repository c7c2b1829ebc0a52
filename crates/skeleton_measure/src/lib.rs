//! Measurer: walks a laid-out element tree and snapshots geometry, resolved
//! style, own text and attributes into an immutable [`MeasurementNode`] tree.
//!
//! The host tree is reached only through [`ElementView`], so the same code
//! measures a live rendering surface or a synthetic fixture.

#![forbid(unsafe_code)]

mod image;
pub mod selectors;
mod style_attr;
mod traversal;
mod view;

#[cfg(test)]
mod fixture;

pub use image::{COMPUTED_HEIGHT_THRESHOLD, effective_image_box, is_unloaded_image};
pub use selectors::IgnoreList;
pub use style_attr::InlineStyle;
pub use traversal::Measurer;
pub use view::{ElementView, ImageState};

use anyhow::Error;
use skeleton_core::{MeasurementNode, SkeletonConfig};

/// Measure the subtree rooted at `root`.
///
/// Unreadable descendants are dropped. `Ok(None)` when the root itself is
/// ignored, invisible or zero-sized.
///
/// # Errors
/// Returns an error if the root element's geometry, style or markup cannot
/// be read. Callers should render no skeleton in that case.
pub fn measure_root<V: ElementView>(
    view: &V,
    root: V::Handle,
    config: &SkeletonConfig,
) -> Result<Option<MeasurementNode>, Error> {
    Measurer::new(view, config).measure(root, 0)
}

/// Like [`measure_root`], with a root read failure treated as absent.
pub fn measure<V: ElementView>(
    view: &V,
    root: V::Handle,
    config: &SkeletonConfig,
) -> Option<MeasurementNode> {
    measure_root(view, root, config).unwrap_or_else(|err| {
        log::debug!("measurement root unreadable: {err:#}");
        None
    })
}
