//! Blueprint inference.
//!
//! Walks a [`MeasurementNode`] tree and decides, per node, whether it is
//! reproduced verbatim, kept as structure (containers and table parts) or
//! collapsed into one placeholder leaf whose role comes from an additive
//! [`RuleSet`].

#![forbid(unsafe_code)]

mod classifier;
mod lines;
mod preserve;
pub mod scoring;
mod tags;

pub use classifier::{
    CELL_PLACEHOLDER_HEIGHT, CELL_PLACEHOLDER_WIDTH, Classifier, MIN_LEAF_AREA,
};
pub use lines::line_count;
pub use scoring::{RoleScores, RuleSet, ScoringRule};

use skeleton_core::{MeasurementNode, SkeletonConfig, SkeletonNode};

/// Classify with the stock heuristics.
pub fn classify(measurement: &MeasurementNode, config: &SkeletonConfig) -> SkeletonNode {
    Classifier::default().classify(measurement, config)
}
