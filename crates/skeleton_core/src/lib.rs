//! Data model for automatic skeleton generation.
//!
//! A rendered subtree is measured into a [`MeasurementNode`] tree, classified
//! into a [`SkeletonNode`] blueprint and finally rendered into placeholder
//! visuals. This crate holds the types every stage agrees on plus the small
//! CSS value helpers they share.

#![forbid(unsafe_code)]

mod blueprint;
mod config;
mod geometry;
mod measurement;
mod style;
pub mod values;

pub use blueprint::{PreservedStyles, SkeletonKind, SkeletonNode, UnknownKind};
pub use config::{
    Animation, PASSTHROUGH_ATTRIBUTE, ROLE_OVERRIDE_ATTRIBUTE, SkeletonConfig,
};
pub use geometry::Rect;
pub use measurement::MeasurementNode;
pub use style::StyleSnapshot;
pub use values::{LengthOrPercentage, parse_length_or_percentage, parse_px};
