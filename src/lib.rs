//! Single-value pipeline aggregation results.
//!
//! `simple-value-core` holds the terminal result produced by a pipeline
//! aggregation stage: one derived `f64`, the format used to display it, and
//! the metadata every aggregation result carries. It defines the byte layout
//! used to ship the result between nodes and the rules for rendering it into
//! an output document. Non-finite values render as `null` and never leak into
//! the output.

pub mod aggregation;
pub mod format;
pub mod stream;
pub mod xcontent;

pub use aggregation::{InternalAggregation, SimpleValue};
pub use format::DocValueFormat;
