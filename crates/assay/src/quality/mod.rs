//! Rule-based quality flags and the aggregate quality score.
//!
//! Every flag is an independent, explainable rule over the dataset summary,
//! the missing table and (for the zero-value and duplicate-identifier rules)
//! the raw values. The score starts at 1.0 and loses a configurable weight
//! per triggered rule; see [`ScoreWeights`].

mod config;
mod flags;
mod shape;

pub use config::{QualityConfig, ScoreWeights};
pub use flags::{FlagValue, FlaggedColumns, QualityFlagEngine, QualityFlags};
pub use shape::{DatasetShape, ShapeAssessment, ShapeEstimator, ShapeFlags};
