//! Scene document model for in-place animation editing.
//!
//! A [`Scene`] owns a node hierarchy and its animation stacks. Each stack
//! holds layers, each layer binds per-node X/Y/Z [`AnimCurve`]s. Times are
//! integer ticks quantized through the scene's [`TimeMode`]. Documents are
//! read and written through a [`DocumentAdapter`]; [`JsonDocument`] is the
//! filesystem implementation.

pub mod animation;
pub mod attribute;
pub mod curve;
pub mod document;
pub mod error;
pub mod node;
pub mod scene;
pub mod time;

pub use animation::{AnimationLayer, AnimationStack, Axis, CurveNode, Property, TranslationCurves};
pub use attribute::{AttributeType, NodeAttribute, SkeletonType};
pub use curve::{AnimCurve, Interpolation, Key, KeyCommit, KeyModify, KeySlopes};
pub use document::{parse_scene_json, write_atomic, DocumentAdapter, JsonDocument};
pub use error::DocumentError;
pub use node::Node;
pub use scene::Scene;
pub use time::{FrameRange, FrameRate, SceneTime, TimeMode, TimeSpan, TICKS_PER_SECOND};
