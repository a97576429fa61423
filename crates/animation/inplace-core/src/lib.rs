//! In-place root motion for skeletal animation scenes.
//!
//! Finds the root bone of a rig ([`locate`]), maps a mode to the translation
//! axes to flatten ([`policy`]) and pins those axes of the root bone's
//! translation curves at every whole frame of the first animation stack
//! ([`rewrite`]). [`pipeline::InPlace`] strings the steps together around a
//! scene [`DocumentAdapter`](inplace_scene::DocumentAdapter).

pub mod config;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod policy;
pub mod rewrite;

pub use config::{Config, DEFAULT_ROOT_BONE_CANDIDATES};
pub use error::InPlaceError;
pub use locate::{dump_line, locate_root_bone, locate_root_bone_with, RootBone};
pub use pipeline::{InPlace, RunOptions, RunOutcome};
pub use policy::{resolve_policy, resolve_policy_strict, AxisRemovalPolicy, Mode};
pub use rewrite::{rewrite, AxisReport, RewriteReport};
