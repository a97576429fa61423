//! Root translation rewrite.
//!
//! Works on the first animation stack (which becomes the current stack) and
//! its first layer. For every whole frame of the stack's span, the selected
//! translation axes of the root bone get a key pinned to 0.0. A present Y
//! curve is always keyed: pinned to 0.0 when upward motion is removed,
//! otherwise held at the value of its first key.

use inplace_scene::{
    AnimCurve, Axis, FrameRange, FrameRate, Scene, SceneTime, TranslationCurves,
};
use serde::Serialize;

use crate::error::InPlaceError;
use crate::locate::RootBone;
use crate::policy::AxisRemovalPolicy;

/// Per-axis edit counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AxisReport {
    pub curve_present: bool,
    pub keys_inserted: usize,
    pub keys_updated: usize,
}

impl AxisReport {
    #[inline]
    pub fn keys_touched(&self) -> usize {
        self.keys_inserted + self.keys_updated
    }
}

/// Summary of a rewrite pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewriteReport {
    pub stack: String,
    pub layer: String,
    pub root_bone: String,
    pub frame_range: FrameRange,
    #[serde(skip)]
    pub frame_rate: FrameRate,
    pub policy: AxisRemovalPolicy,
    /// First Y key value held across the range, when heights were preserved.
    pub preserved_height: Option<f32>,
    pub x: AxisReport,
    pub y: AxisReport,
    pub z: AxisReport,
}

impl RewriteReport {
    #[inline]
    pub fn frames_processed(&self) -> u64 {
        self.frame_range.count()
    }

    pub fn axis(&self, axis: Axis) -> &AxisReport {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Pin one key at `time`. `value` of `None` keeps whatever the key holds
/// (for a new key, the curve's value at that time).
fn pin_key(curve: &mut AnimCurve, time: SceneTime, value: Option<f32>, report: &mut AxisReport) {
    let mut edit = curve.modify_key_at(time);
    if let Some(v) = value {
        edit.set_value(v);
    }
    if edit.commit().created {
        report.keys_inserted += 1;
    } else {
        report.keys_updated += 1;
    }
}

/// Rewrite the root bone's translation curves according to `policy`.
pub fn rewrite(
    scene: &mut Scene,
    root_bone: &RootBone,
    policy: &AxisRemovalPolicy,
) -> Result<RewriteReport, InPlaceError> {
    if !scene.set_current_stack(0) {
        return Err(InPlaceError::NoAnimation);
    }
    let time_mode = scene.time_mode;
    let stack = &mut scene.animation_stacks[0];
    let frame_range = stack.local_time_span.frame_range(time_mode);
    let stack_name = stack.name.clone();
    let layer = stack
        .layers
        .first_mut()
        .ok_or_else(|| InPlaceError::NoAnimationLayer {
            stack: stack_name.clone(),
        })?;
    let layer_name = layer.name.clone();

    let TranslationCurves {
        x: mut curve_x,
        y: mut curve_y,
        z: mut curve_z,
    } = layer.translation_curves_mut(&root_bone.name);

    let frame_rate = time_mode.frame_rate();
    log::info!(
        "frame range {} to {} at {} fps, root bone {}",
        frame_range.start,
        frame_range.stop,
        frame_rate,
        root_bone.name
    );
    if curve_x.is_none() && curve_y.is_none() && curve_z.is_none() {
        log::warn!(
            "'{}' has no translation curves in layer '{layer_name}'; nothing to rewrite",
            root_bone.name
        );
    }

    let preserved_height = if policy.remove_upward {
        None
    } else {
        curve_y.as_deref().and_then(|c| c.key_value(0))
    };
    let y_target = if policy.remove_upward {
        Some(0.0)
    } else {
        preserved_height
    };

    let mut report = RewriteReport {
        stack: stack_name,
        layer: layer_name,
        root_bone: root_bone.name.clone(),
        frame_range,
        frame_rate,
        policy: *policy,
        preserved_height,
        x: AxisReport {
            curve_present: curve_x.is_some(),
            ..Default::default()
        },
        y: AxisReport {
            curve_present: curve_y.is_some(),
            ..Default::default()
        },
        z: AxisReport {
            curve_present: curve_z.is_some(),
            ..Default::default()
        },
    };

    for frame in frame_range.frames() {
        let time = SceneTime::from_frame(frame, time_mode);

        if policy.remove_lateral {
            if let Some(curve) = curve_x.as_deref_mut() {
                pin_key(curve, time, Some(0.0), &mut report.x);
            }
        }
        if let Some(curve) = curve_y.as_deref_mut() {
            pin_key(curve, time, y_target, &mut report.y);
        }
        if policy.remove_forward {
            if let Some(curve) = curve_z.as_deref_mut() {
                pin_key(curve, time, Some(0.0), &mut report.z);
            }
        }
    }

    log::debug!(
        "rewrote {} frames: x {:?}, y {:?}, z {:?}",
        report.frames_processed(),
        report.x,
        report.y,
        report.z
    );
    Ok(report)
}
