//! Animation stacks, layers and per-node curve bindings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::curve::AnimCurve;
use crate::error::DocumentError;
use crate::time::TimeSpan;

/// Animatable transform property of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Translation,
    Rotation,
    Scaling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

/// The X/Y/Z curves driving one property of one node within a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveNode {
    /// Name of the animated node.
    pub node: String,
    pub property: Property,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<AnimCurve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AnimCurve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<AnimCurve>,
}

impl CurveNode {
    pub fn new(node: impl Into<String>, property: Property) -> Self {
        Self {
            node: node.into(),
            property,
            x: None,
            y: None,
            z: None,
        }
    }

    pub fn with_curve(mut self, axis: Axis, curve: AnimCurve) -> Self {
        *self.slot_mut(axis) = Some(curve);
        self
    }

    pub fn curve(&self, axis: Axis) -> Option<&AnimCurve> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::Z => self.z.as_ref(),
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut Option<AnimCurve> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Disjoint mutable access to a node's translation curves in one layer.
/// Absent axes are `None`.
#[derive(Debug, Default)]
pub struct TranslationCurves<'a> {
    pub x: Option<&'a mut AnimCurve>,
    pub y: Option<&'a mut AnimCurve>,
    pub z: Option<&'a mut AnimCurve>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationLayer {
    pub name: String,
    #[serde(default)]
    pub curve_nodes: Vec<CurveNode>,
}

impl AnimationLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curve_nodes: Vec::new(),
        }
    }

    pub fn with_curve_node(mut self, curve_node: CurveNode) -> Self {
        self.curve_nodes.push(curve_node);
        self
    }

    pub fn curve_node(&self, node: &str, property: Property) -> Option<&CurveNode> {
        self.curve_nodes
            .iter()
            .find(|cn| cn.node == node && cn.property == property)
    }

    pub fn curve_node_mut(&mut self, node: &str, property: Property) -> Option<&mut CurveNode> {
        self.curve_nodes
            .iter_mut()
            .find(|cn| cn.node == node && cn.property == property)
    }

    /// Curve for one translation axis of `node`, if animated in this layer.
    pub fn translation_curve(&self, node: &str, axis: Axis) -> Option<&AnimCurve> {
        self.curve_node(node, Property::Translation)
            .and_then(|cn| cn.curve(axis))
    }

    /// All three translation curves of `node`; every axis is `None` when the
    /// node has no translation binding in this layer.
    pub fn translation_curves_mut(&mut self, node: &str) -> TranslationCurves<'_> {
        match self.curve_node_mut(node, Property::Translation) {
            Some(cn) => TranslationCurves {
                x: cn.x.as_mut(),
                y: cn.y.as_mut(),
                z: cn.z.as_mut(),
            },
            None => TranslationCurves::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationStack {
    pub name: String,
    pub local_time_span: TimeSpan,
    #[serde(default)]
    pub layers: Vec<AnimationLayer>,
}

impl AnimationStack {
    pub fn new(name: impl Into<String>, local_time_span: TimeSpan) -> Self {
        Self {
            name: name.into(),
            local_time_span,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: AnimationLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DocumentError> {
        self.local_time_span.validate().map_err(|e| {
            DocumentError::invalid(format!("animation stack '{}': {e}", self.name))
        })?;
        for layer in &self.layers {
            for cn in &layer.curve_nodes {
                for axis in Axis::ALL {
                    if let Some(curve) = cn.curve(axis) {
                        curve.validate().map_err(|e| {
                            DocumentError::invalid(format!(
                                "curve {}.{:?}.{axis} in layer '{}': {e}",
                                cn.node, cn.property, layer.name
                            ))
                        })?;
                    }
                }
            }
        }
        Ok(())
    }
}
