//! Node attributes and the skeleton-joint capability query.
//!
//! Exporters disagree on how attribute types are spelled ("Skeleton",
//! "eSkeleton", "LimbNode", ...). Parsing normalises every known spelling
//! here so callers only ever ask [`NodeAttribute::is_skeleton_joint`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Null,
    Marker,
    Skeleton,
    Mesh,
    Nurbs,
    Patch,
    Camera,
    Light,
    LodGroup,
    /// Any tag this crate does not model; kept verbatim for round-tripping.
    Unknown(String),
}

impl AttributeType {
    /// Display name used in hierarchy dumps.
    pub fn type_name(&self) -> &str {
        match self {
            AttributeType::Null => "Null",
            AttributeType::Marker => "Marker",
            AttributeType::Skeleton => "Skeleton",
            AttributeType::Mesh => "Mesh",
            AttributeType::Nurbs => "Nurbs",
            AttributeType::Patch => "Patch",
            AttributeType::Camera => "Camera",
            AttributeType::Light => "Light",
            AttributeType::LodGroup => "LodGroup",
            AttributeType::Unknown(tag) => tag,
        }
    }
}

impl FromStr for AttributeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        // SDK enum spellings carry an "e" prefix (eSkeleton, eMesh).
        let bare = match lower.strip_prefix('e') {
            Some(rest) if trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_uppercase()) => rest,
            _ => lower.as_str(),
        };
        let parsed = match bare {
            "null" => AttributeType::Null,
            "marker" => AttributeType::Marker,
            "skeleton" | "limbnode" | "limb" | "joint" | "bone" => AttributeType::Skeleton,
            "mesh" => AttributeType::Mesh,
            "nurbs" => AttributeType::Nurbs,
            "patch" => AttributeType::Patch,
            "camera" => AttributeType::Camera,
            "light" => AttributeType::Light,
            "lodgroup" => AttributeType::LodGroup,
            _ => AttributeType::Unknown(trimmed.to_string()),
        };
        Ok(parsed)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Role of a skeleton joint within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonType {
    Root,
    Limb,
    LimbNode,
    Effector,
}

/// A node's attribute. The type tag is kept as spelled in the source
/// document and written back unchanged; only its parsed kind is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttributeRepr", into = "AttributeRepr")]
pub struct NodeAttribute {
    kind: AttributeType,
    tag: String,
    pub name: Option<String>,
    pub skeleton_type: Option<SkeletonType>,
}

#[derive(Serialize, Deserialize)]
struct AttributeRepr {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skeleton_type: Option<SkeletonType>,
}

impl From<AttributeRepr> for NodeAttribute {
    fn from(repr: AttributeRepr) -> Self {
        Self {
            kind: repr.tag.parse().unwrap_or_else(|never| match never {}),
            tag: repr.tag,
            name: repr.name,
            skeleton_type: repr.skeleton_type,
        }
    }
}

impl From<NodeAttribute> for AttributeRepr {
    fn from(attr: NodeAttribute) -> Self {
        Self {
            tag: attr.tag,
            name: attr.name,
            skeleton_type: attr.skeleton_type,
        }
    }
}

impl NodeAttribute {
    pub fn new(kind: AttributeType) -> Self {
        Self {
            tag: kind.type_name().to_string(),
            kind,
            name: None,
            skeleton_type: None,
        }
    }

    pub fn skeleton(skeleton_type: SkeletonType) -> Self {
        Self {
            skeleton_type: Some(skeleton_type),
            ..Self::new(AttributeType::Skeleton)
        }
    }

    /// Whether this attribute marks its node as a skeletal joint.
    #[inline]
    pub fn is_skeleton_joint(&self) -> bool {
        self.kind == AttributeType::Skeleton
    }

    /// Normalised type name used in hierarchy dumps.
    #[inline]
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AttributeType {
        s.parse().unwrap_or_else(|never| match never {})
    }

    #[test]
    fn skeleton_spellings_are_normalised() {
        for tag in ["Skeleton", "skeleton", "eSkeleton", "LimbNode", " SKELETON "] {
            assert_eq!(parse(tag), AttributeType::Skeleton, "{tag}");
        }
    }

    #[test]
    fn e_prefix_only_stripped_before_uppercase() {
        assert_eq!(parse("eMesh"), AttributeType::Mesh);
        // "effector" is not "ffector" with a prefix
        assert_eq!(
            parse("effector"),
            AttributeType::Unknown("effector".to_string())
        );
    }

    #[test]
    fn unknown_tags_round_trip() {
        let attr: NodeAttribute =
            serde_json::from_str(r#"{"type":"SubDiv"}"#).expect("parse attribute");
        assert_eq!(attr.kind, AttributeType::Unknown("SubDiv".into()));
        assert!(!attr.is_skeleton_joint());
        let back = serde_json::to_string(&attr).expect("serialize attribute");
        assert_eq!(back, r#"{"type":"SubDiv"}"#);
    }

    #[test]
    fn skeleton_spelling_is_written_back_unchanged() {
        for tag in ["LimbNode", "eSkeleton", "joint"] {
            let json = format!(r#"{{"type":"{tag}"}}"#);
            let attr: NodeAttribute = serde_json::from_str(&json).expect("parse attribute");
            assert!(attr.is_skeleton_joint(), "{tag}");
            assert_eq!(attr.type_name(), "Skeleton");
            assert_eq!(attr.tag, tag);
            assert_eq!(serde_json::to_string(&attr).expect("serialize attribute"), json);
        }
    }

    #[test]
    fn built_attributes_use_canonical_tags() {
        let attr = NodeAttribute::skeleton(SkeletonType::Root);
        assert_eq!(attr.tag, "Skeleton");
        assert_eq!(
            serde_json::to_string(&attr).expect("serialize attribute"),
            r#"{"type":"Skeleton","skeleton_type":"root"}"#
        );
    }

    #[test]
    fn skeleton_attribute_is_joint() {
        let attr: NodeAttribute =
            serde_json::from_str(r#"{"type":"eSkeleton","skeleton_type":"limb_node"}"#)
                .expect("parse attribute");
        assert!(attr.is_skeleton_joint());
        assert_eq!(attr.skeleton_type, Some(SkeletonType::LimbNode));
        assert_eq!(attr.type_name(), "Skeleton");
    }
}
