//! Root bone discovery.
//!
//! Depth-first, pre-order search for the first node whose name contains one
//! of the candidate fragments (case-insensitive) and whose attribute is a
//! skeleton joint. Name-only matches are remembered as fallbacks; the first
//! of them is used when no skeleton joint matches.

use inplace_scene::Node;

use crate::error::InPlaceError;

/// The node selected as the root of the skeleton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootBone {
    pub name: String,
    /// Attribute type name ("None" if the node has no attribute).
    pub type_name: String,
    /// Depth below the scene root.
    pub depth: usize,
    /// True when the node's attribute confirmed it as a skeleton joint;
    /// false for a name-only fallback.
    pub verified: bool,
}

impl RootBone {
    fn from_node(node: &Node, depth: usize, verified: bool) -> Self {
        Self {
            name: node.name.clone(),
            type_name: node.attribute_type_name().to_string(),
            depth,
            verified,
        }
    }
}

/// One line of the hierarchy dump: two spaces per depth level, then
/// `name [Type]`.
pub fn dump_line(node: &Node, depth: usize) -> String {
    format!(
        "{}{} [{}]",
        "  ".repeat(depth),
        node.name,
        node.attribute_type_name()
    )
}

/// Find the root bone under `root`.
pub fn locate_root_bone(root: &Node, candidates: &[String]) -> Result<RootBone, InPlaceError> {
    locate_root_bone_with(root, candidates, |_, _| {})
}

/// Like [`locate_root_bone`], calling `on_visit` for every node the search
/// visits, in visiting order. The callback cannot influence the result.
pub fn locate_root_bone_with(
    root: &Node,
    candidates: &[String],
    mut on_visit: impl FnMut(&Node, usize),
) -> Result<RootBone, InPlaceError> {
    let fragments: Vec<String> = candidates
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();

    let mut strong: Option<RootBone> = None;
    let mut weak: Option<RootBone> = None;

    root.walk(&mut |node, depth| {
        on_visit(node, depth);
        let name = node.name.to_lowercase();
        if !fragments.iter().any(|f| name.contains(f.as_str())) {
            return true;
        }
        if node.is_skeleton_joint() {
            strong = Some(RootBone::from_node(node, depth, true));
            return false;
        }
        if weak.is_none() {
            weak = Some(RootBone::from_node(node, depth, false));
        }
        true
    });

    match (strong, weak) {
        (Some(bone), _) => {
            log::info!("root bone: {} (depth {})", bone.name, bone.depth);
            Ok(bone)
        }
        (None, Some(bone)) => {
            log::warn!(
                "no skeleton joint matched; falling back to name match '{}' [{}]",
                bone.name,
                bone.type_name
            );
            Ok(bone)
        }
        (None, None) => Err(InPlaceError::RootBoneNotFound {
            candidates: candidates.to_vec(),
        }),
    }
}
