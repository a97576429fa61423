//! The scene document: node hierarchy plus animation data.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationStack;
use crate::error::DocumentError;
use crate::node::Node;
use crate::time::TimeMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time_mode: TimeMode,
    pub root: Node,
    #[serde(default)]
    pub animation_stacks: Vec<AnimationStack>,
    /// Index into `animation_stacks` of the stack marked current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_stack: Option<usize>,
}

impl Scene {
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            time_mode: TimeMode::default(),
            root,
            animation_stacks: Vec::new(),
            current_stack: None,
        }
    }

    pub fn with_time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }

    pub fn with_stack(mut self, stack: AnimationStack) -> Self {
        self.animation_stacks.push(stack);
        self
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[inline]
    pub fn stack_count(&self) -> usize {
        self.animation_stacks.len()
    }

    pub fn current_stack(&self) -> Option<&AnimationStack> {
        self.current_stack
            .and_then(|idx| self.animation_stacks.get(idx))
    }

    #[inline]
    pub fn current_stack_index(&self) -> Option<usize> {
        self.current_stack
    }

    /// Mark stack `index` as current. Returns false if out of bounds.
    pub fn set_current_stack(&mut self, index: usize) -> bool {
        if index < self.animation_stacks.len() {
            self.current_stack = Some(index);
            true
        } else {
            false
        }
    }

    /// Check every invariant a loaded document must satisfy.
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.time_mode.validate()?;
        if let Some(idx) = self.current_stack {
            if idx >= self.animation_stacks.len() {
                return Err(DocumentError::invalid(format!(
                    "current_stack {idx} out of range ({} stacks)",
                    self.animation_stacks.len()
                )));
            }
        }
        for stack in &self.animation_stacks {
            stack.validate()?;
        }
        Ok(())
    }
}
