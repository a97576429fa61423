//! Load -> locate -> rewrite -> save.

use std::path::Path;

use inplace_scene::{DocumentAdapter, JsonDocument, Scene};

use crate::config::Config;
use crate::error::InPlaceError;
use crate::locate::{dump_line, locate_root_bone_with, RootBone};
use crate::policy::{resolve_policy, resolve_policy_strict, AxisRemovalPolicy, Mode};
use crate::rewrite::{rewrite, RewriteReport};

/// Per-invocation options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: String,
    /// Emit the hierarchy dump while searching for the root bone.
    pub debug: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default().to_string(),
            debug: false,
        }
    }
}

/// What a successful run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub root_bone: RootBone,
    pub report: RewriteReport,
}

/// Runs the in-place edit against documents handled by `A`.
#[derive(Debug, Clone)]
pub struct InPlace<A> {
    adapter: A,
    config: Config,
}

impl InPlace<JsonDocument> {
    /// JSON documents on disk, pretty-printed if the config asks for it.
    pub fn json(config: Config) -> Self {
        let adapter = JsonDocument {
            pretty: config.pretty_output,
        };
        Self::new(adapter, config)
    }
}

impl<A: DocumentAdapter> InPlace<A> {
    pub fn new(adapter: A, config: Config) -> Self {
        Self { adapter, config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn resolve_policy(&self, mode: &str) -> Result<AxisRemovalPolicy, InPlaceError> {
        if self.config.strict_mode {
            resolve_policy_strict(mode)
        } else {
            Ok(resolve_policy(mode))
        }
    }

    /// Edit an already loaded scene. `dump` receives hierarchy lines when
    /// `options.debug` is set.
    pub fn apply(
        &self,
        scene: &mut Scene,
        options: &RunOptions,
        mut dump: impl FnMut(&str),
    ) -> Result<RunOutcome, InPlaceError> {
        let policy = self.resolve_policy(&options.mode)?;
        let root_bone = locate_root_bone_with(
            scene.root(),
            &self.config.root_bone_candidates,
            |node, depth| {
                if options.debug {
                    dump(&dump_line(node, depth));
                }
            },
        )?;
        let report = rewrite(scene, &root_bone, &policy)?;
        Ok(RunOutcome { root_bone, report })
    }

    /// Full run from `input` to `output`. Nothing is written unless every
    /// step before the save succeeded.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        options: &RunOptions,
        dump: impl FnMut(&str),
    ) -> Result<RunOutcome, InPlaceError> {
        log::info!("loading {}", input.display());
        let mut scene = self
            .adapter
            .load(input)
            .map_err(|source| InPlaceError::Load {
                path: input.to_path_buf(),
                source,
            })?;

        let outcome = self.apply(&mut scene, options, dump)?;

        log::info!("saving {}", output.display());
        self.adapter
            .save(&scene, output)
            .map_err(|source| InPlaceError::Save {
                path: output.to_path_buf(),
                source,
            })?;
        Ok(outcome)
    }
}
