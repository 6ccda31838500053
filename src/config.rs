use std::path::PathBuf;

use crate::{CliOpts, error::ConfigError, manifest::ManifestType};

/// Everything a merge run needs, checked up front so nothing is touched when the invocation is wrong.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub parent_dir: PathBuf,
    pub child_root: PathBuf,
    pub manifest_type: ManifestType,
    pub verbose: bool,
}

impl MergeConfig {
    pub fn parent_manifest(&self) -> PathBuf {
        self.manifest_type.path_in(&self.parent_dir)
    }
}

impl TryFrom<&CliOpts> for MergeConfig {
    type Error = ConfigError;

    fn try_from(opts: &CliOpts) -> Result<Self, Self::Error> {
        let child_root = opts.child.as_ref().ok_or(ConfigError::MissingChild)?;
        let parent_dir = opts.parent.as_ref().ok_or(ConfigError::MissingParent)?;
        let manifest_type: ManifestType = opts.manifest_type.as_deref()
            .ok_or(ConfigError::MissingType)?
            .parse()?;

        let config = Self {
            parent_dir: PathBuf::from(parent_dir),
            child_root: PathBuf::from(child_root),
            manifest_type,
            verbose: opts.verbose,
        };

        let parent_manifest = config.parent_manifest();
        if !parent_manifest.is_file() {
            return Err(ConfigError::MissingParentManifest { path: parent_manifest })
        }

        if !config.child_root.is_dir() {
            return Err(ConfigError::MissingChildRoot { path: config.child_root })
        }

        Ok(config)
    }
}
