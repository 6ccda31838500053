use std::{fmt::Display, path::PathBuf};

use crate::{children::discover, config::MergeConfig, error::ErrorKind, log, manifest::{DependencyEntry, Manifest}, merge::MergeResult, warn};

#[derive(Debug)]
pub struct ReconcileOutcome {
    pub manifest_path: PathBuf,
    pub children: usize,
    pub skipped: usize,
    pub new_entries: Vec<DependencyEntry>,
    pub saved: bool,
}

impl Display for ReconcileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} children merged, {} skipped, {} new packages, {}",
            self.children - self.skipped, self.skipped, self.new_entries.len(),
            if self.saved { "parent saved" } else { "parent unchanged" }
        ))
    }
}

/// Folds the dependencies of every child package into the parent manifest.
///
/// The parent is written once at the end, and only when something was added. Any conflict or unreadable
/// child manifest aborts before the write, leaving the parent as it was.
pub fn reconcile(config: &MergeConfig) -> Result<ReconcileOutcome, ErrorKind> {
    let mut parent = Manifest::load(&config.parent_manifest())?;
    let children = discover(&config.child_root)?;

    let mut result = MergeResult::new(parent.dependencies()?);
    let mut skipped = 0;

    for child in &children {
        if config.verbose {
            log(format!("Processing child: {}", child.name));
        }

        let manifest_path = config.manifest_type.path_in(&child.path);

        let present = manifest_path.try_exists().map_err(|e| ErrorKind::io(&manifest_path, e))?;

        if !present {
            warn(format!("Skipping child {}: no {} found", child.name, config.manifest_type.file_name()));
            skipped += 1;
            continue
        }

        let deps = Manifest::load(&manifest_path)?.into_dependencies()?;

        if config.verbose {
            log(format!("{} declares {} dependencies", child.name, deps.len()));
        }

        let before = result.new_entries.len();
        result = result.merge_child(&child.name, &deps)?;

        for entry in &result.new_entries[before..] {
            log(format!("New package: {entry}"));
        }
    }

    let saved = result.has_changes();

    if saved {
        log(format!("Saving {}", parent.path().display()));

        parent.set_dependencies(result.dependencies);
        parent.save()?;
    } else {
        log(format!("Found no changes to save in {}", parent.path().display()));
    }

    Ok(ReconcileOutcome {
        manifest_path: parent.path().to_path_buf(),
        children: children.len(),
        skipped,
        new_entries: result.new_entries,
        saved,
    })
}
