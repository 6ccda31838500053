use std::path::{Path, PathBuf};

use compact_str::CompactString;
use walkdir::WalkDir;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPackage {
    pub name: CompactString,
    pub path: PathBuf,
}

/// Lists the immediate subdirectories of `root`, sorted by name.
///
/// Plain files and symlinks are skipped; links are not followed.
pub fn discover(root: &Path) -> Result<Vec<ChildPackage>> {
    let mut children = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;

        if !entry.file_type().is_dir() {
            continue
        }

        children.push(ChildPackage {
            name: entry.file_name().to_string_lossy().into(),
            path: entry.into_path(),
        });
    }

    Ok(children)
}
