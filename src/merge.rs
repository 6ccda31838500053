use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

use crate::manifest::{Dependencies, DependencyEntry};

/// A package declared by both the parent and a child with different version specifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("version mismatch for package {package} in child {child}: parent has {parent_version}, child has {child_version}")]
pub struct Conflict {
    pub package: CompactString,
    pub child: CompactString,
    pub parent_version: CompactString,
    pub child_version: CompactString,
}

/// The parent's dependency map while children are folded into it, along with what was added so far.
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    pub dependencies: Dependencies,
    pub new_entries: Vec<DependencyEntry>,
}

impl MergeResult {
    pub fn new(parent: Dependencies) -> Self {
        Self { dependencies: parent, new_entries: Vec::new() }
    }

    pub fn has_changes(&self) -> bool {
        !self.new_entries.is_empty()
    }

    /// Folds one child's dependencies in, in the child's key order.
    ///
    /// Unknown names are appended. Equal specifiers are a no-op. A differing specifier
    /// stops the merge; existing versions are never replaced.
    pub fn merge_child(mut self, child: &str, deps: &Dependencies) -> Result<Self, Conflict> {
        for (name, child_version) in deps.iter() {
            match self.dependencies.get(name) {
                None => {
                    self.dependencies.append(name, child_version);
                    self.new_entries.push(DependencyEntry {
                        name: name.to_compact_string(),
                        version: child_version.to_compact_string(),
                    });
                },
                Some(parent_version) if parent_version != child_version => {
                    return Err(Conflict {
                        package: name.to_compact_string(),
                        child: child.to_compact_string(),
                        parent_version: parent_version.to_compact_string(),
                        child_version: child_version.to_compact_string(),
                    })
                },
                Some(_) => (),
            }
        }

        Ok(self)
    }
}
