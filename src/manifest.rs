use std::{fmt::Display, fs, path::{Path, PathBuf}, str::FromStr};

use compact_str::CompactString;
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::error::{ConfigError, ErrorKind, Result};

const DEPENDENCIES: &str = "dependencies";
const NOT_A_STRING_MAP: &str = "`dependencies` must map package names to version strings";

/// The family of package manifest being merged, which decides the file name looked up in every package directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestType {
    Bower,
    Npm,
}

impl ManifestType {
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestType::Bower => "bower.json",
            ManifestType::Npm => "package.json",
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl FromStr for ManifestType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bower" => Ok(ManifestType::Bower),
            "npm" => Ok(ManifestType::Npm),
            _ => Err(ConfigError::InvalidType { value: s.to_string() }),
        }
    }
}

impl Display for ManifestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestType::Bower => f.write_str("bower"),
            ManifestType::Npm => f.write_str("npm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: CompactString,
    pub version: CompactString,
}

impl Display for DependencyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} -> {}", self.name, self.version))
    }
}

/// A `dependencies` map. Keys keep their document order and every value is a string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependencies {
    inner: Map<String, Value>,
}

impl Dependencies {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).and_then(Value::as_str)
    }

    /// Appends `name` at the end. Returns false and leaves the map untouched if the name already exists.
    pub fn append(&mut self, name: &str, version: &str) -> bool {
        if self.inner.contains_key(name) {
            return false
        }

        self.inner.insert(name.to_string(), Value::String(version.to_string()));

        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter()
            .filter_map(|(name, version)| version.as_str().map(|v| (name.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Dependencies {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut deps = Dependencies::default();

        for (name, version) in iter {
            deps.append(name, version);
        }

        deps
    }
}

/// A manifest document as read from disk. Only `dependencies` is interpreted; every other key is kept as-is.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).map_err(|e| ErrorKind::io(path, e))?;

        Self::parse(path, &raw)
    }

    pub fn parse(path: &Path, raw: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(raw)
            .map_err(|source| ErrorKind::Json { path: path.to_path_buf(), source })?;

        let Value::Object(document) = document else {
            return Err(ErrorKind::Malformed { path: path.to_path_buf(), reason: "top level is not an object" })
        };

        let manifest = Self { path: path.to_path_buf(), document };

        // fail early so a broken child aborts before anything is merged
        manifest.checked_dependencies()?;

        Ok(manifest)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dependencies(&self) -> Result<Dependencies> {
        let inner = self.checked_dependencies()?;

        Ok(Dependencies { inner: inner.clone() })
    }

    /// Takes the `dependencies` map out of a manifest that is not written back.
    pub fn into_dependencies(mut self) -> Result<Dependencies> {
        self.checked_dependencies()?;

        match self.document.remove(DEPENDENCIES) {
            Some(Value::Object(inner)) => Ok(Dependencies { inner }),
            _ => Err(self.malformed(NOT_A_STRING_MAP)),
        }
    }

    fn checked_dependencies(&self) -> Result<&Map<String, Value>> {
        let Some(value) = self.document.get(DEPENDENCIES) else {
            return Err(self.malformed("missing `dependencies` field"))
        };

        match value {
            Value::Object(inner) if inner.values().all(Value::is_string) => Ok(inner),
            _ => Err(self.malformed(NOT_A_STRING_MAP)),
        }
    }

    /// Replaces the `dependencies` value. The key keeps its position in the document.
    pub fn set_dependencies(&mut self, deps: Dependencies) {
        self.document.insert(DEPENDENCIES.to_string(), Value::Object(deps.inner));
    }

    pub fn to_pretty(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));

        self.document.serialize(&mut ser)?;

        Ok(buf)
    }

    pub fn save(&self) -> Result<()> {
        let buf = self.to_pretty()?;

        fs::write(&self.path, buf).map_err(|e| ErrorKind::io(&self.path, e))
    }

    fn malformed(&self, reason: &'static str) -> ErrorKind {
        ErrorKind::Malformed { path: self.path.clone(), reason }
    }
}
