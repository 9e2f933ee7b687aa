//! Figure Library
//!
//! Figures come from two places: the bonefiles compiled into the binary and
//! any directories listed in `BONEPATH`. Directories are searched first so a
//! user file can shadow a built-in figure of the same name.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{BoneError, Result};

/// Environment variable holding extra figure directories
pub const BONEPATH_ENV: &str = "BONEPATH";

/// File suffix of a bonefile
pub const BONE_SUFFIX: &str = ".bone";

/// Name reported for the built-in figures
pub const EMBEDDED_PATH_NAME: &str = "bones";

/// Built-in figures, sorted by name
const EMBEDDED: &[(&str, &str)] = &[
    ("cat", include_str!("../assets/bones/cat.bone")),
    ("default", include_str!("../assets/bones/default.bone")),
    ("dog", include_str!("../assets/bones/dog.bone")),
    ("penguin", include_str!("../assets/bones/penguin.bone")),
    ("small", include_str!("../assets/bones/small.bone")),
];

/// Where a figure path lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Compiled into the binary
    Embedded,
    /// A directory on disk
    Directory,
}

/// One entry of the search path and the figures it provides
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigurePath {
    /// Directory as given in `BONEPATH`, or `bones` for built-ins
    pub name: String,
    /// Figure names with the `.bone` suffix trimmed, sorted
    pub figures: Vec<String>,
    pub location: Location,
}

impl FigurePath {
    /// The built-in figures
    pub fn embedded() -> Self {
        Self {
            name: EMBEDDED_PATH_NAME.to_string(),
            figures: EMBEDDED.iter().map(|(name, _)| name.to_string()).collect(),
            location: Location::Embedded,
        }
    }

    /// List the bonefiles in a directory
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| BoneError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut figures = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| BoneError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(BONE_SUFFIX)) {
                figures.push(name.to_string());
            }
        }
        figures.sort();

        debug!(dir = ?dir, count = figures.len(), "Scanned figure directory");
        Ok(Self {
            name: dir.display().to_string(),
            figures,
            location: Location::Directory,
        })
    }

    /// Look for `target` in this path
    pub fn lookup(&self, target: &str) -> Option<FigureFile> {
        self.figures
            .iter()
            .find(|name| name.as_str() == target)
            .map(|name| self.file(name))
    }

    fn file(&self, name: &str) -> FigureFile {
        FigureFile {
            name: name.to_string(),
            base_path: PathBuf::from(&self.name),
            location: self.location,
        }
    }
}

/// A resolved bonefile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigureFile {
    /// Figure name without suffix
    pub name: String,
    /// Path that provided the figure
    pub base_path: PathBuf,
    pub location: Location,
}

impl FigureFile {
    /// Read the template text, from the binary or from disk
    pub fn read(&self) -> Result<String> {
        match self.location {
            Location::Embedded => EMBEDDED
                .iter()
                .find(|(name, _)| *name == self.name)
                .map(|(_, src)| src.to_string())
                .ok_or_else(|| BoneError::NotFound {
                    name: self.name.clone(),
                }),
            Location::Directory => {
                let path = self.base_path.join(format!("{}{BONE_SUFFIX}", self.name));
                fs::read_to_string(&path).map_err(|source| BoneError::Io { path, source })
            }
        }
    }
}

/// All figure paths, in lookup order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigureLibrary {
    paths: Vec<FigurePath>,
}

impl FigureLibrary {
    /// Only the built-in figures
    pub fn embedded() -> Self {
        Self {
            paths: vec![FigurePath::embedded()],
        }
    }

    /// Scan a search path (platform path-list syntax), then add built-ins
    pub fn discover(search_path: Option<&OsStr>) -> Result<Self> {
        let mut paths = Vec::new();
        if let Some(search_path) = search_path.filter(|s| !s.is_empty()) {
            for dir in std::env::split_paths(search_path) {
                paths.push(FigurePath::scan(&dir)?);
            }
        }
        paths.push(FigurePath::embedded());
        Ok(Self { paths })
    }

    /// Discover using the `BONEPATH` environment variable
    pub fn from_env() -> Result<Self> {
        let search_path = std::env::var_os(BONEPATH_ENV);
        Self::discover(search_path.as_deref())
    }

    pub fn paths(&self) -> &[FigurePath] {
        &self.paths
    }

    /// All figure names across every path, in lookup order
    pub fn names(&self) -> Vec<&str> {
        self.paths
            .iter()
            .flat_map(|path| path.figures.iter().map(String::as_str))
            .collect()
    }

    /// Find a figure by name
    pub fn lookup(&self, target: &str) -> Option<FigureFile> {
        self.paths.iter().find_map(|path| path.lookup(target))
    }

    /// Pick a random path, then a random figure within it
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FigureFile> {
        let candidates: Vec<&FigurePath> =
            self.paths.iter().filter(|p| !p.figures.is_empty()).collect();
        let path = candidates.choose(rng).ok_or(BoneError::NoFigures)?;
        let name = path.figures.choose(rng).ok_or(BoneError::NoFigures)?;
        Ok(path.file(name))
    }
}

impl Default for FigureLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_embedded_names_are_sorted() {
        let path = FigurePath::embedded();
        let mut sorted = path.figures.clone();
        sorted.sort();
        assert_eq!(path.figures, sorted);
        assert!(path.figures.contains(&"default".to_string()));
    }

    #[test]
    fn test_lookup_found() {
        let path = FigurePath {
            name: "basepath".to_string(),
            figures: vec!["test".to_string()],
            location: Location::Embedded,
        };
        let got = path.lookup("test");
        assert_eq!(
            got,
            Some(FigureFile {
                name: "test".to_string(),
                base_path: PathBuf::from("basepath"),
                location: Location::Embedded,
            })
        );
    }

    #[test]
    fn test_lookup_missing() {
        let path = FigurePath::embedded();
        assert_eq!(path.lookup("no bonefile"), None);
    }

    #[test]
    fn test_read_embedded() {
        let file = FigureLibrary::embedded().lookup("default").unwrap();
        let src = file.read().unwrap();
        assert!(src.contains("$the_bone = <<EOB"));
    }

    #[test]
    fn test_discover_empty_search_path() {
        let library = FigureLibrary::discover(Some(OsStr::new(""))).unwrap();
        assert_eq!(library.paths().len(), 1);
        assert_eq!(library.paths()[0].location, Location::Embedded);
    }

    #[test]
    fn test_discover_missing_directory_fails() {
        let err = FigureLibrary::discover(Some(OsStr::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, BoneError::Io { .. }));
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let library = FigureLibrary::embedded();
        let a = library.pick(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = library.pick(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(library.lookup(&a.name).is_some());
    }

    #[test]
    fn test_pick_with_no_figures() {
        let library = FigureLibrary { paths: Vec::new() };
        let err = library.pick(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, BoneError::NoFigures));
    }
}
