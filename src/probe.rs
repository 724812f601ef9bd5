use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Existence check against the deployed static-asset tree.
///
/// Implementations must not fail: a malformed or unreachable path reports
/// `false`. Calls may block, so never hold a lock across one.
pub trait ResourceProbe {
    fn exists(&self, path: &str) -> bool;
}

impl<F> ResourceProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// Probe backed by a directory on disk.
///
/// Resource paths are web-style (`/js/app.js`) and resolved below `root`.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut out = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                // `..`, drive prefixes and absolute roots would escape `root`
                _ => return None,
            }
        }
        Some(out)
    }
}

impl ResourceProbe for FsProbe {
    fn exists(&self, path: &str) -> bool {
        if path.is_empty() || path.contains('\0') {
            return false;
        }
        match self.resolve(path) {
            Some(full) => full.is_file(),
            None => {
                tracing::debug!(path, "rejected resource path outside asset root");
                false
            }
        }
    }
}

/// Probe over a fixed set of paths, as produced by an asset manifest.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    paths: HashSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResourceProbe for StaticProbe {
    fn exists(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}
