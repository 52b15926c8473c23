use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Recursive discovery of benchmark result files
///
/// Every regular file below the root whose name matches the configured glob
/// is a candidate. Hidden files are included and no ignore files are
/// consulted, so the walk sees exactly what a plain `find -type f -name`
/// would. Entries are yielded sorted by file name within each directory.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    matcher: GlobMatcher,
    follow_symlinks: bool,
}

impl DirectoryWalker {
    pub fn new(file_glob: &str, follow_symlinks: bool) -> Result<Self> {
        let matcher = Glob::new(file_glob)
            .with_context(|| format!("Invalid file glob '{}'", file_glob))?
            .compile_matcher();
        Ok(Self {
            matcher,
            follow_symlinks,
        })
    }

    /// Whether the file name of `path` matches the glob
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }

    /// Lazily walk `root`, yielding candidate files
    pub fn candidates<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(move |path| self.is_candidate(path))
    }
}
