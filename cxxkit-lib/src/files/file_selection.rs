use camino::Utf8PathBuf;
use std::collections::BTreeSet;
use walkdir::{DirEntry, WalkDir};

const LOG_TARGET: &str = "     files";

/// Describes which files under a root qualify for per-file processing.
#[derive(Debug, Clone)]
pub struct FileSelection {
    root: Utf8PathBuf,
    exclude_dirs: BTreeSet<String>,
    include_extensions: Vec<String>,
}

impl FileSelection {
    #[must_use]
    pub fn new<D, E>(root: impl Into<Utf8PathBuf>, exclude_dirs: D, include_extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            root: root.into(),
            exclude_dirs: exclude_dirs.into_iter().map(Into::into).collect(),
            include_extensions: include_extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Walk the tree below the root and collect every qualifying file.
    ///
    /// Excluded directories are never entered, so nothing beneath them is returned no matter
    /// how deep they sit. The root itself is always walked, even if its own name is excluded.
    /// Symlinked directories are not followed. Every returned path referred to a regular file
    /// at the time of the walk, and the result is sorted.
    ///
    /// Unreadable directories and paths that are not valid UTF-8 are skipped with a log entry.
    #[must_use]
    pub fn enumerate(&self) -> Vec<Utf8PathBuf> {
        let mut files: Vec<Utf8PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!(target: LOG_TARGET, "Could not walk directory: {err:#}");
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .filter(|entry| self.has_included_extension(entry))
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => Some(path),
                Err(path) => {
                    log::warn!(target: LOG_TARGET, "Skipping path that is not valid UTF-8: '{}'", path.display());
                    None
                }
            })
            .collect();

        files.sort();

        log::debug!(target: LOG_TARGET, "Found {} matching files under '{}'", files.len(), self.root);
        files
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry.file_name().to_str().is_some_and(|name| self.exclude_dirs.contains(name))
    }

    fn has_included_extension(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.include_extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("temp dir should be UTF-8");
        (temp_dir, root)
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "int main() {}\n").unwrap();
    }

    fn relative(root: &Utf8Path, files: &[Utf8PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().as_str().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_excludes_build_and_filters_extensions() {
        let (_guard, root) = temp_root();
        touch(&root, "a.cpp");
        touch(&root, "build/b.cpp");
        touch(&root, "sub/c.hpp");
        touch(&root, "sub/d.txt");

        let selection = FileSelection::new(root.clone(), ["build"], [".cpp", ".hpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["a.cpp", "sub/c.hpp"]);
    }

    #[test]
    fn test_excluded_name_is_pruned_at_any_depth() {
        let (_guard, root) = temp_root();
        touch(&root, "src/engine/build/generated.cpp");
        touch(&root, "src/engine/external/lib/vendor.cpp");
        touch(&root, "src/engine/renderer.cpp");
        touch(&root, ".git/hooks/sample.cpp");

        let selection = FileSelection::new(root.clone(), ["build", "external", ".git"], [".cpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["src/engine/renderer.cpp"]);
    }

    #[test]
    fn test_exclusion_matches_whole_names_only() {
        let (_guard, root) = temp_root();
        touch(&root, "builder/tool.cpp");
        touch(&root, "prebuild/step.cpp");

        let selection = FileSelection::new(root.clone(), ["build"], [".cpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["builder/tool.cpp", "prebuild/step.cpp"]);
    }

    #[test]
    fn test_root_is_walked_even_if_its_name_is_excluded() {
        let (_guard, temp) = temp_root();
        let root = temp.join("build");
        touch(&root, "main.cpp");

        let selection = FileSelection::new(root.clone(), ["build"], [".cpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["main.cpp"]);
    }

    #[test]
    fn test_excluded_files_are_not_directories() {
        let (_guard, root) = temp_root();
        // A file that happens to share a name with an excluded directory is still a candidate
        touch(&root, "build.cpp");

        let selection = FileSelection::new(root.clone(), ["build.cpp"], [".cpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["build.cpp"]);
    }

    #[test]
    fn test_every_result_exists_and_has_included_extension() {
        let (_guard, root) = temp_root();
        for name in ["a.c", "b.cc", "c.cxx", "d.h", "e.hpp", "f.py", "g.cpp.bak", "nested/deep/h.cpp", "nested/i.md"] {
            touch(&root, name);
        }

        let extensions = [".cpp", ".c", ".h", ".hpp", ".cc", ".cxx"];
        let selection = FileSelection::new(root.clone(), ["build"], extensions);
        let files = selection.enumerate();

        assert_eq!(files.len(), 6);
        for file in &files {
            assert!(file.is_file(), "{file} should exist");
            assert!(extensions.iter().any(|ext| file.as_str().ends_with(ext)), "{file} has an unexpected extension");
        }
    }

    #[test]
    fn test_results_are_sorted_and_unique() {
        let (_guard, root) = temp_root();
        for name in ["z.cpp", "a.cpp", "m/b.cpp", "m/a.cpp"] {
            touch(&root, name);
        }

        let selection = FileSelection::new(root, Vec::<String>::new(), [".cpp"]);
        let files = selection.enumerate();

        let mut expected = files.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(files, expected);
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let (_guard, root) = temp_root();
        let selection = FileSelection::new(root.join("does-not-exist"), ["build"], [".cpp"]);

        assert!(selection.enumerate().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let (_guard, root) = temp_root();
        touch(&root, "real/inside.cpp");
        std::os::unix::fs::symlink(root.join("real"), root.join("alias")).unwrap();

        let selection = FileSelection::new(root.clone(), Vec::<String>::new(), [".cpp"]);
        let files = selection.enumerate();

        assert_eq!(relative(&root, &files), vec!["real/inside.cpp"]);
    }
}
