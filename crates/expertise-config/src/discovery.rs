//! Locating `.expertise.toml` files.
//!
//! Project files are collected walking up from the working directory; the global
//! `~/.expertise.toml` comes last unless a project file declares `root = true`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".expertise.toml";

/// Returns every configuration file that applies to `cwd`, closest first.
///
/// The walk stops after a file with `root = true`; in that case the global file is skipped.
/// Directories named like the config file are ignored.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let is_root = is_root_config(&candidate);
        configs.push(candidate);
        if is_root {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Path of the global configuration file, or `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Writes a config file into `rel` under `root` and returns its path.
    fn write_config(root: &TempDir, rel: &str, body: &str) -> PathBuf {
        let dir = root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, body).unwrap();
        path
    }

    /// Creates a directory under `root`.
    fn mkdir(root: &TempDir, rel: &str) -> PathBuf {
        let dir = root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Discovered files with the global config filtered out.
    fn local(cwd: &Path) -> Vec<PathBuf> {
        discover_config_files(cwd)
            .into_iter()
            .filter(|path| !is_global_config(path))
            .collect()
    }

    #[test]
    fn nothing_found() {
        let root = tempfile::tempdir().unwrap();
        assert!(local(&mkdir(&root, "a/b")).is_empty());
    }

    #[test]
    fn closest_file_comes_first() {
        let root = tempfile::tempdir().unwrap();
        let outer = write_config(&root, "", "");
        let inner = write_config(&root, "team/project", "");
        let cwd = mkdir(&root, "team/project/src");

        assert_eq!(local(&cwd), vec![inner, outer]);
    }

    #[test]
    fn root_file_stops_the_walk() {
        let root = tempfile::tempdir().unwrap();
        write_config(&root, "", "");
        let project = write_config(&root, "project", "root = true\n");
        let child = write_config(&root, "project/sub", "");
        let cwd = mkdir(&root, "project/sub/deep");

        assert_eq!(discover_config_files(&cwd), vec![child, project]);
    }

    #[test]
    fn root_false_keeps_walking() {
        let root = tempfile::tempdir().unwrap();
        let outer = write_config(&root, "", "");
        let project = write_config(&root, "project", "root = false\n");

        assert_eq!(local(&root.path().join("project")), vec![project, outer]);
    }

    #[test]
    fn directory_with_config_name_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join(CONFIG_FILENAME)).unwrap();
        assert!(local(&mkdir(&root, "sub")).is_empty());
    }

    #[test]
    fn global_path_uses_config_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.expertise.toml")));
    }
}
