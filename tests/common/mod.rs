//! Common test utilities for resbundle integration tests

use std::io::{Cursor, Write};
use std::path::PathBuf;

use resbundle::Resource;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// The sample tree used across bundle tests
#[allow(dead_code)]
pub const SAMPLE: &[(&str, &[u8])] = &[
    ("foo.txt", b"foo is foo"),
    ("subfolder/bar.txt", b"bar is not foo"),
    ("logo.ico", &[0, 0, 1, 0, 1, 0, 16, 16]),
];

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Create a directory in workspace
    pub fn create_dir(&self, path: &str) -> PathBuf {
        let dir = self.path.join(path);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Write a directory tree below `dir`
    pub fn write_tree(&self, dir: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let root = self.create_dir(dir);
        for (name, content) in files {
            self.write_file(&format!("{dir}/{name}"), content);
        }
        root
    }

    /// Write a zip archive holding `files`
    pub fn write_zip(&self, path: &str, files: &[(&str, &[u8])]) -> PathBuf {
        self.write_file(path, zip_bytes(files))
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an in-memory zip archive.
///
/// Parent directories get their own directory entries, as archivers
/// usually write them.
#[allow(dead_code)]
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let options = SimpleFileOptions::default();
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let mut dirs: Vec<String> = Vec::new();

    for (name, content) in files {
        if let Some((parent, _)) = name.rsplit_once('/') {
            let dir = format!("{parent}/");
            if !dirs.contains(&dir) {
                writer.add_directory(dir.as_str(), options).expect("Failed to add directory");
                dirs.push(dir);
            }
        }
        writer.start_file(*name, options).expect("Failed to start entry");
        writer.write_all(content).expect("Failed to write entry");
    }

    writer.finish().expect("Failed to finish archive").into_inner()
}

/// Sorted paths of a resource list
#[allow(dead_code)]
pub fn sorted_paths(resources: &[resbundle::ResourceRef]) -> Vec<String> {
    let mut paths: Vec<String> = resources.iter().map(|r| r.path().to_string()).collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_tree() {
        let workspace = TestWorkspace::new();
        workspace.write_tree("assets", SAMPLE);
        assert!(workspace.file_exists("assets/subfolder/bar.txt"));
    }
}
