//! Test utilities for setting up skill package directories.
//!
//! This module provides a `SkillFixture` builder for creating an isolated
//! package directory with a `SKILL.md` and optional resource directories.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::skill::SKILL_FILE_NAME;

/// Skill file contents with a name, description and body.
pub fn skill_content(name: &str, description: &str, body: &str) -> String {
    format!(
        "---\nname: {}\ndescription: {}\n---\n{}",
        name, description, body
    )
}

/// Skill file contents with custom frontmatter lines and a body.
pub fn skill_with_frontmatter(frontmatter: &str, body: &str) -> String {
    format!("---\n{}\n---\n{}", frontmatter, body)
}

/// Test fixture for a single skill package directory.
pub struct SkillFixture {
    /// Root temp directory (holds everything).
    _root: TempDir,
    /// Package directory inside the temp root.
    skill_dir: PathBuf,
}

impl SkillFixture {
    /// Create a fixture with an empty package directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let skill_dir = root.path().join("test-skill");
        fs::create_dir_all(&skill_dir).expect("create skill dir");
        Self {
            _root: root,
            skill_dir,
        }
    }

    /// Write the skill file with the given contents.
    pub fn with_skill_md(self, contents: &str) -> Self {
        fs::write(self.skill_dir.join(SKILL_FILE_NAME), contents).expect("write skill");
        self
    }

    /// Create a subdirectory under the package root.
    pub fn with_dir(self, name: &str) -> Self {
        fs::create_dir_all(self.skill_dir.join(name)).expect("create resource dir");
        self
    }

    /// Create a plain file under the package root.
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        fs::write(self.skill_dir.join(name), contents).expect("write file");
        self
    }

    /// Get the package directory path.
    pub fn path(&self) -> &Path {
        &self.skill_dir
    }

    /// Read back the skill file contents.
    pub fn contents(&self) -> String {
        fs::read_to_string(self.skill_dir.join(SKILL_FILE_NAME)).expect("read skill")
    }
}

impl Default for SkillFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_empty_package() {
        let fixture = SkillFixture::new();
        assert!(fixture.path().is_dir());
        assert!(!fixture.path().join(SKILL_FILE_NAME).exists());
    }

    #[test]
    fn writes_skill_and_dirs() {
        let fixture = SkillFixture::new()
            .with_skill_md(&skill_content("my-skill", "Does a thing", "Body"))
            .with_dir("scripts");

        assert!(fixture.contents().contains("name: my-skill"));
        assert!(fixture.path().join("scripts").is_dir());
    }
}
