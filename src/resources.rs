//! Detection of resource directory references in a skill body.
//!
//! The body is reduced to prose in stages before scanning: fenced code is
//! removed, then link targets, then link labels. Each stage is a pure
//! function so it can be tested on its own. The scan then looks for
//! `<dir>/<path>` tokens that start a word, skipping ones cited as belonging
//! to another skill (`` `other-skill` references/guide.md ``).

use std::{borrow::Cow, collections::BTreeSet, path::Path, sync::LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::{frontmatter::split_body, rules::Rules};

/// Triple-backtick fenced regions, across lines, shortest match.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code fence pattern is valid"));

/// Markdown link targets: `](...)`.
static LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\([^)]*\)").expect("link target pattern is valid"));

/// Markdown link labels: `[...]`.
static LINK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("link label pattern is valid"));

/// A backtick-quoted skill name at the end of the text preceding a reference.
static CROSS_SKILL_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`[a-z0-9:-]+`\s*$").expect("citation pattern is valid")
});

/// Resource directories referenced by a skill body but absent on disk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "SKILL.md references missing resource {}: {}. Create {} or remove the references.",
    directory_noun(.dirs),
    .dirs.join(", "),
    directory_pronoun(.dirs)
)]
pub struct MissingResources {
    /// Missing directory names, sorted.
    dirs: Vec<String>,
}

impl MissingResources {
    /// Names of the missing directories in alphabetical order.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }
}

/// "directory" or "directories" for a list of names.
fn directory_noun(dirs: &[String]) -> &'static str {
    if dirs.len() > 1 { "directories" } else { "directory" }
}

/// "it" or "them" for a list of names.
fn directory_pronoun(dirs: &[String]) -> &'static str {
    if dirs.len() > 1 { "them" } else { "it" }
}

/// Remove fenced code blocks, backticks included.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    CODE_FENCE.replace_all(text, "")
}

/// Blank out link targets, turning `[label](path)` into `[label]()`.
pub fn strip_link_targets(text: &str) -> Cow<'_, str> {
    LINK_TARGET.replace_all(text, "]()")
}

/// Blank out bracketed labels, turning `[label]` into `[]`.
pub fn strip_link_labels(text: &str) -> Cow<'_, str> {
    LINK_LABEL.replace_all(text, "[]")
}

/// Reduce a body to the prose that may hold local resource references.
///
/// Targets are stripped before labels so both halves of a link are discarded.
pub fn strip_markup(body: &str) -> String {
    let text = strip_code_fences(body);
    let text = strip_link_targets(&text);
    strip_link_labels(&text).into_owned()
}

/// Whether `text` references `dir/...` as a local path at least once.
fn references_locally(text: &str, dir: &str) -> bool {
    let needle = format!("{dir}/");
    text.match_indices(&needle).any(|(start, _)| {
        let before = &text[..start];
        let after = &text[start + needle.len()..];
        // Must start a word and name something after the slash.
        if !before.chars().next_back().is_none_or(char::is_whitespace)
            || !after.starts_with(|c: char| !c.is_whitespace())
        {
            return false;
        }
        let line_start = before.rfind('\n').map_or(0, |index| index + 1);
        !ends_with_citation(&before[line_start..])
    })
}

/// Whether the text before a reference marks it as another skill's resource.
fn ends_with_citation(prefix: &str) -> bool {
    CROSS_SKILL_CITATION.is_match(prefix)
}

/// Collect the resource directories that stripped prose references locally.
pub fn referenced_dirs<'a, I>(text: &str, dirs: I) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    dirs.into_iter()
        .filter(|dir| references_locally(text, dir))
        .collect()
}

/// Check that every resource directory referenced in the body exists.
///
/// Documents without a frontmatter block have no body and always pass.
pub fn check_resources(
    skill_dir: &Path,
    contents: &str,
    rules: &Rules,
) -> Result<(), MissingResources> {
    let Some(body) = split_body(contents) else {
        return Ok(());
    };
    let prose = strip_markup(body);
    let referenced = referenced_dirs(&prose, rules.resource_dirs());
    debug!(?referenced, "resource directories referenced");

    let dirs: Vec<String> = referenced
        .into_iter()
        .filter(|dir| !skill_dir.join(dir).is_dir())
        .map(str::to_string)
        .collect();
    if dirs.is_empty() {
        Ok(())
    } else {
        Err(MissingResources { dirs })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        MissingResources, check_resources, referenced_dirs, strip_code_fences, strip_link_labels,
        strip_link_targets, strip_markup,
    };
    use crate::{
        rules::{DEFAULT_RESOURCE_DIRS, Rules},
        testutil::{SkillFixture, skill_content},
    };

    fn referenced(body: &str) -> Vec<&'static str> {
        referenced_dirs(&strip_markup(body), DEFAULT_RESOURCE_DIRS.iter().copied())
            .into_iter()
            .collect()
    }

    fn check(fixture: &SkillFixture) -> Result<(), MissingResources> {
        check_resources(fixture.path(), &fixture.contents(), &Rules::default())
    }

    #[test]
    fn strips_fenced_code() {
        let body = "before\n```bash\nscripts/run.sh\n```\nafter ```inline``` end";
        assert_eq!(strip_code_fences(body), "before\n\nafter  end");
    }

    #[test]
    fn leaves_unclosed_fence() {
        let body = "```\nscripts/run.sh\n";
        assert_eq!(strip_code_fences(body), body);
    }

    #[test]
    fn strips_link_targets_then_labels() {
        let body = "[references/a.md](references/b.md)";
        assert_eq!(strip_link_targets(body), "[references/a.md]()");
        assert_eq!(strip_link_labels(&strip_link_targets(body)), "[]()");
    }

    #[test]
    fn stripping_is_idempotent() {
        let body = "Intro [guide](references/guide.md)\n```\nscripts/x.py\n```\n\
                    See assets/logo.png and [assets/a.png].";
        let once = strip_markup(body);
        assert_eq!(strip_markup(&once), once);
    }

    #[test]
    fn finds_plain_references() {
        assert_eq!(referenced("Run scripts/deploy.py to deploy."), ["scripts"]);
        assert_eq!(
            referenced("See references/api.md\nassets/logo.png is the logo"),
            ["assets", "references"]
        );
    }

    #[test]
    fn requires_a_path_after_the_slash() {
        assert!(referenced("The scripts/ folder is optional.").is_empty());
        assert!(referenced("Put them in scripts/\nlater").is_empty());
    }

    #[test]
    fn ignores_references_inside_tokens() {
        assert!(referenced("Use ../scripts/run.py or foo/assets/x.png").is_empty());
        assert!(referenced("(scripts/run.py)").is_empty());
    }

    #[test]
    fn ignores_code_and_links() {
        assert!(referenced("```\nscripts/example.py --help\n```").is_empty());
        assert!(referenced("Read [the guide](references/guide.md).").is_empty());
        assert!(referenced("Read [references/guide.md](https://example.com).").is_empty());
    }

    #[test]
    fn skips_cross_skill_citations() {
        assert!(
            referenced("See `knowledge-freshness` references/guide.md for details.").is_empty()
        );
        assert!(referenced("`plugin:skill-name`  scripts/run.py").is_empty());
    }

    #[test]
    fn citation_only_covers_its_own_match() {
        let body = "See `other-skill` references/a.md\nand references/b.md here.";
        assert_eq!(referenced(body), ["references"]);
    }

    #[test]
    fn uppercase_citation_is_not_cross_skill() {
        assert_eq!(referenced("`Other` scripts/run.py"), ["scripts"]);
    }

    #[test]
    fn reports_single_missing_directory() {
        let fixture = SkillFixture::new().with_skill_md(&skill_content(
            "test-skill",
            "A test skill",
            "Run scripts/deploy.py to deploy.",
        ));
        let error = check(&fixture).expect_err("scripts missing");
        assert_eq!(error.dirs(), ["scripts"]);
        assert_eq!(
            error.to_string(),
            "SKILL.md references missing resource directory: scripts. \
             Create it or remove the references."
        );
    }

    #[test]
    fn reports_multiple_missing_directories_sorted() {
        let fixture = SkillFixture::new().with_skill_md(&skill_content(
            "test-skill",
            "A test skill",
            "Run scripts/a.py, read references/b.md, use assets/c.png.",
        ));
        let error = check(&fixture).expect_err("all missing");
        assert_eq!(
            error.to_string(),
            "SKILL.md references missing resource directories: assets, references, scripts. \
             Create them or remove the references."
        );
    }

    #[test]
    fn passes_when_directories_exist() {
        let fixture = SkillFixture::new()
            .with_skill_md(&skill_content(
                "test-skill",
                "A test skill",
                "Run scripts/deploy.py, then read references/notes.md.",
            ))
            .with_dir("scripts")
            .with_dir("references");
        assert_eq!(check(&fixture), Ok(()));
    }

    #[test]
    fn only_flags_absent_directories() {
        let fixture = SkillFixture::new()
            .with_skill_md(&skill_content(
                "test-skill",
                "A test skill",
                "Run scripts/deploy.py, then read references/notes.md.",
            ))
            .with_dir("scripts");
        let error = check(&fixture).expect_err("references missing");
        assert_eq!(error.dirs(), ["references"]);
    }

    #[test]
    fn fenced_reference_never_requires_directory() {
        let body = "Some text.\n\n```bash\nscripts/example.py --help\n```\n\nMore text.\n";
        let fixture =
            SkillFixture::new().with_skill_md(&skill_content("test-skill", "A test skill", body));
        assert_eq!(check(&fixture), Ok(()));
    }

    #[test]
    fn frontmatter_mentions_are_not_body_references() {
        let fixture = SkillFixture::new().with_skill_md(
            "---\nname: test-skill\ndescription: uses scripts/run.py\n---\nNo references.\n",
        );
        assert_eq!(check(&fixture), Ok(()));
    }

    #[test]
    fn documents_without_frontmatter_pass() {
        let fixture = SkillFixture::new().with_skill_md("Run scripts/deploy.py\n");
        assert_eq!(check(&fixture), Ok(()));
    }

    #[test]
    fn custom_resource_dirs_are_scanned() {
        let fixture = SkillFixture::new().with_skill_md(&skill_content(
            "test-skill",
            "A test skill",
            "Fill in templates/report.md and run scripts/go.sh.",
        ));
        let rules = Rules::default().with_resource_dirs(["templates"]);
        let error = check_resources(fixture.path(), &fixture.contents(), &rules)
            .expect_err("templates missing");
        assert_eq!(error.dirs(), ["templates"]);
    }
}
