//! Shared helpers for `goldenfix` integration tests.
//!
//! Provides a temporary fixture tree and a small outline renderer that
//! stands in for a real CFML parser and tree printer.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Tags whose content is nested until a matching closing tag.
const BLOCK_TAGS: &[&str] = &[
    "cfcomponent",
    "cffunction",
    "cfif",
    "cfloop",
    "cfoutput",
    "cfscript",
];

/// A temporary directory tree for fixtures, removed on drop.
#[derive(Debug)]
pub struct FixtureTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl FixtureTree {
    /// Creates an empty fixture tree.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or its path is
    /// not valid UTF-8.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir is not UTF-8: {}", path.display()));
        Self { _dir: dir, root }
    }

    /// Returns the root directory of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file or its parents cannot be written.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create {parent}: {e}"));
        }
        std::fs::write(&path, contents).unwrap_or_else(|e| panic!("failed to write {path}: {e}"));
    }

    /// Reads `relative`, returning `None` if it does not exist.
    #[must_use]
    pub fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(relative)).ok()
    }
}

impl Default for FixtureTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders CFML-like input as an indented outline of tags and text.
///
/// Each non-blank line becomes one node: `Tag(name)` for an opening tag,
/// `EndTag(name)` for a closing tag, and `Text(line)` for anything else.
/// Block tags indent the nodes that follow until their closing tag.
#[must_use]
pub fn outline_renderer(input: &str) -> String {
    let mut nodes = vec!["CfmlFile".to_owned()];
    let mut depth: usize = 1;
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(rest) = line.strip_prefix("</") {
            depth = depth.saturating_sub(1).max(1);
            nodes.push(format!("{}EndTag({})", indent(depth), tag_name(rest)));
        } else if let Some(rest) = line.strip_prefix('<') {
            let name = tag_name(rest);
            nodes.push(format!("{}Tag({name})", indent(depth)));
            let closes_inline = line.ends_with("/>") || line.contains(&format!("</{name}"));
            if BLOCK_TAGS.contains(&name) && !closes_inline {
                depth += 1;
            }
        } else {
            nodes.push(format!("{}Text({line})", indent(depth)));
        }
    }
    nodes.join("\n")
}

fn tag_name(rest: &str) -> &str {
    rest.split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or(rest)
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_block_is_indented() {
        let tree = outline_renderer("<cfif x>\n<cfset y = 1>\n</cfif>\n");
        assert_eq!(
            tree,
            "CfmlFile\n  Tag(cfif)\n    Tag(cfset)\n  EndTag(cfif)"
        );
    }

    #[test]
    fn inline_block_does_not_nest() {
        let tree = outline_renderer("<cfoutput>#x#</cfoutput>\ntext");
        assert_eq!(tree, "CfmlFile\n  Tag(cfoutput)\n  Text(text)");
    }

    #[test]
    fn fixture_tree_round_trips_files() {
        let tree = FixtureTree::new();
        tree.write("data/parser/a.test.cfml", "<cfif>");
        assert!(tree.root().join("data/parser/a.test.cfml").is_file());
        assert_eq!(tree.read("data/parser/a.test.cfml").as_deref(), Some("<cfif>"));
        assert_eq!(tree.read("data/parser/missing.test.cfml"), None);
    }
}
