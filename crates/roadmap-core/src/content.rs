//! Content file discovery and the per-roadmap content index.
//!
//! Long-form content lives on disk under `<roadmap>/content/` and binds to
//! a node purely by file name convention: `<title>@<node_id>.md`. The
//! `@<node_id>.md` suffix is the binding key; the title is cosmetic. The
//! index is recomputed from the filesystem alone -- it has no persisted
//! state -- and scanning is deterministic (entries visited in name order).

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;

/// One authored content document bound to a node by its file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentFile {
    /// Roadmap the file belongs to.
    pub roadmap: String,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File name including extension.
    pub file_name: String,
    /// Node identifier derived from the name (after `@`, `.md` stripped).
    pub node_id: String,
    /// Cosmetic title derived from the name (before `@`).
    pub title: String,
}

/// Splits a content file name into `(title, node_id)`.
///
/// Returns `None` unless the name ends in `.md` and contains exactly one
/// `@` delimiter. Names that fail the convention are treated as
/// non-content, never as errors.
pub fn parse_content_file_name(name: &str) -> Option<(String, String)> {
    let stem = name.strip_suffix(".md")?;
    if stem.matches('@').count() != 1 {
        return None;
    }
    let (title, node_id) = stem.split_once('@')?;
    Some((title.to_string(), node_id.to_string()))
}

/// Lookup from node identifier to the content file claimed for that node.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    /// Roadmap this index was built for.
    pub roadmap: String,
    by_node: IndexMap<String, ContentFile>,
    /// Files claiming a node id already claimed by an earlier file. The
    /// first file (in name order) stays in the index, matching the
    /// first-match lookup of the extraction pipeline; extras are kept
    /// aside for the validator to surface as data-quality defects.
    pub duplicate_claims: Vec<ContentFile>,
    /// `.md` files whose name violates the `<title>@<node_id>.md`
    /// convention. Excluded from the index but counted for audits.
    pub naming_violations: u32,
}

impl ContentIndex {
    /// Builds an empty index for a roadmap with no authored content.
    pub fn empty(roadmap: &str) -> Self {
        ContentIndex {
            roadmap: roadmap.to_string(),
            ..ContentIndex::default()
        }
    }

    /// Scans a roadmap's content directory, non-recursively.
    ///
    /// A missing directory is a legitimate state (no authored content yet)
    /// and yields an empty index. Only `.md` files participate; anything
    /// else is ignored outright.
    pub fn scan(roadmap: &str, content_dir: &Path) -> Result<Self, CoreError> {
        if !content_dir.is_dir() {
            return Ok(Self::empty(roadmap));
        }

        let entries = fs::read_dir(content_dir).map_err(|e| CoreError::Io {
            path: content_dir.to_path_buf(),
            source: e,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::Io {
                path: content_dir.to_path_buf(),
                source: e,
            })?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        let mut index = Self::empty(roadmap);
        for name in names {
            if !name.ends_with(".md") {
                continue;
            }
            let Some((title, node_id)) = parse_content_file_name(&name) else {
                index.naming_violations += 1;
                continue;
            };
            let file = ContentFile {
                roadmap: roadmap.to_string(),
                path: content_dir.join(&name),
                file_name: name,
                node_id: node_id.clone(),
                title,
            };
            if index.by_node.contains_key(&node_id) {
                index.duplicate_claims.push(file);
            } else {
                index.by_node.insert(node_id, file);
            }
        }
        Ok(index)
    }

    /// Looks up the content file claimed for a node.
    pub fn get(&self, node_id: &str) -> Option<&ContentFile> {
        self.by_node.get(node_id)
    }

    /// Iterates indexed content files in file-name order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentFile> {
        self.by_node.values()
    }

    /// Number of indexed content files (duplicates excluded).
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// Returns `true` when no content file is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_title_and_node_id() {
        assert_eq!(
            parse_content_file_name("Intro@n42.md"),
            Some(("Intro".to_string(), "n42".to_string()))
        );
    }

    #[test]
    fn parse_allows_empty_title() {
        assert_eq!(
            parse_content_file_name("@n1.md"),
            Some((String::new(), "n1".to_string()))
        );
    }

    #[test]
    fn parse_rejects_missing_delimiter() {
        assert_eq!(parse_content_file_name("readme.md"), None);
    }

    #[test]
    fn parse_rejects_double_delimiter() {
        assert_eq!(parse_content_file_name("a@b@c.md"), None);
    }

    #[test]
    fn parse_rejects_non_markdown() {
        assert_eq!(parse_content_file_name("Intro@n42.txt"), None);
    }

    #[test]
    fn scan_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let index = ContentIndex::scan("go", &tmp.path().join("go/content")).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.roadmap, "go");
    }

    #[test]
    fn scan_indexes_by_node_id() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("content");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("Intro@n42.md"), "# intro").unwrap();
        std::fs::write(dir.join("Setup@n7.md"), "# setup").unwrap();
        std::fs::write(dir.join("readme.md"), "no binding").unwrap();
        std::fs::write(dir.join("notes.txt"), "not content").unwrap();

        let index = ContentIndex::scan("go", &dir).unwrap();
        assert_eq!(index.len(), 2);
        let intro = index.get("n42").unwrap();
        assert_eq!(intro.title, "Intro");
        assert_eq!(intro.file_name, "Intro@n42.md");
        assert_eq!(intro.path, dir.join("Intro@n42.md"));
        assert!(index.get("readme").is_none());
        // readme.md violates the convention; notes.txt is not content at all.
        assert_eq!(index.naming_violations, 1);
    }

    #[test]
    fn scan_keeps_first_claim_and_records_duplicates() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("content");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("Alpha@n1.md"), "a").unwrap();
        std::fs::write(dir.join("Beta@n1.md"), "b").unwrap();

        let index = ContentIndex::scan("go", &dir).unwrap();
        assert_eq!(index.len(), 1);
        // Name order decides the winner.
        assert_eq!(index.get("n1").unwrap().file_name, "Alpha@n1.md");
        assert_eq!(index.duplicate_claims.len(), 1);
        assert_eq!(index.duplicate_claims[0].file_name, "Beta@n1.md");
    }

    #[test]
    fn same_node_id_in_other_roadmap_does_not_cross_bind() {
        let tmp = tempfile::tempdir().unwrap();
        let go = tmp.path().join("go/content");
        let rust = tmp.path().join("rust/content");
        std::fs::create_dir_all(&go).unwrap();
        std::fs::create_dir_all(&rust).unwrap();
        std::fs::write(go.join("Intro@n42.md"), "go intro").unwrap();
        std::fs::write(rust.join("Intro@n42.md"), "rust intro").unwrap();

        let go_index = ContentIndex::scan("go", &go).unwrap();
        let rust_index = ContentIndex::scan("rust", &rust).unwrap();
        assert_eq!(go_index.get("n42").unwrap().path, go.join("Intro@n42.md"));
        assert_eq!(
            rust_index.get("n42").unwrap().path,
            rust.join("Intro@n42.md")
        );
    }
}
