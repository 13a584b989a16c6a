//! CSV persistence for node tables and the roadmaps summary.
//!
//! Naming conventions, shared by every consumer of the output directory:
//! one `<roadmap>_nodes.csv` per roadmap, `all_roadmaps_nodes.csv` for the
//! global concatenation, and `roadmaps_summary.csv` for the per-document
//! aggregates. Writing the same rows twice produces byte-identical files.

use std::fs;
use std::path::{Path, PathBuf};

use roadmap_core::DerivedRow;

use crate::error::TableError;
use crate::summary::RoadmapSummary;

/// File name of the global concatenated node table.
pub const GLOBAL_TABLE_FILE: &str = "all_roadmaps_nodes.csv";
/// File name of the roadmaps summary table.
pub const SUMMARY_TABLE_FILE: &str = "roadmaps_summary.csv";
/// Suffix of per-roadmap node tables.
pub const NODES_TABLE_SUFFIX: &str = "_nodes.csv";

/// Reads and writes the tables of one output directory.
#[derive(Debug, Clone)]
pub struct TableStore {
    output_dir: PathBuf,
}

impl TableStore {
    /// Creates a store rooted at the given output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        TableStore {
            output_dir: output_dir.into(),
        }
    }

    /// The output directory this store reads and writes.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if it does not exist.
    pub fn ensure_output_dir(&self) -> Result<(), TableError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| TableError::Io {
            path: self.output_dir.clone(),
            source: e,
        })
    }

    /// Path of a roadmap's node table.
    pub fn roadmap_table_path(&self, roadmap: &str) -> PathBuf {
        self.output_dir
            .join(format!("{roadmap}{NODES_TABLE_SUFFIX}"))
    }

    /// Path of the global concatenated table.
    pub fn global_table_path(&self) -> PathBuf {
        self.output_dir.join(GLOBAL_TABLE_FILE)
    }

    /// Path of the roadmaps summary table.
    pub fn summary_table_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_TABLE_FILE)
    }

    /// Writes one roadmap's node table, replacing any previous file.
    pub fn write_roadmap(&self, roadmap: &str, rows: &[DerivedRow]) -> Result<PathBuf, TableError> {
        let path = self.roadmap_table_path(roadmap);
        write_rows(&path, rows)?;
        Ok(path)
    }

    /// Reads one roadmap's node table back.
    pub fn read_roadmap(&self, roadmap: &str) -> Result<Vec<DerivedRow>, TableError> {
        read_rows(&self.roadmap_table_path(roadmap))
    }

    /// Writes the global concatenated table.
    pub fn write_global(&self, rows: &[DerivedRow]) -> Result<PathBuf, TableError> {
        let path = self.global_table_path();
        write_rows(&path, rows)?;
        Ok(path)
    }

    /// Writes the roadmaps summary table.
    pub fn write_summaries(&self, summaries: &[RoadmapSummary]) -> Result<PathBuf, TableError> {
        let path = self.summary_table_path();
        let mut writer = csv::Writer::from_path(&path)?;
        for summary in summaries {
            writer.serialize(summary)?;
        }
        writer.flush().map_err(|e| TableError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Lists per-roadmap node tables present in the output directory,
    /// sorted by roadmap name. The global table and summary are excluded.
    pub fn list_roadmap_tables(&self) -> Result<Vec<(String, PathBuf)>, TableError> {
        let entries = fs::read_dir(&self.output_dir).map_err(|e| TableError::Io {
            path: self.output_dir.clone(),
            source: e,
        })?;
        let mut tables = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TableError::Io {
                path: self.output_dir.clone(),
                source: e,
            })?;
            let Some(name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if name == GLOBAL_TABLE_FILE || name == SUMMARY_TABLE_FILE {
                continue;
            }
            if let Some(roadmap) = name.strip_suffix(NODES_TABLE_SUFFIX) {
                if !roadmap.is_empty() {
                    tables.push((roadmap.to_string(), entry.path()));
                }
            }
        }
        tables.sort();
        Ok(tables)
    }
}

/// Writes rows to a CSV file with the canonical column order.
pub fn write_rows(path: &Path, rows: &[DerivedRow]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads rows back from a CSV file.
pub fn read_rows(path: &Path) -> Result<Vec<DerivedRow>, TableError> {
    if !path.is_file() {
        return Err(TableError::TableNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
