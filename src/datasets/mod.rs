//! Dataset adapter registry.
//!
//! Every supported dataset contributes one [`DatasetAdapter`] built from a
//! declarative [`DatasetSpec`]: where its raw files live, how to decode
//! them, which columns map to the canonical fields, how timestamps and
//! units are interpreted, and how rows map to subjects. Adapters are
//! isolated from each other; registering a new dataset is one new spec and
//! one line in [`registry`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::archive;
use crate::error::{HarmonizeError, Result};
use crate::models::{CanonicalRecord, DatasetStats, RawTable, RejectReason, RowOutcome};
use crate::normalize::columns::AliasList;
use crate::normalize::rows::{RowParser, RowRules, TimestampColumns};
use crate::normalize::timestamp::TimestampRule;
use crate::normalize::units::Unit;
use crate::readers::{
    read_attribute_events, read_delimited, read_json_rows, read_spreadsheet, SheetSelect,
};

mod ai_readi;
mod azt1d;
mod bigideas;
mod bris_t1d;
mod cgmacros;
mod colas_2019;
mod d1namo;
mod diatrend;
mod granada;
mod hall_2018;
mod hupa_ucm;
mod ohiot1dm;
mod park_2025;
mod physiocgm;
mod shanghai;
mod t1d_uom;
mod t1dexi;
mod uchtt1dm;

/// Pre-step run before file discovery
#[derive(Debug, Clone)]
pub enum Prepare {
    /// Extract zips matching this file-name pattern into their parent
    /// directory
    UnzipMatching(&'static str),
}

/// How many raw files a dataset is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// One export file holding all subjects; zero or several matches are
    /// both fatal, so the wrong file is never silently picked
    ExactlyOneFile,
    /// One or more files; zero matches is fatal
    ManyFiles,
}

/// Raw-file discovery configuration; patterns are glob expressions
/// relative to the dataset's raw directory
#[derive(Debug, Clone)]
pub struct Discovery {
    pub patterns: Vec<&'static str>,
    pub multiplicity: Multiplicity,
}

impl Discovery {
    pub fn many(patterns: &[&'static str]) -> Self {
        Self {
            patterns: patterns.to_vec(),
            multiplicity: Multiplicity::ManyFiles,
        }
    }

    pub fn exactly_one(pattern: &'static str) -> Self {
        Self {
            patterns: vec![pattern],
            multiplicity: Multiplicity::ExactlyOneFile,
        }
    }
}

/// How a raw file decodes into a table
#[derive(Debug, Clone)]
pub enum RawFormat {
    Delimited {
        delimiter: u8,
    },
    Spreadsheet {
        sheet: SheetSelect,
    },
    /// Attribute-based event log; the root element names the subject
    XmlEvents {
        container: &'static str,
        event: &'static str,
        timestamp_attr: &'static str,
        value_attr: &'static str,
        root_attr: &'static str,
    },
    /// Nested measurement document; paths are dotted
    JsonDocument {
        array_path: &'static str,
        timestamp_path: &'static str,
        value_path: &'static str,
    },
}

/// How rows map to subject identity
#[derive(Debug, Clone)]
pub enum SubjectStrategy {
    /// File base name without extension
    FileStem,
    /// Name of the file's immediate parent directory
    ParentDir,
    /// Parent directory name with a trailing suffix removed
    ParentDirStripSuffix(&'static str),
    /// File stem up to the first occurrence of the separator; groups
    /// multi-file-per-subject exports
    StemPrefix(char),
    /// Per-row value of a subject column (one file, all subjects)
    Column {
        aliases: AliasList,
        /// Normalize float-typed ids (`954.0` becomes `954`)
        numeric_ids: bool,
    },
    /// Subject label carried by the file itself (XML root attribute)
    FileLabel,
}

/// Declarative description of one dataset
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    /// Registry identifier (CLI-facing)
    pub id: &'static str,
    /// Canonical dataset name (output directory name)
    pub name: &'static str,
    /// Raw directory, relative to the raw root
    pub raw_dir: &'static str,
    pub prepare: Option<Prepare>,
    pub discovery: Discovery,
    pub format: RawFormat,
    pub timestamp_columns: TimestampColumns,
    pub timestamp_rule: TimestampRule,
    pub glucose: AliasList,
    pub unit: Unit,
    pub subject: SubjectStrategy,
    pub rules: RowRules,
}

impl DatasetSpec {
    /// Short format label for registry listings
    pub fn format_label(&self) -> &'static str {
        match self.format {
            RawFormat::Delimited { delimiter: b'\t' } => "TSV",
            RawFormat::Delimited { .. } => "CSV",
            RawFormat::Spreadsheet { .. } => "Excel",
            RawFormat::XmlEvents { .. } => "XML",
            RawFormat::JsonDocument { .. } => "JSON",
        }
    }
}

/// One decoded raw file, plus the subject label when the file itself
/// carries one
#[derive(Debug)]
pub struct FileTable {
    pub table: RawTable,
    pub file_subject: Option<String>,
}

/// A dataset's composition of the shared harmonization primitives.
///
/// The interface every dataset conforms to: [`discover_files`], [`read`],
/// [`map_columns`], [`partition_subjects`]. The processor drives these
/// uniformly; all per-dataset variation lives in the [`DatasetSpec`].
///
/// [`discover_files`]: DatasetAdapter::discover_files
/// [`read`]: DatasetAdapter::read
/// [`map_columns`]: DatasetAdapter::map_columns
/// [`partition_subjects`]: DatasetAdapter::partition_subjects
#[derive(Debug, Clone)]
pub struct DatasetAdapter {
    spec: DatasetSpec,
}

impl DatasetAdapter {
    pub fn new(spec: DatasetSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &DatasetSpec {
        &self.spec
    }

    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Run the dataset's pre-step, if any
    pub fn prepare(&self, raw_dir: &Path) -> Result<()> {
        if let Some(Prepare::UnzipMatching(pattern)) = &self.spec.prepare {
            archive::extract_matching_archives(raw_dir, pattern)?;
        }
        Ok(())
    }

    /// Locate raw files under the dataset's raw directory, enforcing the
    /// declared multiplicity. Results are lexicographically sorted so
    /// multi-file concatenation is deterministic.
    pub fn discover_files(&self, raw_dir: &Path) -> Result<Vec<PathBuf>> {
        if !raw_dir.is_dir() {
            return Err(HarmonizeError::RawDirNotFound {
                path: raw_dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for pattern in &self.spec.discovery.patterns {
            let full = format!("{}/{}", raw_dir.display(), pattern);
            let entries = glob::glob(&full).map_err(|e| HarmonizeError::Configuration {
                message: format!("invalid discovery pattern '{}': {}", pattern, e),
            })?;
            for entry in entries.filter_map(|e| e.ok()) {
                if entry.is_file() {
                    files.push(entry);
                }
            }
        }
        files.sort();
        files.dedup();

        let pattern_list = self.spec.discovery.patterns.join(", ");
        if files.is_empty() {
            return Err(HarmonizeError::NoFilesFound {
                path: raw_dir.to_path_buf(),
                pattern: pattern_list,
            });
        }
        if self.spec.discovery.multiplicity == Multiplicity::ExactlyOneFile && files.len() > 1 {
            return Err(HarmonizeError::AmbiguousFiles {
                path: raw_dir.to_path_buf(),
                pattern: pattern_list,
                found: files.len(),
            });
        }

        Ok(files)
    }

    /// Decode one raw file with the dataset's format reader
    pub fn read(&self, path: &Path) -> Result<FileTable> {
        match &self.spec.format {
            RawFormat::Delimited { delimiter } => Ok(FileTable {
                table: read_delimited(path, *delimiter)?,
                file_subject: None,
            }),
            RawFormat::Spreadsheet { sheet } => Ok(FileTable {
                table: read_spreadsheet(path, *sheet)?,
                file_subject: None,
            }),
            RawFormat::XmlEvents {
                container,
                event,
                timestamp_attr,
                value_attr,
                root_attr,
            } => {
                let (subject, table) = read_attribute_events(
                    path,
                    container,
                    event,
                    &[*timestamp_attr, *value_attr],
                    root_attr,
                )?;
                Ok(FileTable {
                    table,
                    file_subject: Some(subject),
                })
            }
            RawFormat::JsonDocument {
                array_path,
                timestamp_path,
                value_path,
            } => Ok(FileTable {
                table: read_json_rows(path, array_path, &[*timestamp_path, *value_path])?,
                file_subject: None,
            }),
        }
    }

    /// Resolve the canonical fields against a table's headers
    pub fn map_columns<'a>(&'a self, table: &'a RawTable) -> Result<RowParser<'a>> {
        RowParser::new(
            table,
            &self.spec.timestamp_columns,
            &self.spec.glucose,
            &self.spec.timestamp_rule,
            self.spec.unit,
            &self.spec.rules,
        )
    }

    /// Normalize a decoded file into per-subject record groups, counting
    /// rejections into `stats`
    pub fn partition_subjects(
        &self,
        file: &FileTable,
        stats: &mut DatasetStats,
    ) -> Result<Vec<(String, Vec<CanonicalRecord>)>> {
        let table = &file.table;
        let mut parser = self.map_columns(table)?;

        if let SubjectStrategy::Column {
            aliases,
            numeric_ids,
        } = &self.spec.subject
        {
            let subject_index = aliases.require(table)?;
            let mut groups: BTreeMap<String, Vec<CanonicalRecord>> = BTreeMap::new();
            for row in &table.rows {
                let subject = table
                    .cell(row, subject_index)
                    .as_text()
                    .map(|s| normalize_subject_id(&s, *numeric_ids))
                    .filter(|s| !s.is_empty());
                let Some(subject) = subject else {
                    stats.record_rejection(RejectReason::MissingSubject);
                    continue;
                };
                match parser.parse_row(row)? {
                    RowOutcome::Parsed(record) => groups.entry(subject).or_default().push(record),
                    RowOutcome::Rejected(reason) => stats.record_rejection(reason),
                }
            }
            return Ok(groups.into_iter().collect());
        }

        let subject = match &self.spec.subject {
            SubjectStrategy::FileLabel => file.file_subject.clone(),
            strategy => subject_from_path(strategy, &table.source),
        };
        let Some(subject) = subject.filter(|s| !s.is_empty()) else {
            warn!(
                "Could not derive a subject id for {}; skipping file",
                table.source.display()
            );
            stats.files_skipped += 1;
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for row in &table.rows {
            match parser.parse_row(row)? {
                RowOutcome::Parsed(record) => records.push(record),
                RowOutcome::Rejected(reason) => stats.record_rejection(reason),
            }
        }
        Ok(vec![(subject, records)])
    }
}

/// Derive a subject id from a file path under a path-based strategy
fn subject_from_path(strategy: &SubjectStrategy, path: &Path) -> Option<String> {
    match strategy {
        SubjectStrategy::FileStem => path.file_stem().map(|s| s.to_string_lossy().to_string()),
        SubjectStrategy::ParentDir => parent_dir_name(path),
        SubjectStrategy::ParentDirStripSuffix(suffix) => {
            parent_dir_name(path).map(|name| name.trim_end_matches(suffix).to_string())
        }
        SubjectStrategy::StemPrefix(separator) => path.file_stem().map(|s| {
            let stem = s.to_string_lossy();
            stem.split(*separator).next().unwrap_or(&stem).to_string()
        }),
        SubjectStrategy::Column { .. } | SubjectStrategy::FileLabel => None,
    }
}

fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
}

/// Float-typed subject ids read back as `954.0`; normalize to `954`
fn normalize_subject_id(raw: &str, numeric_ids: bool) -> String {
    let trimmed = raw.trim();
    if numeric_ids {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                return format!("{}", value as i64);
            }
        }
    }
    trimmed.to_string()
}

/// All registered adapters, in presentation order
pub fn registry() -> Vec<DatasetAdapter> {
    vec![
        hall_2018::adapter(),
        d1namo::adapter(),
        colas_2019::adapter(),
        ohiot1dm::adapter(),
        t1dexi::adapter(),
        t1dexi::pediatric_adapter(),
        bigideas::adapter(),
        diatrend::adapter(),
        shanghai::t1dm_adapter(),
        shanghai::t2dm_adapter(),
        granada::adapter(),
        ai_readi::adapter(),
        uchtt1dm::adapter(),
        hupa_ucm::adapter(),
        cgmacros::dexcom_adapter(),
        cgmacros::libre_adapter(),
        t1d_uom::adapter(),
        bris_t1d::adapter(),
        azt1d::adapter(),
        park_2025::adapter(),
        physiocgm::adapter(),
    ]
}

/// Look up an adapter by registry identifier
pub fn find(id: &str) -> Result<DatasetAdapter> {
    registry()
        .into_iter()
        .find(|a| a.id() == id)
        .ok_or_else(|| HarmonizeError::UnknownDataset { id: id.to_string() })
}

/// All registry identifiers, in presentation order
pub fn dataset_ids() -> Vec<&'static str> {
    registry().iter().map(|a| a.id()).collect()
}
