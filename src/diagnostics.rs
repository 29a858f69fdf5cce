//! Recoverable problems found while reading, extracting or merging

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::FlinspectError;
use crate::schema::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedTree,
    NameKindConflict,
    DuplicateDefinition,
    UnreadableFile,
    MissingHeader,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedTree => "malformed_tree",
            DiagnosticKind::NameKindConflict => "name_kind_conflict",
            DiagnosticKind::DuplicateDefinition => "duplicate_definition",
            DiagnosticKind::UnreadableFile => "unreadable_file",
            DiagnosticKind::MissingHeader => "missing_header",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityId>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: None,
            entity: None,
        }
    }

    pub fn at(mut self, file: impl AsRef<Path>, line: usize) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self.line = Some(line);
        self
    }

    pub fn in_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    pub fn on(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Diagnostic for an error that was recovered from
    pub fn from_error(err: &FlinspectError) -> Self {
        match err {
            FlinspectError::MalformedTree {
                path,
                line,
                message,
            } => Diagnostic::new(DiagnosticKind::MalformedTree, message.clone()).at(path, *line),
            FlinspectError::NameKindConflict { .. } => {
                Diagnostic::new(DiagnosticKind::NameKindConflict, err.to_string())
            }
            FlinspectError::IoError { path, .. } => {
                Diagnostic::new(DiagnosticKind::UnreadableFile, err.to_string()).in_file(path)
            }
            FlinspectError::FileNotFound { path } => {
                Diagnostic::new(DiagnosticKind::UnreadableFile, err.to_string()).in_file(path)
            }
            other => Diagnostic::new(DiagnosticKind::UnreadableFile, other.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if let Some(file) = &self.file {
            write!(f, " {}", file.display())?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        write!(f, " {}", self.message)
    }
}
