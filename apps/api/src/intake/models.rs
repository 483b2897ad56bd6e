use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upload size ceiling: 5 MiB, matching the advertised "Max 5MB" limit.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types the intake accepts: PDF, DOC, DOCX.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Document classification, inferred from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocKind {
    Resume,
    CoverLetter,
}

/// A raw upload before validation. Field names mirror the multipart parts.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl CandidateFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A validated, accepted file. Owned solely by the intake manager; dropped on
/// `remove`/`clear`. The payload is held in memory and never parsed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub kind: DocKind,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub bytes: Bytes,
}

impl FileEntry {
    pub fn from_candidate(candidate: CandidateFile, kind: DocKind) -> Self {
        FileEntry {
            id: Uuid::new_v4(),
            size_bytes: candidate.size_bytes(),
            filename: candidate.filename,
            content_type: candidate.content_type,
            kind,
            uploaded_at: Utc::now(),
            bytes: candidate.bytes,
        }
    }
}

/// Filenames containing "cover" (case-insensitive) are cover letters;
/// everything else is a resume.
pub fn classify(filename: &str) -> DocKind {
    if filename.to_lowercase().contains("cover") {
        DocKind::CoverLetter
    } else {
        DocKind::Resume
    }
}
