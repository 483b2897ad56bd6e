//! File intake — validation, classification, and ownership of the accepted
//! file set.
//!
//! Rejections are per-file and recoverable: a bad file is skipped with a
//! user-visible notification while the rest of the batch continues.

pub mod handlers;
pub mod models;

use crate::errors::AppError;
use crate::notify::{Notifier, Severity};

use self::models::{classify, CandidateFile, FileEntry, ACCEPTED_MIME_TYPES, MAX_FILE_BYTES};

/// Checks a single candidate against the intake rules. Type and size
/// failures are distinguishable error kinds.
pub fn validate(candidate: &CandidateFile) -> Result<(), AppError> {
    if !ACCEPTED_MIME_TYPES.contains(&candidate.content_type.as_str()) {
        return Err(AppError::InvalidFileType(format!(
            "'{}': please upload a PDF, DOC, or DOCX file.",
            candidate.filename
        )));
    }
    if candidate.size_bytes() > MAX_FILE_BYTES {
        return Err(AppError::FileTooLarge(format!(
            "'{}': please upload a file smaller than 5MB.",
            candidate.filename
        )));
    }
    Ok(())
}

/// Owns the validated file set for one session. Entirely ephemeral.
#[derive(Debug, Default)]
pub struct IntakeManager {
    files: Vec<FileEntry>,
}

/// Outcome of one `submit` batch.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub accepted: Vec<FileEntry>,
    pub rejected: Vec<AppError>,
}

impl IntakeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates each candidate; accepted files are appended to the set,
    /// rejected ones surface a notification and are skipped.
    pub fn submit(
        &mut self,
        candidates: Vec<CandidateFile>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for candidate in candidates {
            match validate(&candidate) {
                Ok(()) => {
                    let kind = classify(&candidate.filename);
                    let entry = FileEntry::from_candidate(candidate, kind);
                    accepted.push(entry.clone());
                    self.files.push(entry);
                }
                Err(err) => {
                    let title = match err {
                        AppError::FileTooLarge(_) => "File too large",
                        _ => "Invalid file type",
                    };
                    notifier.notify(title, &err.to_string(), Severity::Error);
                    rejected.push(err);
                }
            }
        }

        if !accepted.is_empty() {
            notifier.notify(
                "Files uploaded",
                &format!("{} file(s) ready for analysis.", accepted.len()),
                Severity::Success,
            );
        }

        SubmitOutcome { accepted, rejected }
    }

    /// Removes one entry. Out-of-range indices are a NotFound error, never a
    /// panic.
    pub fn remove(&mut self, index: usize) -> Result<FileEntry, AppError> {
        if index >= self.files.len() {
            return Err(AppError::NotFound(format!("No file at index {index}")));
        }
        Ok(self.files.remove(index))
    }

    /// Empties the set. Returns whether anything was removed so the session
    /// can decide if downstream state went stale.
    pub fn clear(&mut self) -> bool {
        let had_files = !self.files.is_empty();
        self.files.clear();
        had_files
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::models::DocKind;
    use crate::notify::RecordingNotifier;
    use bytes::Bytes;

    fn candidate(filename: &str, content_type: &str, size: usize) -> CandidateFile {
        CandidateFile {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    fn pdf(filename: &str, size: usize) -> CandidateFile {
        candidate(filename, "application/pdf", size)
    }

    #[test]
    fn test_accepts_pdf_under_limit() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        let outcome = intake.submit(vec![pdf("resume.pdf", 2 * 1024 * 1024)], &notifier);

        assert_eq!(outcome.accepted.len(), 1);
        assert!(outcome.rejected.is_empty());
        assert_eq!(intake.len(), 1);
        assert_eq!(intake.files()[0].kind, DocKind::Resume);
    }

    #[test]
    fn test_rejects_oversized_file_with_size_kind() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        intake.submit(vec![pdf("resume.pdf", 100)], &notifier);

        // 6 MB upload must be rejected and leave the set unchanged.
        let outcome = intake.submit(vec![pdf("big.pdf", 6 * 1024 * 1024)], &notifier);
        assert!(outcome.accepted.is_empty());
        assert!(matches!(outcome.rejected[0], AppError::FileTooLarge(_)));
        assert_eq!(intake.len(), 1);
    }

    #[test]
    fn test_rejects_txt_with_type_kind() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        let outcome = intake.submit(vec![candidate("notes.txt", "text/plain", 10)], &notifier);

        assert!(outcome.accepted.is_empty());
        assert!(matches!(outcome.rejected[0], AppError::InvalidFileType(_)));
        assert!(intake.is_empty());
    }

    #[test]
    fn test_boundary_size_is_accepted() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        let outcome = intake.submit(vec![pdf("edge.pdf", MAX_FILE_BYTES as usize)], &notifier);
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn test_batch_continues_past_rejections() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        let outcome = intake.submit(
            vec![
                pdf("resume.pdf", 1024),
                candidate("notes.txt", "text/plain", 10),
                candidate("cover_letter.docx", ACCEPTED_MIME_TYPES[2], 2048),
            ],
            &notifier,
        );

        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(intake.files()[1].kind, DocKind::CoverLetter);
    }

    #[test]
    fn test_remove_is_bounds_checked() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        intake.submit(vec![pdf("resume.pdf", 1024)], &notifier);

        assert!(intake.remove(5).is_err());
        assert_eq!(intake.len(), 1);

        let removed = intake.remove(0).unwrap();
        assert_eq!(removed.filename, "resume.pdf");
        assert!(intake.is_empty());
    }

    #[test]
    fn test_clear_empties_the_set() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        intake.submit(vec![pdf("a.pdf", 10), pdf("b.pdf", 10)], &notifier);

        assert!(intake.clear());
        assert!(intake.is_empty());
        // Clearing an already-empty set reports nothing removed.
        assert!(!intake.clear());
    }

    #[test]
    fn test_rejections_notify_the_user() {
        let mut intake = IntakeManager::new();
        let notifier = RecordingNotifier::new();
        intake.submit(vec![candidate("notes.txt", "text/plain", 10)], &notifier);

        assert!(notifier.titles().contains(&"Invalid file type".to_string()));
    }
}
