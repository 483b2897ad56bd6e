//! Analyzer seam — pluggable, trait-based scoring backend.
//!
//! Default: `MockAnalyzer` (canned result, no external calls). A real scoring
//! service slots in behind the same trait without touching the session state
//! machine; `AppState` holds an `Arc<dyn Analyzer>`.

use async_trait::async_trait;

use crate::analysis::models::{AnalysisResult, CategoryScore};
use crate::errors::AppError;
use crate::intake::models::FileEntry;

/// Scoring backend. Implement this to swap the mocked result for a real
/// provider; the session contract (Running → Complete/Idle) stays the same.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, files: &[FileEntry]) -> Result<AnalysisResult, AppError>;
}

/// Demo backend: returns a fixed report regardless of input.
pub struct MockAnalyzer;

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, files: &[FileEntry]) -> Result<AnalysisResult, AppError> {
        if files.is_empty() {
            return Err(AppError::NoFiles);
        }
        Ok(mock_result())
    }
}

/// The canned report shown to every free-tier user of the demo.
pub fn mock_result() -> AnalysisResult {
    AnalysisResult {
        overall_score: 72,
        formatting_score: CategoryScore {
            category: "Formatting".to_string(),
            score: 8,
            max_score: 10,
            suggestions: vec![
                "Consider using a cleaner template with more white space".to_string(),
                "Your resume exceeds one page - try to condense it".to_string(),
                "Section headers could be more prominent".to_string(),
            ],
        },
        keyword_score: CategoryScore {
            category: "Keyword Optimization".to_string(),
            score: 7,
            max_score: 10,
            suggestions: vec![
                "Add more industry-specific terms related to your target role".to_string(),
                "Include keywords from the job description like \"project management\""
                    .to_string(),
                "Quantify your achievements with specific metrics".to_string(),
            ],
        },
        content_score: CategoryScore {
            category: "Content Quality".to_string(),
            score: 8,
            max_score: 10,
            suggestions: vec![
                "Use stronger action verbs to begin your bullet points".to_string(),
                "Focus more on achievements rather than responsibilities".to_string(),
                "Add a brief professional summary at the top".to_string(),
            ],
        },
        summary: "Your resume shows solid experience, but needs optimization for ATS \
                  systems and better highlighting of key achievements. With some formatting \
                  improvements and keyword additions, it could be significantly stronger."
            .to_string(),
        detailed_feedback: "This is a placeholder for detailed premium feedback that would \
                            include specific suggestions for each section of your resume, \
                            comparative analysis against industry standards, and tailored \
                            recommendations based on your target role and industry."
            .to_string(),
        is_premium_content: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::models::{classify, CandidateFile, FileEntry};
    use bytes::Bytes;

    fn entry(filename: &str) -> FileEntry {
        let candidate = CandidateFile {
            filename: filename.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        let kind = classify(filename);
        FileEntry::from_candidate(candidate, kind)
    }

    #[tokio::test]
    async fn test_mock_analyzer_returns_bounded_scores() {
        let result = MockAnalyzer.analyze(&[entry("resume.pdf")]).await.unwrap();
        assert!(result.overall_score <= 100);
        for cat in [
            &result.formatting_score,
            &result.keyword_score,
            &result.content_score,
        ] {
            assert!(cat.score <= cat.max_score);
            assert_eq!(cat.suggestions.len(), 3);
        }
        assert!(result.is_premium_content);
    }

    #[tokio::test]
    async fn test_mock_analyzer_rejects_empty_input() {
        let err = MockAnalyzer.analyze(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::NoFiles));
    }
}
