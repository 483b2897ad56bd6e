use serde::{Deserialize, Serialize};

/// One scored dimension of the analysis (formatting, keywords, content).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
    pub max_score: u32,
    /// Ordered, most important first.
    pub suggestions: Vec<String>,
}

/// The terminal result of one analysis session. Immutable once produced;
/// a new run replaces the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100.
    pub overall_score: u32,
    pub formatting_score: CategoryScore,
    pub keyword_score: CategoryScore,
    pub content_score: CategoryScore,
    pub summary: String,
    pub detailed_feedback: String,
    pub is_premium_content: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            overall_score: 72,
            formatting_score: CategoryScore {
                category: "Formatting".to_string(),
                score: 8,
                max_score: 10,
                suggestions: vec![],
            },
            keyword_score: CategoryScore {
                category: "Keyword Optimization".to_string(),
                score: 7,
                max_score: 10,
                suggestions: vec![],
            },
            content_score: CategoryScore {
                category: "Content Quality".to_string(),
                score: 8,
                max_score: 10,
                suggestions: vec![],
            },
            summary: String::new(),
            detailed_feedback: String::new(),
            is_premium_content: true,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallScore"], 72);
        assert_eq!(json["formattingScore"]["maxScore"], 10);
        assert_eq!(json["isPremiumContent"], true);
    }
}
