/// 试卷枚举
///
/// A-Level Politics 固定的三个科目方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Paper {
    /// 英国政府与政治
    #[serde(rename = "UK Government and Politics")]
    UkGovernmentAndPolitics,
    /// 美国与比较政治
    #[serde(rename = "US and Comparative Politics")]
    UsAndComparativePolitics,
    /// 政治思想
    #[serde(rename = "Political Ideas")]
    PoliticalIdeas,
}

/// 所有合法的试卷
pub const ALL_PAPERS: [Paper; 3] = [
    Paper::UkGovernmentAndPolitics,
    Paper::UsAndComparativePolitics,
    Paper::PoliticalIdeas,
];

impl Paper {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Paper::UkGovernmentAndPolitics => "UK Government and Politics",
            Paper::UsAndComparativePolitics => "US and Comparative Politics",
            Paper::PoliticalIdeas => "Political Ideas",
        }
    }

    /// 从字符串解析试卷（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UK Government and Politics" => Some(Paper::UkGovernmentAndPolitics),
            "US and Comparative Politics" => Some(Paper::UsAndComparativePolitics),
            "Political Ideas" => Some(Paper::PoliticalIdeas),
            _ => None,
        }
    }

    /// 该试卷允许的题型集合
    ///
    /// paper × questionType 是联合约束：题型只有在所属试卷的上下文里才合法。
    /// 只有美国与比较政治卷包含比较类变体。
    pub fn question_types(self) -> &'static [QuestionType] {
        match self {
            Paper::UkGovernmentAndPolitics | Paper::PoliticalIdeas => &[
                QuestionType::NineMarker,
                QuestionType::ExtractQuestion,
                QuestionType::Essay,
            ],
            Paper::UsAndComparativePolitics => &[
                QuestionType::NineMarker,
                QuestionType::ComparativeNineMarker,
                QuestionType::ExtractQuestion,
                QuestionType::ComparativeEssay,
            ],
        }
    }

    /// 判断题型在该试卷下是否合法
    pub fn allows(self, question_type: QuestionType) -> bool {
        self.question_types().contains(&question_type)
    }

    /// 所有合法试卷的名称列表（用于校验错误的上下文数据）
    pub fn valid_names() -> Vec<String> {
        ALL_PAPERS.iter().map(|p| p.name().to_string()).collect()
    }
}

impl std::fmt::Display for Paper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    /// 9 分分析题
    #[serde(rename = "9-marker")]
    NineMarker,
    /// 比较类 9 分题
    #[serde(rename = "Comparative 9-marker")]
    ComparativeNineMarker,
    /// 材料分析题
    #[serde(rename = "Extract question")]
    ExtractQuestion,
    /// 论述题
    #[serde(rename = "Essay")]
    Essay,
    /// 比较类论述题
    #[serde(rename = "Comparative essay")]
    ComparativeEssay,
}

impl QuestionType {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::NineMarker => "9-marker",
            QuestionType::ComparativeNineMarker => "Comparative 9-marker",
            QuestionType::ExtractQuestion => "Extract question",
            QuestionType::Essay => "Essay",
            QuestionType::ComparativeEssay => "Comparative essay",
        }
    }

    /// 从字符串解析题型（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "9-marker" => Some(QuestionType::NineMarker),
            "Comparative 9-marker" => Some(QuestionType::ComparativeNineMarker),
            "Extract question" => Some(QuestionType::ExtractQuestion),
            "Essay" => Some(QuestionType::Essay),
            "Comparative essay" => Some(QuestionType::ComparativeEssay),
            _ => None,
        }
    }

    /// 该题型是否要求提供材料文本
    pub fn requires_extract(self) -> bool {
        matches!(self, QuestionType::ExtractQuestion)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_from_str_exact() {
        assert_eq!(
            Paper::from_str("UK Government and Politics"),
            Some(Paper::UkGovernmentAndPolitics)
        );
        assert_eq!(Paper::from_str("Political Ideas"), Some(Paper::PoliticalIdeas));
        // 不做模糊匹配
        assert_eq!(Paper::from_str("uk government and politics"), None);
        assert_eq!(Paper::from_str("Paper 1"), None);
    }

    #[test]
    fn test_comparative_types_only_on_us_paper() {
        assert!(Paper::UsAndComparativePolitics.allows(QuestionType::ComparativeEssay));
        assert!(Paper::UsAndComparativePolitics.allows(QuestionType::ComparativeNineMarker));
        assert!(!Paper::UkGovernmentAndPolitics.allows(QuestionType::ComparativeEssay));
        assert!(!Paper::PoliticalIdeas.allows(QuestionType::ComparativeNineMarker));
    }

    #[test]
    fn test_us_paper_has_no_plain_essay() {
        // 美国卷的论述题只有比较类变体
        assert!(!Paper::UsAndComparativePolitics.allows(QuestionType::Essay));
        assert!(Paper::UsAndComparativePolitics.allows(QuestionType::NineMarker));
    }

    #[test]
    fn test_question_type_round_trip() {
        for qt in [
            QuestionType::NineMarker,
            QuestionType::ComparativeNineMarker,
            QuestionType::ExtractQuestion,
            QuestionType::Essay,
            QuestionType::ComparativeEssay,
        ] {
            assert_eq!(QuestionType::from_str(qt.name()), Some(qt));
        }
    }

    #[test]
    fn test_requires_extract() {
        assert!(QuestionType::ExtractQuestion.requires_extract());
        assert!(!QuestionType::NineMarker.requires_extract());
        assert!(!QuestionType::Essay.requires_extract());
    }
}
