//! 缺陷目录
//!
//! 六种固定的缺陷类型及其定义。定义文本同时用于构建提示词和向用户解释
//! "为什么问这个问题"。

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// 未知缺陷类型时的兜底定义
pub const DEFINITION_NOT_AVAILABLE: &str = "Definition not available.";

static DEFINITIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "lexical_ambiguity" => "Lexical ambiguity occurs when a word has multiple meanings, making its interpretation dependent on the context. It can arise in two forms: (1) when a word has unrelated meanings despite sharing the same spelling and pronunciation, it is called homonym (e.g.,bank as a financial institution vs. bank as the side of a river). These meanings originate from different etymology root (2) when a word has related meanings that stem from a single etymology, it is referred to as Polysemy (e.g.,green referring to the color and to something environmentally friendly)",
    "syntactic_ambiguity" => "Syntactic ambiguity occurs when a given sequence of words can be given more than one grammatical structure, and each has a different meaning. In the terminology of compiler construction, syntactic ambiguity occurs when a sentence has more than one parse.",
    "semantic_ambiguity" => "Semantic ambiguity occurs when a sentence has more than one way of reading it within its context, although it contains no lexical or syntactic ambiguity. Semantic ambiguity can be viewed as ambiguity with respect to the logical form, usually expressed in predicate logic, of a sentence.",
    "pragmatic_ambiguity" => "Pragmatic ambiguity occurs when a sentence has several meanings in the context in which it is uttered. The context comprises the language context, i.e., the sentences uttered before and after, and the context beyond language, i.e., the situation, the background knowledge, and expectations of the speaker or hearer and the writer or reader.",
    "vagueness" => "A statement is considered vague if it admits borderline cases. A requirement is vague if it is not clear how to measure whether the requirement is fulfilled or not.",
    "incompleteness" => "Missing information and lack of details regarding different parts of the feature request.",
};

/// 缺陷类型
///
/// 声明顺序即检测顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectType {
    LexicalAmbiguity,
    SyntacticAmbiguity,
    SemanticAmbiguity,
    PragmaticAmbiguity,
    Vagueness,
    Incompleteness,
}

impl DefectType {
    /// 按检测顺序排列的全部缺陷类型
    pub const ALL: [DefectType; 6] = [
        DefectType::LexicalAmbiguity,
        DefectType::SyntacticAmbiguity,
        DefectType::SemanticAmbiguity,
        DefectType::PragmaticAmbiguity,
        DefectType::Vagueness,
        DefectType::Incompleteness,
    ];

    /// 标识符，例如 `lexical_ambiguity`
    pub fn as_str(self) -> &'static str {
        match self {
            DefectType::LexicalAmbiguity => "lexical_ambiguity",
            DefectType::SyntacticAmbiguity => "syntactic_ambiguity",
            DefectType::SemanticAmbiguity => "semantic_ambiguity",
            DefectType::PragmaticAmbiguity => "pragmatic_ambiguity",
            DefectType::Vagueness => "vagueness",
            DefectType::Incompleteness => "incompleteness",
        }
    }

    /// 展示名称：下划线换成空格，每个单词首字母大写
    pub fn label(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 目录中的定义文本
    pub fn definition(self) -> &'static str {
        DEFINITIONS
            .get(self.as_str())
            .copied()
            .unwrap_or(DEFINITION_NOT_AVAILABLE)
    }

    /// 从标识符解析（不区分大小写）
    pub fn parse(s: &str) -> AppResult<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|defect| defect.as_str() == lower)
            .ok_or_else(|| AppError::InvalidDefectType {
                value: s.to_string(),
            })
    }

    pub fn is_incompleteness(self) -> bool {
        self == DefectType::Incompleteness
    }
}

impl std::str::FromStr for DefectType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DefectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 按标识符查定义（不区分大小写），未知标识符返回兜底文本
pub fn definition_for(defect_type: &str) -> &'static str {
    DEFINITIONS
        .get(defect_type.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFINITION_NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let ids: Vec<&str> = DefectType::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "lexical_ambiguity",
                "syntactic_ambiguity",
                "semantic_ambiguity",
                "pragmatic_ambiguity",
                "vagueness",
                "incompleteness",
            ]
        );
    }

    #[test]
    fn test_definition_for_is_case_insensitive() {
        assert_eq!(
            definition_for("LEXICAL_AMBIGUITY"),
            definition_for("lexical_ambiguity")
        );
        assert_ne!(definition_for("Lexical_Ambiguity"), DEFINITION_NOT_AVAILABLE);
    }

    #[test]
    fn test_definition_for_unknown() {
        assert_eq!(definition_for("typo"), "Definition not available.");
        assert_eq!(definition_for(""), "Definition not available.");
    }

    #[test]
    fn test_every_defect_has_definition() {
        for defect in DefectType::ALL {
            assert_ne!(defect.definition(), DEFINITION_NOT_AVAILABLE);
            assert_eq!(defect.definition(), definition_for(defect.as_str()));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(DefectType::LexicalAmbiguity.label(), "Lexical Ambiguity");
        assert_eq!(DefectType::Vagueness.label(), "Vagueness");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            DefectType::parse("Pragmatic_Ambiguity").unwrap(),
            DefectType::PragmaticAmbiguity
        );
        assert_eq!(
            "incompleteness".parse::<DefectType>().unwrap(),
            DefectType::Incompleteness
        );
        assert!(matches!(
            DefectType::parse("ambiguity"),
            Err(AppError::InvalidDefectType { .. })
        ));
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&DefectType::SemanticAmbiguity).unwrap();
        assert_eq!(json, "\"semantic_ambiguity\"");
    }
}
