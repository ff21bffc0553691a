//! 检测结果解析 - 业务能力层
//!
//! 把模型返回的逗号分隔列表拆成片段。模型并不总是遵守格式约定，
//! 所以这里只做尽力而为的拆分，从不报错。

use std::sync::LazyLock;

use regex::Regex;

/// 两种哨兵写法："No Defect Found" 和 "Missing Information: No Defect Found"
static SENTINEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:missing\s+information\s*:\s*)?no\s+defect\s+found\s*\.?$")
        .expect("sentinel pattern is valid")
});

const QUOTES: &[char] = &['"', '“', '”'];

/// 是否为"未发现缺陷"哨兵（不区分大小写，忽略其中的引号）
pub fn is_sentinel(text: &str) -> bool {
    let unquoted: String = text.chars().filter(|c| !QUOTES.contains(c)).collect();
    SENTINEL.is_match(unquoted.trim())
}

/// 清理单个候选片段：去掉首尾空白和包裹的引号
pub fn clean_segment(raw: &str) -> &str {
    raw.trim().trim_matches(QUOTES).trim()
}

/// 拆分检测结果
///
/// 按逗号拆分，清理每个候选，丢弃空片段和哨兵。
pub fn parse_segments(completion: &str) -> Vec<String> {
    completion
        .split(',')
        .map(clean_segment)
        .filter(|segment| !segment.is_empty() && !is_sentinel(segment))
        .map(str::to_string)
        .collect()
}
