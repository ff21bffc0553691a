//! 提示词构建 - 业务能力层
//!
//! 纯函数，相同输入得到相同输出。模板要求模型只输出列表或哨兵文本，
//! 但这只是对外部服务的约定，解析端（`segment_parser`）不能依赖它。

use crate::error::AppResult;
use crate::models::DefectType;

/// 标题缺省时的占位文本
pub const TITLE_PLACEHOLDER: &str = "N/A";

/// 需求编号占位（需求没有编号）
const REQUEST_NUMBER: &str = "na";

/// 构建缺陷检测提示词
///
/// # 参数
/// - `defect_type`: 缺陷类型
/// - `request_body`: 需求正文
/// - `request_title`: 需求标题（可选，缺省为 "N/A"）
pub fn build_detection_prompt(
    defect_type: DefectType,
    request_body: &str,
    request_title: Option<&str>,
) -> String {
    let title = request_title.unwrap_or(TITLE_PLACEHOLDER);
    let statement = format!(
        "Statement: Request Number - {} | Request Title - {} | Request Description - {}",
        REQUEST_NUMBER, title, request_body
    );

    let mut prompt = format!(
        "Definition: {}: {}\n\n",
        defect_type.as_str(),
        defect_type.definition()
    );

    if defect_type.is_incompleteness() {
        prompt.push_str(&format!(
            r#"You are a software analyst specializing in incompleteness detection in GitHub feature requests.
Carefully analyze the given feature request statement and determine whether it is incomplete. If the request is incomplete, identify the missing information required for completeness. Include all the missing information in a single comma-separated list. Ensure that every element of the list is enclosed in quotation marks.
If the request statement is complete, return Missing Information: No Defect Found.
Do not provide any explanations, reasoning, or additional text that is not from the given statement.

{}"#,
            statement
        ));
    } else {
        let subclass = defect_type.label();
        prompt.push_str(&format!(
            r#"You are a software analyst specializing in ambiguity detection in GitHub feature requests.
Carefully read the given statement. Extract and list any text segments containing {subclass} ambiguity from the statement. Multiple segments may contain {subclass} ambiguity; include all of them in a single comma-separated list. Make sure to have all elements of the list in quotation marks.
If no segments are found, return No Defect Found. Do not give any explanations, reasoning, or any extra text that is not from the given statement.

{statement}"#
        ));
    }

    prompt
}

/// 以字符串形式的缺陷类型构建检测提示词
///
/// 不在目录中的类型返回 `InvalidDefectType`。
pub fn build_detection_prompt_for(
    defect_type: &str,
    request_body: &str,
    request_title: Option<&str>,
) -> AppResult<String> {
    let defect_type = DefectType::parse(defect_type)?;
    Ok(build_detection_prompt(
        defect_type,
        request_body,
        request_title,
    ))
}

/// 构建澄清问题提示词
pub fn build_question_prompt(segment: &str, defect_type: DefectType, request_body: &str) -> String {
    format!(
        r#"You are a software requirements analyst. Given the following segment from a GitHub feature request, generate a clarifying question to help the requester remove the {}.
Segment: "{}"
Original Request: "{}"

Only output the question. Do not explain or elaborate."#,
        defect_type.as_str(),
        segment,
        request_body
    )
}
