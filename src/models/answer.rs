use serde::{Deserialize, Serialize};

/// 作答记录（外部输入，不可信）
///
/// 缺失的 `questionIndex` 视为 0，缺失的 `selectedOption` 视为未作答（-1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    #[serde(rename = "questionIndex", default)]
    pub question_index: i64,
    #[serde(rename = "selectedOption", default = "no_selection")]
    pub selected_option: i64,
}

fn no_selection() -> i64 {
    -1
}

impl AnswerEvent {
    pub fn new(question_index: usize, selected_option: usize) -> Self {
        Self {
            question_index: question_index as i64,
            selected_option: selected_option as i64,
        }
    }

    /// 未选择任何选项
    pub fn unanswered(question_index: usize) -> Self {
        Self {
            question_index: question_index as i64,
            selected_option: no_selection(),
        }
    }

    /// 校验下标，返回 (题目下标, 选项下标)
    ///
    /// 任一下标为负或越界时返回 None
    pub fn resolve(&self, question_count: usize, option_count_of: impl Fn(usize) -> usize) -> Option<(usize, usize)> {
        let question_index = usize::try_from(self.question_index).ok()?;
        if question_index >= question_count {
            return None;
        }
        let selected = usize::try_from(self.selected_option).ok()?;
        if selected >= option_count_of(question_index) {
            return None;
        }
        Some((question_index, selected))
    }
}
