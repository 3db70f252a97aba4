//! 成绩汇总服务 - 业务能力层
//!
//! 把作答记录按领域汇总为百分比，并计算总分

use crate::models::{AnswerEvent, Question};
use std::collections::BTreeMap;
use tracing::debug;

/// 领域名称 → 百分比（保留一位小数）
pub type DomainResults = BTreeMap<String, f64>;

/// 单个领域的累计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainScore {
    pub correct: usize,
    pub total: usize,
}

impl DomainScore {
    /// 正确率，没有作答时为 0
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round1(self.correct as f64 / self.total as f64 * 100.0)
    }
}

/// 四舍五入到一位小数
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 按领域累计作答，非法记录直接跳过
pub fn tally_domains(answers: &[AnswerEvent], questions: &[Question]) -> BTreeMap<String, DomainScore> {
    let mut scores: BTreeMap<String, DomainScore> = BTreeMap::new();

    for answer in answers {
        let Some((question_index, selected)) =
            answer.resolve(questions.len(), |i| questions[i].options.len())
        else {
            debug!("跳过非法作答记录: {:?}", answer);
            continue;
        };

        let question = &questions[question_index];
        let score = scores.entry(question.domain.clone()).or_default();
        score.total += 1;
        if question.options[selected].is_correct {
            score.correct += 1;
        }
    }

    scores
}

/// 计算每个领域的百分比
pub fn aggregate_domains(answers: &[AnswerEvent], questions: &[Question]) -> DomainResults {
    tally_domains(answers, questions)
        .into_iter()
        .map(|(domain, score)| (domain, score.percentage()))
        .collect()
}

/// 总分：各领域百分比的算术平均（不按作答数加权）
pub fn global_score(results: &DomainResults) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results.values().sum();
    round1(total / results.len() as f64)
}
