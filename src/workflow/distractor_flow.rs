//! 干扰项替换流程 - 流程层
//!
//! 核心职责：定义"一道题"的替换流程
//!
//! 流程顺序：
//! 1. 找出需要替换的错误选项（判定服务）
//! 2. 选出候选列表并打乱（选择服务 + 注入的随机源）
//! 3. 按原顺序逐个替换，跳过会造成重复的候选

use crate::models::Question;
use crate::services::{DistractorClassifier, PhraseBlocklist, ReplacementTable};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// 单道题的替换结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// 命中的候选分组（没有劣质干扰项时为 None）
    pub bucket: Option<String>,
    /// 被判定为劣质的选项数
    pub bad_found: usize,
    /// 实际替换的选项数
    pub replaced: usize,
    /// 未能替换、保留原文的选项下标
    pub left_in_place: Vec<usize>,
}

impl RewriteOutcome {
    /// 该题是否包含劣质干扰项
    pub fn touched(&self) -> bool {
        self.bad_found > 0
    }
}

/// 未能替换的干扰项，供人工复核
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leftover {
    pub question_index: usize,
    pub option_index: usize,
    pub question: String,
    pub text: String,
}

/// 整个题库的替换统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub questions_total: usize,
    pub questions_touched: usize,
    pub options_replaced: usize,
    pub leftovers: Vec<Leftover>,
}

/// 干扰项替换流程
///
/// - 不持有题库，只处理传入的题目
/// - 随机源由调用方提供，测试可传入固定种子
pub struct DistractorFlow<C = PhraseBlocklist> {
    classifier: C,
    table: ReplacementTable,
}

impl DistractorFlow<PhraseBlocklist> {
    /// 使用默认黑名单和内置规则表
    pub fn new() -> Self {
        Self::with_parts(PhraseBlocklist::default(), ReplacementTable::default())
    }
}

impl Default for DistractorFlow<PhraseBlocklist> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DistractorClassifier> DistractorFlow<C> {
    pub fn with_parts(classifier: C, table: ReplacementTable) -> Self {
        Self { classifier, table }
    }

    /// 替换一道题中的劣质干扰项（原地修改）
    pub fn rewrite_question<R: Rng + ?Sized>(
        &self,
        question: &mut Question,
        rng: &mut R,
    ) -> RewriteOutcome {
        let bad: Vec<usize> = question
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| !option.is_correct && self.classifier.is_bad(&option.text))
            .map(|(index, _)| index)
            .collect();

        if bad.is_empty() {
            return RewriteOutcome::default();
        }

        let selection = self.table.select(question);
        let mut candidates = selection.candidates.to_vec();
        candidates.shuffle(rng);

        let mut outcome = RewriteOutcome {
            bucket: Some(selection.bucket.to_string()),
            bad_found: bad.len(),
            ..Default::default()
        };

        // 第 i 个劣质选项只尝试第 i 个候选，候选即使被跳过也算用掉
        for (slot, &option_index) in bad.iter().enumerate() {
            match candidates.get(slot) {
                Some(candidate) if !question.options.iter().any(|o| &o.text == candidate) => {
                    debug!(
                        "替换干扰项: '{}' → '{}'",
                        question.options[option_index].text, candidate
                    );
                    question.options[option_index].text = candidate.clone();
                    outcome.replaced += 1;
                }
                _ => outcome.left_in_place.push(option_index),
            }
        }

        outcome
    }

    /// 依次处理整个题库
    pub fn rewrite_all<R: Rng + ?Sized>(
        &self,
        questions: &mut [Question],
        rng: &mut R,
    ) -> RewriteReport {
        let mut report = RewriteReport {
            questions_total: questions.len(),
            ..Default::default()
        };

        for (question_index, question) in questions.iter_mut().enumerate() {
            let outcome = self.rewrite_question(question, rng);
            if !outcome.touched() {
                continue;
            }

            debug!(
                "[题目 {}] 分组 {:?}: 劣质 {} 个，替换 {} 个",
                question_index + 1,
                outcome.bucket,
                outcome.bad_found,
                outcome.replaced
            );

            report.questions_touched += 1;
            report.options_replaced += outcome.replaced;
            report
                .leftovers
                .extend(outcome.left_in_place.iter().map(|&option_index| Leftover {
                    question_index,
                    option_index,
                    question: question.text.clone(),
                    text: question.options[option_index].text.clone(),
                }));
        }

        report
    }
}
