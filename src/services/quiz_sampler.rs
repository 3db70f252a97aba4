//! 抽题服务 - 业务能力层
//!
//! 按 (领域, 能力, 等级) 分组后轮流抽题，保证测验覆盖面

use crate::models::{Level, Question};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// 抽中的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledQuestion {
    /// 在题库中的下标
    pub index: usize,
    /// 选项的展示顺序（值为原始选项下标）
    pub option_order: Vec<usize>,
}

/// 抽取最多 `count` 道题
///
/// - 只保留 `levels` 中的等级，等级文本不认识的题目不参与抽题
/// - 分组打乱后轮流从每组随机取一道未选过的题
/// - 最后整体打乱，并为每道题生成打乱的选项顺序
pub fn sample_quiz<R: Rng + ?Sized>(
    questions: &[Question],
    levels: &[Level],
    count: usize,
    rng: &mut R,
) -> Vec<SampledQuestion> {
    let filtered: Vec<usize> = questions
        .iter()
        .enumerate()
        .filter(|(_, q)| q.has_known_level() && levels.contains(&q.level))
        .map(|(i, _)| i)
        .collect();

    if filtered.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut group_of: HashMap<(&str, &str, Level), usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &index in &filtered {
        let q = &questions[index];
        let key = (q.domain.as_str(), q.competence.as_str(), q.level);
        let slot = *group_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(index);
    }
    groups.shuffle(rng);

    let target = count.min(filtered.len());
    let max_rounds = groups.len() * 100;
    let mut used: HashSet<usize> = HashSet::new();
    let mut selected: Vec<usize> = Vec::with_capacity(target);
    let mut round = 0;

    while selected.len() < target && round <= max_rounds {
        let group = &groups[round % groups.len()];
        let available: Vec<usize> = group.iter().copied().filter(|i| !used.contains(i)).collect();
        if let Some(&pick) = available.choose(rng) {
            used.insert(pick);
            selected.push(pick);
        }
        round += 1;
    }

    selected.shuffle(rng);
    selected
        .into_iter()
        .map(|index| {
            let mut option_order: Vec<usize> = (0..questions[index].options.len()).collect();
            option_order.shuffle(rng);
            SampledQuestion {
                index,
                option_order,
            }
        })
        .collect()
}
