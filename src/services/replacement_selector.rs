//! 替换候选选择服务 - 业务能力层
//!
//! 按声明顺序逐条检查规则，第一条命中的规则决定候选列表；
//! 全部未命中时按难度等级选择通用候选。

use crate::error::{AppError, AppResult, DataError};
use crate::models::{Level, Question};
use crate::services::replacement_catalog;
use serde::Deserialize;
use std::path::Path;

/// 规则匹配时看到的题目视图（文本已转小写）
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub text: String,
    pub competence: String,
    pub level: Level,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            text: question.text.to_lowercase(),
            competence: question.competence.to_lowercase(),
            level: question.level,
        }
    }
}

/// 可对上下文求值的条件
pub trait Matches<C: ?Sized> {
    fn matches(&self, ctx: &C) -> bool;
}

/// 按顺序求值，返回第一个命中的条目
pub fn first_match<'a, R, C>(rules: &'a [R], ctx: &C) -> Option<&'a R>
where
    R: Matches<C>,
    C: ?Sized,
{
    rules.iter().find(|rule| rule.matches(ctx))
}

/// 规则条件
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// 题干包含关键词
    QuestionContains(String),
    /// 能力标签包含关键词
    CompetenceContains(String),
    /// 难度等级相同
    LevelIs(Level),
    /// 全部满足
    All(Vec<Predicate>),
    /// 任一满足
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn question(keyword: &str) -> Self {
        Predicate::QuestionContains(keyword.to_lowercase())
    }

    pub fn competence(keyword: &str) -> Self {
        Predicate::CompetenceContains(keyword.to_lowercase())
    }

    /// 关键词统一转小写（TOML 中的写法可能带大写）
    fn normalized(self) -> Self {
        match self {
            Predicate::QuestionContains(k) => Predicate::QuestionContains(k.to_lowercase()),
            Predicate::CompetenceContains(k) => Predicate::CompetenceContains(k.to_lowercase()),
            Predicate::All(ps) => Predicate::All(ps.into_iter().map(Self::normalized).collect()),
            Predicate::Any(ps) => Predicate::Any(ps.into_iter().map(Self::normalized).collect()),
            level @ Predicate::LevelIs(_) => level,
        }
    }
}

impl Matches<QuestionView> for Predicate {
    fn matches(&self, view: &QuestionView) -> bool {
        match self {
            Predicate::QuestionContains(keyword) => view.text.contains(keyword.as_str()),
            Predicate::CompetenceContains(keyword) => view.competence.contains(keyword.as_str()),
            Predicate::LevelIs(level) => view.level == *level,
            Predicate::All(ps) => ps.iter().all(|p| p.matches(view)),
            Predicate::Any(ps) => ps.iter().any(|p| p.matches(view)),
        }
    }
}

/// 一条替换规则：条件 + 候选列表
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub name: String,
    pub when: Predicate,
    pub candidates: Vec<String>,
}

impl Rule {
    pub fn new(name: &str, when: Predicate, candidates: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            when,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Matches<QuestionView> for Rule {
    fn matches(&self, view: &QuestionView) -> bool {
        self.when.matches(view)
    }
}

/// 按难度等级划分的通用候选
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelBuckets {
    pub initial: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

impl LevelBuckets {
    pub fn for_level(&self, level: Level) -> &[String] {
        match level {
            Level::Initial => &self.initial,
            Level::Intermediate => &self.intermediate,
            Level::Advanced => &self.advanced,
        }
    }
}

impl Default for LevelBuckets {
    fn default() -> Self {
        replacement_catalog::default_level_buckets()
    }
}

/// 选择结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    /// 命中的规则名，或 "niveau:<等级>"
    pub bucket: &'a str,
    pub candidates: &'a [String],
}

/// 替换规则表
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplacementTable {
    #[serde(default)]
    rules: Vec<Rule>,
    #[serde(default)]
    levels: LevelBuckets,
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self {
            rules: replacement_catalog::default_rules(),
            levels: LevelBuckets::default(),
        }
    }
}

impl ReplacementTable {
    pub fn new(rules: Vec<Rule>, levels: LevelBuckets) -> Self {
        Self { rules, levels }
    }

    /// 从 TOML 文本加载规则表
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let table: ReplacementTable =
            toml::from_str(content).map_err(|e| AppError::toml_parse_failed(origin, e))?;
        table.validated()
    }

    /// 从 TOML 文件加载规则表
    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(&display, e))?;
        Self::from_toml_str(&content, &display)
    }

    fn validated(self) -> AppResult<Self> {
        if let Some(rule) = self.rules.iter().find(|r| r.candidates.is_empty()) {
            return Err(DataError::InvalidRule(format!("规则 '{}' 没有候选项", rule.name)).into());
        }
        for level in Level::ALL {
            if self.levels.for_level(level).is_empty() {
                return Err(DataError::InvalidRule(format!("等级 {} 没有通用候选项", level)).into());
            }
        }
        Ok(Self {
            rules: self
                .rules
                .into_iter()
                .map(|r| Rule {
                    when: r.when.normalized(),
                    ..r
                })
                .collect(),
            levels: self.levels,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 为题目选择候选列表，每道题恰好返回一个分组
    pub fn select(&self, question: &Question) -> Selection<'_> {
        let view = QuestionView::from(question);
        match first_match(&self.rules, &view) {
            Some(rule) => Selection {
                bucket: &rule.name,
                candidates: &rule.candidates,
            },
            None => Selection {
                bucket: level_bucket_name(question.level),
                candidates: self.levels.for_level(question.level),
            },
        }
    }
}

fn level_bucket_name(level: Level) -> &'static str {
    match level {
        Level::Initial => "niveau:initial",
        Level::Intermediate => "niveau:intermediaire",
        Level::Advanced => "niveau:avance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionOption;

    fn question(text: &str, competence: &str, level: Level) -> Question {
        Question::new(
            text,
            competence,
            level,
            "DOMAINE 1 : INFORMATIONS ET DONNÉES",
            vec![QuestionOption::new("A", true)],
        )
    }

    #[test]
    fn test_unmatched_advanced_question_uses_advanced_bucket() {
        let table = ReplacementTable::default();
        let selection = table.select(&question(
            "Quelle architecture protège un serveur ?",
            "4.1 Résoudre",
            Level::Advanced,
        ));
        assert_eq!(selection.bucket, "niveau:avance");
        assert_eq!(
            selection.candidates,
            &[
                "Configurer un reverse proxy",
                "Auditer les journaux système",
                "Déployer un système IDS",
                "Paramétrer une DMZ",
            ]
        );
    }

    #[test]
    fn test_unmatched_questions_fall_back_by_level() {
        let table = ReplacementTable::default();
        let initial = table.select(&question("Zzz ?", "", Level::Initial));
        let intermediate = table.select(&question("Zzz ?", "", Level::Intermediate));
        assert_eq!(initial.candidates[0], "Accéder aux paramètres");
        assert_eq!(intermediate.candidates[0], "Paramétrer le pare-feu");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let table = ReplacementTable::default();
        let selection = table.select(&question(
            "Quelle touche pour écrire une MAJUSCULE ?",
            "",
            Level::Initial,
        ));
        assert_eq!(selection.bucket, "majuscule");
    }

    #[test]
    fn test_combined_keywords_need_all_parts() {
        let table = ReplacementTable::default();
        // "mot" seul ne suffit pas, il faut aussi "clé"
        let only_mot = table.select(&question("Un mot rare", "", Level::Initial));
        assert_eq!(only_mot.bucket, "niveau:initial");
        let mot_cle = table.select(&question("Où saisir un mot-clé ?", "", Level::Initial));
        assert_eq!(mot_cle.bucket, "recherche_mots_cles");
    }

    #[test]
    fn test_competence_field_is_checked() {
        let table = ReplacementTable::default();
        let selection = table.select(&question(
            "Vous tapez votre texte, que faire ?",
            "Touche Entrée",
            Level::Initial,
        ));
        assert_eq!(selection.bucket, "validation_saisie");
    }

    #[test]
    fn test_earlier_rule_wins() {
        // "email" est capté par la règle des pièces jointes avant celle du logo
        let table = ReplacementTable::default();
        let selection = table.select(&question(
            "Quel logo représente l'email ?",
            "",
            Level::Initial,
        ));
        assert_eq!(selection.bucket, "pieces_jointes");
    }

    #[test]
    fn test_first_match_combinator_respects_order() {
        let rules = vec![
            Rule::new("a", Predicate::question("x"), &["1"]),
            Rule::new("b", Predicate::question("x"), &["2"]),
        ];
        let view = QuestionView::from(&question("x", "", Level::Initial));
        assert_eq!(first_match(&rules, &view).map(|r| r.name.as_str()), Some("a"));
        let miss = QuestionView::from(&question("y", "", Level::Initial));
        assert!(first_match(&rules, &miss).is_none());
    }

    #[test]
    fn test_table_from_toml() {
        let content = r#"
[[rules]]
name = "imprimante"
candidates = ["Changer la cartouche", "Vérifier le bac papier"]

[[rules.when.any]]
question_contains = "IMPRIMANTE"

[[rules.when.any]]
all = [{ competence_contains = "matériel" }, { level_is = "Avancé" }]

[levels]
initial = ["i"]
intermediate = ["m"]
advanced = ["a"]
"#;
        let table = ReplacementTable::from_toml_str(content, "rules.toml").unwrap();
        assert_eq!(table.rules().len(), 1);

        let by_text = table.select(&question("Mon imprimante bloque", "", Level::Initial));
        assert_eq!(by_text.bucket, "imprimante");
        let by_competence = table.select(&question("?", "Matériel", Level::Advanced));
        assert_eq!(by_competence.bucket, "imprimante");
        let fallback = table.select(&question("?", "Matériel", Level::Initial));
        assert_eq!(fallback.candidates, &["i".to_string()]);
    }

    #[test]
    fn test_toml_without_levels_uses_builtin_buckets() {
        let table = ReplacementTable::from_toml_str("rules = []", "rules.toml").unwrap();
        let selection = table.select(&question("?", "", Level::Advanced));
        assert_eq!(selection.candidates.len(), 4);
    }

    #[test]
    fn test_rule_without_candidates_is_rejected() {
        let content = r#"
[[rules]]
name = "vide"
candidates = []
when = { question_contains = "x" }
"#;
        let err = ReplacementTable::from_toml_str(content, "rules.toml").unwrap_err();
        assert!(matches!(err, AppError::Data(DataError::InvalidRule(_))));
    }
}
