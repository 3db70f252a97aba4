use crate::models::level::Level;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

type Record = Map<String, JsonValue>;

/// 读取字符串字段，缺失或类型不符时为空串
fn read_str(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// 与原记录的读取结果不同时才写回
fn write_str(record: &mut Record, key: &str, value: String) {
    if read_str(record, key) != value {
        record.insert(key.to_string(), JsonValue::String(value));
    }
}

fn read_is_correct(record: &Record) -> bool {
    record
        .get("isCorrect")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false)
}

fn read_level(record: &Record) -> Level {
    record
        .get("niveau")
        .and_then(JsonValue::as_str)
        .map(Level::from_bank_label)
        .unwrap_or(Level::Initial)
}

/// 选项
///
/// `record` 保存原始 JSON 对象；写回时只覆盖改动过的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Record", into = "Record")]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
    pub record: Record,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        let text = text.into();
        let mut record = Record::new();
        record.insert("text".to_string(), JsonValue::String(text.clone()));
        record.insert("isCorrect".to_string(), JsonValue::Bool(is_correct));
        Self {
            text,
            is_correct,
            record,
        }
    }
}

impl From<Record> for QuestionOption {
    fn from(record: Record) -> Self {
        Self {
            text: read_str(&record, "text"),
            is_correct: read_is_correct(&record),
            record,
        }
    }
}

impl From<QuestionOption> for Record {
    fn from(option: QuestionOption) -> Self {
        let QuestionOption {
            text,
            is_correct,
            mut record,
        } = option;
        write_str(&mut record, "text", text);
        if read_is_correct(&record) != is_correct {
            record.insert("isCorrect".to_string(), JsonValue::Bool(is_correct));
        }
        record
    }
}

/// 题目
///
/// 题库整体读写，`record` 保存原始对象（键顺序、未使用的字段、null 值都原样保留）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Record", into = "Record")]
pub struct Question {
    pub text: String,
    pub competence: String,
    /// 不认识的等级按 Initial 处理，原文保留在 `record` 中
    pub level: Level,
    pub domain: String,
    pub options: Vec<QuestionOption>,
    pub record: Record,
}

impl TryFrom<Record> for Question {
    type Error = String;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let options = match record.get("options") {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items
                .iter()
                .map(|item| match item {
                    JsonValue::Object(map) => Ok(QuestionOption::from(map.clone())),
                    other => Err(format!("选项应为对象，实际为: {}", other)),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => return Err(format!("options 应为数组，实际为: {}", other)),
        };

        Ok(Self {
            text: read_str(&record, "question"),
            competence: read_str(&record, "competence"),
            level: read_level(&record),
            domain: read_str(&record, "domaine"),
            options,
            record,
        })
    }
}

impl From<Question> for Record {
    fn from(question: Question) -> Self {
        let Question {
            text,
            competence,
            level,
            domain,
            options,
            mut record,
        } = question;

        write_str(&mut record, "question", text);
        write_str(&mut record, "competence", competence);
        if read_level(&record) != level {
            record.insert("niveau".to_string(), JsonValue::from(level.label()));
        }
        write_str(&mut record, "domaine", domain);

        let had_array = matches!(record.get("options"), Some(JsonValue::Array(_)));
        if had_array || !options.is_empty() {
            let items = options
                .into_iter()
                .map(|option| JsonValue::Object(option.into()))
                .collect();
            record.insert("options".to_string(), JsonValue::Array(items));
        }
        record
    }
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        competence: impl Into<String>,
        level: Level,
        domain: impl Into<String>,
        options: Vec<QuestionOption>,
    ) -> Self {
        let (text, competence, domain) = (text.into(), competence.into(), domain.into());
        let mut record = Record::new();
        record.insert("question".to_string(), JsonValue::String(text.clone()));
        record.insert("competence".to_string(), JsonValue::String(competence.clone()));
        record.insert("niveau".to_string(), JsonValue::from(level.label()));
        record.insert("domaine".to_string(), JsonValue::String(domain.clone()));
        let items = options
            .iter()
            .cloned()
            .map(|option| JsonValue::Object(option.into()))
            .collect();
        record.insert("options".to_string(), JsonValue::Array(items));
        Self {
            text,
            competence,
            level,
            domain,
            options,
            record,
        }
    }

    /// 第一个正确选项的下标
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }

    /// 是否存在重复的选项文本
    pub fn has_duplicate_options(&self) -> bool {
        self.options
            .iter()
            .enumerate()
            .any(|(i, a)| self.options[i + 1..].iter().any(|b| b.text == a.text))
    }

    /// 计分：只认非负整数，其余情况（缺失、null、小数）按 1 分
    pub fn points_or_default(&self) -> u32 {
        self.record
            .get("points")
            .and_then(JsonValue::as_u64)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1)
    }

    /// 答题解析，空串视为没有
    pub fn comment(&self) -> Option<&str> {
        self.record
            .get("commentaire")
            .and_then(JsonValue::as_str)
            .filter(|c| !c.trim().is_empty())
    }

    /// 原始等级文本是否为已知等级
    pub fn has_known_level(&self) -> bool {
        self.record
            .get("niveau")
            .and_then(JsonValue::as_str)
            .map(|label| label.parse::<Level>().is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_keeps_unknown_fields() {
        let raw = json!({
            "id": 42,
            "domaine": "DOMAINE 5 : SÉCURITÉ",
            "competence": "5.1 Protéger les appareils",
            "niveau": "Avancé",
            "question": "Comment isoler un serveur exposé ?",
            "options": [
                { "text": "Paramétrer une DMZ", "isCorrect": true, "hint": "réseau" },
                { "text": "Vider la corbeille", "isCorrect": false }
            ],
            "points": 2,
            "commentaire": "Une DMZ isole les services exposés."
        });

        let question: Question = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(question.level, Level::Advanced);
        assert_eq!(question.correct_index(), Some(0));
        assert_eq!(question.points_or_default(), 2);
        assert_eq!(question.comment(), Some("Une DMZ isole les services exposés."));
        assert_eq!(question.record.get("id"), Some(&json!(42)));
        assert_eq!(question.options[0].record.get("hint"), Some(&json!("réseau")));

        let back = serde_json::to_value(&question).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_round_trip_keeps_key_order_and_text() {
        let raw = r#"{"id":1,"domaine":"d","points":null,"question":"q","commentaire":null,"niveau":"Initial","options":[{"isCorrect":false,"text":"A"}],"competence":"c"}"#;

        let question: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&question).unwrap(), raw);
    }

    #[test]
    fn test_null_and_fractional_points_are_lenient() {
        let raw = r#"{"question":"q","competence":"c","niveau":"Initial","domaine":"d","options":[],"points":1.5,"commentaire":null}"#;

        let question: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(question.points_or_default(), 1);
        assert_eq!(question.comment(), None);
        assert_eq!(serde_json::to_string(&question).unwrap(), raw);

        let question: Question =
            serde_json::from_value(json!({ "question": "q", "points": null })).unwrap();
        assert_eq!(question.points_or_default(), 1);
    }

    #[test]
    fn test_edited_option_text_is_patched_in_place() {
        let raw = r#"{"question":"q","options":[{"text":"Éteindre","note":"x","isCorrect":false}]}"#;

        let mut question: Question = serde_json::from_str(raw).unwrap();
        question.options[0].text = "Un pare-feu".to_string();
        assert_eq!(
            serde_json::to_string(&question).unwrap(),
            r#"{"question":"q","options":[{"text":"Un pare-feu","note":"x","isCorrect":false}]}"#
        );
    }

    #[test]
    fn test_unknown_level_is_kept_and_treated_as_initial() {
        let raw = json!({ "question": "q", "niveau": "Expert", "domaine": "d", "options": [] });

        let question: Question = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(question.level, Level::Initial);
        assert!(!question.has_known_level());
        assert_eq!(serde_json::to_value(&question).unwrap(), raw);
    }

    #[test]
    fn test_non_object_option_is_rejected() {
        let result = serde_json::from_value::<Question>(json!({ "question": "q", "options": ["A"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_is_correct_defaults_to_false() {
        let option: QuestionOption = serde_json::from_value(json!({ "text": "A" })).unwrap();
        assert!(!option.is_correct);
        assert_eq!(serde_json::to_value(&option).unwrap(), json!({ "text": "A" }));
    }

    #[test]
    fn test_has_duplicate_options() {
        let mut question = Question::new(
            "q",
            "c",
            Level::Initial,
            "d",
            vec![QuestionOption::new("A", true), QuestionOption::new("B", false)],
        );
        assert!(!question.has_duplicate_options());
        question.options.push(QuestionOption::new("A", false));
        assert!(question.has_duplicate_options());
    }

    #[test]
    fn test_new_question_serializes_every_field() {
        let question = Question::new("q", "c", Level::Advanced, "d", vec![QuestionOption::new("A", true)]);
        assert_eq!(
            serde_json::to_string(&question).unwrap(),
            r#"{"question":"q","competence":"c","niveau":"Avancé","domaine":"d","options":[{"text":"A","isCorrect":true}]}"#
        );
    }
}
