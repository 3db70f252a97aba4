//! 干扰项判定服务 - 业务能力层
//!
//! 只负责"判断一个干扰项是否需要替换"，不关心题目和流程

/// 干扰项判定能力
///
/// 调用方只依赖这个 trait，可以替换为更智能的判定实现
pub trait DistractorClassifier {
    /// 该选项文本是否为需要替换的劣质干扰项
    fn is_bad(&self, text: &str) -> bool;
}

/// 默认黑名单：与题目无关、明显荒谬的"万能"操作
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "éteindre",
    "redémarrer l'appareil plusieurs fois",
    "redémarrer l'unité centrale",
    "attendre que le problème se résolve",
    "débrancher tous les câbles",
    "appuyer sur toutes les touches",
    "fermer toutes les fenêtres",
    "demander de l'aide à quelqu'un",
    "utiliser un autre appareil",
    "revenir à l'étape précédente",
    "changer les paramètres au hasard",
    "vider la corbeille",
    "attendre quelques minutes",
    "faire une recherche sur internet",
    "consulter le manuel",
    "appeler le support",
    "photocopieuse laser",
    "câble d'alimentation secteur",
    "l'ajustement des paramètres",
    "ajuster les paramètres de synchronisation",
    "vider le cache dns du terminal",
    "changer les paramètres",
    "attendre l'exécution",
];

/// 基于短语黑名单的判定（忽略大小写的子串匹配）
#[derive(Debug, Clone)]
pub struct PhraseBlocklist {
    phrases: Vec<String>,
}

impl PhraseBlocklist {
    /// 使用自定义短语创建
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for PhraseBlocklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKLIST)
    }
}

impl DistractorClassifier for PhraseBlocklist {
    fn is_bad(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.phrases.iter().any(|phrase| text.contains(phrase.as_str()))
    }
}
