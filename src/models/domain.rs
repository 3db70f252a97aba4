use phf::phf_map;
use regex::Regex;
use std::sync::OnceLock;

/// DigComp 能力领域
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Domain {
    /// 领域 1：信息与数据
    Information = 1,
    /// 领域 2：沟通与协作
    Communication = 2,
    /// 领域 3：数字内容创作
    ContentCreation = 3,
    /// 领域 4：问题解决
    ProblemSolving = 4,
    /// 领域 5：数字安全
    Safety = 5,
}

/// 题库中的领域名称 → 领域
static DOMAIN_LABELS: phf::Map<&'static str, Domain> = phf_map! {
    "DOMAINE 1 : INFORMATIONS ET DONNÉES" => Domain::Information,
    "DOMAINE 2 : COMMUNICATION ET COLLABORATION" => Domain::Communication,
    "DOMAINE 3 : CRÉATION DE CONTENU" => Domain::ContentCreation,
    "DOMAINE 4 : RÉSOLUTION DE PROBLÈMES" => Domain::ProblemSolving,
    "DOMAINE 5 : SÉCURITÉ" => Domain::Safety,
};

impl Domain {
    /// 按表单顺序排列的全部领域
    pub const ALL: [Domain; 5] = [
        Domain::Information,
        Domain::Communication,
        Domain::ContentCreation,
        Domain::ProblemSolving,
        Domain::Safety,
    ];

    /// 领域编号（1-5）
    pub fn number(self) -> u8 {
        self as u8
    }

    /// 题库中的标准名称
    pub fn label(self) -> &'static str {
        match self {
            Domain::Information => "DOMAINE 1 : INFORMATIONS ET DONNÉES",
            Domain::Communication => "DOMAINE 2 : COMMUNICATION ET COLLABORATION",
            Domain::ContentCreation => "DOMAINE 3 : CRÉATION DE CONTENU",
            Domain::ProblemSolving => "DOMAINE 4 : RÉSOLUTION DE PROBLÈMES",
            Domain::Safety => "DOMAINE 5 : SÉCURITÉ",
        }
    }

    /// 表单中对应的字段 ID
    pub fn form_field(self) -> &'static str {
        match self {
            Domain::Information => "entry.1390360142",
            Domain::Communication => "entry.494398783",
            Domain::ContentCreation => "entry.818563881",
            Domain::ProblemSolving => "entry.1140857471",
            Domain::Safety => "entry.911865149",
        }
    }

    /// 从编号解析领域
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Domain::Information),
            2 => Some(Domain::Communication),
            3 => Some(Domain::ContentCreation),
            4 => Some(Domain::ProblemSolving),
            5 => Some(Domain::Safety),
            _ => None,
        }
    }

    /// 精确匹配题库中的领域名称
    pub fn from_label(label: &str) -> Option<Self> {
        DOMAIN_LABELS.get(label.trim()).copied()
    }

    /// 智能查找领域
    ///
    /// 先精确匹配，再按 "DOMAINE <n>" 前缀匹配，
    /// 兼容 "DOMAINE 3 : CRÉATION DE CONTENU DIGITAL" 这类变体
    pub fn find(label: &str) -> Option<Self> {
        if let Some(domain) = Self::from_label(label) {
            return Some(domain);
        }

        static PREFIX: OnceLock<Regex> = OnceLock::new();
        let re = PREFIX.get_or_init(|| {
            Regex::new(r"(?i)^\s*domaine\s*(\d)\b").expect("领域前缀正则应当合法")
        });

        re.captures(label)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .and_then(Self::from_number)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
