//! 동덕여대 단과대학/전공 카탈로그.
//!
//! The backend filters posts by exact major code only; college-level
//! scoping is resolved client-side by expanding a college into its
//! major codes, so the catalog is baked into the client.

pub struct Major {
    pub code: &'static str,
    pub label: &'static str,
}

pub struct College {
    pub name: &'static str,
    pub majors: &'static [Major],
}

pub const COLLEGES: &[College] = &[
    College {
        name: "인문대학",
        majors: &[
            Major { code: "korean-literature", label: "국어국문학전공" },
            Major { code: "korean-history", label: "국사학전공" },
            Major { code: "creative-writing", label: "문예창작전공" },
            Major { code: "english", label: "영어전공" },
            Major { code: "japanese", label: "일어일본학전공" },
            Major { code: "chinese", label: "중어중국학전공" },
            Major { code: "european-studies", label: "유러피언스터디즈전공" },
            Major { code: "korean-culture", label: "한국어문화전공" },
        ],
    },
    College {
        name: "사회과학대학",
        majors: &[
            Major { code: "business-admin", label: "경영학전공" },
            Major { code: "international-business", label: "국제경영학전공" },
            Major { code: "economics", label: "경제학전공" },
            Major { code: "library-info", label: "문헌정보학전공" },
            Major { code: "social-welfare", label: "사회복지학전공" },
            Major { code: "child-studies", label: "아동학전공" },
        ],
    },
    College { name: "경영대학", majors: &[] },
    College {
        name: "자연정보과학대학",
        majors: &[
            Major { code: "food-nutrition", label: "식품영양학전공" },
            Major { code: "health-management", label: "보건관리학전공" },
            Major { code: "applied-chemistry", label: "응용화학전공" },
            Major { code: "cosmetics", label: "화장품학전공" },
            Major { code: "physical-education", label: "체육학전공" },
            Major { code: "computer-science", label: "컴퓨터학전공" },
            Major { code: "info-statistics", label: "정보통계학전공" },
        ],
    },
    College { name: "약학대학", majors: &[] },
    College {
        name: "예술대학",
        majors: &[
            Major { code: "painting", label: "회화전공" },
            Major { code: "digital-craft", label: "디지털공예전공" },
            Major { code: "curator", label: "큐레이터학전공" },
            Major { code: "piano", label: "피아노전공" },
            Major { code: "orchestra", label: "관현악전공" },
            Major { code: "vocal", label: "성악전공" },
        ],
    },
    College {
        name: "디자인이노베이션대학",
        majors: &[
            Major { code: "fashion-design", label: "패션디자인전공" },
            Major { code: "visual-interior-design", label: "시각&실내디자인전공" },
            Major { code: "media-design", label: "미디어디자인전공" },
            Major { code: "fashion-design-night", label: "패션디자인전공(야)" },
        ],
    },
    College {
        name: "공연예술대학",
        majors: &[
            Major { code: "broadcasting", label: "방송연예전공" },
            Major { code: "practical-music", label: "실용음악전공" },
            Major { code: "dance", label: "무용전공" },
            Major { code: "model", label: "모델전공" },
            Major { code: "broadcasting-night", label: "방송연예전공(야)" },
        ],
    },
    College {
        name: "문화지식융합대학",
        majors: &[
            Major { code: "communication-contents", label: "커뮤니케이션콘텐츠전공" },
            Major { code: "hci-science", label: "HCI사이언스전공" },
            Major { code: "data-science", label: "데이터사이언스전공" },
            Major { code: "culture-arts-management", label: "문화예술경영전공" },
            Major { code: "global-mice-fusion", label: "글로벌MICE융합전공" },
            Major { code: "entrepreneurship", label: "앙트러프러너십전공" },
        ],
    },
    College {
        name: "미래인재융합대학",
        majors: &[
            Major { code: "tax-accounting", label: "세무회계학전공" },
            Major { code: "financial-convergence", label: "금융융합경영학전공" },
        ],
    },
    College {
        name: "ARETE 교양대학",
        majors: &[
            Major { code: "liberal-arts", label: "자율전공학부" },
            Major { code: "general-education", label: "교양과정" },
            Major { code: "teaching", label: "교직과정" },
            Major { code: "fashion-marketing", label: "패션마케팅연계전공" },
            Major { code: "global-multicultural", label: "글로벌다문화학연계전공" },
            Major { code: "social-big-data", label: "소셜빅데이터연계전공" },
            Major { code: "lifelong-education", label: "평생교육연계전공" },
        ],
    },
];

/// Flat view over every major of every college.
pub fn all_majors() -> impl Iterator<Item = &'static Major> {
    COLLEGES.iter().flat_map(|c| c.majors.iter())
}

pub fn find_college(name: &str) -> Option<&'static College> {
    COLLEGES.iter().find(|c| c.name == name)
}

/// Major codes belonging to a college; empty when the college is
/// unknown or carries no majors.
pub fn major_codes_of(college_name: &str) -> Vec<&'static str> {
    find_college(college_name)
        .map(|c| c.majors.iter().map(|m| m.code).collect())
        .unwrap_or_default()
}

pub fn major_label(code: &str) -> Option<&'static str> {
    all_majors().find(|m| m.code == code).map(|m| m.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn college_expands_to_its_major_codes() {
        let codes = major_codes_of("미래인재융합대학");
        assert_eq!(codes, vec!["tax-accounting", "financial-convergence"]);
    }

    #[test]
    fn unknown_or_empty_college_expands_to_nothing() {
        assert!(major_codes_of("없는대학").is_empty());
        assert!(major_codes_of("약학대학").is_empty());
    }

    #[test]
    fn major_codes_are_unique() {
        let mut codes: Vec<_> = all_majors().map(|m| m.code).collect();
        let n = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), n);
    }

    #[test]
    fn label_lookup() {
        assert_eq!(major_label("computer-science"), Some("컴퓨터학전공"));
        assert_eq!(major_label("astrology"), None);
    }
}
