//! Keyword classification for inbound requests
//!
//! Language detection, category and priority classification, and
//! department routing. Keyword tables stand in for the production NLP
//! model; they cover Russian and Kazakh request text.

use shared::models::Priority;

/// Request categories
pub const CATEGORIES: [&str; 7] = [
    "VPN", "Email", "Hardware", "Software", "Access", "Network", "Other",
];

/// Detect whether text is Russian or Kazakh
///
/// Kazakh-specific letters take precedence; anything else containing
/// Cyrillic (or nothing recognizable) defaults to Russian.
pub fn detect_language(text: &str) -> &'static str {
    const KZ_CHARS: &str = "әғқңөұүһіӘҒҚҢӨҰҮҺІ";
    if text.chars().any(|c| KZ_CHARS.contains(c)) {
        return "kz";
    }
    "ru"
}

/// Classify the request category by keyword score
///
/// Each category counts how many of its keywords occur in the text; the
/// highest score wins, `Other` when nothing matches. Ties resolve in
/// table order, so earlier categories take precedence.
pub fn classify_category(text: &str) -> &'static str {
    const KEYWORDS: [(&str, &[&str]); 6] = [
        ("VPN", &["vpn", "впн", "подключ", "қосыл", "туннел"]),
        ("Email", &["почт", "email", "outlook", "пошта", "хат", "письмо"]),
        (
            "Hardware",
            &["принтер", "компьютер", "мышь", "клавиатур", "монитор", "пернетақта"],
        ),
        (
            "Software",
            &["программ", "прилож", "софт", "бағдарлама", "қосымша", "установ", "орнату"],
        ),
        (
            "Access",
            &["доступ", "рұқсат", "қатынау", "пароль", "құпия", "права", "папк", "қалта"],
        ),
        (
            "Network",
            &["интернет", "сеть", "желі", "wifi", "вай-фай", "подключен", "байланыс"],
        ),
    ];

    let haystack = text.to_lowercase();
    let mut best: (&'static str, usize) = ("Other", 0);
    for (category, words) in KEYWORDS {
        let score = words.iter().filter(|w| haystack.contains(**w)).count();
        if score > best.1 {
            best = (category, score);
        }
    }
    best.0
}

/// Classify request priority by indicator keywords
///
/// Critical indicators dominate, then high, then low; anything without
/// an indicator lands on medium.
pub fn classify_priority(text: &str) -> Priority {
    const CRITICAL: &[&str] = &[
        "срочно", "критично", "не работает", "сломал", "авария", "шұғыл",
        "жұмыс істемейді", "апат",
    ];
    const HIGH: &[&str] = &[
        "важно", "проблема", "ошибка", "маңызды", "мәселе", "қате", "помогите",
        "көмектесіңіз",
    ];
    const LOW: &[&str] = &["вопрос", "как", "можно", "сұрақ", "қалай", "болады ма"];

    let haystack = text.to_lowercase();
    if CRITICAL.iter().any(|w| haystack.contains(w)) {
        return Priority::Critical;
    }
    if HIGH.iter().any(|w| haystack.contains(w)) {
        return Priority::High;
    }
    if LOW.iter().any(|w| haystack.contains(w)) {
        return Priority::Low;
    }
    Priority::Medium
}

/// Route a category to its owning department
pub fn department_for(category: &str) -> &'static str {
    match category {
        "VPN" => "IT Security",
        "Email" => "IT Support",
        "Hardware" => "IT Support",
        "Software" => "IT Support",
        "Access" => "IT Security",
        "Network" => "IT Infrastructure",
        _ => "General Support",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kazakh_letters_detected() {
        assert_eq!(detect_language("интернет қосылмайды"), "kz");
        assert_eq!(detect_language("не работает интернет"), "ru");
        assert_eq!(detect_language("hello"), "ru");
    }

    #[test]
    fn category_by_best_score() {
        assert_eq!(classify_category("не работает vpn подключение"), "VPN");
        assert_eq!(classify_category("сломался принтер"), "Hardware");
        assert_eq!(classify_category("хочу в отпуск"), "Other");
    }

    #[test]
    fn priority_indicators() {
        assert_eq!(classify_priority("срочно! всё сломалось"), Priority::Critical);
        assert_eq!(classify_priority("есть проблема с почтой"), Priority::High);
        assert_eq!(classify_priority("вопрос: как настроить"), Priority::Low);
        assert_eq!(classify_priority("просьба обновить данные"), Priority::Medium);
    }

    #[test]
    fn departments_cover_all_categories() {
        for category in CATEGORIES {
            assert!(!department_for(category).is_empty());
        }
        assert_eq!(department_for("Other"), "General Support");
    }
}
