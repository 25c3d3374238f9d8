//! Summary and suggested reply generation
//!
//! Template-based stand-ins for the production LLM: category-keyed reply
//! templates and word-count summarization, as in the original MVP.

/// Words kept when truncating a request into a summary
const SUMMARY_WORDS: usize = 15;

/// Generate a short summary of the request text
pub fn summarize(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= SUMMARY_WORDS {
        return text.trim().to_string();
    }
    let mut summary = words[..SUMMARY_WORDS].join(" ");
    summary.push_str("...");
    summary
}

/// Suggested operator reply for a category
pub fn suggested_reply(category: &str) -> &'static str {
    match category {
        "VPN" => {
            "Здравствуйте! Для решения вашего вопроса с VPN, пожалуйста, попробуйте следующее: \
             проверьте подключение к интернету, перезапустите VPN-клиент. Если проблема \
             сохраняется, сообщите нам."
        }
        "Email" => {
            "Добрый день! Мы получили ваш запрос по электронной почте. Проверьте, пожалуйста, \
             настройки Outlook и попробуйте перезапустить приложение."
        }
        "Hardware" => {
            "Здравствуйте! Ваш запрос принят. Специалист технической поддержки свяжется с вами \
             в ближайшее время для решения проблемы с оборудованием."
        }
        "Software" => {
            "Добрый день! Для установки или настройки программного обеспечения, пожалуйста, \
             уточните версию ОС и название программы. Мы поможем вам в ближайшее время."
        }
        "Access" => {
            "Здравствуйте! Ваш запрос на предоставление доступа принят. После согласования с \
             руководителем мы настроим необходимые права."
        }
        "Network" => {
            "Добрый день! Проверьте подключение к сети, перезагрузите роутер. Если проблема не \
             решена, мы направим специалиста."
        }
        _ => {
            "Здравствуйте! Ваше обращение принято. Мы рассмотрим его и свяжемся с вами в \
             ближайшее время."
        }
    }
}

/// Answer attached to auto-resolved requests
///
/// The auto-reply rules cover requests with a known self-service path;
/// the password instruction is the primary case from the default rule
/// set.
pub fn auto_answer(category: &str) -> &'static str {
    match category {
        "Access" => {
            "Здравствуйте! Для смены пароля воспользуйтесь порталом самообслуживания: \
             нажмите «Забыли пароль?» на странице входа, подтвердите личность по коду из SMS \
             и задайте новый пароль. Если портал недоступен, обратитесь в IT Support."
        }
        other => suggested_reply(other),
    }
}
