//! Fixed user-facing fallback messages.
//!
//! Every failure path of the pipeline resolves to one of these strings; the
//! caller never sees an error. Escalation contacts are application-owned
//! literals, deliberately not configurable.

/// Question exceeded the configured maximum length.
pub fn length_exceeded(max_len: usize) -> String {
    format!(
        "📝 Вопрос слишком длинный. Пожалуйста, сформулируйте короче (до {} символов).",
        max_len
    )
}

/// Question shorter than the configured minimum after trimming.
pub const TOO_SHORT: &str =
    "❓ Слишком короткий вопрос. Задайте конкретный вопрос о поступлении.";

/// Dangerous pattern detected on an off-topic question.
pub const REFUSAL: &str = "Я отвечаю только на вопросы о поступлении в МФТИ.\n\n\
Не могу выполнять задания, игры или отвечать на запросы не по теме.";

/// Off-topic but harmless question: redirect to the supported subtopics.
pub const SCOPE_REDIRECT: &str = "Я специализируюсь на вопросах поступления в МФТИ.\n\n\
Могу помочь с:\n\
• Подачей документов и сроками\n\
• Вступительными испытаниями\n\
• Выбором кафедр и программ\n\
• Требованиями к поступающим\n\
• Процедурами зачисления\n\n\
Задайте вопрос по этим темам!";

/// The knowledge index for the requested level is missing on disk.
pub const INDEX_UNAVAILABLE: &str =
    "Произошла ошибка загрузки базы знаний. Обратитесь к @ATKot.";

/// Upstream model call failed during retrieval or generation.
pub const TECHNICAL_ERROR: &str =
    "Произошла ошибка при обработке запроса. Обратитесь к @ATKot при технической ошибке.";

/// Generated answer contained profanity (prompt leakage or model failure).
pub const UNSAFE_ANSWER: &str =
    "Извините, я не могу предоставить такой ответ. Обратитесь к Юлии Синицыной за помощью.";

/// Generated answer was empty, apologetic, or admitted to missing information.
pub const NO_INFO: &str = "Я не смогла найти подходящей информации. \
Если вопрос очень важный — обратитесь к Юлии Синицыной.";
