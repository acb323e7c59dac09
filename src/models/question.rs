/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub label: String,
    /// Normalized uppercase option code sent back to the scoring API.
    pub value: String,
}

/// A question in the canonical shape the screens consume.
///
/// Questions come exclusively from the scoring API and are never persisted;
/// a reload fetches them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<QuestionOption>,
}
