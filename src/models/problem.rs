/// One question and the answer that scores it.
///
/// The expected answer is trimmed once when the problem is built, so
/// [`is_correct`](Self::is_correct) only has to trim the live answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    question: String,
    answer: String,
}

impl Problem {
    /// Create a problem, trimming surrounding whitespace from the answer.
    ///
    /// The question is kept exactly as given.
    pub fn new(question: impl Into<String>, answer: impl AsRef<str>) -> Self {
        Self {
            question: question.into(),
            answer: answer.as_ref().trim().to_string(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Exact, case-sensitive match after trimming the given answer.
    pub fn is_correct(&self, given: &str) -> bool {
        given.trim() == self.answer
    }
}
