use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{AnswerChoice, TestResult};

use super::TestKind;

/// The single persisted record of which test, what answers and what result
/// are currently active.
///
/// An empty `id` means no API session is live. The answer map is a
/// cumulative ledger keyed by question id; ordered keys make the submission
/// payload deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(rename = "testType")]
    pub test_kind: Option<TestKind>,
    pub answers: BTreeMap<u32, String>,
    pub result: Option<TestResult>,
    pub api_version: Option<i64>,
    pub api_status: Option<String>,
}

impl Session {
    /// True when an API session for `kind` is already live, meaning the
    /// in-progress answers must be preserved.
    pub fn has_live_session(&self, kind: TestKind) -> bool {
        self.test_kind == Some(kind) && !self.id.is_empty()
    }

    /// Point the session at `kind`, dropping every trace of the previous
    /// test in the same update. Answers from one test never leak into
    /// another.
    pub fn reset_for(&mut self, kind: TestKind) {
        self.id.clear();
        self.test_kind = Some(kind);
        self.answers.clear();
        self.result = None;
        self.api_version = None;
        self.api_status = None;
    }

    /// Record one answer. The option code is normalized to uppercase and the
    /// last write for a question wins.
    pub fn record_answer(&mut self, question_id: u32, option_code: &str) {
        self.answers
            .insert(question_id, option_code.to_uppercase());
    }

    /// The collected answers as the ordered submission payload, ascending by
    /// question id.
    pub fn to_submission(&self) -> Vec<AnswerChoice> {
        self.answers
            .iter()
            .map(|(id, letter)| AnswerChoice {
                id_pergunta: *id,
                alternativa_letra: letter.clone(),
            })
            .collect()
    }
}
