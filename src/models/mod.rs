//! Domain records: the persisted session and the shapes the screens consume.

mod question;
mod session;
mod test_kind;

pub use question::{Question, QuestionOption};
pub use session::Session;
pub use test_kind::TestKind;
