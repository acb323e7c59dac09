use serde::{Deserialize, Serialize};

/// The fixed set of behavioral tests the funnel can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Personalidade,
    Carreira,
    Relacionamento,
    Qi,
}

impl TestKind {
    /// Every test kind, in catalog order.
    pub const ALL: [TestKind; 4] = [
        TestKind::Personalidade,
        TestKind::Carreira,
        TestKind::Relacionamento,
        TestKind::Qi,
    ];

    /// Slug addressing this test in a route, e.g. "carreira".
    pub fn slug(self) -> &'static str {
        match self {
            TestKind::Personalidade => "personalidade",
            TestKind::Carreira => "carreira",
            TestKind::Relacionamento => "relacionamento",
            TestKind::Qi => "qi",
        }
    }

    /// Two-letter code the scoring API identifies this test by.
    pub fn api_code(self) -> &'static str {
        match self {
            TestKind::Personalidade => "PE",
            TestKind::Carreira => "CA",
            TestKind::Relacionamento => "AG",
            TestKind::Qi => "QI",
        }
    }

    /// Resolve a route slug back to a test kind.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}
