//! Static catalog of the tests the funnel offers.
//!
//! Copy is PT-BR, matching the audience of the scoring service. Questions
//! are never listed here; they always come from the API.

use crate::models::TestKind;

/// Display configuration for one test in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct TestConfig {
    pub kind: TestKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub cta_label: &'static str,
    /// Headline of the landing screen.
    pub landing_headline: &'static str,
    /// Pitch on the locked-report card of the preview screen.
    pub preview_pitch: &'static str,
}

/// Every test the funnel can start, in home-screen order.
pub const CATALOG: [TestConfig; 4] = [
    TestConfig {
        kind: TestKind::Personalidade,
        title: "Teste de Personalidade",
        description: "Mapeie sua essência e entenda como você processa o mundo ao seu redor.",
        icon: "🎭",
        cta_label: "Descobrir minha essência",
        landing_headline: "Descubra sua verdadeira essência",
        preview_pitch: "Como transformar seu perfil em hábitos que aumentam sua confiança, foco e resultados no dia a dia?",
    },
    TestConfig {
        kind: TestKind::Carreira,
        title: "Teste de Carreira",
        description: "Descubra seu perfil profissional e os caminhos para sua próxima promoção.",
        icon: "💼",
        cta_label: "Descobrir meu perfil profissional",
        landing_headline: "Destrave sua evolução profissional",
        preview_pitch: "Qual é o melhor caminho de carreira para o seu perfil — e como ganhar mais e ser promovido?",
    },
    TestConfig {
        kind: TestKind::Relacionamento,
        title: "Perfil da Alma Gêmea",
        description: "Mapeie o perfil ideal que complementa sua energia e valores.",
        icon: "❤️",
        cta_label: "Mapear meu match ideal",
        landing_headline: "Encontre o seu match ideal",
        preview_pitch: "Como usar seu perfil para melhorar a comunicação, reduzir atritos e fortalecer seus relacionamentos?",
    },
    TestConfig {
        kind: TestKind::Qi,
        title: "Teste de QI",
        description: "Avalie sua capacidade lógica e de raciocínio com um teste rápido e objetivo.",
        icon: "🧠",
        cta_label: "Iniciar Teste de Lógica",
        landing_headline: "Avalie seu raciocínio lógico",
        preview_pitch: "O que seu resultado revela sobre seu raciocínio — e quais estratégias elevam sua performance em provas e trabalho?",
    },
];

/// Look up the catalog entry for a test kind.
pub fn config_for(kind: TestKind) -> &'static TestConfig {
    match kind {
        TestKind::Personalidade => &CATALOG[0],
        TestKind::Carreira => &CATALOG[1],
        TestKind::Relacionamento => &CATALOG[2],
        TestKind::Qi => &CATALOG[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_lookup_matches_kind() {
        for kind in TestKind::ALL {
            assert_eq!(config_for(kind).kind, kind);
        }
    }

    #[test]
    fn test_catalog_covers_every_kind_once() {
        for kind in TestKind::ALL {
            assert_eq!(CATALOG.iter().filter(|c| c.kind == kind).count(), 1);
        }
    }
}
