//! Wire types for the scoring service.
//!
//! Two JSON-over-HTTPS operations; field names mirror the remote contract
//! exactly. Raw questions are decoded here into the canonical [`Question`]
//! shape before anything else sees them.

use serde::{Deserialize, Serialize};

use crate::models::{Question, QuestionOption};

use super::ApiError;

/// Body of `POST /app/iniciar-teste`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTestRequest<'a> {
    pub tipo_teste: &'a str,
}

/// Response of `POST /app/iniciar-teste`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTestResponse {
    pub sessao: SessionInfo,
    pub teste: TestPayload,
}

/// Session metadata minted by the scoring service. `version` and `status`
/// are carried for display only; no logic depends on their values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub identificador: String,
    pub version: i64,
    pub status: String,
    pub horario_inicio: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayload {
    pub titulo: String,
    pub descricao: String,
    pub minutos_estimados: u32,
    pub quantidade_total_pergunta: u32,
    pub perguntas: Vec<ApiQuestion>,
}

/// A raw question as the API returns it: either lettered alternatives or
/// valued options, never reliably both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiQuestion {
    pub id_pergunta: u32,
    #[serde(default)]
    pub aceita_maisde_uma_resposta: bool,
    pub descricao: String,
    #[serde(default)]
    pub alternativas: Option<Vec<Alternativa>>,
    #[serde(default)]
    pub opcoes: Option<Vec<Opcao>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alternativa {
    pub letra: String,
    pub texto: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Opcao {
    pub texto: String,
    pub valor: OptionValue,
    pub perfil: String,
}

/// Option codes arrive as strings or bare numbers depending on the test.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(i64),
}

impl OptionValue {
    fn normalized(&self) -> String {
        match self {
            OptionValue::Text(text) => text.to_uppercase(),
            OptionValue::Number(number) => number.to_string(),
        }
    }
}

impl ApiQuestion {
    /// Decode into the canonical shape, taking lettered alternatives when
    /// present and falling back to valued options. A question that yields no
    /// options is a hard error: a partially loaded quiz must never be
    /// presented.
    pub fn into_question(self) -> Result<Question, ApiError> {
        let options: Vec<QuestionOption> = match (self.alternativas, self.opcoes) {
            (Some(alternativas), _) if !alternativas.is_empty() => alternativas
                .into_iter()
                .map(|alt| QuestionOption {
                    label: alt.texto,
                    value: alt.letra.to_uppercase(),
                })
                .collect(),
            (None, Some(opcoes)) if !opcoes.is_empty() => opcoes
                .into_iter()
                .map(|opt| QuestionOption {
                    value: opt.valor.normalized(),
                    label: opt.texto,
                })
                .collect(),
            _ => {
                return Err(ApiError::MissingOptions {
                    question_id: self.id_pergunta,
                });
            }
        };

        Ok(Question {
            id: self.id_pergunta,
            text: self.descricao,
            options,
        })
    }
}

/// Body of `POST /app/obter-resultado`. `respostas` is sorted ascending by
/// question id for deterministic request bodies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRequest {
    pub tipo_teste: String,
    pub respostas: Vec<AnswerChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerChoice {
    pub id_pergunta: u32,
    pub alternativa_letra: String,
}

/// Response of `POST /app/obter-resultado`, stored verbatim in the session.
///
/// `informacoes_completas` is the only authority on whether the full report
/// may be shown; the client never caches a "paid" flag of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub informacoes_completas: bool,
    pub perfil: String,
    pub frase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texto: Option<String>,
}
