// src/models/agendamento.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validar_valor_nao_negativo;

// --- Enums ---

// Mapeia o CREATE TYPE agendamento_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "agendamento_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgendamentoStatus {
    Agendado,
    EmAndamento,
    Concluido,
    Cancelado,
}

impl AgendamentoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgendamentoStatus::Agendado => "AGENDADO",
            AgendamentoStatus::EmAndamento => "EM_ANDAMENTO",
            AgendamentoStatus::Concluido => "CONCLUIDO",
            AgendamentoStatus::Cancelado => "CANCELADO",
        }
    }

    /// CONCLUIDO e CANCELADO não saem mais do lugar.
    pub fn is_final(&self) -> bool {
        matches!(self, AgendamentoStatus::Concluido | AgendamentoStatus::Cancelado)
    }

    /// Regras do ciclo de vida:
    /// AGENDADO -> EM_ANDAMENTO | CONCLUIDO | CANCELADO
    /// EM_ANDAMENTO -> CONCLUIDO | CANCELADO
    pub fn can_transition_to(&self, next: AgendamentoStatus) -> bool {
        use AgendamentoStatus::*;
        matches!(
            (self, next),
            (Agendado, EmAndamento)
                | (Agendado, Concluido)
                | (Agendado, Cancelado)
                | (EmAndamento, Concluido)
                | (EmAndamento, Cancelado)
        )
    }
}

impl fmt::Display for AgendamentoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Registro ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agendamento {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub veiculo_id: Uuid,
    pub servico_id: Uuid,
    pub funcionario_id: Option<Uuid>,

    // Horário local do estabelecimento
    #[schema(value_type = String, format = DateTime, example = "2025-03-14T09:30:00")]
    pub data_hora: NaiveDateTime,

    pub status: AgendamentoStatus,

    #[schema(value_type = f64, example = 49.90)]
    pub valor_total: Decimal,

    pub observacoes: Option<String>,

    pub iniciado_em: Option<DateTime<Utc>>,
    pub concluido_em: Option<DateTime<Utc>>,
    pub cancelado_em: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agendamento com os nomes já resolvidos, para as listagens do painel.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgendamentoDetalhe {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub agendamento: Agendamento,

    #[schema(example = "Maria da Silva")]
    pub cliente_nome: String,
    pub cliente_telefone: Option<String>,

    #[schema(example = "Honda Civic")]
    pub veiculo_descricao: String,
    #[schema(example = "BRA2E19")]
    pub veiculo_placa: String,

    #[schema(example = "Lavagem Completa")]
    pub servico_nome: String,

    pub funcionario_nome: Option<String>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgendamentoPayload {
    pub cliente_id: Uuid,
    pub veiculo_id: Uuid,
    pub servico_id: Uuid,
    pub funcionario_id: Option<Uuid>,

    #[schema(value_type = String, format = DateTime, example = "2025-03-14T09:30:00")]
    pub data_hora: NaiveDateTime,

    // Quando ausente, usa o preço do serviço
    #[validate(custom(function = "validar_valor_nao_negativo"))]
    #[schema(value_type = Option<f64>, example = 49.90)]
    pub valor_total: Option<Decimal>,

    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgendamentoPayload {
    pub cliente_id: Uuid,
    pub veiculo_id: Uuid,
    pub servico_id: Uuid,
    pub funcionario_id: Option<Uuid>,

    #[schema(value_type = String, format = DateTime, example = "2025-03-14T10:00:00")]
    pub data_hora: NaiveDateTime,

    #[validate(custom(function = "validar_valor_nao_negativo"))]
    #[schema(value_type = f64, example = 59.90)]
    pub valor_total: Decimal,

    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[schema(example = "EM_ANDAMENTO")]
    pub status: AgendamentoStatus,
}

/// Filtros da listagem. `inicio` e `fim` são inclusivos.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroAgendamentos {
    pub status: Option<AgendamentoStatus>,
    pub cliente_id: Option<Uuid>,
    pub funcionario_id: Option<Uuid>,
    #[param(value_type = Option<String>, format = Date, example = "2025-03-01")]
    pub inicio: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date, example = "2025-03-31")]
    pub fim: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::AgendamentoStatus::*;
    use super::*;

    const TODOS: [AgendamentoStatus; 4] = [Agendado, EmAndamento, Concluido, Cancelado];

    #[test]
    fn scheduled_can_start_finish_or_cancel() {
        assert!(Agendado.can_transition_to(EmAndamento));
        assert!(Agendado.can_transition_to(Concluido));
        assert!(Agendado.can_transition_to(Cancelado));
    }

    #[test]
    fn in_progress_cannot_go_back_to_scheduled() {
        assert!(!EmAndamento.can_transition_to(Agendado));
        assert!(EmAndamento.can_transition_to(Concluido));
        assert!(EmAndamento.can_transition_to(Cancelado));
    }

    #[test]
    fn final_states_accept_no_transition() {
        for from in [Concluido, Cancelado] {
            assert!(from.is_final());
            for to in TODOS {
                assert!(!from.can_transition_to(to), "{} -> {} deveria ser proibido", from, to);
            }
        }
    }

    #[test]
    fn status_uses_screaming_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&EmAndamento).unwrap(), "\"EM_ANDAMENTO\"");
        let parsed: AgendamentoStatus = serde_json::from_str("\"CANCELADO\"").unwrap();
        assert_eq!(parsed, Cancelado);
        assert_eq!(EmAndamento.to_string(), "EM_ANDAMENTO");
    }
}
