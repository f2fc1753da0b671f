// src/models/servico.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validar_valor_nao_negativo;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Servico {
    pub id: Uuid,
    pub categoria_id: Option<Uuid>,
    #[schema(example = "Lavagem Completa")]
    pub nome: String,
    pub descricao: Option<String>,
    #[schema(value_type = f64, example = 49.90)]
    pub preco: Decimal,
    #[schema(example = 60)]
    pub duracao_minutos: i32,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_ativo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicoPayload {
    pub categoria_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Lavagem Completa")]
    pub nome: String,

    pub descricao: Option<String>,

    #[validate(custom(function = "validar_valor_nao_negativo"))]
    #[schema(value_type = f64, example = 49.90)]
    pub preco: Decimal,

    #[validate(range(min = 1, message = "invalid_duration"))]
    #[schema(example = 60)]
    pub duracao_minutos: i32,

    #[serde(default = "default_ativo")]
    #[schema(example = true)]
    pub ativo: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroServicos {
    pub categoria_id: Option<Uuid>,
    pub ativo: Option<bool>,
}
