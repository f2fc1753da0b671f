// src/models/veiculo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validar_placa;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Veiculo {
    pub id: Uuid,
    pub cliente_id: Uuid,
    #[schema(example = "Honda")]
    pub marca: Option<String>,
    #[schema(example = "Civic")]
    pub modelo: String,
    #[schema(example = "BRA2E19")]
    pub placa: String,
    #[schema(example = "Prata")]
    pub cor: Option<String>,
    #[schema(example = 2020)]
    pub ano: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Veiculo {
    /// "Honda Civic" (ou só o modelo quando não há marca)
    pub fn descricao(&self) -> String {
        match &self.marca {
            Some(marca) if !marca.trim().is_empty() => format!("{} {}", marca.trim(), self.modelo),
            _ => self.modelo.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VeiculoPayload {
    pub cliente_id: Uuid,

    #[schema(example = "Honda")]
    pub marca: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Civic")]
    pub modelo: String,

    #[validate(custom(function = "validar_placa"))]
    #[schema(example = "BRA-2E19")]
    pub placa: String,

    pub cor: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "invalid_year"))]
    #[schema(example = 2020)]
    pub ano: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroVeiculos {
    pub cliente_id: Option<Uuid>,
}
