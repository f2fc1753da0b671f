// src/models/categoria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: Uuid,
    #[schema(example = "Lavagem")]
    pub nome: String,
    #[schema(example = "Serviços de lavagem externa e interna")]
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Estética")]
    pub nome: String,
    pub descricao: Option<String>,
}
