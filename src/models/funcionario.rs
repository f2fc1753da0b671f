// src/models/funcionario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "funcionario_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuncionarioRole {
    Admin,
    Funcionario,
}

// Funcionário vindo do banco. Também é o usuário que faz login no painel.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Funcionario {
    pub id: Uuid,
    #[schema(example = "João Souza")]
    pub nome: String,
    #[schema(example = "joao@lavajato.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub telefone: Option<String>,
    #[schema(example = "Lavador")]
    pub cargo: Option<String>,
    pub role: FuncionarioRole,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_ativo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFuncionarioPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    #[validate(email(message = "invalid_email"))]
    pub email: String,

    #[validate(length(min = 6, message = "invalid_password"))]
    pub senha: String,

    pub telefone: Option<String>,
    pub cargo: Option<String>,

    #[schema(example = "FUNCIONARIO")]
    pub role: FuncionarioRole,

    #[serde(default = "default_ativo")]
    pub ativo: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFuncionarioPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    #[validate(email(message = "invalid_email"))]
    pub email: String,

    // Só troca a senha quando informada
    #[validate(length(min = 6, message = "invalid_password"))]
    pub nova_senha: Option<String>,

    pub telefone: Option<String>,
    pub cargo: Option<String>,
    pub role: FuncionarioRole,
    pub ativo: bool,
}
