// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::funcionario::{Funcionario, FuncionarioRole};

// Dados para registro de um novo funcionário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João Souza")]
    pub nome: String,
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "joao@lavajato.com")]
    pub email: String,
    #[validate(length(min = 6, message = "invalid_password"))]
    #[schema(example = "segredo123")]
    pub senha: String,
    pub telefone: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "joao@lavajato.com")]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "segredo123")]
    pub senha: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[schema(example = "Bearer")]
    pub tipo: String,
    pub expira_em: DateTime<Utc>,
    pub funcionario: Funcionario,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do funcionário)
    pub role: FuncionarioRole,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
