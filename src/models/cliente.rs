// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validar_cpf;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub nome: String,
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    #[schema(example = "(11) 99999-8888")]
    pub telefone: Option<String>,
    // Guardado só com dígitos
    #[schema(example = "52998224725")]
    pub cpf: Option<String>,
    pub endereco: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Serve tanto para criar quanto para atualizar (PUT substitui o registro)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[schema(example = "(11) 99999-8888")]
    pub telefone: Option<String>,

    #[validate(custom(function = "validar_cpf"))]
    #[schema(example = "529.982.247-25")]
    pub cpf: Option<String>,

    pub endereco: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BuscaClientes {
    /// Trecho do nome, e-mail, telefone ou CPF
    pub busca: Option<String>,
}
