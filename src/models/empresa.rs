// src/models/empresa.rs

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- PERFIL ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    #[schema(example = "Lava-Jato Brilho")]
    pub nome: Option<String>,

    #[schema(example = "12.345.678/0001-99")]
    pub cnpj: Option<String>,

    pub descricao: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub endereco: Option<String>,

    #[schema(example = "São Paulo")]
    pub cidade: Option<String>,

    #[schema(example = "SP")]
    pub estado: Option<String>,

    #[schema(example = "01001-000")]
    pub cep: Option<String>,

    #[schema(example = "contato@brilho.com")]
    pub email: Option<String>,

    #[schema(example = "https://brilho.com/assets/logo.png")]
    pub logo_url: Option<String>,

    #[schema(example = "12.345.678/0001-99")]
    pub chave_pix: Option<String>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmpresaRequest {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Lava-Jato Brilho")]
    pub nome: String,
    pub cnpj: Option<String>,
    pub descricao: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    #[validate(length(equal = 2, message = "invalid_uf"))]
    #[schema(example = "SP")]
    pub estado: Option<String>,
    pub cep: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    #[validate(url(message = "invalid_url"))]
    pub logo_url: Option<String>,
    pub chave_pix: Option<String>,
}

// --- HORÁRIOS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "dia_semana", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiaSemana {
    Domingo,
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
}

impl From<Weekday> for DiaSemana {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => DiaSemana::Domingo,
            Weekday::Mon => DiaSemana::Segunda,
            Weekday::Tue => DiaSemana::Terca,
            Weekday::Wed => DiaSemana::Quarta,
            Weekday::Thu => DiaSemana::Quinta,
            Weekday::Fri => DiaSemana::Sexta,
            Weekday::Sat => DiaSemana::Sabado,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaHorario {
    pub dia_semana: DiaSemana,
    #[schema(value_type = Option<String>, example = "08:00:00")]
    pub abertura: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub fechamento: Option<NaiveTime>,
    pub fechado: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusFuncionamento {
    pub aberto: bool,
    pub dia_semana: DiaSemana,
    pub horario_hoje: Option<EmpresaHorario>,
}

// --- CONTATOS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contato_tipo", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContatoTipo {
    Telefone,
    Whatsapp,
    Email,
    Instagram,
    Facebook,
    Site,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaContato {
    pub id: Uuid,
    pub tipo: ContatoTipo,
    #[schema(example = "(11) 98888-7777")]
    pub valor: String,
    #[schema(example = "Atendimento")]
    pub descricao: Option<String>,
    pub principal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContatoPayload {
    #[schema(example = "WHATSAPP")]
    pub tipo: ContatoTipo,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "(11) 98888-7777")]
    pub valor: String,
    pub descricao: Option<String>,
    #[serde(default)]
    pub principal: bool,
}
