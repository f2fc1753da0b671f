use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    models::agendamento::AgendamentoStatus,
};

// Erros de domínio e de infraestrutura. Cada variante tem um código estável
// (ver `code`) que é a chave da mensagem nos arquivos de `locales/`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erro de requisição com código próprio (ex: "invalid_date_range")
    #[error("Requisição inválida: {0}")]
    BadRequest(&'static str),

    // Corpo, caminho ou query que o axum não conseguiu desserializar.
    // Mantém o status da rejeição original (400, 415, 422...).
    #[error("Requisição malformada: {motivo}")]
    MalformedRequest { status: StatusCode, motivo: String },

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Conta inativa")]
    InactiveAccount,

    // O argumento é a chave do recurso (ex: "cliente")
    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    // O argumento é o campo violado (ex: "placa")
    #[error("Valor duplicado no campo {0}")]
    UniqueConstraintViolation(String),

    #[error("Referência inexistente no campo {0}")]
    ReferenceNotFound(String),

    #[error("Recurso em uso: {0}")]
    ResourceInUse(&'static str),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition {
        from: AgendamentoStatus,
        to: AgendamentoStatus,
    },

    #[error("Agendamento já finalizado")]
    AppointmentClosed,

    #[error("Veículo não pertence ao cliente")]
    VehicleOwnerMismatch,

    #[error("Serviço inativo")]
    InactiveService,

    #[error("Fora do horário de funcionamento")]
    OutsideBusinessHours,

    #[error("Operação não permitida na própria conta")]
    SelfModification,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest { status, .. } => *status,
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::ReferenceNotFound(_)
            | AppError::VehicleOwnerMismatch
            | AppError::InactiveService
            | AppError::OutsideBusinessHours => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::InactiveAccount | AppError::SelfModification => {
                StatusCode::FORBIDDEN
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::UniqueConstraintViolation(_)
            | AppError::ResourceInUse(_)
            | AppError::InvalidStatusTransition { .. }
            | AppError::AppointmentClosed => StatusCode::CONFLICT,
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::BadRequest(code) => *code,
            AppError::MalformedRequest { .. } => "malformed_request",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::InactiveAccount => "inactive_account",
            AppError::NotFound(_) => "not_found",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::ReferenceNotFound(_) => "reference_not_found",
            AppError::ResourceInUse(_) => "resource_in_use",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::AppointmentClosed => "appointment_closed",
            AppError::VehicleOwnerMismatch => "vehicle_owner_mismatch",
            AppError::InactiveService => "inactive_service",
            AppError::OutsideBusinessHours => "outside_business_hours",
            AppError::SelfModification => "self_modification",
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal_error",
        }
    }

    /// Converte o erro na resposta HTTP, traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let lang = locale.0.as_str();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica só no log
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let error = match &self {
            AppError::NotFound(resource) => {
                let name = store.translate(lang, &format!("resource.{}", resource));
                store.translate_with(lang, self.code(), &[("resource", &name)])
            }
            AppError::ResourceInUse(resource) => {
                let name = store.translate(lang, &format!("resource.{}", resource));
                store.translate_with(lang, self.code(), &[("resource", &name)])
            }
            AppError::UniqueConstraintViolation(field) | AppError::ReferenceNotFound(field) => {
                let name = store.translate(lang, &format!("field.{}", field));
                store.translate_with(lang, self.code(), &[("field", &name)])
            }
            AppError::InvalidStatusTransition { from, to } => store.translate_with(
                lang,
                self.code(),
                &[("from", from.as_str()), ("to", to.as_str())],
            ),
            _ => store.translate(lang, self.code()),
        };

        let details = match &self {
            AppError::ValidationError(errors) => Some(validation_details(errors, lang, store)),
            AppError::MalformedRequest { motivo, .. } => Some(Value::String(motivo.clone())),
            _ => None,
        };

        ApiError {
            status,
            error,
            details,
        }
    }
}

// Campo -> lista de mensagens. O `message` do validator é um código
// ("required", "invalid_email") e é traduzido pela chave "validation.<código>".
fn validation_details(
    errors: &validator::ValidationErrors,
    lang: &str,
    store: &I18nStore,
) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                let code = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                Value::String(store.translate(lang, &format!("validation.{}", code)))
            })
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(details)
}

// O erro que efetivamente vai para o cliente HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn store() -> I18nStore {
        I18nStore::load().expect("locales embutidos devem ser válidos")
    }

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "required"))]
        nome: String,
    }

    #[test]
    fn status_mapping_follows_error_kind() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("cliente").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::AppointmentClosed.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let api = AppError::NotFound("cliente").to_api_error(&Locale("pt".into()), &store());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert!(api.error.contains("Cliente"), "mensagem: {}", api.error);
    }

    #[test]
    fn transition_message_names_both_states() {
        let err = AppError::InvalidStatusTransition {
            from: AgendamentoStatus::Concluido,
            to: AgendamentoStatus::Agendado,
        };
        let api = err.to_api_error(&Locale("en".into()), &store());
        assert!(api.error.contains("CONCLUIDO"));
        assert!(api.error.contains("AGENDADO"));
    }

    #[test]
    fn validation_errors_carry_per_field_details() {
        let errors = Payload { nome: String::new() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()), &store());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes de validação");
        let nome = details["nome"].as_array().unwrap();
        assert_eq!(nome.len(), 1);
        assert_eq!(nome[0], "Campo obrigatório.");
    }

    #[test]
    fn malformed_request_keeps_status_and_reason() {
        let err = AppError::MalformedRequest {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            motivo: "status: unknown variant `FOO`".into(),
        };
        let api = err.to_api_error(&Locale("pt".into()), &store());

        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.error, "Não foi possível interpretar a requisição.");
        assert_eq!(api.details, Some(Value::String("status: unknown variant `FOO`".into())));
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: 123"))
            .to_api_error(&Locale("pt".into()), &store());
        assert!(!api.error.contains("123"));
    }
}
