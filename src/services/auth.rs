// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::FuncionarioRepository,
    models::{
        auth::{AuthResponse, Claims, LoginPayload, RegisterPayload},
        funcionario::Funcionario,
    },
};

#[derive(Clone)]
pub struct AuthService {
    funcionario_repo: FuncionarioRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(
        funcionario_repo: FuncionarioRepository,
        jwt_secret: String,
        jwt_expiration_hours: i64,
    ) -> Self {
        Self {
            funcionario_repo,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, AppError> {
        let hashed_password = hash_password(&payload.senha).await?;

        let funcionario = self
            .funcionario_repo
            .create_first_or_regular(
                payload.nome.trim(),
                payload.email.trim(),
                &hashed_password,
                payload.telefone.as_deref(),
            )
            .await?;

        tracing::info!(
            "Novo funcionário registrado: {} ({:?})",
            funcionario.id,
            funcionario.role
        );

        self.auth_response(funcionario)
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, AppError> {
        let funcionario = self
            .funcionario_repo
            .find_by_email(payload.email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = payload.senha.clone();
        let password_hash_clone = funcionario.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Só revela que a conta está inativa para quem acertou a senha
        if !funcionario.ativo {
            return Err(AppError::InactiveAccount);
        }

        self.auth_response(funcionario)
    }

    /// Decodifica o token e recarrega o funcionário do banco.
    pub async fn validate_token(&self, token: &str) -> Result<Funcionario, AppError> {
        let claims = self.decode_token(token)?;

        self.funcionario_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, funcionario: &Funcionario) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: funcionario.id,
            role: funcionario.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;

        Ok((token, expires_at))
    }

    fn auth_response(&self, funcionario: Funcionario) -> Result<AuthResponse, AppError> {
        let (token, expira_em) = self.create_token(&funcionario)?;
        Ok(AuthResponse {
            token,
            tipo: "Bearer".to_string(),
            expira_em,
            funcionario,
        })
    }
}

/// bcrypt é pesado: roda fora das threads do runtime.
pub async fn hash_password(senha: &str) -> Result<String, AppError> {
    let password_clone = senha.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::funcionario::FuncionarioRole;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    fn service(secret: &str, hours: i64) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/lavajato_test")
            .expect("URL de teste válida");
        AuthService::new(FuncionarioRepository::new(pool), secret.to_string(), hours)
    }

    fn funcionario(role: FuncionarioRole) -> Funcionario {
        Funcionario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            email: "ana@lavajato.com".into(),
            password_hash: String::new(),
            telefone: None,
            cargo: None,
            role,
            ativo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn token_carries_id_and_role() {
        let svc = service("segredo", 2);
        let f = funcionario(FuncionarioRole::Admin);

        let (token, expira_em) = svc.create_token(&f).unwrap();
        let claims = svc.decode_token(&token).unwrap();

        assert_eq!(claims.sub, f.id);
        assert_eq!(claims.role, FuncionarioRole::Admin);
        assert_eq!(claims.exp as i64, expira_em.timestamp());
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let (token, _) = service("outro", 2)
            .create_token(&funcionario(FuncionarioRole::Funcionario))
            .unwrap();

        let err = service("segredo", 2).decode_token(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        // Expirado há bem mais que a tolerância padrão do jsonwebtoken (60s)
        let (token, _) = service("segredo", -1)
            .create_token(&funcionario(FuncionarioRole::Funcionario))
            .unwrap();

        assert!(matches!(
            service("segredo", 1).decode_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn garbage_is_not_a_token() {
        assert!(matches!(
            service("segredo", 1).decode_token("nao.e.jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashed = hash_password("segredo123").await.unwrap();
        assert!(verify("segredo123", &hashed).unwrap());
        assert!(!verify("errada", &hashed).unwrap());
    }
}
