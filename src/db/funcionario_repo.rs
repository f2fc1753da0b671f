// src/db/funcionario_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError, validation::normalizar_email},
    models::funcionario::{Funcionario, FuncionarioRole},
};

const COLUNAS: &str =
    "id, nome, email, password_hash, telefone, cargo, role, ativo, created_at, updated_at";

// O repositório de funcionários, responsável por todas as interações com a tabela 'funcionarios'
#[derive(Clone)]
pub struct FuncionarioRepository {
    pool: PgPool,
}

impl FuncionarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um funcionário pelo seu e-mail (login)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Funcionario>, AppError> {
        let funcionario = sqlx::query_as::<_, Funcionario>(&format!(
            "SELECT {} FROM funcionarios WHERE LOWER(email) = LOWER($1)",
            COLUNAS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(funcionario)
    }

    // Busca um funcionário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Funcionario>, AppError> {
        let funcionario = sqlx::query_as::<_, Funcionario>(&format!(
            "SELECT {} FROM funcionarios WHERE id = $1",
            COLUNAS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(funcionario)
    }

    pub async fn list(&self) -> Result<Vec<Funcionario>, AppError> {
        let funcionarios = sqlx::query_as::<_, Funcionario>(&format!(
            "SELECT {} FROM funcionarios ORDER BY nome ASC",
            COLUNAS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(funcionarios)
    }

    /// Cadastro pelo /register: o primeiro funcionário da base vira ADMIN.
    pub async fn create_first_or_regular(
        &self,
        nome: &str,
        email: &str,
        hashed_password: &str,
        telefone: Option<&str>,
    ) -> Result<Funcionario, AppError> {
        let mut tx = self.pool.begin().await?;

        // Conflita consigo mesmo e com INSERTs: só um cadastro por vez vê a tabela vazia
        sqlx::query("LOCK TABLE funcionarios IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let ja_existe: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM funcionarios)")
            .fetch_one(&mut *tx)
            .await?;

        let funcionario = sqlx::query_as::<_, Funcionario>(&format!(
            r#"
            INSERT INTO funcionarios (nome, email, password_hash, telefone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(nome)
        .bind(normalizar_email(email))
        .bind(hashed_password)
        .bind(telefone)
        .bind(role_inicial(ja_existe))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_error)?;

        tx.commit().await?;
        Ok(funcionario)
    }

    // Cria um novo funcionário no banco de dados (cadastro feito pelo admin)
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        nome: &str,
        email: &str,
        hashed_password: &str,
        telefone: Option<&str>,
        cargo: Option<&str>,
        role: FuncionarioRole,
        ativo: bool,
    ) -> Result<Funcionario, AppError> {
        sqlx::query_as::<_, Funcionario>(&format!(
            r#"
            INSERT INTO funcionarios (nome, email, password_hash, telefone, cargo, role, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(nome)
        .bind(normalizar_email(email))
        .bind(hashed_password)
        .bind(telefone)
        .bind(cargo)
        .bind(role)
        .bind(ativo)
        .fetch_one(&self.pool)
        .await
        .map_err(map_email_error)
    }

    /// Atualiza os dados; `hashed_password = None` mantém a senha atual.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        nome: &str,
        email: &str,
        hashed_password: Option<&str>,
        telefone: Option<&str>,
        cargo: Option<&str>,
        role: FuncionarioRole,
        ativo: bool,
    ) -> Result<Option<Funcionario>, AppError> {
        sqlx::query_as::<_, Funcionario>(&format!(
            r#"
            UPDATE funcionarios
            SET nome = $2,
                email = $3,
                password_hash = COALESCE($4, password_hash),
                telefone = $5,
                cargo = $6,
                role = $7,
                ativo = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(nome)
        .bind(normalizar_email(email))
        .bind(hashed_password)
        .bind(telefone)
        .bind(cargo)
        .bind(role)
        .bind(ativo)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_email_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM funcionarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Papel de quem se cadastra sozinho: ADMIN só com a base vazia.
pub(crate) fn role_inicial(ja_existe_funcionario: bool) -> FuncionarioRole {
    if ja_existe_funcionario {
        FuncionarioRole::Funcionario
    } else {
        FuncionarioRole::Admin
    }
}

// Converte erro de violação de chave única em um erro mais amigável
fn map_email_error(e: sqlx::Error) -> AppError {
    match map_write_error(e, "funcionarios") {
        AppError::UniqueConstraintViolation(field) if field == "email" => {
            AppError::EmailAlreadyExists
        }
        other => other,
    }
}
