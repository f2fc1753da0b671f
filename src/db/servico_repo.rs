// src/db/servico_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_error, map_write_error},
        error::AppError,
    },
    models::servico::{FiltroServicos, Servico, ServicoPayload},
};

const COLUNAS: &str =
    "id, categoria_id, nome, descricao, preco, duracao_minutos, ativo, created_at, updated_at";

#[derive(Clone)]
pub struct ServicoRepository {
    pool: PgPool,
}

impl ServicoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filtro: &FiltroServicos) -> Result<Vec<Servico>, AppError> {
        let servicos = sqlx::query_as::<_, Servico>(&format!(
            r#"
            SELECT {}
            FROM servicos
            WHERE ($1::uuid IS NULL OR categoria_id = $1)
              AND ($2::boolean IS NULL OR ativo = $2)
            ORDER BY nome ASC
            "#,
            COLUNAS
        ))
        .bind(filtro.categoria_id)
        .bind(filtro.ativo)
        .fetch_all(&self.pool)
        .await?;

        Ok(servicos)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Servico>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let servico = sqlx::query_as::<_, Servico>(&format!(
            "SELECT {} FROM servicos WHERE id = $1",
            COLUNAS
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(servico)
    }

    pub async fn create(&self, input: &ServicoPayload) -> Result<Servico, AppError> {
        sqlx::query_as::<_, Servico>(&format!(
            r#"
            INSERT INTO servicos (categoria_id, nome, descricao, preco, duracao_minutos, ativo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(input.categoria_id)
        .bind(input.nome.trim())
        .bind(input.descricao.as_deref())
        .bind(input.preco.round_dp(2))
        .bind(input.duracao_minutos)
        .bind(input.ativo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "servicos"))
    }

    pub async fn update(&self, id: Uuid, input: &ServicoPayload) -> Result<Option<Servico>, AppError> {
        sqlx::query_as::<_, Servico>(&format!(
            r#"
            UPDATE servicos
            SET categoria_id = $2, nome = $3, descricao = $4, preco = $5,
                duracao_minutos = $6, ativo = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(input.categoria_id)
        .bind(input.nome.trim())
        .bind(input.descricao.as_deref())
        .bind(input.preco.round_dp(2))
        .bind(input.duracao_minutos)
        .bind(input.ativo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "servicos"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM servicos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "servico"))?;

        Ok(result.rows_affected() > 0)
    }
}
