// src/db/categoria_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_error, map_write_error},
        error::AppError,
    },
    models::categoria::{Categoria, CategoriaPayload},
};

#[derive(Clone)]
pub struct CategoriaRepository {
    pool: PgPool,
}

impl CategoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Categoria>, AppError> {
        let categorias = sqlx::query_as::<_, Categoria>(
            "SELECT id, nome, descricao, created_at, updated_at FROM categorias ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categorias)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Categoria>, AppError> {
        let categoria = sqlx::query_as::<_, Categoria>(
            "SELECT id, nome, descricao, created_at, updated_at FROM categorias WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(categoria)
    }

    pub async fn create(&self, input: &CategoriaPayload) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            r#"
            INSERT INTO categorias (nome, descricao)
            VALUES ($1, $2)
            RETURNING id, nome, descricao, created_at, updated_at
            "#,
        )
        .bind(input.nome.trim())
        .bind(input.descricao.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "categorias"))
    }

    pub async fn update(&self, id: Uuid, input: &CategoriaPayload) -> Result<Option<Categoria>, AppError> {
        sqlx::query_as::<_, Categoria>(
            r#"
            UPDATE categorias
            SET nome = $2, descricao = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, nome, descricao, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.nome.trim())
        .bind(input.descricao.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "categorias"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "categoria"))?;

        Ok(result.rows_affected() > 0)
    }
}
