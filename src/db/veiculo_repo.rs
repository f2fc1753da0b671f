// src/db/veiculo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_error, map_write_error},
        error::AppError,
        validation::normalizar_placa,
    },
    models::veiculo::{Veiculo, VeiculoPayload},
};

const COLUNAS: &str = "id, cliente_id, marca, modelo, placa, cor, ano, created_at, updated_at";

#[derive(Clone)]
pub struct VeiculoRepository {
    pool: PgPool,
}

impl VeiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, cliente_id: Option<Uuid>) -> Result<Vec<Veiculo>, AppError> {
        let veiculos = sqlx::query_as::<_, Veiculo>(&format!(
            r#"
            SELECT {}
            FROM veiculos
            WHERE ($1::uuid IS NULL OR cliente_id = $1)
            ORDER BY modelo ASC, placa ASC
            "#,
            COLUNAS
        ))
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(veiculos)
    }

    // Genérico no executor porque também roda dentro da transação do agendamento
    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Veiculo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let veiculo = sqlx::query_as::<_, Veiculo>(&format!(
            "SELECT {} FROM veiculos WHERE id = $1",
            COLUNAS
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(veiculo)
    }

    pub async fn create(&self, input: &VeiculoPayload) -> Result<Veiculo, AppError> {
        sqlx::query_as::<_, Veiculo>(&format!(
            r#"
            INSERT INTO veiculos (cliente_id, marca, modelo, placa, cor, ano)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(input.cliente_id)
        .bind(input.marca.as_deref())
        .bind(input.modelo.trim())
        .bind(normalizar_placa(&input.placa))
        .bind(input.cor.as_deref())
        .bind(input.ano)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "veiculos"))
    }

    pub async fn update(&self, id: Uuid, input: &VeiculoPayload) -> Result<Option<Veiculo>, AppError> {
        sqlx::query_as::<_, Veiculo>(&format!(
            r#"
            UPDATE veiculos
            SET cliente_id = $2, marca = $3, modelo = $4, placa = $5,
                cor = $6, ano = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(input.cliente_id)
        .bind(input.marca.as_deref())
        .bind(input.modelo.trim())
        .bind(normalizar_placa(&input.placa))
        .bind(input.cor.as_deref())
        .bind(input.ano)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "veiculos"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM veiculos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "veiculo"))?;

        Ok(result.rows_affected() > 0)
    }
}
