// src/db/agendamento_repo.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{intervalo_dias, map_write_error},
        error::AppError,
    },
    models::agendamento::{
        Agendamento, AgendamentoDetalhe, AgendamentoStatus, FiltroAgendamentos,
    },
};

const COLUNAS: &str = r#"
    a.id, a.cliente_id, a.veiculo_id, a.servico_id, a.funcionario_id,
    a.data_hora, a.status, a.valor_total, a.observacoes,
    a.iniciado_em, a.concluido_em, a.cancelado_em,
    a.created_at, a.updated_at
"#;

// Nomes resolvidos para o painel (cliente, veículo, serviço, funcionário)
const JOIN_DETALHE: &str = r#"
    c.nome AS cliente_nome,
    c.telefone AS cliente_telefone,
    TRIM(CONCAT_WS(' ', v.marca, v.modelo)) AS veiculo_descricao,
    v.placa AS veiculo_placa,
    s.nome AS servico_nome,
    f.nome AS funcionario_nome
    FROM agendamentos a
    JOIN clientes c ON c.id = a.cliente_id
    JOIN veiculos v ON v.id = a.veiculo_id
    JOIN servicos s ON s.id = a.servico_id
    LEFT JOIN funcionarios f ON f.id = a.funcionario_id
"#;

#[derive(Clone)]
pub struct AgendamentoRepository {
    pool: PgPool,
}

impl AgendamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Monta o WHERE comum às duas listagens
    fn push_filtros(
        qb: &mut QueryBuilder<'_, Postgres>,
        filtro: &FiltroAgendamentos,
    ) -> Result<(), AppError> {
        qb.push(" WHERE 1 = 1");
        if let Some(status) = filtro.status {
            qb.push(" AND a.status = ").push_bind(status);
        }
        if let Some(cliente_id) = filtro.cliente_id {
            qb.push(" AND a.cliente_id = ").push_bind(cliente_id);
        }
        if let Some(funcionario_id) = filtro.funcionario_id {
            qb.push(" AND a.funcionario_id = ").push_bind(funcionario_id);
        }
        if let Some(inicio) = filtro.inicio {
            let (desde, _) = intervalo_dias(inicio, inicio)?;
            qb.push(" AND a.data_hora >= ").push_bind(desde);
        }
        if let Some(fim) = filtro.fim {
            let (_, ate) = intervalo_dias(fim, fim)?;
            qb.push(" AND a.data_hora < ").push_bind(ate);
        }
        Ok(())
    }

    /// Listagem simples, em ordem cronológica.
    pub async fn list(&self, filtro: &FiltroAgendamentos) -> Result<Vec<Agendamento>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM agendamentos a", COLUNAS));
        Self::push_filtros(&mut qb, filtro)?;
        qb.push(" ORDER BY a.data_hora ASC");

        let agendamentos = qb
            .build_query_as::<Agendamento>()
            .fetch_all(&self.pool)
            .await?;

        Ok(agendamentos)
    }

    /// Listagem com nomes, mais recentes primeiro (o "/todos" do painel).
    pub async fn list_detalhes(
        &self,
        filtro: &FiltroAgendamentos,
    ) -> Result<Vec<AgendamentoDetalhe>, AppError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {}, {}", COLUNAS, JOIN_DETALHE));
        Self::push_filtros(&mut qb, filtro)?;
        qb.push(" ORDER BY a.data_hora DESC");

        let agendamentos = qb
            .build_query_as::<AgendamentoDetalhe>()
            .fetch_all(&self.pool)
            .await?;

        Ok(agendamentos)
    }

    /// Agendamentos com `data_hora` em [desde, ate).
    pub async fn list_between(
        &self,
        desde: NaiveDateTime,
        ate: NaiveDateTime,
    ) -> Result<Vec<Agendamento>, AppError> {
        let agendamentos = sqlx::query_as::<_, Agendamento>(&format!(
            r#"
            SELECT {}
            FROM agendamentos a
            WHERE a.data_hora >= $1 AND a.data_hora < $2
            ORDER BY a.data_hora ASC
            "#,
            COLUNAS
        ))
        .bind(desde)
        .bind(ate)
        .fetch_all(&self.pool)
        .await?;

        Ok(agendamentos)
    }

    pub async fn find_detalhe<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<AgendamentoDetalhe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let detalhe = sqlx::query_as::<_, AgendamentoDetalhe>(&format!(
            "SELECT {}, {} WHERE a.id = $1",
            COLUNAS, JOIN_DETALHE
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(detalhe)
    }

    /// Trava a linha até o fim da transação (troca de status / edição).
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(&format!(
            "SELECT {} FROM agendamentos a WHERE a.id = $1 FOR UPDATE",
            COLUNAS
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(agendamento)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        veiculo_id: Uuid,
        servico_id: Uuid,
        funcionario_id: Option<Uuid>,
        data_hora: NaiveDateTime,
        valor_total: Decimal,
        observacoes: Option<&str>,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Agendamento>(&format!(
            r#"
            WITH a AS (
                INSERT INTO agendamentos (
                    cliente_id, veiculo_id, servico_id, funcionario_id,
                    data_hora, valor_total, observacoes
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {} FROM a
            "#,
            COLUNAS
        ))
        .bind(cliente_id)
        .bind(veiculo_id)
        .bind(servico_id)
        .bind(funcionario_id)
        .bind(data_hora)
        .bind(valor_total.round_dp(2))
        .bind(observacoes)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, "agendamentos"))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cliente_id: Uuid,
        veiculo_id: Uuid,
        servico_id: Uuid,
        funcionario_id: Option<Uuid>,
        data_hora: NaiveDateTime,
        valor_total: Decimal,
        observacoes: Option<&str>,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Agendamento>(&format!(
            r#"
            WITH a AS (
                UPDATE agendamentos
                SET cliente_id = $2, veiculo_id = $3, servico_id = $4,
                    funcionario_id = $5, data_hora = $6, valor_total = $7,
                    observacoes = $8, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM a
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(cliente_id)
        .bind(veiculo_id)
        .bind(servico_id)
        .bind(funcionario_id)
        .bind(data_hora)
        .bind(valor_total.round_dp(2))
        .bind(observacoes)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, "agendamentos"))
    }

    /// Grava o novo status e carimba o horário da transição correspondente.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AgendamentoStatus,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(&format!(
            r#"
            WITH a AS (
                UPDATE agendamentos
                SET status = $2,
                    iniciado_em = CASE WHEN $2 = 'EM_ANDAMENTO'::agendamento_status
                                       THEN COALESCE(iniciado_em, NOW()) ELSE iniciado_em END,
                    concluido_em = CASE WHEN $2 = 'CONCLUIDO'::agendamento_status
                                        THEN NOW() ELSE concluido_em END,
                    cancelado_em = CASE WHEN $2 = 'CANCELADO'::agendamento_status
                                        THEN NOW() ELSE cancelado_em END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM a
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(agendamento)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM agendamentos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn montar(filtro: &FiltroAgendamentos) -> Result<String, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM agendamentos a");
        AgendamentoRepository::push_filtros(&mut qb, filtro)?;
        Ok(qb.sql().to_string())
    }

    #[test]
    fn date_filters_become_half_open_bounds() {
        let filtro = FiltroAgendamentos {
            inicio: NaiveDate::from_ymd_opt(2025, 3, 1),
            fim: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..Default::default()
        };

        let sql = montar(&filtro).unwrap();
        assert!(sql.contains("a.data_hora >= $1"));
        assert!(sql.contains("a.data_hora < $2"));
    }

    #[test]
    fn end_filter_on_last_calendar_day_is_a_bad_request() {
        let filtro = FiltroAgendamentos {
            fim: Some(NaiveDate::MAX),
            ..Default::default()
        };

        assert!(matches!(
            montar(&filtro),
            Err(AppError::BadRequest("invalid_date_range"))
        ));
    }
}
