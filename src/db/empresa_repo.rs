// src/db/empresa_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::empresa::{
        ContatoPayload, ContatoTipo, Empresa, EmpresaContato, EmpresaHorario,
        UpdateEmpresaRequest,
    },
};

const COLUNAS_EMPRESA: &str =
    "nome, cnpj, descricao, endereco, cidade, estado, cep, email, logo_url, chave_pix, updated_at";

const COLUNAS_CONTATO: &str = "id, tipo, valor, descricao, principal, created_at, updated_at";

#[derive(Clone)]
pub struct EmpresaRepository {
    pool: PgPool,
}

impl EmpresaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PERFIL
    // =========================================================================

    pub async fn get_empresa<'e, E>(&self, executor: E) -> Result<Empresa, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Enquanto ninguém salvou o perfil, tratamos o "Not Found" como "Vazio".
        let empresa = sqlx::query_as::<_, Empresa>(&format!(
            "SELECT {} FROM empresa WHERE id = 1",
            COLUNAS_EMPRESA
        ))
        .fetch_optional(executor)
        .await?;

        Ok(empresa.unwrap_or_default())
    }

    pub async fn update_empresa(&self, input: &UpdateEmpresaRequest) -> Result<Empresa, AppError> {
        // UPSERT (Insert or Update) na linha única
        let empresa = sqlx::query_as::<_, Empresa>(&format!(
            r#"
            INSERT INTO empresa (id, nome, cnpj, descricao, endereco, cidade, estado, cep, email, logo_url, chave_pix)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id)
            DO UPDATE SET
                nome = EXCLUDED.nome,
                cnpj = EXCLUDED.cnpj,
                descricao = EXCLUDED.descricao,
                endereco = EXCLUDED.endereco,
                cidade = EXCLUDED.cidade,
                estado = EXCLUDED.estado,
                cep = EXCLUDED.cep,
                email = EXCLUDED.email,
                logo_url = EXCLUDED.logo_url,
                chave_pix = EXCLUDED.chave_pix,
                updated_at = NOW()
            RETURNING {}
            "#,
            COLUNAS_EMPRESA
        ))
        .bind(input.nome.trim())
        .bind(input.cnpj.as_deref())
        .bind(input.descricao.as_deref())
        .bind(input.endereco.as_deref())
        .bind(input.cidade.as_deref())
        .bind(input.estado.as_deref().map(str::to_uppercase))
        .bind(input.cep.as_deref())
        .bind(input.email.as_deref())
        .bind(input.logo_url.as_deref())
        .bind(input.chave_pix.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(empresa)
    }

    // =========================================================================
    //  HORÁRIOS
    // =========================================================================

    pub async fn list_horarios(&self) -> Result<Vec<EmpresaHorario>, AppError> {
        // O enum do Postgres ordena pela declaração (DOMINGO..SABADO)
        let horarios = sqlx::query_as::<_, EmpresaHorario>(
            "SELECT dia_semana, abertura, fechamento, fechado FROM empresa_horarios ORDER BY dia_semana",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(horarios)
    }

    /// Substitui a semana inteira numa transação.
    pub async fn replace_horarios(
        &self,
        horarios: &[EmpresaHorario],
    ) -> Result<Vec<EmpresaHorario>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM empresa_horarios")
            .execute(&mut *tx)
            .await?;

        for horario in horarios {
            sqlx::query(
                r#"
                INSERT INTO empresa_horarios (dia_semana, abertura, fechamento, fechado)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(horario.dia_semana)
            .bind(horario.abertura)
            .bind(horario.fechamento)
            .bind(horario.fechado)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.list_horarios().await
    }

    // =========================================================================
    //  CONTATOS
    // =========================================================================

    pub async fn list_contatos(&self) -> Result<Vec<EmpresaContato>, AppError> {
        let contatos = sqlx::query_as::<_, EmpresaContato>(&format!(
            "SELECT {} FROM empresa_contatos ORDER BY tipo, principal DESC, created_at ASC",
            COLUNAS_CONTATO
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(contatos)
    }

    pub async fn create_contato(&self, input: &ContatoPayload) -> Result<EmpresaContato, AppError> {
        let mut tx = self.pool.begin().await?;

        if input.principal {
            Self::clear_principal(&mut *tx, input.tipo, None).await?;
        }

        let contato = sqlx::query_as::<_, EmpresaContato>(&format!(
            r#"
            INSERT INTO empresa_contatos (tipo, valor, descricao, principal)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUNAS_CONTATO
        ))
        .bind(input.tipo)
        .bind(input.valor.trim())
        .bind(input.descricao.as_deref())
        .bind(input.principal)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(contato)
    }

    pub async fn update_contato(
        &self,
        id: Uuid,
        input: &ContatoPayload,
    ) -> Result<Option<EmpresaContato>, AppError> {
        let mut tx = self.pool.begin().await?;

        if input.principal {
            Self::clear_principal(&mut *tx, input.tipo, Some(id)).await?;
        }

        let contato = sqlx::query_as::<_, EmpresaContato>(&format!(
            r#"
            UPDATE empresa_contatos
            SET tipo = $2, valor = $3, descricao = $4, principal = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUNAS_CONTATO
        ))
        .bind(id)
        .bind(input.tipo)
        .bind(input.valor.trim())
        .bind(input.descricao.as_deref())
        .bind(input.principal)
        .fetch_optional(&mut *tx)
        .await?;

        // Sem linha atualizada o drop do tx desfaz o clear_principal
        if contato.is_some() {
            tx.commit().await?;
        }
        Ok(contato)
    }

    pub async fn delete_contato(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM empresa_contatos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Só um contato principal por tipo
    async fn clear_principal<'e, E>(
        executor: E,
        tipo: ContatoTipo,
        except: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE empresa_contatos
            SET principal = FALSE, updated_at = NOW()
            WHERE tipo = $1 AND principal AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(tipo)
        .bind(except)
        .execute(executor)
        .await?;

        Ok(())
    }
}
