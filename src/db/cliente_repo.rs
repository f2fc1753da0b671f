// src/db/cliente_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{escapar_like, map_delete_error, map_write_error},
        error::AppError,
        validation::normalizar_cpf,
    },
    models::cliente::{Cliente, ClientePayload},
};

const COLUNAS: &str =
    "id, nome, email, telefone, cpf, endereco, observacoes, created_at, updated_at";

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista todos, ou só os que casam com `busca` em nome, e-mail, telefone ou CPF.
    pub async fn list(&self, busca: Option<&str>) -> Result<Vec<Cliente>, AppError> {
        let clientes = match busca.map(str::trim).filter(|b| !b.is_empty()) {
            Some(termo) => {
                let search_term = padrao_busca(termo);
                sqlx::query_as::<_, Cliente>(&format!(
                    r#"
                    SELECT {}
                    FROM clientes
                    WHERE nome ILIKE $1 ESCAPE '\'
                       OR email ILIKE $1 ESCAPE '\'
                       OR telefone ILIKE $1 ESCAPE '\'
                       OR cpf ILIKE $1 ESCAPE '\'
                    ORDER BY nome ASC
                    "#,
                    COLUNAS
                ))
                .bind(search_term)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Cliente>(&format!(
                    "SELECT {} FROM clientes ORDER BY nome ASC",
                    COLUNAS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(clientes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(&format!(
            "SELECT {} FROM clientes WHERE id = $1",
            COLUNAS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cliente)
    }

    pub async fn create(&self, input: &ClientePayload) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(&format!(
            r#"
            INSERT INTO clientes (nome, email, telefone, cpf, endereco, observacoes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(input.nome.trim())
        .bind(input.email.as_deref())
        .bind(input.telefone.as_deref())
        .bind(input.cpf.as_deref().map(normalizar_cpf))
        .bind(input.endereco.as_deref())
        .bind(input.observacoes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "clientes"))
    }

    pub async fn update(&self, id: Uuid, input: &ClientePayload) -> Result<Option<Cliente>, AppError> {
        sqlx::query_as::<_, Cliente>(&format!(
            r#"
            UPDATE clientes
            SET nome = $2, email = $3, telefone = $4, cpf = $5,
                endereco = $6, observacoes = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUNAS
        ))
        .bind(id)
        .bind(input.nome.trim())
        .bind(input.email.as_deref())
        .bind(input.telefone.as_deref())
        .bind(input.cpf.as_deref().map(normalizar_cpf))
        .bind(input.endereco.as_deref())
        .bind(input.observacoes.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "clientes"))
    }

    // Veículos somem junto (CASCADE); agendamentos bloqueiam a remoção
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "cliente"))?;

        Ok(result.rows_affected() > 0)
    }
}

// Termo digitado vira "contém", com curingas tratados como texto
fn padrao_busca(termo: &str) -> String {
    format!("%{}%", escapar_like(termo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_matches_literally_inside_contains_pattern() {
        assert_eq!(padrao_busca("Ana"), "%Ana%");
        assert_eq!(padrao_busca("50%"), "%50\\%%");
        assert_eq!(padrao_busca("a_b"), "%a\\_b%");
    }
}
