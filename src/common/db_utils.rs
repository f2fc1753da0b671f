use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::common::error::AppError;

/// Dias inclusivos [inicio, fim] como intervalo semiaberto de timestamps,
/// pronto para `data_hora >= $1 AND data_hora < $2`.
///
/// Falha com `invalid_date_range` quando `fim` é o último dia do calendário.
pub(crate) fn intervalo_dias(
    inicio: NaiveDate,
    fim: NaiveDate,
) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
    let dia_seguinte = fim
        .checked_add_days(Days::new(1))
        .ok_or(AppError::BadRequest("invalid_date_range"))?;

    Ok((
        inicio.and_time(NaiveTime::MIN),
        dia_seguinte.and_time(NaiveTime::MIN),
    ))
}

/// Escapa `\`, `%` e `_` para uso literal em `LIKE ... ESCAPE '\'`.
pub(crate) fn escapar_like(termo: &str) -> String {
    let mut escapado = String::with_capacity(termo.len());
    for c in termo.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escapado.push('\\');
        }
        escapado.push(c);
    }
    escapado
}

// ---
// Tradução de violações de constraint em erros de domínio
// ---

/// Para INSERT/UPDATE: unicidade vira 409 com o campo, FK vira 400
/// ("referência inexistente").
pub(crate) fn map_write_error(e: sqlx::Error, table: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        let field = db_err
            .constraint()
            .map(|c| field_from_constraint(c, table))
            .unwrap_or_default();

        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(field);
        }
        if db_err.is_foreign_key_violation() {
            return AppError::ReferenceNotFound(field);
        }
    }
    e.into()
}

/// Para DELETE: uma FK violada significa que outro registro ainda aponta
/// para este.
pub(crate) fn map_delete_error(e: sqlx::Error, resource: &'static str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::ResourceInUse(resource);
        }
    }
    e.into()
}

// "veiculos_placa_key" -> "placa"; "agendamentos_cliente_id_fkey" -> "cliente_id"
fn field_from_constraint(constraint: &str, table: &str) -> String {
    let without_table = constraint
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(constraint);

    without_table
        .strip_suffix("_fkey")
        .or_else(|| without_table.strip_suffix("_key"))
        .unwrap_or(without_table)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_constraint_name_yields_column() {
        assert_eq!(field_from_constraint("veiculos_placa_key", "veiculos"), "placa");
        assert_eq!(field_from_constraint("clientes_email_key", "clientes"), "email");
    }

    #[test]
    fn foreign_key_name_yields_column() {
        assert_eq!(
            field_from_constraint("agendamentos_cliente_id_fkey", "agendamentos"),
            "cliente_id"
        );
    }

    #[test]
    fn unexpected_constraint_name_is_kept() {
        assert_eq!(field_from_constraint("uq_custom", "clientes"), "uq_custom");
    }

    #[test]
    fn day_range_is_half_open_and_covers_the_last_day() {
        let d = |dia| NaiveDate::from_ymd_opt(2025, 3, dia).unwrap();
        let (inicio, fim) = intervalo_dias(d(1), d(31)).unwrap();
        assert_eq!(inicio, d(1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn day_range_at_calendar_edges_is_rejected_not_panicking() {
        assert!(matches!(
            intervalo_dias(NaiveDate::MAX, NaiveDate::MAX),
            Err(AppError::BadRequest("invalid_date_range"))
        ));

        // O começo do calendário não precisa de aritmética
        let (inicio, _) = intervalo_dias(NaiveDate::MIN, NaiveDate::MIN).unwrap();
        assert_eq!(inicio.date(), NaiveDate::MIN);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escapar_like("100%"), "100\\%");
        assert_eq!(escapar_like("ABC_1234"), "ABC\\_1234");
        assert_eq!(escapar_like("a\\b"), "a\\\\b");
        assert_eq!(escapar_like("Ana Souza"), "Ana Souza");
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_write_error(sqlx::Error::RowNotFound, "clientes");
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}
