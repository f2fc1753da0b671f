// src/services/empresa_service.rs

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime};

use crate::{
    common::error::AppError,
    db::EmpresaRepository,
    models::empresa::{DiaSemana, EmpresaHorario, StatusFuncionamento},
};

#[derive(Clone)]
pub struct EmpresaService {
    repo: EmpresaRepository,
}

impl EmpresaService {
    pub fn new(repo: EmpresaRepository) -> Self {
        Self { repo }
    }

    pub async fn replace_horarios(
        &self,
        horarios: Vec<EmpresaHorario>,
    ) -> Result<Vec<EmpresaHorario>, AppError> {
        let horarios = normalizar_horarios(horarios)?;
        let salvos = self.repo.replace_horarios(&horarios).await?;

        tracing::info!("Horários de funcionamento atualizados ({} dias)", salvos.len());
        Ok(salvos)
    }

    pub async fn status_funcionamento(
        &self,
        agora: NaiveDateTime,
    ) -> Result<StatusFuncionamento, AppError> {
        let horarios = self.repo.list_horarios().await?;
        Ok(status_em(&horarios, agora))
    }
}

/// Valida a semana enviada: cada dia no máximo uma vez e, nos dias abertos,
/// abertura antes do fechamento. Dias fechados perdem os horários.
pub fn normalizar_horarios(
    horarios: Vec<EmpresaHorario>,
) -> Result<Vec<EmpresaHorario>, AppError> {
    let mut vistos = HashSet::new();

    horarios
        .into_iter()
        .map(|mut h| {
            if !vistos.insert(h.dia_semana) {
                return Err(AppError::BadRequest("duplicate_weekday"));
            }

            if h.fechado {
                h.abertura = None;
                h.fechamento = None;
                return Ok(h);
            }

            match (h.abertura, h.fechamento) {
                (Some(abertura), Some(fechamento)) if abertura < fechamento => Ok(h),
                _ => Err(AppError::BadRequest("invalid_business_hours")),
            }
        })
        .collect()
}

/// `true` quando `data_hora` cai dentro do expediente do dia.
/// Sem nenhum horário cadastrado, tudo é permitido.
pub fn horario_permite(horarios: &[EmpresaHorario], data_hora: NaiveDateTime) -> bool {
    if horarios.is_empty() {
        return true;
    }

    let dia = DiaSemana::from(data_hora.weekday());
    let hora = data_hora.time();

    horarios
        .iter()
        .find(|h| h.dia_semana == dia)
        .is_some_and(|h| match (h.fechado, h.abertura, h.fechamento) {
            (false, Some(abertura), Some(fechamento)) => abertura <= hora && hora < fechamento,
            _ => false,
        })
}

pub fn status_em(horarios: &[EmpresaHorario], agora: NaiveDateTime) -> StatusFuncionamento {
    let dia_semana = DiaSemana::from(agora.weekday());
    let horario_hoje = horarios.iter().find(|h| h.dia_semana == dia_semana).cloned();

    // Aqui "sem cadastro" significa fechado
    let aberto = horario_hoje.is_some() && horario_permite(horarios, agora);

    StatusFuncionamento {
        aberto,
        dia_semana,
        horario_hoje,
    }
}
