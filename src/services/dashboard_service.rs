// src/services/dashboard_service.rs

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{db_utils::intervalo_dias, error::AppError},
    db::{AgendamentoRepository, ServicoRepository},
    models::{
        agendamento::{Agendamento, AgendamentoStatus, FiltroAgendamentos},
        dashboard::{
            ComparativoPeriodo, EstatisticasAgendamentos, FaturamentoDia, RelatorioFaturamento,
            ResumoPeriodo, ServicoPopular,
        },
        servico::{FiltroServicos, Servico},
    },
};

// Limite do relatório de faturamento (um ano, contando bissexto)
pub const MAX_DIAS_RELATORIO: i64 = 366;

// Período fechado [inicio, fim] em dias
pub type Periodo = (NaiveDate, NaiveDate);

#[derive(Clone)]
pub struct DashboardService {
    repo: AgendamentoRepository,
    servico_repo: ServicoRepository,
}

impl DashboardService {
    pub fn new(repo: AgendamentoRepository, servico_repo: ServicoRepository) -> Self {
        Self { repo, servico_repo }
    }

    pub async fn estatisticas(
        &self,
        referencia: NaiveDate,
    ) -> Result<EstatisticasAgendamentos, AppError> {
        let (inicio, fim) = janela_busca(referencia)?;
        let (desde, ate) = intervalo_dias(inicio, fim)?;

        let agendamentos = self.repo.list_between(desde, ate).await?;
        calcular_estatisticas(&agendamentos, referencia)
    }

    pub async fn faturamento(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<RelatorioFaturamento, AppError> {
        validar_intervalo(inicio, fim)?;

        let (desde, ate) = intervalo_dias(inicio, fim)?;
        let agendamentos = self.repo.list_between(desde, ate).await?;

        Ok(faturamento_por_dia(&agendamentos, inicio, fim))
    }

    pub async fn servicos_populares(&self, limite: usize) -> Result<Vec<ServicoPopular>, AppError> {
        let agendamentos = self.repo.list(&FiltroAgendamentos::default()).await?;
        let servicos = self.servico_repo.list(&FiltroServicos::default()).await?;

        Ok(ranking_servicos(&agendamentos, &servicos, limite))
    }
}

// =============================================================================
//  JANELAS DE TEMPO
// =============================================================================

pub fn periodo_dia(referencia: NaiveDate) -> Periodo {
    (referencia, referencia)
}

// Data que cai fora do calendário do chrono
fn fora_do_calendario() -> AppError {
    AppError::BadRequest("invalid_date_range")
}

/// Semana de segunda a domingo.
pub fn periodo_semana(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let desde_segunda = u64::from(referencia.weekday().num_days_from_monday());
    let inicio = referencia
        .checked_sub_days(Days::new(desde_segunda))
        .ok_or_else(fora_do_calendario)?;
    let fim = inicio
        .checked_add_days(Days::new(6))
        .ok_or_else(fora_do_calendario)?;
    Ok((inicio, fim))
}

/// Mês do calendário.
pub fn periodo_mes(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let inicio = referencia.with_day(1).unwrap_or(referencia);
    let fim = inicio
        .checked_add_months(Months::new(1))
        .and_then(|proximo| proximo.pred_opt())
        .ok_or_else(fora_do_calendario)?;
    Ok((inicio, fim))
}

pub fn dia_anterior(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let ontem = referencia.pred_opt().ok_or_else(fora_do_calendario)?;
    Ok(periodo_dia(ontem))
}

pub fn semana_anterior(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let semana_passada = referencia
        .checked_sub_days(Days::new(7))
        .ok_or_else(fora_do_calendario)?;
    periodo_semana(semana_passada)
}

pub fn mes_anterior(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let mes_passado = referencia
        .checked_sub_months(Months::new(1))
        .ok_or_else(fora_do_calendario)?;
    periodo_mes(mes_passado)
}

/// Menor intervalo que cobre os seis períodos usados nas estatísticas.
pub fn janela_busca(referencia: NaiveDate) -> Result<Periodo, AppError> {
    let periodos = [
        periodo_dia(referencia),
        periodo_semana(referencia)?,
        periodo_mes(referencia)?,
        dia_anterior(referencia)?,
        semana_anterior(referencia)?,
        mes_anterior(referencia)?,
    ];

    let inicio = periodos.iter().map(|p| p.0).min().unwrap_or(referencia);
    let fim = periodos.iter().map(|p| p.1).max().unwrap_or(referencia);
    Ok((inicio, fim))
}

pub fn validar_intervalo(inicio: NaiveDate, fim: NaiveDate) -> Result<(), AppError> {
    if inicio > fim {
        return Err(AppError::BadRequest("invalid_date_range"));
    }
    // Conta os dois extremos
    if (fim - inicio).num_days() + 1 > MAX_DIAS_RELATORIO {
        return Err(AppError::BadRequest("range_too_large"));
    }
    Ok(())
}

// =============================================================================
//  AGREGAÇÕES
// =============================================================================

fn no_periodo(agendamento: &Agendamento, (inicio, fim): Periodo) -> bool {
    let dia = agendamento.data_hora.date();
    inicio <= dia && dia <= fim
}

pub fn resumir(agendamentos: &[Agendamento], periodo: Periodo) -> ResumoPeriodo {
    let mut resumo = ResumoPeriodo {
        inicio: periodo.0,
        fim: periodo.1,
        total: 0,
        agendados: 0,
        em_andamento: 0,
        concluidos: 0,
        cancelados: 0,
        faturamento: Decimal::ZERO,
        receita_prevista: Decimal::ZERO,
        ticket_medio: Decimal::ZERO,
    };

    for a in agendamentos.iter().filter(|a| no_periodo(a, periodo)) {
        resumo.total += 1;
        match a.status {
            AgendamentoStatus::Agendado => {
                resumo.agendados += 1;
                resumo.receita_prevista += a.valor_total;
            }
            AgendamentoStatus::EmAndamento => {
                resumo.em_andamento += 1;
                resumo.receita_prevista += a.valor_total;
            }
            AgendamentoStatus::Concluido => {
                resumo.concluidos += 1;
                resumo.faturamento += a.valor_total;
            }
            AgendamentoStatus::Cancelado => resumo.cancelados += 1,
        }
    }

    if resumo.concluidos > 0 {
        resumo.ticket_medio = (resumo.faturamento / Decimal::from(resumo.concluidos)).round_dp(2);
    }

    resumo
}

/// Variação percentual com duas casas; `None` quando não há base de comparação.
pub fn variacao(atual: Decimal, anterior: Decimal) -> Option<Decimal> {
    if anterior.is_zero() {
        return None;
    }
    Some(((atual - anterior) / anterior * Decimal::ONE_HUNDRED).round_dp(2))
}

pub fn comparar(agendamentos: &[Agendamento], atual: Periodo, anterior: Periodo) -> ComparativoPeriodo {
    let atual = resumir(agendamentos, atual);
    let anterior = resumir(agendamentos, anterior);

    ComparativoPeriodo {
        variacao_faturamento: variacao(atual.faturamento, anterior.faturamento),
        variacao_quantidade: variacao(Decimal::from(atual.total), Decimal::from(anterior.total)),
        atual,
        anterior,
    }
}

pub fn calcular_estatisticas(
    agendamentos: &[Agendamento],
    referencia: NaiveDate,
) -> Result<EstatisticasAgendamentos, AppError> {
    Ok(EstatisticasAgendamentos {
        referencia,
        hoje: comparar(agendamentos, periodo_dia(referencia), dia_anterior(referencia)?),
        semana: comparar(agendamentos, periodo_semana(referencia)?, semana_anterior(referencia)?),
        mes: comparar(agendamentos, periodo_mes(referencia)?, mes_anterior(referencia)?),
    })
}

/// Faturamento (só CONCLUIDO) dia a dia; dias sem movimento saem zerados.
pub fn faturamento_por_dia(
    agendamentos: &[Agendamento],
    inicio: NaiveDate,
    fim: NaiveDate,
) -> RelatorioFaturamento {
    let mut por_dia: Vec<FaturamentoDia> = inicio
        .iter_days()
        .take_while(|dia| *dia <= fim)
        .map(|data| FaturamentoDia {
            data,
            total: Decimal::ZERO,
            quantidade: 0,
        })
        .collect();

    for a in agendamentos
        .iter()
        .filter(|a| a.status == AgendamentoStatus::Concluido && no_periodo(a, (inicio, fim)))
    {
        let indice = (a.data_hora.date() - inicio).num_days() as usize;
        if let Some(dia) = por_dia.get_mut(indice) {
            dia.total += a.valor_total;
            dia.quantidade += 1;
        }
    }

    RelatorioFaturamento {
        inicio,
        fim,
        total: por_dia.iter().map(|d| d.total).sum(),
        quantidade: por_dia.iter().map(|d| d.quantidade).sum(),
        por_dia,
    }
}

/// Serviços mais pedidos (cancelados não contam). Desempate por faturamento
/// e depois pelo nome.
pub fn ranking_servicos(
    agendamentos: &[Agendamento],
    servicos: &[Servico],
    limite: usize,
) -> Vec<ServicoPopular> {
    let nomes: HashMap<Uuid, &str> = servicos.iter().map(|s| (s.id, s.nome.as_str())).collect();
    let mut contagem: HashMap<Uuid, (u32, Decimal)> = HashMap::new();

    for a in agendamentos
        .iter()
        .filter(|a| a.status != AgendamentoStatus::Cancelado)
    {
        let entry = contagem.entry(a.servico_id).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        if a.status == AgendamentoStatus::Concluido {
            entry.1 += a.valor_total;
        }
    }

    let mut ranking: Vec<ServicoPopular> = contagem
        .into_iter()
        .map(|(servico_id, (quantidade, faturamento))| ServicoPopular {
            servico_id,
            servico_nome: nomes.get(&servico_id).copied().unwrap_or_default().to_string(),
            quantidade,
            faturamento,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.quantidade
            .cmp(&a.quantidade)
            .then_with(|| b.faturamento.cmp(&a.faturamento))
            .then_with(|| a.servico_nome.cmp(&b.servico_nome))
    });
    ranking.truncate(limite);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    fn dec(valor: &str) -> Decimal {
        valor.parse().unwrap()
    }

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    fn em(data: NaiveDate, hora: u32) -> NaiveDateTime {
        data.and_hms_opt(hora, 0, 0).unwrap()
    }

    fn agendamento(
        data_hora: NaiveDateTime,
        status: AgendamentoStatus,
        valor: Decimal,
        servico_id: Uuid,
    ) -> Agendamento {
        Agendamento {
            id: Uuid::new_v4(),
            cliente_id: Uuid::new_v4(),
            veiculo_id: Uuid::new_v4(),
            servico_id,
            funcionario_id: None,
            data_hora,
            status,
            valor_total: valor,
            observacoes: None,
            iniciado_em: None,
            concluido_em: None,
            cancelado_em: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn servico(id: Uuid, nome: &str) -> Servico {
        Servico {
            id,
            categoria_id: None,
            nome: nome.into(),
            descricao: None,
            preco: Decimal::ZERO,
            duracao_minutos: 30,
            ativo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2025-03-14 é sexta
        assert_eq!(periodo_semana(d(2025, 3, 14)).unwrap(), (d(2025, 3, 10), d(2025, 3, 16)));
        // Domingo fica na semana que começou na segunda anterior
        assert_eq!(periodo_semana(d(2025, 3, 16)).unwrap(), (d(2025, 3, 10), d(2025, 3, 16)));
        assert_eq!(periodo_semana(d(2025, 3, 17)).unwrap(), (d(2025, 3, 17), d(2025, 3, 23)));
        assert_eq!(semana_anterior(d(2025, 3, 14)).unwrap(), (d(2025, 3, 3), d(2025, 3, 9)));
    }

    #[test]
    fn month_handles_short_months_and_year_turn() {
        assert_eq!(periodo_mes(d(2024, 2, 10)).unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(mes_anterior(d(2025, 3, 31)).unwrap(), (d(2025, 2, 1), d(2025, 2, 28)));
        assert_eq!(mes_anterior(d(2025, 1, 15)).unwrap(), (d(2024, 12, 1), d(2024, 12, 31)));
        assert_eq!(dia_anterior(d(2025, 1, 1)).unwrap(), (d(2024, 12, 31), d(2024, 12, 31)));
    }

    #[test]
    fn calendar_edges_are_rejected_instead_of_panicking() {
        let fora = |r: Result<Periodo, AppError>| {
            matches!(r, Err(AppError::BadRequest("invalid_date_range")))
        };

        assert!(fora(janela_busca(NaiveDate::MAX)));
        assert!(fora(periodo_mes(NaiveDate::MAX)));
        assert!(fora(janela_busca(NaiveDate::MIN)));
        assert!(fora(dia_anterior(NaiveDate::MIN)));
        assert!(fora(semana_anterior(NaiveDate::MIN)));
        assert!(fora(mes_anterior(NaiveDate::MIN)));
        assert!(matches!(
            calcular_estatisticas(&[], NaiveDate::MAX),
            Err(AppError::BadRequest("invalid_date_range"))
        ));
    }

    #[test]
    fn fetch_window_covers_every_period() {
        // 2025-03-03 (segunda): semana anterior em 24/02, mês anterior em 01/02
        assert_eq!(janela_busca(d(2025, 3, 3)).unwrap(), (d(2025, 2, 1), d(2025, 3, 31)));
        // Semana atual termina no mês seguinte
        assert_eq!(janela_busca(d(2025, 4, 30)).unwrap(), (d(2025, 3, 1), d(2025, 5, 4)));
    }

    #[test]
    fn summary_splits_revenue_by_status() {
        let dia = d(2025, 3, 14);
        let s = Uuid::new_v4();
        let lista = vec![
            agendamento(em(dia, 9), AgendamentoStatus::Concluido, dec("50.00"), s),
            agendamento(em(dia, 10), AgendamentoStatus::Concluido, dec("30.00"), s),
            agendamento(em(dia, 11), AgendamentoStatus::Agendado, dec("20.00"), s),
            agendamento(em(dia, 12), AgendamentoStatus::EmAndamento, dec("15.50"), s),
            agendamento(em(dia, 13), AgendamentoStatus::Cancelado, dec("99.00"), s),
            // Fora do dia
            agendamento(em(d(2025, 3, 15), 9), AgendamentoStatus::Concluido, dec("1000"), s),
        ];

        let resumo = resumir(&lista, periodo_dia(dia));
        assert_eq!(resumo.total, 5);
        assert_eq!(resumo.concluidos, 2);
        assert_eq!(resumo.agendados, 1);
        assert_eq!(resumo.em_andamento, 1);
        assert_eq!(resumo.cancelados, 1);
        assert_eq!(resumo.faturamento, dec("80.00"));
        assert_eq!(resumo.receita_prevista, dec("35.50"));
        assert_eq!(resumo.ticket_medio, dec("40.00"));
    }

    #[test]
    fn empty_summary_has_zero_ticket() {
        let resumo = resumir(&[], periodo_dia(d(2025, 3, 14)));
        assert_eq!(resumo.total, 0);
        assert_eq!(resumo.ticket_medio, Decimal::ZERO);
    }

    #[test]
    fn variation_is_a_rounded_percentage() {
        assert_eq!(variacao(dec("150"), dec("100")), Some(dec("50")));
        assert_eq!(variacao(dec("80"), dec("100")), Some(dec("-20")));
        assert_eq!(variacao(dec("1"), dec("3")), Some(dec("-66.67")));
        assert_eq!(variacao(dec("10"), Decimal::ZERO), None);
    }

    #[test]
    fn statistics_compare_with_previous_periods() {
        let hoje = d(2025, 3, 14);
        let s = Uuid::new_v4();
        let lista = vec![
            agendamento(em(hoje, 9), AgendamentoStatus::Concluido, dec("60"), s),
            agendamento(em(d(2025, 3, 13), 9), AgendamentoStatus::Concluido, dec("40"), s),
            agendamento(em(d(2025, 3, 5), 9), AgendamentoStatus::Concluido, dec("100"), s),
            agendamento(em(d(2025, 2, 20), 9), AgendamentoStatus::Concluido, dec("200"), s),
        ];

        let stats = calcular_estatisticas(&lista, hoje).unwrap();

        assert_eq!(stats.hoje.atual.faturamento, dec("60"));
        assert_eq!(stats.hoje.anterior.faturamento, dec("40"));
        assert_eq!(stats.hoje.variacao_faturamento, Some(dec("50")));

        // Semana 10..16/03 contra 03..09/03
        assert_eq!(stats.semana.atual.faturamento, dec("100"));
        assert_eq!(stats.semana.anterior.faturamento, dec("100"));
        assert_eq!(stats.semana.variacao_faturamento, Some(Decimal::ZERO));

        // Março contra fevereiro
        assert_eq!(stats.mes.atual.total, 3);
        assert_eq!(stats.mes.anterior.total, 1);
        assert_eq!(stats.mes.variacao_quantidade, Some(dec("200")));
    }

    #[test]
    fn revenue_report_fills_empty_days() {
        let s = Uuid::new_v4();
        let lista = vec![
            agendamento(em(d(2025, 3, 1), 9), AgendamentoStatus::Concluido, dec("25"), s),
            agendamento(em(d(2025, 3, 1), 15), AgendamentoStatus::Concluido, dec("35"), s),
            agendamento(em(d(2025, 3, 3), 9), AgendamentoStatus::Agendado, dec("70"), s),
            agendamento(em(d(2025, 3, 3), 10), AgendamentoStatus::Concluido, dec("10"), s),
        ];

        let rel = faturamento_por_dia(&lista, d(2025, 3, 1), d(2025, 3, 4));

        assert_eq!(rel.por_dia.len(), 4);
        assert_eq!(rel.por_dia[0].total, dec("60"));
        assert_eq!(rel.por_dia[0].quantidade, 2);
        assert_eq!(rel.por_dia[1].total, Decimal::ZERO);
        assert_eq!(rel.por_dia[2].total, dec("10"));
        assert_eq!(rel.por_dia[3].data, d(2025, 3, 4));
        assert_eq!(rel.total, dec("70"));
        assert_eq!(rel.quantidade, 3);
    }

    #[test]
    fn report_range_is_checked() {
        assert!(validar_intervalo(d(2025, 3, 2), d(2025, 3, 1)).is_err());
        assert!(validar_intervalo(d(2024, 1, 1), d(2024, 12, 31)).is_ok());
        assert!(matches!(
            validar_intervalo(d(2024, 1, 1), d(2025, 1, 1)),
            Err(AppError::BadRequest("range_too_large"))
        ));
    }

    #[test]
    fn ranking_ignores_cancelled_and_breaks_ties() {
        let lavagem = Uuid::new_v4();
        let polimento = Uuid::new_v4();
        let cera = Uuid::new_v4();
        let dia = em(d(2025, 3, 14), 9);

        let lista = vec![
            agendamento(dia, AgendamentoStatus::Concluido, dec("40"), lavagem),
            agendamento(dia, AgendamentoStatus::Agendado, dec("40"), lavagem),
            agendamento(dia, AgendamentoStatus::Concluido, dec("200"), polimento),
            agendamento(dia, AgendamentoStatus::Cancelado, dec("200"), polimento),
            agendamento(dia, AgendamentoStatus::Cancelado, dec("200"), polimento),
            agendamento(dia, AgendamentoStatus::Concluido, dec("80"), cera),
        ];
        let servicos = vec![
            servico(lavagem, "Lavagem"),
            servico(polimento, "Polimento"),
            servico(cera, "Cera"),
        ];

        let ranking = ranking_servicos(&lista, &servicos, 2);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].servico_nome, "Lavagem");
        assert_eq!(ranking[0].quantidade, 2);
        assert_eq!(ranking[0].faturamento, dec("40"));
        // Empate em quantidade: maior faturamento primeiro
        assert_eq!(ranking[1].servico_nome, "Polimento");
    }
}
