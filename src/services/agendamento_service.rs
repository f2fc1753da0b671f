// src/services/agendamento_service.rs

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgendamentoRepository, EmpresaRepository, ServicoRepository, VeiculoRepository},
    models::{
        agendamento::{
            Agendamento, AgendamentoDetalhe, AgendamentoStatus, CreateAgendamentoPayload,
            UpdateAgendamentoPayload,
        },
        empresa::EmpresaHorario,
        servico::Servico,
        veiculo::Veiculo,
    },
    services::empresa_service::horario_permite,
};

// Resultado da troca de status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transicao {
    Aplicar,
    // Mesmo status: nada a gravar
    Ignorar,
}

/// Decide se `atual -> novo` é permitido pelo ciclo de vida.
pub fn validar_transicao(
    atual: AgendamentoStatus,
    novo: AgendamentoStatus,
) -> Result<Transicao, AppError> {
    if atual == novo {
        return Ok(Transicao::Ignorar);
    }
    if atual.can_transition_to(novo) {
        Ok(Transicao::Aplicar)
    } else {
        Err(AppError::InvalidStatusTransition {
            from: atual,
            to: novo,
        })
    }
}

/// Agendamentos CONCLUIDO ou CANCELADO não aceitam mais edição.
pub fn garantir_editavel(atual: &Agendamento) -> Result<(), AppError> {
    if atual.status.is_final() {
        return Err(AppError::AppointmentClosed);
    }
    Ok(())
}

// Na edição, o serviço já gravado continua valendo mesmo se foi desativado depois
fn exige_servico_ativo(atual: &Agendamento, servico_id: Uuid) -> bool {
    servico_id != atual.servico_id
}

// Regras de negócio da reserva, já com veículo, serviço e horários carregados.
// Devolve o valor a gravar.
fn aplicar_regras_reserva(
    veiculo: &Veiculo,
    servico: &Servico,
    horarios: &[EmpresaHorario],
    reserva: &Reserva<'_>,
    exigir_servico_ativo: bool,
) -> Result<Decimal, AppError> {
    if veiculo.cliente_id != reserva.cliente_id {
        return Err(AppError::VehicleOwnerMismatch);
    }
    if exigir_servico_ativo && !servico.ativo {
        return Err(AppError::InactiveService);
    }
    if !horario_permite(horarios, reserva.data_hora) {
        return Err(AppError::OutsideBusinessHours);
    }
    Ok(reserva.valor_total.unwrap_or(servico.preco))
}

#[derive(Clone)]
pub struct AgendamentoService {
    pool: PgPool,
    repo: AgendamentoRepository,
    veiculo_repo: VeiculoRepository,
    servico_repo: ServicoRepository,
    empresa_repo: EmpresaRepository,
}

// Campos de reserva comuns a criação e edição
struct Reserva<'a> {
    cliente_id: Uuid,
    veiculo_id: Uuid,
    servico_id: Uuid,
    data_hora: chrono::NaiveDateTime,
    valor_total: Option<Decimal>,
    observacoes: Option<&'a str>,
}

impl AgendamentoService {
    pub fn new(
        pool: PgPool,
        repo: AgendamentoRepository,
        veiculo_repo: VeiculoRepository,
        servico_repo: ServicoRepository,
        empresa_repo: EmpresaRepository,
    ) -> Self {
        Self {
            pool,
            repo,
            veiculo_repo,
            servico_repo,
            empresa_repo,
        }
    }

    pub async fn create(
        &self,
        payload: &CreateAgendamentoPayload,
    ) -> Result<AgendamentoDetalhe, AppError> {
        let mut tx = self.pool.begin().await?;

        let reserva = Reserva {
            cliente_id: payload.cliente_id,
            veiculo_id: payload.veiculo_id,
            servico_id: payload.servico_id,
            data_hora: payload.data_hora,
            valor_total: payload.valor_total,
            observacoes: payload.observacoes.as_deref(),
        };
        let valor_total = self.validar_reserva(&mut tx, &reserva, true).await?;

        let agendamento = self
            .repo
            .create(
                &mut *tx,
                payload.cliente_id,
                payload.veiculo_id,
                payload.servico_id,
                payload.funcionario_id,
                payload.data_hora,
                valor_total,
                reserva.observacoes,
            )
            .await?;

        let detalhe = self.detalhe(&mut tx, agendamento.id).await?;
        tx.commit().await?;

        tracing::info!(
            "Agendamento {} criado para {}",
            detalhe.agendamento.id,
            detalhe.agendamento.data_hora
        );
        Ok(detalhe)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateAgendamentoPayload,
    ) -> Result<AgendamentoDetalhe, AppError> {
        let mut tx = self.pool.begin().await?;

        let atual = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("agendamento"))?;

        garantir_editavel(&atual)?;

        let reserva = Reserva {
            cliente_id: payload.cliente_id,
            veiculo_id: payload.veiculo_id,
            servico_id: payload.servico_id,
            data_hora: payload.data_hora,
            valor_total: Some(payload.valor_total),
            observacoes: payload.observacoes.as_deref(),
        };
        let exigir_ativo = exige_servico_ativo(&atual, payload.servico_id);
        let valor_total = self.validar_reserva(&mut tx, &reserva, exigir_ativo).await?;

        self.repo
            .update(
                &mut *tx,
                id,
                payload.cliente_id,
                payload.veiculo_id,
                payload.servico_id,
                payload.funcionario_id,
                payload.data_hora,
                valor_total,
                reserva.observacoes,
            )
            .await?;

        let detalhe = self.detalhe(&mut tx, id).await?;
        tx.commit().await?;

        Ok(detalhe)
    }

    /// Troca de status com a linha travada até o commit.
    pub async fn update_status(
        &self,
        id: Uuid,
        novo: AgendamentoStatus,
    ) -> Result<AgendamentoDetalhe, AppError> {
        let mut tx = self.pool.begin().await?;

        let atual: Agendamento = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("agendamento"))?;

        match validar_transicao(atual.status, novo)? {
            Transicao::Aplicar => {
                self.repo.update_status(&mut *tx, id, novo).await?;
                tracing::info!("Agendamento {}: {} -> {}", id, atual.status, novo);
            }
            Transicao::Ignorar => {
                tracing::debug!("Agendamento {} já está em {}", id, novo);
            }
        }

        let detalhe = self.detalhe(&mut tx, id).await?;
        tx.commit().await?;

        Ok(detalhe)
    }

    // Carrega o que as regras da reserva precisam e as aplica
    async fn validar_reserva(
        &self,
        conn: &mut PgConnection,
        reserva: &Reserva<'_>,
        exigir_servico_ativo: bool,
    ) -> Result<Decimal, AppError> {
        let veiculo = self
            .veiculo_repo
            .find_by_id(&mut *conn, reserva.veiculo_id)
            .await?
            .ok_or(AppError::NotFound("veiculo"))?;

        let servico = self
            .servico_repo
            .find_by_id(&mut *conn, reserva.servico_id)
            .await?
            .ok_or(AppError::NotFound("servico"))?;

        let horarios = self.empresa_repo.list_horarios().await?;

        aplicar_regras_reserva(&veiculo, &servico, &horarios, reserva, exigir_servico_ativo)
    }

    async fn detalhe(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<AgendamentoDetalhe, AppError> {
        self.repo
            .find_detalhe(&mut *conn, id)
            .await?
            .ok_or(AppError::NotFound("agendamento"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::empresa::DiaSemana;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use AgendamentoStatus::*;

    fn dec(valor: &str) -> Decimal {
        valor.parse().unwrap()
    }

    // 2025-03-14 é uma sexta-feira
    fn sexta(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn veiculo_de(cliente_id: Uuid) -> Veiculo {
        Veiculo {
            id: Uuid::new_v4(),
            cliente_id,
            marca: Some("Honda".into()),
            modelo: "Civic".into(),
            placa: "BRA2E19".into(),
            cor: None,
            ano: Some(2020),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn servico(preco: &str, ativo: bool) -> Servico {
        Servico {
            id: Uuid::new_v4(),
            categoria_id: None,
            nome: "Lavagem completa".into(),
            descricao: None,
            preco: dec(preco),
            duracao_minutos: 60,
            ativo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Sexta das 08:00 às 18:00
    fn expediente() -> Vec<EmpresaHorario> {
        vec![EmpresaHorario {
            dia_semana: DiaSemana::Sexta,
            abertura: NaiveTime::from_hms_opt(8, 0, 0),
            fechamento: NaiveTime::from_hms_opt(18, 0, 0),
            fechado: false,
        }]
    }

    fn reserva(cliente_id: Uuid, servico: &Servico, hora: u32) -> Reserva<'static> {
        Reserva {
            cliente_id,
            veiculo_id: Uuid::new_v4(),
            servico_id: servico.id,
            data_hora: sexta(hora),
            valor_total: None,
            observacoes: None,
        }
    }

    fn agendamento(status: AgendamentoStatus, servico_id: Uuid) -> Agendamento {
        Agendamento {
            id: Uuid::new_v4(),
            cliente_id: Uuid::new_v4(),
            veiculo_id: Uuid::new_v4(),
            servico_id,
            funcionario_id: None,
            data_hora: sexta(10),
            status,
            valor_total: dec("50"),
            observacoes: None,
            iniciado_em: None,
            concluido_em: None,
            cancelado_em: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn booking_without_value_uses_service_price() {
        let cliente = Uuid::new_v4();
        let lavagem = servico("80.00", true);
        let valor = aplicar_regras_reserva(
            &veiculo_de(cliente),
            &lavagem,
            &expediente(),
            &reserva(cliente, &lavagem, 10),
            true,
        )
        .unwrap();
        assert_eq!(valor, dec("80.00"));
    }

    #[test]
    fn explicit_value_overrides_service_price() {
        let cliente = Uuid::new_v4();
        let lavagem = servico("80.00", true);
        let mut pedido = reserva(cliente, &lavagem, 10);
        pedido.valor_total = Some(dec("65.50"));

        let valor =
            aplicar_regras_reserva(&veiculo_de(cliente), &lavagem, &expediente(), &pedido, true)
                .unwrap();
        assert_eq!(valor, dec("65.50"));
    }

    #[test]
    fn vehicle_of_another_client_is_rejected() {
        let lavagem = servico("80.00", true);
        let resultado = aplicar_regras_reserva(
            &veiculo_de(Uuid::new_v4()),
            &lavagem,
            &expediente(),
            &reserva(Uuid::new_v4(), &lavagem, 10),
            true,
        );
        assert!(matches!(resultado, Err(AppError::VehicleOwnerMismatch)));
    }

    #[test]
    fn inactive_service_only_blocks_when_required() {
        let cliente = Uuid::new_v4();
        let desativado = servico("80.00", false);
        let pedido = reserva(cliente, &desativado, 10);

        let novo = aplicar_regras_reserva(
            &veiculo_de(cliente),
            &desativado,
            &expediente(),
            &pedido,
            true,
        );
        assert!(matches!(novo, Err(AppError::InactiveService)));

        // Edição mantendo o mesmo serviço
        let edicao = aplicar_regras_reserva(
            &veiculo_de(cliente),
            &desativado,
            &expediente(),
            &pedido,
            false,
        );
        assert_eq!(edicao.unwrap(), dec("80.00"));
    }

    #[test]
    fn booking_outside_business_hours_is_rejected() {
        let cliente = Uuid::new_v4();
        let lavagem = servico("80.00", true);

        for hora in [7, 18, 22] {
            let resultado = aplicar_regras_reserva(
                &veiculo_de(cliente),
                &lavagem,
                &expediente(),
                &reserva(cliente, &lavagem, hora),
                true,
            );
            assert!(matches!(resultado, Err(AppError::OutsideBusinessHours)));
        }

        // Sem horários cadastrados, qualquer hora vale
        let livre = aplicar_regras_reserva(
            &veiculo_de(cliente),
            &lavagem,
            &[],
            &reserva(cliente, &lavagem, 22),
            true,
        );
        assert!(livre.is_ok());
    }

    #[test]
    fn closed_appointments_cannot_be_edited() {
        let servico_id = Uuid::new_v4();
        assert!(garantir_editavel(&agendamento(Agendado, servico_id)).is_ok());
        assert!(garantir_editavel(&agendamento(EmAndamento, servico_id)).is_ok());
        for status in [Concluido, Cancelado] {
            let err = garantir_editavel(&agendamento(status, servico_id)).unwrap_err();
            assert!(matches!(err, AppError::AppointmentClosed));
            assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
        }
    }

    #[test]
    fn changing_the_service_requires_it_to_be_active() {
        let servico_id = Uuid::new_v4();
        let atual = agendamento(Agendado, servico_id);
        assert!(!exige_servico_ativo(&atual, servico_id));
        assert!(exige_servico_ativo(&atual, Uuid::new_v4()));
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in [Agendado, EmAndamento, Concluido, Cancelado] {
            assert_eq!(validar_transicao(status, status).unwrap(), Transicao::Ignorar);
        }
    }

    #[test]
    fn forward_transitions_are_applied() {
        assert_eq!(validar_transicao(Agendado, EmAndamento).unwrap(), Transicao::Aplicar);
        assert_eq!(validar_transicao(EmAndamento, Concluido).unwrap(), Transicao::Aplicar);
        assert_eq!(validar_transicao(Agendado, Cancelado).unwrap(), Transicao::Aplicar);
    }

    #[test]
    fn leaving_a_final_state_names_both_states() {
        match validar_transicao(Concluido, EmAndamento) {
            Err(AppError::InvalidStatusTransition { from, to }) => {
                assert_eq!(from, Concluido);
                assert_eq!(to, EmAndamento);
            }
            other => panic!("esperava transição inválida, veio {:?}", other),
        }
        assert!(validar_transicao(Cancelado, Agendado).is_err());
        assert!(validar_transicao(EmAndamento, Agendado).is_err());
    }
}
