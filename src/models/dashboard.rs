// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// 1. Resumo de um período (dia, semana ou mês)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoPeriodo {
    #[schema(value_type = String, format = Date)]
    pub inicio: NaiveDate,
    // Inclusivo
    #[schema(value_type = String, format = Date)]
    pub fim: NaiveDate,

    pub total: u32,
    pub agendados: u32,
    pub em_andamento: u32,
    pub concluidos: u32,
    pub cancelados: u32,

    // Soma do valorTotal dos CONCLUIDOS
    #[schema(value_type = f64)]
    pub faturamento: Decimal,
    // Soma do valorTotal dos AGENDADOS + EM_ANDAMENTO
    #[schema(value_type = f64)]
    pub receita_prevista: Decimal,
    #[schema(value_type = f64)]
    pub ticket_medio: Decimal,
}

// 2. Período atual contra o anterior do mesmo tipo
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoPeriodo {
    pub atual: ResumoPeriodo,
    pub anterior: ResumoPeriodo,
    // Em %, `null` quando o período anterior é zero
    #[schema(value_type = Option<f64>, example = 12.5)]
    pub variacao_faturamento: Option<Decimal>,
    #[schema(value_type = Option<f64>, example = -20.0)]
    pub variacao_quantidade: Option<Decimal>,
}

// 3. Os cards do topo do painel
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstatisticasAgendamentos {
    #[schema(value_type = String, format = Date)]
    pub referencia: NaiveDate,
    pub hoje: ComparativoPeriodo,
    pub semana: ComparativoPeriodo,
    pub mes: ComparativoPeriodo,
}

// 4. Gráfico de faturamento
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaturamentoDia {
    #[schema(value_type = String, format = Date)]
    pub data: NaiveDate,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub quantidade: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioFaturamento {
    #[schema(value_type = String, format = Date)]
    pub inicio: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub fim: NaiveDate,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub quantidade: u32,
    pub por_dia: Vec<FaturamentoDia>,
}

// 5. Ranking de serviços
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicoPopular {
    pub servico_id: Uuid,
    #[schema(example = "Lavagem Simples")]
    pub servico_nome: String,
    pub quantidade: u32,
    #[schema(value_type = f64)]
    pub faturamento: Decimal,
}

// --- Query strings ---

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EstatisticasQuery {
    /// Data de referência (padrão: hoje)
    #[param(value_type = Option<String>, format = Date, example = "2025-03-14")]
    pub data: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FaturamentoQuery {
    #[param(value_type = String, format = Date, example = "2025-03-01")]
    pub inicio: NaiveDate,
    #[param(value_type = String, format = Date, example = "2025-03-31")]
    pub fim: NaiveDate,
}

fn default_limite() -> u32 {
    5
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServicosPopularesQuery {
    #[serde(default = "default_limite")]
    #[validate(range(min = 1, max = 50, message = "invalid_limit"))]
    #[param(example = 5)]
    pub limite: u32,
}
