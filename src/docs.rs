// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clientes::list_clientes,
        handlers::clientes::get_cliente,
        handlers::clientes::create_cliente,
        handlers::clientes::update_cliente,
        handlers::clientes::delete_cliente,
        handlers::clientes::list_veiculos_do_cliente,
        handlers::clientes::list_agendamentos_do_cliente,

        // --- Veículos ---
        handlers::veiculos::list_veiculos,
        handlers::veiculos::get_veiculo,
        handlers::veiculos::create_veiculo,
        handlers::veiculos::update_veiculo,
        handlers::veiculos::delete_veiculo,

        // --- Catálogo ---
        handlers::categorias::list_categorias,
        handlers::categorias::get_categoria,
        handlers::categorias::create_categoria,
        handlers::categorias::update_categoria,
        handlers::categorias::delete_categoria,
        handlers::servicos::list_servicos,
        handlers::servicos::get_servico,
        handlers::servicos::create_servico,
        handlers::servicos::update_servico,
        handlers::servicos::delete_servico,

        // --- Funcionários ---
        handlers::funcionarios::list_funcionarios,
        handlers::funcionarios::get_funcionario,
        handlers::funcionarios::create_funcionario,
        handlers::funcionarios::update_funcionario,
        handlers::funcionarios::delete_funcionario,

        // --- Agendamentos ---
        handlers::agendamentos::list_agendamentos,
        handlers::agendamentos::list_todos,
        handlers::agendamentos::get_agendamento,
        handlers::agendamentos::create_agendamento,
        handlers::agendamentos::update_agendamento,
        handlers::agendamentos::update_status,
        handlers::agendamentos::delete_agendamento,
        handlers::agendamentos::generate_comprovante,

        // --- Empresa ---
        handlers::empresa::get_empresa,
        handlers::empresa::update_empresa,
        handlers::empresa::get_horarios,
        handlers::empresa::update_horarios,
        handlers::empresa::get_status,
        handlers::empresa::list_contatos,
        handlers::empresa::create_contato,
        handlers::empresa::update_contato,
        handlers::empresa::delete_contato,

        // --- Dashboard ---
        handlers::dashboard::get_estatisticas,
        handlers::dashboard::get_faturamento,
        handlers::dashboard::get_servicos_populares,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Funcionários ---
            models::funcionario::FuncionarioRole,
            models::funcionario::Funcionario,
            models::funcionario::CreateFuncionarioPayload,
            models::funcionario::UpdateFuncionarioPayload,

            // --- Clientes e Veículos ---
            models::cliente::Cliente,
            models::cliente::ClientePayload,
            models::veiculo::Veiculo,
            models::veiculo::VeiculoPayload,

            // --- Catálogo ---
            models::categoria::Categoria,
            models::categoria::CategoriaPayload,
            models::servico::Servico,
            models::servico::ServicoPayload,

            // --- Agendamentos ---
            models::agendamento::AgendamentoStatus,
            models::agendamento::Agendamento,
            models::agendamento::AgendamentoDetalhe,
            models::agendamento::CreateAgendamentoPayload,
            models::agendamento::UpdateAgendamentoPayload,
            models::agendamento::UpdateStatusPayload,

            // --- Empresa ---
            models::empresa::Empresa,
            models::empresa::UpdateEmpresaRequest,
            models::empresa::DiaSemana,
            models::empresa::EmpresaHorario,
            models::empresa::StatusFuncionamento,
            models::empresa::ContatoTipo,
            models::empresa::EmpresaContato,
            models::empresa::ContatoPayload,

            // --- Dashboard ---
            models::dashboard::ResumoPeriodo,
            models::dashboard::ComparativoPeriodo,
            models::dashboard::EstatisticasAgendamentos,
            models::dashboard::FaturamentoDia,
            models::dashboard::RelatorioFaturamento,
            models::dashboard::ServicoPopular,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Clientes", description = "Cadastro de Clientes"),
        (name = "Veiculos", description = "Veículos dos Clientes"),
        (name = "Catalogo", description = "Categorias e Serviços oferecidos"),
        (name = "Funcionarios", description = "Equipe (apenas ADMIN)"),
        (name = "Agendamentos", description = "Agenda, Status e Comprovantes"),
        (name = "Empresa", description = "Perfil, Horários e Contatos do Lava-Jato"),
        (name = "Dashboard", description = "Indicadores e Faturamento")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
