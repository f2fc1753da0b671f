pub mod funcionario_repo;
pub use funcionario_repo::FuncionarioRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod veiculo_repo;
pub use veiculo_repo::VeiculoRepository;
pub mod categoria_repo;
pub use categoria_repo::CategoriaRepository;
pub mod servico_repo;
pub use servico_repo::ServicoRepository;
pub mod agendamento_repo;
pub use agendamento_repo::AgendamentoRepository;
pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
