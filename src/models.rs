pub mod agendamento;
pub mod auth;
pub mod categoria;
pub mod cliente;
pub mod dashboard;
pub mod empresa;
pub mod funcionario;
pub mod servico;
pub mod veiculo;
