pub mod agendamentos;
pub mod auth;
pub mod categorias;
pub mod clientes;
pub mod dashboard;
pub mod empresa;
pub mod funcionarios;
pub mod servicos;
pub mod veiculos;
