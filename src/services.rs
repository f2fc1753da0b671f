pub mod agendamento_service;
pub mod auth;
pub mod dashboard_service;
pub mod document_service;
pub mod empresa_service;
