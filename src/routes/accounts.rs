pub mod accounts_handlers;
pub mod accounts_models;
