pub mod dashboard_view_handlers;
pub mod dashboard_view_models;
