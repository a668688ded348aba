pub mod accounts;
pub mod dashboard_view;
pub mod project_view;
pub mod routes;
pub mod task_view;
