pub mod admin_handlers;
pub mod athlete_handlers;
pub mod coach_handlers;
pub mod routes;
pub mod services;
