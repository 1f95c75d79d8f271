pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod mailer;
pub mod middleware;
pub mod openapi;
pub mod state;
