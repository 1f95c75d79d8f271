pub mod admin;
pub mod athlete_profile;
pub mod auth;
pub mod coach_profile;
pub mod coach_request;
pub mod common;
pub mod tournament;
