pub mod admin_athletes;
pub mod admin_coaches;
pub mod admin_profile;
pub mod athlete_profile;
pub mod auth;
pub mod coach_profile;
pub mod coach_requests;
pub mod find_coaches;
pub mod tournaments;
