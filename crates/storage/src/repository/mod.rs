pub mod account;
pub mod admin;
pub mod athlete_profile;
pub mod coach_profile;
pub mod coach_request;
pub mod registration;
pub mod tournament;
