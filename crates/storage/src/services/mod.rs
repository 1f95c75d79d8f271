pub mod certificates;
pub mod registration_policy;
