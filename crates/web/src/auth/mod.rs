pub mod jwt;
pub mod password;
pub mod principal;
pub mod reset_token;
