pub mod datetime;
pub mod jwt;
pub mod password;
