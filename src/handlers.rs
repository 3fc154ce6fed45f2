pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod goals;
pub mod health;
pub mod history;
pub mod import;
pub mod income;
pub mod investments;
pub mod profile;
pub mod savings;
pub mod users;
