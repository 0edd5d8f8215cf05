pub mod auth;
pub mod contracts;
pub mod messages;
pub mod projects;
pub mod proposals;
pub mod reviews;
pub mod users;
