//! Route handler modules for the devconnector REST API.

pub mod health;
pub mod posts;
pub mod profiles;
pub mod users;
