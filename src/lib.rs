pub mod error;
pub mod logging;
pub mod models;
pub mod posts;
pub mod profiles;
pub mod storage;
pub mod users;
pub mod validation;
pub mod web;
