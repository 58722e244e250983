pub mod audit;
pub mod auth;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod services;
pub mod store;
