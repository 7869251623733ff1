pub mod client;
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use deadpool_postgres::Pool;

#[derive(Clone)]
pub struct AppState {
    pub pg_pool: Pool,
}
