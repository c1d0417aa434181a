pub mod catalog;
pub mod handlers;
pub mod middleware;
pub mod products;
pub mod routes;
pub mod stats;

pub use routes::create_router;
