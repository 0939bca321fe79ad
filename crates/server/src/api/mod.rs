pub mod handlers;
pub mod magnet;
pub mod middleware;
pub mod notifications;
pub mod routes;
pub mod sessions;
pub mod sync;

pub use handlers::ErrorResponse;
pub use routes::create_router;
