pub mod forms;
pub mod handlers;
pub mod routes;
pub mod views;

pub use handlers::*;
pub use routes::*;
