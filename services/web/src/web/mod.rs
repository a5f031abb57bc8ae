pub mod handlers;
pub mod session;
pub mod state;
pub mod templates;

// Re-export the router builder and shared state so the server binary (and
// the integration tests) can assemble the application.
pub use handlers::router;
pub use state::AppState;
