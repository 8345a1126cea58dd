//! REST API for player records
//!
//! Routes:
//! 1. `GET /rest/players` and `GET /rest/players/count` - filtered listing
//! 2. `GET|POST|DELETE /rest/players/:id` - single-record operations
//! 3. `POST /rest/players` - creation

mod handlers;
mod server;
mod state;

#[cfg(test)]
mod tests;

pub use server::start_server;
