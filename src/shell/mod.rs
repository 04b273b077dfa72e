// Composition root.
//
// - Read config from the environment.
// - Wire in-memory stores into the use case handlers.
// - Serve HTTP and GraphQL, and run the background workers.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
pub mod workers;
