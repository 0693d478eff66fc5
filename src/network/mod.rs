//! Network layer - endpoint resolution, HTTP clients and the actor that
//! executes API calls off the App layer's thread.

pub mod actor;
pub mod client;
pub mod endpoints;

pub use actor::NetworkActor;
pub use client::HttpClient;
pub use endpoints::Endpoint;
