//! Resource APIs, one method per remote endpoint.

mod audience;
mod send;

pub use audience::AudienceApi;
pub use send::SendApi;
