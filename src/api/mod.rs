//! API handlers: thin mapping from service outcomes to HTTP responses.
//!
//! Handlers only shape data bags and status codes; rendering is the
//! client's concern and business rules live in the services.

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod instances;
pub mod stats;
