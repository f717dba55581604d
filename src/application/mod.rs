//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Short code selection with bounded retry
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion and click accounting

pub mod services;
