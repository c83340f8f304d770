//! Services Layer
//!
//! Pure business logic without the HTTP layer. Acting identity is always an
//! explicit parameter; the handlers decide what it is.

pub mod book_service;
pub mod person_service;
