//! API Routes
//!
//! Route handlers organized by functionality.

pub mod feed;
pub mod health;
