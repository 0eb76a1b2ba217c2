//! Route handlers, one module per resource family.

pub mod comments;
pub mod posts;
pub mod users;
