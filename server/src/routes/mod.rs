//! Route handlers, one module per resource. Each handler issues at most one
//! store call.

pub mod health;
pub mod todos;
pub mod users;
