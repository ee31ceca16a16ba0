//! Wire and domain types shared by the todo client and the development server.

pub mod domain;
pub mod error;
