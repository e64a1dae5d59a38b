//! Database access for users, lists and items.
//!
//! List and item functions always take the verified user id from the authorization
//! gate and filter every statement by it. Writes spanning two tables run in a single
//! transaction so an entity row never exists without its mapping row.

pub mod items;
pub mod lists;
pub mod update;
pub mod users;
