//! Route handlers, one module per dashboard page

pub mod about;
pub mod bhi;
pub mod charging;
pub mod driving;
