//! Account domain entities.

pub mod role;

pub use role::AccountRole;
