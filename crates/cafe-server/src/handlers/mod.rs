//! HTTP handlers

pub mod cafes;
pub mod home;

pub use home::index;
