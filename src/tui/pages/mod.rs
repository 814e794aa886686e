//! Screens, one per route.

pub mod detail;
pub mod landing;
