pub mod common;
pub mod constraints;
pub mod geometry;
pub mod model;
