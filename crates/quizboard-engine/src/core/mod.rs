pub mod geometry;
pub mod lifetime;
pub mod scene;
