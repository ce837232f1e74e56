//! Re-export public algorithms.

pub mod boundary;
pub mod faces;
pub mod meshgen;
pub mod orientation;
pub mod parts;
pub mod skin;

pub use boundary::classify_boundary_faces;
pub use skin::extract_skins;
