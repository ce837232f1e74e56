//! Geometry utilities for mesh-skin.
//!
//! This module provides the small amount of 3-vector arithmetic needed to
//! orient boundary faces and to check the resulting skins.

pub mod vector;
