//! fieldfence - Edit, render and persist plantation boundary polygons

pub mod api;
pub mod config;
pub mod domain;
pub mod editor;
pub mod geometry;
pub mod gesture;
pub mod render;
