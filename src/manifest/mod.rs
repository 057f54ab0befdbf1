//! Manifest rendering split into fingerprint computation and text assembly.

mod fingerprint;
mod render;

pub(crate) use render::render;
