//! Image, vector and video export of the mounted composition.

/// Output file names.
pub mod naming;
/// Export driver.
pub mod pipeline;
/// The capturable visual tree.
pub mod surface;
