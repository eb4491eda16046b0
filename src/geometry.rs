//!
//! # Geometry kernel
//!
//! 2-D point arithmetic, polygon offset with miter join, RDP
//! simplification, uniform arc-length resampling, and nearest-join
//! path-sequence optimisation. The stitch generators in `generators`
//! build on these.
//!

mod private {}

crate::mod_interface!
{
  layer offset;
  layer simplify;
  layer resample;
  layer sequence;
}
