//!
//! # Stitch generators
//!
//! Three generators keyed on stitch type (`running`, `satin`, `tatami`),
//! the underlay generator that wraps each with structural stitches,
//! and the tie-in / tie-off / cleanup layer shared by all of them.
//!

mod private {}

crate::mod_interface!
{
  layer running;
  layer satin;
  layer tatami;
  layer underlay;
  layer tie;
}
