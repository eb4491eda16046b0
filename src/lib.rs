//!
//! # Embroidery digitization core
//!
//! Deterministic pipeline turning closed 2-D vector layers into an
//! ordered stitch sequence, and encoding that sequence into the Tajima
//! DST and Melco EXP binary formats.
//!

#![allow(clippy::unnecessary_unwrap)]

use mod_interface::mod_interface;

mod private {}

mod_interface!
{
  layer error;
  layer stitch;
  layer layer;
  layer config;
  layer geometry;
  layer generators;
  layer compose;
  layer format;
}
