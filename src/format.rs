//!
//! # Binary encoders for embroidery formats
//!
//! Two sibling encoders, one per target format: Tajima DST (fixed
//! 512-byte ASCII header, 3-byte Tajima-interleaved body records) and
//! Melco EXP (no header, 2/4-byte relative-delta body records).
//!

mod private {}

crate::mod_interface!
{
  layer dst;
  layer exp;
}
