//!
//! # Embroidery pipeline errors
//!

mod private
{
  use thiserror::Error;
  use std::borrow::Cow;

  /// Represents errors that can be encountered while digitizing a design
  /// or encoding it into a binary stitch format.
  ///
  /// `InvalidInput` (a degenerate polygon or path handed to a generator)
  /// is deliberately absent here — per the pipeline's error-handling
  /// contract it is recovered locally by the generator that hit it and
  /// never surfaces past that boundary.
  #[ derive( Debug, Error ) ]
  pub enum EmbroideryError
  {
    /// A `ProcessingConfig` field is outside the range its consumer
    /// requires (e.g. a non-positive `density_mm`).
    #[ error( "Config out of range: `{0}`" ) ]
    ConfigOutOfRange( Cow< 'static, str > ),
    /// A stitch position can't be represented by the target binary
    /// format's coordinate field.
    #[ error( "Coordinate overflow: `{0}`" ) ]
    CoordinateOverflow( Cow< 'static, str > ),
    /// The pipeline produced zero non-structural stitches.
    #[ error( "Design has no visible stitches" ) ]
    EmptyDesign,
  }
}

crate::mod_interface!
{
  own use EmbroideryError;
}
