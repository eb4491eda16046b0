//!
//! # Digitization options
//!

mod private
{
  use crate::error::EmbroideryError;

  /// Selects the stitch generator a path or polygon set is run
  /// through.
  #[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
  pub enum StitchType
  {
    /// A single row of stitches along a path.
    Running,
    /// A back-and-forth fill between two mitered rails following a
    /// spine.
    Satin,
    /// A parallel-row brick-offset fill.
    Tatami,
  }

  /// Selects defaults for a design. Does not alter the core generators
  /// directly — it is consumed upstream of this crate, but carried
  /// through so callers can round-trip it alongside the rest of
  /// `ProcessingConfig`.
  #[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
  pub enum DesignStyle
  {
    /// Classic embroidery look: heavier underlay, tighter density.
    Vintage,
    /// Single running-stitch outline.
    PatchLine,
    /// Solid fill patch.
    PatchFill,
  }

  /// Parameters consumed by the digitization pipeline.
  ///
  /// # Fields
  /// * `design_style` - Selects defaults; does not alter the core
  ///   generators directly.
  /// * `width_mm` - Physical target width. Consumed upstream; not used
  ///   by this crate.
  /// * `stitch_type` - Selects which generator `compose::digitize`
  ///   invokes for each path.
  /// * `density_mm` - Row spacing for tatami; step along spine for
  ///   satin.
  /// * `satin_column_width_mm` - Rail separation for satin.
  /// * `pull_compensation_mm` - Outward polygon offset for fills;
  ///   effective half-width boost for satin.
  /// * `enable_underlay` - Emit structural underlay when true.
  /// * `tatami_angle_deg` - Row direction for tatami.
  /// * `max_stitch_length_mm` - Split threshold for running & satin
  ///   crossings; horizontal step for tatami bricks.
  /// * `min_stitch_length_mm` - Below this, consecutive stitches are
  ///   collapsed.
  /// * `trim_jump_distance_mm` - Inter-path gap above which a trim
  ///   precedes the jump.
  /// * `color_count` - Upstream palette target. Not used by this
  ///   crate.
  #[ derive( Debug, Clone, Copy, PartialEq ) ]
  pub struct ProcessingConfig
  {
    /// Selects defaults; does not alter the core generators directly.
    pub design_style : DesignStyle,
    /// Physical target width in millimetres. Consumed upstream.
    pub width_mm : f64,
    /// Selects which generator to invoke.
    pub stitch_type : StitchType,
    /// Row spacing for tatami; step along spine for satin, in mm.
    pub density_mm : f64,
    /// Rail separation for satin, in mm.
    pub satin_column_width_mm : f64,
    /// Outward polygon offset for fills; effective half-width boost
    /// for satin, in mm.
    pub pull_compensation_mm : f64,
    /// Emit structural underlay when true.
    pub enable_underlay : bool,
    /// Row direction for tatami, in degrees.
    pub tatami_angle_deg : f64,
    /// Split threshold for running & satin crossings; horizontal step
    /// for tatami bricks, in mm.
    pub max_stitch_length_mm : f64,
    /// Below this, consecutive stitches are collapsed, in mm.
    pub min_stitch_length_mm : f64,
    /// Inter-path gap above which a trim precedes the jump, in mm.
    pub trim_jump_distance_mm : f64,
    /// Upstream palette target. Not used by this crate.
    pub color_count : u32,
  }

  impl ProcessingConfig
  {
    /// `max_stitch_length_mm` if positive, otherwise the running
    /// generator's documented default.
    pub fn running_max_stitch_mm( &self ) -> f64
    {
      if self.max_stitch_length_mm > 0.0 { self.max_stitch_length_mm } else { 2.5 }
    }

    /// `max_stitch_length_mm` if positive, otherwise the satin
    /// generator's documented default.
    pub fn satin_max_stitch_mm( &self ) -> f64
    {
      if self.max_stitch_length_mm > 0.0 { self.max_stitch_length_mm } else { 7.0 }
    }

    /// `max_stitch_length_mm` if positive, otherwise the tatami brick
    /// generator's documented default.
    pub fn tatami_max_stitch_mm( &self ) -> f64
    {
      if self.max_stitch_length_mm > 0.0 { self.max_stitch_length_mm } else { 7.0 }
    }

    /// Validates the fields every generator treats as hard
    /// preconditions (`ConfigOutOfRange`, surfaced to the caller; the
    /// pipeline refuses to run rather than silently substituting a
    /// default here — defaults above only apply to
    /// `max_stitch_length_mm`, which the spec explicitly allows to
    /// fall back).
    pub fn validate( &self ) -> Result< (), EmbroideryError >
    {
      if self.density_mm <= 0.0
      {
        return Err( EmbroideryError::ConfigOutOfRange( "density_mm must be positive".into() ) );
      }
      if self.stitch_type == StitchType::Satin && self.satin_column_width_mm <= 0.0
      {
        return Err( EmbroideryError::ConfigOutOfRange( "satin_column_width_mm must be positive when stitch_type is satin".into() ) );
      }
      Ok( () )
    }
  }

  impl Default for ProcessingConfig
  {
    fn default() -> Self
    {
      Self
      {
        design_style : DesignStyle::PatchFill,
        width_mm : 100.0,
        stitch_type : StitchType::Tatami,
        density_mm : 0.4,
        satin_column_width_mm : 2.5,
        pull_compensation_mm : 0.2,
        enable_underlay : true,
        tatami_angle_deg : 45.0,
        max_stitch_length_mm : 7.0,
        min_stitch_length_mm : 0.2,
        trim_jump_distance_mm : 2.0,
        color_count : 4,
      }
    }
  }
}

crate::mod_interface!
{
  own use StitchType;
  own use DesignStyle;
  own use ProcessingConfig;
}
