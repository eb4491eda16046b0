//!
//! # Underlay generator
//!

mod private
{
  use crate::layer::Polygon;
  use crate::stitch::Stitch;
  use crate::config::{ ProcessingConfig, StitchType };
  use crate::error::EmbroideryError;
  use crate::geometry::offset::offset;
  use crate::generators::running::running;
  use crate::generators::satin::satin;

  /// Generates the structural underlay beneath `polygon`'s main
  /// stitches, per `config.stitch_type`.
  ///
  /// Returns `Ok(vec![])` when `config.enable_underlay` is `false`, or
  /// (for `StitchType::Running`) unconditionally — running stitch has
  /// no underlay. Every returned record has `is_structure = true`.
  pub fn underlay( polygon : &Polygon, color_index : usize, color_hex : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    if !config.enable_underlay
    {
      return Ok( vec![] );
    }

    let mut stitches = match config.stitch_type
    {
      StitchType::Running => vec![],
      StitchType::Satin if config.satin_column_width_mm < 2.0 =>
      {
        // Center-line running stitch along the spine.
        running( polygon, color_index, color_hex, config )?
      }
      StitchType::Satin =>
      {
        // Zig-zag satin underlay on the same spine, narrower and
        // denser than the face column.
        let h = config.satin_column_width_mm / 2.0 + config.pull_compensation_mm / 2.0;
        let underlay_config = ProcessingConfig
        {
          satin_column_width_mm : 2.0 * ( h - 0.4 ),
          density_mm : 2.0,
          pull_compensation_mm : 0.0,
          ..*config
        };
        satin( polygon, color_index, color_hex, &underlay_config )?
      }
      StitchType::Tatami =>
      {
        // Edge-walk run-stitch on the polygon inset by 0.6mm.
        let inset = offset( polygon, -0.6 );
        running( &inset, color_index, color_hex, config )?
      }
    };

    for s in &mut stitches
    {
      s.is_structure = true;
    }

    Ok( stitches )
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;
    use crate::layer::Point;

    fn square() -> Polygon
    {
      vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 10.0, 0.0 ),
        Point::new( 10.0, 10.0 ),
        Point::new( 0.0, 10.0 ),
        Point::new( 0.0, 0.0 ),
      ]
    }

    #[ test ]
    fn test_underlay_disabled_returns_empty()
    {
      let cfg = ProcessingConfig { enable_underlay : false, ..ProcessingConfig::default() };
      assert!( underlay( &square(), 0, [ 0, 0, 0 ], &cfg ).unwrap().is_empty() );
    }

    #[ test ]
    fn test_underlay_running_has_none()
    {
      let cfg = ProcessingConfig { stitch_type : StitchType::Running, enable_underlay : true, ..ProcessingConfig::default() };
      assert!( underlay( &square(), 0, [ 0, 0, 0 ], &cfg ).unwrap().is_empty() );
    }

    #[ test ]
    fn test_underlay_is_flagged_structural()
    {
      let cfg = ProcessingConfig
      {
        stitch_type : StitchType::Tatami,
        enable_underlay : true,
        density_mm : 0.4,
        ..ProcessingConfig::default()
      };
      let stitches = underlay( &square(), 0, [ 0, 0, 0 ], &cfg ).unwrap();
      assert!( !stitches.is_empty() );
      assert!( stitches.iter().all( | s | s.is_structure ) );
    }

    #[ test ]
    fn test_underlay_satin_narrow_column_is_centerline()
    {
      let cfg = ProcessingConfig
      {
        stitch_type : StitchType::Satin,
        satin_column_width_mm : 1.0,
        enable_underlay : true,
        density_mm : 0.4,
        ..ProcessingConfig::default()
      };
      let spine = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
      let stitches = underlay( &spine, 0, [ 0, 0, 0 ], &cfg ).unwrap();
      // Center-line running stitch stays on y = 0.
      assert!( stitches.iter().all( | s | s.y_mm.abs() < 1e-9 ) );
    }
  }
}

crate::mod_interface!
{
  own use underlay;
}
