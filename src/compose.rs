//!
//! # Layer composer
//!
//! Turns an ordered set of `VectorLayer`s into the final `Stitch`
//! sequence: per path, underlay + main + tie; per layer, paths joined
//! with jumps/trims and a leading color change; the whole design
//! closed out with small-stitch removal and a single `end` marker.
//!

mod private
{
  use crate::layer::{ Polygon, VectorLayer };
  use crate::stitch::{ Stitch, StitchKind };
  use crate::config::{ ProcessingConfig, StitchType };
  use crate::error::EmbroideryError;
  use crate::geometry::sequence::sequence;
  use crate::generators::{ running, satin, tatami, tie, underlay };

  /// Runs the full digitization pipeline: validates `config`, builds
  /// underlay + main + tie stitches for every polygon of every layer
  /// in order, joins paths and layers with jumps/trims/color changes,
  /// removes stitches shorter than `config.min_stitch_length_mm`, and
  /// appends a single terminal `end` record.
  ///
  /// Fails with `ConfigOutOfRange` before anything runs, or
  /// `EmptyDesign` if the result carries zero non-structural stitches.
  pub fn digitize( layers : &[ VectorLayer ], config : &ProcessingConfig ) -> Result< Vec< Stitch >, EmbroideryError >
  {
    if let Err( e ) = config.validate()
    {
      log::error!( "digitize: refusing to run, {e}" );
      return Err( e );
    }

    let mut design : Vec< Stitch > = Vec::new();
    let mut have_prev_layer_content = false;

    for ( layer_index, layer ) in layers.iter().enumerate()
    {
      let ordered_polygons = sequence( &layer.polygons );
      let mut layer_stitches : Vec< Stitch > = Vec::new();

      for polygon in &ordered_polygons
      {
        let path_stitches = digitize_path( polygon, layer_index, layer.color, config )?;
        if path_stitches.is_empty()
        {
          continue;
        }

        if let Some( &last ) = layer_stitches.last()
        {
          let first = path_stitches[ 0 ];
          let gap = last.dist( &first );
          if gap > config.trim_jump_distance_mm
          {
            layer_stitches.push( retag( last, StitchKind::Trim ) );
          }
          layer_stitches.push( retag( first, StitchKind::Jump ) );
        }

        layer_stitches.extend( path_stitches );
      }

      if layer_stitches.is_empty()
      {
        continue;
      }

      if have_prev_layer_content
      {
        let prev_last = *design.last().unwrap();
        design.push( retag( prev_last, StitchKind::ColorChange ) );
        design.push( retag( layer_stitches[ 0 ], StitchKind::Jump ) );
      }

      design.extend( layer_stitches );
      have_prev_layer_content = true;
    }

    let cleaned = tie::remove_short_stitches( &design, config.min_stitch_length_mm );

    let visible_count = cleaned.iter().filter( | s | !s.is_structure ).count();
    if visible_count == 0
    {
      log::error!( "digitize: design has no visible stitches" );
      return Err( EmbroideryError::EmptyDesign );
    }

    let mut result = cleaned;
    let end_pos = *result.last().unwrap();
    result.push( Stitch { kind : StitchKind::End, is_structure : true, ..end_pos } );

    Ok( result )
  }

  /// Builds one path's tied underlay + main stitches (§4.7 step 1).
  fn digitize_path( polygon : &Polygon, layer_index : usize, color : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    let mut path_stitches = Vec::new();

    let underlay_stitches = underlay::underlay( polygon, layer_index, color, config )?;
    let has_underlay = !underlay_stitches.is_empty();
    if has_underlay
    {
      path_stitches.extend( tie::tie_in( &underlay_stitches ) );
    }

    let main = generate_main( polygon, layer_index, color, config )?;
    if main.is_empty()
    {
      return Ok( path_stitches );
    }
    let main = if has_underlay { main } else { tie::tie_in( &main ) };
    let main = tie::tie_off( &main );
    path_stitches.extend( main );

    Ok( path_stitches )
  }

  fn generate_main( polygon : &Polygon, layer_index : usize, color : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    match config.stitch_type
    {
      StitchType::Running => running::running( polygon, layer_index, color, config ),
      StitchType::Satin => satin::satin( polygon, layer_index, color, config ),
      StitchType::Tatami => tatami::tatami( std::slice::from_ref( polygon ), layer_index, color, config ),
    }
  }

  /// Clones `s` with its `kind` replaced and `is_structure` forced
  /// true — every non-`Stitch` record is structural.
  fn retag( s : Stitch, kind : StitchKind ) -> Stitch
  {
    Stitch { kind, is_structure : true, ..s }
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
    fn test_digitize_ends_with_exactly_one_end_record()
    {
      let layer = VectorLayer::new( "ff0000", vec![ square() ] ).unwrap();
      let config = ProcessingConfig { stitch_type : StitchType::Running, enable_underlay : false, ..ProcessingConfig::default() };
      let stitches = digitize( &[ layer ], &config ).unwrap();
      assert_eq!( stitches.iter().filter( | s | s.kind == StitchKind::End ).count(), 1 );
      assert_eq!( stitches.last().unwrap().kind, StitchKind::End );
    }

    #[ test ]
    fn test_digitize_every_trim_is_followed_by_jump_or_end_or_color_change()
    {
      let layers = vec!
      [
        VectorLayer::new( "ff0000", vec![ square() ] ).unwrap(),
        VectorLayer::new( "00ff00", vec![ square() ] ).unwrap(),
      ];
      let config = ProcessingConfig { stitch_type : StitchType::Running, enable_underlay : false, ..ProcessingConfig::default() };
      let stitches = digitize( &layers, &config ).unwrap();
      for window in stitches.windows( 2 )
      {
        if window[ 0 ].kind == StitchKind::Trim
        {
          assert!( matches!( window[ 1 ].kind, StitchKind::Jump | StitchKind::ColorChange | StitchKind::End ) );
        }
      }
    }

    #[ test ]
    fn test_digitize_inserts_color_change_between_layers()
    {
      let layers = vec!
      [
        VectorLayer::new( "ff0000", vec![ square() ] ).unwrap(),
        VectorLayer::new( "00ff00", vec![ square() ] ).unwrap(),
      ];
      let config = ProcessingConfig { stitch_type : StitchType::Running, enable_underlay : false, ..ProcessingConfig::default() };
      let stitches = digitize( &layers, &config ).unwrap();
      assert!( stitches.iter().any( | s | s.kind == StitchKind::ColorChange ) );
    }

    #[ test ]
    fn test_digitize_empty_design_errors()
    {
      let layer = VectorLayer::new( "ff0000", vec![] ).unwrap();
      let config = ProcessingConfig::default();
      assert!( matches!( digitize( &[ layer ], &config ), Err( EmbroideryError::EmptyDesign ) ) );
    }

    #[ test ]
    fn test_digitize_rejects_bad_config()
    {
      let layer = VectorLayer::new( "ff0000", vec![ square() ] ).unwrap();
      let config = ProcessingConfig { density_mm : 0.0, ..ProcessingConfig::default() };
      assert!( matches!( digitize( &[ layer ], &config ), Err( EmbroideryError::ConfigOutOfRange( _ ) ) ) );
    }
  }
}

crate::mod_interface!
{
  own use digitize;
}
