//!
//! # Running-stitch generator
//!

mod private
{
  use crate::layer::{ Point, Polygon };
  use crate::stitch::{ Stitch, StitchKind };
  use crate::config::ProcessingConfig;
  use crate::error::EmbroideryError;

  /// Generates a single row of stitches along `path`.
  ///
  /// De-duplicates adjacent points closer than `0.01 mm`, then walks
  /// the cleaned path emitting the first point and every subsequent
  /// segment endpoint, splitting any segment longer than
  /// `config.running_max_stitch_mm()` into equal sub-segments.
  ///
  /// A path with fewer than 2 distinct points after de-duplication is
  /// `InvalidInput` recovered locally: this returns `Ok(vec![])`
  /// rather than surfacing an error.
  pub fn running( path : &Polygon, color_index : usize, color_hex : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    let cleaned = dedup_close( path, 0.01 );
    if cleaned.len() < 2
    {
      log::debug!( "running: path has fewer than 2 distinct points after dedup, skipping" );
      return Ok( vec![] );
    }

    let max_len = config.running_max_stitch_mm();
    let mut out = Vec::with_capacity( cleaned.len() );
    out.push( face( cleaned[ 0 ], color_index, color_hex ) );

    for window in cleaned.windows( 2 )
    {
      let ( a, b ) = ( window[ 0 ], window[ 1 ] );
      let d = a.dist( b );
      if d <= max_len
      {
        out.push( face( b, color_index, color_hex ) );
      }
      else
      {
        let steps = ( d / max_len ).ceil() as usize;
        for i in 1..=steps
        {
          let t = i as f64 / steps as f64;
          let p = Point::new( a.x + ( b.x - a.x ) * t, a.y + ( b.y - a.y ) * t );
          out.push( face( p, color_index, color_hex ) );
        }
      }
    }

    Ok( out )
  }

  fn face( p : Point, color_index : usize, color_hex : [ u8; 3 ] ) -> Stitch
  {
    Stitch { x_mm : p.x, y_mm : p.y, kind : StitchKind::Stitch, color_index, color_hex, is_structure : false }
  }

  fn dedup_close( path : &[ Point ], min_dist : f64 ) -> Vec< Point >
  {
    let mut out : Vec< Point > = Vec::with_capacity( path.len() );
    for &p in path
    {
      if out.last().map( | &l : &Point | l.dist( p ) >= min_dist ).unwrap_or( true )
      {
        out.push( p );
      }
    }
    out
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    fn cfg( max : f64 ) -> ProcessingConfig
    {
      ProcessingConfig { max_stitch_length_mm : max, ..ProcessingConfig::default() }
    }

    #[ test ]
    fn test_running_splits_long_segment()
    {
      let path = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
      let stitches = running( &path, 0, [ 0, 0, 0 ], &cfg( 2.5 ) ).unwrap();
      let xs : Vec< f64 > = stitches.iter().map( | s | s.x_mm ).collect();
      assert_eq!( xs, vec![ 0.0, 2.5, 5.0, 7.5, 10.0 ] );
      assert!( stitches.iter().all( | s | !s.is_structure && s.kind == StitchKind::Stitch ) );
    }

    #[ test ]
    fn test_running_degenerate_path_returns_empty()
    {
      let path = vec![ Point::new( 0.0, 0.0 ) ];
      let stitches = running( &path, 0, [ 0, 0, 0 ], &cfg( 2.5 ) ).unwrap();
      assert!( stitches.is_empty() );
    }

    #[ test ]
    fn test_running_dedups_near_coincident_points()
    {
      let path = vec![ Point::new( 0.0, 0.0 ), Point::new( 0.001, 0.0 ), Point::new( 5.0, 0.0 ) ];
      let stitches = running( &path, 0, [ 0, 0, 0 ], &cfg( 10.0 ) ).unwrap();
      assert_eq!( stitches.len(), 2 );
    }

    #[ test ]
    fn test_running_short_segment_not_split()
    {
      let path = vec![ Point::new( 0.0, 0.0 ), Point::new( 1.0, 0.0 ) ];
      let stitches = running( &path, 0, [ 0, 0, 0 ], &cfg( 2.5 ) ).unwrap();
      assert_eq!( stitches.len(), 2 );
    }
  }
}

crate::mod_interface!
{
  own use running;
}
