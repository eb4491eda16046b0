//!
//! # Tatami-fill generator
//!

mod private
{
  use crate::layer::{ Point, Polygon };
  use crate::stitch::{ Stitch, StitchKind };
  use crate::config::ProcessingConfig;
  use crate::error::EmbroideryError;
  use crate::geometry::offset::{ offset, strip_closing_vertex };
  use itertools::Itertools as _;

  /// One polygon edge with non-zero `Δy`, sorted `p_lo.y < p_hi.y`.
  struct Edge
  {
    lo : Point,
    hi : Point,
  }

  /// Generates a parallel-row brick-offset fill covering `polygons`,
  /// treated as one even-odd region.
  ///
  /// A polygon with fewer than 3 distinct vertices is excluded from
  /// the fill (`InvalidInput`, recovered locally); if none of
  /// `polygons` has enough vertices to contribute an edge, this
  /// returns `Ok(vec![])`.
  pub fn tatami( polygons : &[ Polygon ], color_index : usize, color_hex : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    if config.density_mm <= 0.0
    {
      return Err( EmbroideryError::ConfigOutOfRange( "density_mm must be positive for tatami".into() ) );
    }

    let usable : Vec< &Polygon > = polygons.iter().filter( | p | strip_closing_vertex( p ).len() >= 3 ).collect();
    if usable.is_empty()
    {
      log::debug!( "tatami: no polygon with >= 3 distinct vertices, skipping" );
      return Ok( vec![] );
    }

    let rotated : Vec< Polygon > = usable
    .iter()
    .map( | &p | offset( p, config.pull_compensation_mm ) )
    .map( | p | p.iter().map( | pt | pt.rotate_deg( -config.tatami_angle_deg ) ).collect() )
    .collect();

    let edges = build_edge_table( &rotated );
    if edges.is_empty()
    {
      return Ok( vec![] );
    }

    let ( min_y, max_y ) = rotated.iter().flatten().fold
    (
      ( f64::MAX, f64::MIN ),
      | ( lo, hi ), p | ( lo.min( p.y ), hi.max( p.y ) ),
    );

    let density = config.density_mm;
    let max_stitch = config.tatami_max_stitch_mm();

    // Ordered groups of penetrations (rotated-space points), one group
    // per segment, in final sweep/traversal order.
    let mut batches : Vec< Vec< Point > > = Vec::new();

    let mut y = min_y + density;
    while y <= max_y
    {
      let mut xs : Vec< f64 > = edges
      .iter()
      .filter( | e | e.lo.y <= y && y < e.hi.y )
      .map( | e | e.lo.x + ( y - e.lo.y ) / ( e.hi.y - e.lo.y ) * ( e.hi.x - e.lo.x ) )
      .collect();
      xs.sort_by( | a, b | a.partial_cmp( b ).unwrap() );

      let row_index = ( y / density ).round() as i64;
      let reversed = row_index.rem_euclid( 2 ) == 0;

      let mut row_batches : Vec< Vec< Point > > = Vec::new();
      for ( x_start, x_end ) in xs.into_iter().tuples()
      {
        if x_end - x_start < 0.5
        {
          continue;
        }
        let positions = brick_positions( x_start, x_end, y, max_stitch );
        row_batches.push( positions.into_iter().map( | x | Point::new( x, y ) ).collect() );
      }

      if reversed
      {
        row_batches.reverse();
        for batch in &mut row_batches
        {
          batch.reverse();
        }
      }

      batches.extend( row_batches );
      y += density;
    }

    let mut out = Vec::new();
    let mut last : Option< Point > = None;

    for batch in batches
    {
      for ( i, &p ) in batch.iter().enumerate()
      {
        let world = p.rotate_deg( config.tatami_angle_deg );
        if i == 0
        {
          match last
          {
            None =>
            {
              out.push( control( world, StitchKind::Jump, color_index, color_hex ) );
            }
            Some( prev ) =>
            {
              let d = prev.dist( p );
              if d > 2.0
              {
                out.push( control( world, StitchKind::Jump, color_index, color_hex ) );
              }
              else if d > 0.1
              {
                out.push( face( world, color_index, color_hex ) );
              }
            }
          }
        }
        else
        {
          out.push( face( world, color_index, color_hex ) );
        }
        last = Some( p );
      }
    }

    Ok( out )
  }

  /// Brick-offset x positions spanning `[x_start, x_end]` at row `y`,
  /// ascending. A segment no longer than `max_stitch` is just its two
  /// endpoints; longer segments get a deterministic per-row offset so
  /// adjacent rows don't line up into visual ladders.
  fn brick_positions( x_start : f64, x_end : f64, y : f64, max_stitch : f64 ) -> Vec< f64 >
  {
    let seg_len = x_end - x_start;
    if seg_len <= max_stitch
    {
      return vec![ x_start, x_end ];
    }

    let stitch_len = 4.0;
    let noise = hash_frac( ( y * 123.45 ).sin() * 10000.0 ) * 0.4;
    let offset = ( ( ( y * 10.0 ).round() as i64 ).rem_euclid( 3 ) as f64 / 3.0 + noise ) * stitch_len;

    let mut xs = vec![ x_start ];
    let mut x = x_start + offset;
    while x < x_end
    {
      xs.push( x );
      x += stitch_len;
    }
    xs.push( x_end );
    xs
  }

  /// Deterministic pseudo-noise: a pure function of `y`, same input
  /// always gives the same output. Not a cryptographic RNG — its only
  /// contract is breaking up row-aligned brick ladders.
  fn hash_frac( v : f64 ) -> f64
  {
    v - v.floor()
  }

  fn build_edge_table( polygons : &[ Polygon ] ) -> Vec< Edge >
  {
    let mut edges = Vec::new();
    for polygon in polygons
    {
      for window in polygon.windows( 2 )
      {
        let ( a, b ) = ( window[ 0 ], window[ 1 ] );
        if ( a.y - b.y ).abs() < 0.001
        {
          continue;
        }
        let ( lo, hi ) = if a.y < b.y { ( a, b ) } else { ( b, a ) };
        edges.push( Edge { lo, hi } );
      }
    }
    edges
  }

  fn face( p : Point, color_index : usize, color_hex : [ u8; 3 ] ) -> Stitch
  {
    Stitch { x_mm : p.x, y_mm : p.y, kind : StitchKind::Stitch, color_index, color_hex, is_structure : false }
  }

  fn control( p : Point, kind : StitchKind, color_index : usize, color_hex : [ u8; 3 ] ) -> Stitch
  {
    Stitch { x_mm : p.x, y_mm : p.y, kind, color_index, color_hex, is_structure : true }
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    fn square() -> Polygon
    {
      vec!
      [
        Point::new( -5.0, -5.0 ),
        Point::new( 5.0, -5.0 ),
        Point::new( 5.0, 5.0 ),
        Point::new( -5.0, 5.0 ),
        Point::new( -5.0, -5.0 ),
      ]
    }

    fn cfg() -> ProcessingConfig
    {
      ProcessingConfig
      {
        tatami_angle_deg : 0.0,
        density_mm : 0.4,
        max_stitch_length_mm : 7.0,
        pull_compensation_mm : 0.0,
        ..ProcessingConfig::default()
      }
    }

    #[ test ]
    fn test_tatami_square_rows_bricked()
    {
      let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      assert!( !stitches.is_empty() );
      // Segment length 10mm > 7mm max, so every row bricks into 3
      // penetrations rather than 2.
      let row_ys : Vec< f64 > = stitches.iter().map( | s | s.y_mm ).collect();
      assert!( row_ys.iter().any( | &y | ( y - ( -4.6 ) ).abs() < 1e-6 ) );
    }

    #[ test ]
    fn test_tatami_first_penetration_is_jump()
    {
      let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      assert_eq!( stitches[ 0 ].kind, StitchKind::Jump );
      assert!( stitches[ 0 ].is_structure );
    }

    #[ test ]
    fn test_tatami_degenerate_polygon_returns_empty()
    {
      let degenerate = vec![ Point::new( 0.0, 0.0 ), Point::new( 1.0, 1.0 ) ];
      let stitches = tatami( &[ degenerate ], 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      assert!( stitches.is_empty() );
    }

    #[ test ]
    fn test_tatami_penetrations_stay_within_bounds()
    {
      let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      for s in &stitches
      {
        assert!( s.x_mm >= -5.0 - 1e-6 && s.x_mm <= 5.0 + 1e-6 );
        assert!( s.y_mm >= -5.0 - 1e-6 && s.y_mm <= 5.0 + 1e-6 );
      }
    }
  }
}

crate::mod_interface!
{
  own use tatami;
}
