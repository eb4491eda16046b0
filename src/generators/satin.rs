//!
//! # Satin-stitch generator (twin-rail mitered)
//!

mod private
{
  use crate::layer::{ Point, Polygon };
  use crate::stitch::{ Stitch, StitchKind };
  use crate::config::ProcessingConfig;
  use crate::error::EmbroideryError;
  use crate::geometry::resample::resample;

  /// Generates a back-and-forth fill between two mitered rails
  /// following `spine`, the medial axis of a column of configured
  /// width.
  ///
  /// A spine with fewer than 2 points is the `EmptyPath` case —
  /// recovered locally, this returns `Ok(vec![])`.
  pub fn satin( spine : &Polygon, color_index : usize, color_hex : [ u8; 3 ], config : &ProcessingConfig )
  -> Result< Vec< Stitch >, EmbroideryError >
  {
    if config.density_mm <= 0.0
    {
      return Err( EmbroideryError::ConfigOutOfRange( "density_mm must be positive for satin".into() ) );
    }
    if config.satin_column_width_mm <= 0.0
    {
      return Err( EmbroideryError::ConfigOutOfRange( "satin_column_width_mm must be positive".into() ) );
    }

    if spine.len() < 2
    {
      log::debug!( "satin: spine has fewer than 2 points, skipping (EmptyPath)" );
      return Ok( vec![] );
    }

    let points = resample( spine, config.density_mm );
    if points.len() < 2
    {
      return Ok( vec![] );
    }

    let h = config.satin_column_width_mm / 2.0 + config.pull_compensation_mm / 2.0;
    let n = points.len();

    let mut lefts = Vec::with_capacity( n );
    let mut rights = Vec::with_capacity( n );

    for i in 0..n
    {
      let prev = if i == 0 { mirror( points[ 0 ], points[ 1 ] ) } else { points[ i - 1 ] };
      let cur = points[ i ];
      let next = if i == n - 1 { mirror( points[ n - 1 ], points[ n - 2 ] ) } else { points[ i + 1 ] };

      let t1 = cur.sub( prev ).normalize();
      let t2 = next.sub( cur ).normalize();
      let sum = t1.add( t2 );

      let ( miter_vec, miter_len ) = if sum.len() < 0.001
      {
        ( t1.left_normal(), h )
      }
      else
      {
        let bisector = sum.normalize().left_normal();
        let n1 = t1.left_normal();
        let denom = bisector.dot( n1 ).abs().max( 0.1 );
        // Each rail is offset by `miter_len` on its own side of the
        // spine, so the rail-to-rail span is `2 * miter_len`. Capping
        // the half-offset at `1.5h` keeps that span at `3h`, matching
        // the miter-limit invariant on the pair distance rather than
        // on one rail's offset alone.
        ( bisector, ( h / denom ).min( 1.5 * h ) )
      };

      lefts.push( cur.add( miter_vec.scale( miter_len ) ) );
      rights.push( cur.sub( miter_vec.scale( miter_len ) ) );
    }

    // Short-stitch shortening on odd-indexed penetrations.
    for i in ( 1..n ).step_by( 2 )
    {
      let d_left = lefts[ i ].dist( lefts[ i - 1 ] );
      let d_right = rights[ i ].dist( rights[ i - 1 ] );
      if d_left < 0.6 * d_right && d_left < 0.4
      {
        lefts[ i ] = lefts[ i ].add( rights[ i ].sub( lefts[ i ] ).scale( 0.3 ) );
      }
      if d_right < 0.6 * d_left && d_right < 0.4
      {
        rights[ i ] = rights[ i ].add( lefts[ i ].sub( rights[ i ] ).scale( 0.3 ) );
      }
    }

    let max_len = config.satin_max_stitch_mm();
    let mut out = Vec::with_capacity( n * 2 );

    for i in 0..n
    {
      let left = lefts[ i ];
      let right = rights[ i ];
      let l = left.dist( right );

      if l <= max_len
      {
        out.push( face( left, color_index, color_hex ) );
        out.push( face( right, color_index, color_hex ) );
      }
      else
      {
        let k = ( l / max_len ).ceil() as usize;
        for j in 0..=k
        {
          let mut t = j as f64 / k as f64;
          if j > 0 && j < k
          {
            let shift_mm = [ 0.0, 0.5, -0.5 ][ i % 3 ] * ( max_len - l / k as f64 - 0.1 ).min( 2.0 );
            t += shift_mm / l;
          }
          let p = Point::new( left.x + ( right.x - left.x ) * t, left.y + ( right.y - left.y ) * t );
          out.push( face( p, color_index, color_hex ) );
        }
      }
    }

    Ok( out )
  }

  /// Virtual end-neighbour obtained by mirroring `b` across `a`.
  fn mirror( a : Point, b : Point ) -> Point
  {
    a.add( a.sub( b ) )
  }

  fn face( p : Point, color_index : usize, color_hex : [ u8; 3 ] ) -> Stitch
  {
    Stitch { x_mm : p.x, y_mm : p.y, kind : StitchKind::Stitch, color_index, color_hex, is_structure : false }
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    fn cfg() -> ProcessingConfig
    {
      ProcessingConfig
      {
        satin_column_width_mm : 2.0,
        density_mm : 0.4,
        pull_compensation_mm : 0.0,
        max_stitch_length_mm : 7.0,
        ..ProcessingConfig::default()
      }
    }

    #[ test ]
    fn test_satin_straight_column_rails_at_half_width()
    {
      let spine = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
      let stitches = satin( &spine, 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      assert!( stitches.len() >= 48 && stitches.len() <= 54 );
      for pair in stitches.chunks( 2 )
      {
        assert!( ( pair[ 0 ].y_mm - 1.0 ).abs() < 1e-9 );
        assert!( ( pair[ 1 ].y_mm - ( -1.0 ) ).abs() < 1e-9 );
      }
    }

    #[ test ]
    fn test_satin_empty_spine_returns_empty()
    {
      let spine = vec![ Point::new( 0.0, 0.0 ) ];
      let stitches = satin( &spine, 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      assert!( stitches.is_empty() );
    }

    #[ test ]
    fn test_satin_rejects_non_positive_column_width()
    {
      let spine = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
      let bad = ProcessingConfig { satin_column_width_mm : 0.0, ..cfg() };
      assert!( satin( &spine, 0, [ 0, 0, 0 ], &bad ).is_err() );
    }

    #[ test ]
    fn test_satin_miter_clamped_to_three_half_widths()
    {
      // A sharp reversal drives the miter multiplier to its limit.
      let spine = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 1.0, 0.0 ),
        Point::new( 0.0, 0.0 ),
      ];
      let stitches = satin( &spine, 0, [ 0, 0, 0 ], &cfg() ).unwrap();
      let h = cfg().satin_column_width_mm / 2.0;
      for pair in stitches.chunks( 2 )
      {
        assert!( pair[ 0 ].dist( &pair[ 1 ] ) <= 3.0 * h + 1e-6 );
      }
    }
  }
}

crate::mod_interface!
{
  own use satin;
}
