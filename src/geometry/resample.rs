//!
//! # Uniform arc-length resampling
//!

mod private
{
  use crate::layer::{ Point, Polygon };

  /// Walks `polygon` accumulating arc length and emits a point every
  /// `spacing` units along the path. The first original vertex is
  /// preserved; the last is always appended, even if it falls short of
  /// a full `spacing` step from the previous emitted point.
  ///
  /// A polygon with fewer than 2 points, or a non-positive `spacing`,
  /// is returned unchanged.
  pub fn resample( polygon : &Polygon, spacing : f64 ) -> Polygon
  {
    if polygon.len() < 2 || spacing <= 0.0
    {
      return polygon.clone();
    }

    let mut out = vec![ polygon[ 0 ] ];
    let mut carry = 0.0;

    for window in polygon.windows( 2 )
    {
      let ( a, b ) = ( window[ 0 ], window[ 1 ] );
      let seg_len = a.dist( b );
      if seg_len < 1e-12
      {
        continue;
      }

      let dir = b.sub( a ).scale( 1.0 / seg_len );
      let mut walked = -carry;

      loop
      {
        walked += spacing;
        if walked >= seg_len
        {
          carry = spacing - ( seg_len - ( walked - spacing ) );
          break;
        }
        out.push( a.add( dir.scale( walked ) ) );
      }
    }

    let last = *polygon.last().unwrap();
    if out.last().map( | &p : &Point | p.dist( last ) > 1e-9 ).unwrap_or( true )
    {
      out.push( last );
    }

    out
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    #[ test ]
    fn test_resample_short_polygon_unchanged()
    {
      let poly = vec![ Point::new( 0.0, 0.0 ) ];
      assert_eq!( resample( &poly, 0.4 ), poly );
    }

    #[ test ]
    fn test_resample_straight_line_even_spacing()
    {
      let poly = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
      let points = resample( &poly, 0.4 );
      assert_eq!( points.first().copied(), Some( Point::new( 0.0, 0.0 ) ) );
      assert_eq!( points.last().copied(), Some( Point::new( 10.0, 0.0 ) ) );
      // every step except possibly the final closing one is a full
      // spacing apart
      for window in points[ ..points.len() - 1 ].windows( 2 )
      {
        assert!( ( window[ 0 ].dist( window[ 1 ] ) - 0.4 ).abs() < 1e-6 );
      }
      assert!( points.len() >= 24 && points.len() <= 27 );
    }

    #[ test ]
    fn test_resample_preserves_first_vertex()
    {
      let poly = vec![ Point::new( 1.0, 2.0 ), Point::new( 1.0, 12.0 ) ];
      let points = resample( &poly, 3.0 );
      assert_eq!( points[ 0 ], poly[ 0 ] );
    }
  }
}

crate::mod_interface!
{
  own use resample;
}
