//!
//! # Ramer-Douglas-Peucker simplification
//!

mod private
{
  use crate::layer::{ Point, Polygon };

  /// Default tolerance, in millimetres, used when a caller doesn't
  /// have a more specific value in mind.
  pub const DEFAULT_EPSILON_MM : f64 = 0.05;

  /// Simplifies `polygon` with the Ramer-Douglas-Peucker algorithm at
  /// tolerance `epsilon`. A polygon with 2 or fewer points is returned
  /// unchanged.
  ///
  /// Uses an explicit worklist rather than naive recursion — the
  /// recursive formulation is straightforward but not tail-safe on
  /// pathological (near-collinear, many-thousand-vertex) inputs.
  pub fn simplify( polygon : &Polygon, epsilon : f64 ) -> Polygon
  {
    let n = polygon.len();
    if n <= 2
    {
      return polygon.clone();
    }

    let mut keep = vec![ false; n ];
    keep[ 0 ] = true;
    keep[ n - 1 ] = true;

    let mut stack = vec![ ( 0_usize, n - 1 ) ];
    while let Some( ( lo, hi ) ) = stack.pop()
    {
      if hi <= lo + 1
      {
        continue;
      }

      let mut farthest_index = lo;
      let mut farthest_dist = 0.0;
      for i in ( lo + 1 )..hi
      {
        let d = perpendicular_distance( polygon[ i ], polygon[ lo ], polygon[ hi ] );
        if d > farthest_dist
        {
          farthest_dist = d;
          farthest_index = i;
        }
      }

      if farthest_dist > epsilon
      {
        keep[ farthest_index ] = true;
        stack.push( ( lo, farthest_index ) );
        stack.push( ( farthest_index, hi ) );
      }
    }

    polygon.iter().zip( keep.iter() ).filter( | ( _, &k ) | k ).map( | ( &p, _ ) | p ).collect()
  }

  /// Perpendicular distance from `p` to the infinite line through `a`
  /// and `b`. Falls back to the distance from `p` to `a` when `a` and
  /// `b` coincide.
  fn perpendicular_distance( p : Point, a : Point, b : Point ) -> f64
  {
    let ab = b.sub( a );
    let len = ab.len();
    if len < 1e-12
    {
      return p.dist( a );
    }
    let ap = p.sub( a );
    ( ab.x * ap.y - ab.y * ap.x ).abs() / len
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    #[ test ]
    fn test_simplify_short_polygon_unchanged()
    {
      let poly = vec![ Point::new( 0.0, 0.0 ), Point::new( 1.0, 1.0 ) ];
      assert_eq!( simplify( &poly, 0.05 ), poly );
    }

    #[ test ]
    fn test_simplify_removes_collinear_point()
    {
      let poly = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 5.0, 0.001 ),
        Point::new( 10.0, 0.0 ),
      ];
      let simplified = simplify( &poly, 0.05 );
      assert_eq!( simplified.len(), 2 );
      assert_eq!( simplified[ 0 ], poly[ 0 ] );
      assert_eq!( simplified[ 1 ], poly[ 2 ] );
    }

    #[ test ]
    fn test_simplify_keeps_sharp_corner()
    {
      let poly = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 5.0, 5.0 ),
        Point::new( 10.0, 0.0 ),
      ];
      assert_eq!( simplify( &poly, 0.05 ).len(), 3 );
    }

    #[ test ]
    fn test_simplify_idempotent()
    {
      let poly = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 3.0, 0.2 ),
        Point::new( 6.0, -0.1 ),
        Point::new( 10.0, 0.0 ),
        Point::new( 10.0, 10.0 ),
      ];
      let once = simplify( &poly, 0.5 );
      let twice = simplify( &once, 0.5 );
      assert_eq!( once, twice );
    }
  }
}

crate::mod_interface!
{
  own use DEFAULT_EPSILON_MM;
  own use simplify;
}
