//!
//! # Polygon offset (pull compensation)
//!

mod private
{
  use crate::layer::{ Point, Polygon };

  /// Offsets a closed polygon outward (positive `d`) or inward
  /// (negative `d`) by displacing each vertex along its averaged
  /// edge-normal, with a miter join at each corner.
  ///
  /// `polygon` is expected closed (first point numerically equal to
  /// the last). Degenerate polygons — fewer than 3 distinct vertices —
  /// are returned unchanged. No topology cleanup is performed:
  /// self-intersections from an over-large inset are the caller's
  /// responsibility.
  pub fn offset( polygon : &Polygon, d : f64 ) -> Polygon
  {
    let core = strip_closing_vertex( polygon );
    let n = core.len();
    if n < 3
    {
      return polygon.clone();
    }

    let mut out = Vec::with_capacity( n );
    for i in 0..n
    {
      let prev = core[ ( i + n - 1 ) % n ];
      let cur = core[ i ];
      let next = core[ ( i + 1 ) % n ];

      let e_prev = cur.sub( prev ).normalize();
      let e_next = next.sub( cur ).normalize();

      let n_prev = e_prev.left_normal();
      let n_next = e_next.left_normal();

      let mut n_avg = n_prev.add( n_next ).normalize();
      if n_avg.len() < 1e-9
      {
        n_avg = n_prev;
      }

      let miter = 1.0 / ( 0.1_f64 ).max( ( 1.0 + n_prev.dot( n_next ) ) / 2.0 );
      let miter = miter.min( 2.0 );

      out.push( cur.add( n_avg.scale( d * miter ) ) );
    }

    close_ring( out )
  }

  /// Removes the duplicated closing vertex from a closed ring, if
  /// present, returning the ring's distinct vertices in order.
  pub fn strip_closing_vertex( polygon : &Polygon ) -> Vec< Point >
  {
    if polygon.len() >= 2
    {
      let first = polygon[ 0 ];
      let last = polygon[ polygon.len() - 1 ];
      if first.dist( last ) < 1e-9
      {
        return polygon[ ..polygon.len() - 1 ].to_vec();
      }
    }
    polygon.clone()
  }

  /// Re-closes a distinct-vertex ring by appending its first point.
  pub fn close_ring( mut core : Vec< Point > ) -> Polygon
  {
    if let Some( first ) = core.first().copied()
    {
      core.push( first );
    }
    core
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

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
    fn test_offset_degenerate_polygon_unchanged()
    {
      let poly = vec![ Point::new( 0.0, 0.0 ), Point::new( 1.0, 1.0 ) ];
      assert_eq!( offset( &poly, 1.0 ), poly );
    }

    #[ test ]
    fn test_offset_moves_corners_along_diagonal_bisector()
    {
      let result = offset( &square(), 1.0 );
      let centroid = Point::new( 5.0, 5.0 );
      // Orthogonal incoming/outgoing edges clamp the miter multiplier
      // to 1/max(0.1, 0.5) = 2, so each corner moves by `d * 2` along
      // the diagonal bisector — sqrt(2) * 2 from the original corner.
      let moved = result[ 0 ].dist( Point::new( 0.0, 0.0 ) );
      assert!( ( moved - 2.0_f64.sqrt() * 2.0 ).abs() < 1e-9 );
      assert_eq!( result.last().copied(), result.first().copied() );

      // Opposite-signed offsets move every corner in opposite
      // directions relative to the centroid.
      let outward = result[ 0 ].dist( centroid );
      let inward = offset( &square(), -1.0 )[ 0 ].dist( centroid );
      let original = Point::new( 0.0, 0.0 ).dist( centroid );
      assert!( ( outward > original ) != ( inward > original ) );
    }
  }
}

crate::mod_interface!
{
  own use offset;
  own use strip_closing_vertex;
  own use close_ring;
}
