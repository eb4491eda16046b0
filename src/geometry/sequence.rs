//!
//! # Nearest-join path sequencing
//!

mod private
{
  use crate::geometry::offset::{ close_ring, strip_closing_vertex };
  use crate::layer::{ Point, Polygon };

  /// Orders `polygons` starting from an implicit head position of
  /// `(0, 0)`: repeatedly picks the polygon whose closest vertex is
  /// nearest the current head, rotates it so that vertex becomes its
  /// start (and end, preserving closure), and advances the head to its
  /// last point. Ties are broken by iteration order.
  ///
  /// `O(N * V)` where `N` is polygon count and `V` total vertex count —
  /// acceptable for design sizes of tens to a few hundred polygons.
  pub fn sequence( polygons : &[ Polygon ] ) -> Vec< Polygon >
  {
    let mut remaining : Vec< Polygon > = polygons.to_vec();
    let mut head = Point::new( 0.0, 0.0 );
    let mut ordered = Vec::with_capacity( polygons.len() );

    while !remaining.is_empty()
    {
      let mut best_poly_index = 0;
      let mut best_vertex_index = 0;
      let mut best_dist_sq = f64::MAX;

      for ( poly_index, poly ) in remaining.iter().enumerate()
      {
        for ( vertex_index, &vertex ) in poly.iter().enumerate()
        {
          let d = head.dist_sq( vertex );
          if d < best_dist_sq
          {
            best_dist_sq = d;
            best_poly_index = poly_index;
            best_vertex_index = vertex_index;
          }
        }
      }

      let chosen = remaining.remove( best_poly_index );
      // `rotate_closed_polygon` takes its rotation index modulo the
      // stripped vertex count, so an index landing on the duplicated
      // closing vertex (equal to index 0) wraps correctly.
      let rotated = rotate_closed_polygon( &chosen, best_vertex_index );
      head = *rotated.last().unwrap();
      ordered.push( rotated );
    }

    ordered
  }

  /// Rotates a closed polygon so that its `start` distinct vertex
  /// becomes the first (and, after re-closing, the last) point.
  ///
  /// The duplicated closing vertex must be stripped before rotation
  /// and re-appended afterwards, or the ring's winding breaks — the
  /// naive approach of rotating the raw (closed) vertex array leaves
  /// the old first point stranded in the middle of the sequence.
  pub fn rotate_closed_polygon( polygon : &Polygon, start : usize ) -> Polygon
  {
    let core = strip_closing_vertex( polygon );
    let n = core.len();
    if n == 0
    {
      return polygon.clone();
    }
    let start = start % n;

    let mut rotated = Vec::with_capacity( n );
    rotated.extend_from_slice( &core[ start.. ] );
    rotated.extend_from_slice( &core[ ..start ] );

    close_ring( rotated )
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    #[ test ]
    fn test_rotate_closed_polygon_preserves_winding()
    {
      let square = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 1.0, 0.0 ),
        Point::new( 1.0, 1.0 ),
        Point::new( 0.0, 1.0 ),
        Point::new( 0.0, 0.0 ),
      ];

      let rotated = rotate_closed_polygon( &square, 2 );
      assert_eq!( rotated[ 0 ], Point::new( 1.0, 1.0 ) );
      assert_eq!( rotated.first().copied(), rotated.last().copied() );
      assert_eq!( rotated.len(), square.len() );
      // Winding is preserved: walking from the new start visits the
      // same vertices in the same relative order.
      assert_eq!( rotated[ 1 ], Point::new( 0.0, 1.0 ) );
      assert_eq!( rotated[ 2 ], Point::new( 0.0, 0.0 ) );
      assert_eq!( rotated[ 3 ], Point::new( 1.0, 0.0 ) );
    }

    #[ test ]
    fn test_sequence_picks_nearest_first()
    {
      let far = vec!
      [
        Point::new( 100.0, 100.0 ),
        Point::new( 101.0, 100.0 ),
        Point::new( 101.0, 101.0 ),
        Point::new( 100.0, 100.0 ),
      ];
      let near = vec!
      [
        Point::new( 1.0, 0.0 ),
        Point::new( 2.0, 0.0 ),
        Point::new( 2.0, 1.0 ),
        Point::new( 1.0, 0.0 ),
      ];

      let ordered = sequence( &[ far.clone(), near.clone() ] );
      assert_eq!( ordered[ 0 ][ 0 ], Point::new( 1.0, 0.0 ) );
      assert_eq!( ordered[ 1 ][ 0 ], Point::new( 100.0, 100.0 ) );
    }

    #[ test ]
    fn test_sequence_sets_head_to_last_emitted_point()
    {
      let a = vec!
      [
        Point::new( 0.0, 0.0 ),
        Point::new( 1.0, 0.0 ),
        Point::new( 1.0, 1.0 ),
        Point::new( 0.0, 0.0 ),
      ];
      let ordered = sequence( &[ a ] );
      assert_eq!( ordered[ 0 ].first().copied(), ordered[ 0 ].last().copied() );
    }
  }
}

crate::mod_interface!
{
  own use sequence;
  own use rotate_closed_polygon;
}
