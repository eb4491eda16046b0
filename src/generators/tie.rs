//!
//! # Tie-in / tie-off / cleanup layer
//!

mod private
{
  use crate::stitch::{ Stitch, StitchKind };

  /// Prepends a 0.5mm lateral backtrack and an anchor stitch at
  /// `stitches`' first position. Skipped (returns a clone of
  /// `stitches`) if the sequence is empty or starts with a `Jump` or
  /// `End`.
  pub fn tie_in( stitches : &[ Stitch ] ) -> Vec< Stitch >
  {
    let Some( first ) = stitches.first().copied() else { return stitches.to_vec() };
    if matches!( first.kind, StitchKind::Jump | StitchKind::End )
    {
      return stitches.to_vec();
    }

    let lateral = Stitch { x_mm : first.x_mm + 0.5, y_mm : first.y_mm, kind : StitchKind::Stitch, is_structure : true, ..first };
    let anchor = Stitch { kind : StitchKind::Stitch, is_structure : true, ..first };

    let mut out = Vec::with_capacity( stitches.len() + 2 );
    out.push( lateral );
    out.push( anchor );
    out.extend_from_slice( stitches );
    out
  }

  /// Appends a 0.5mm lateral backtrack, an anchor stitch, and a `Trim`
  /// at `stitches`' last position. Skipped (returns a clone of
  /// `stitches`) if the sequence is empty or ends with a `Jump` or
  /// `End`.
  pub fn tie_off( stitches : &[ Stitch ] ) -> Vec< Stitch >
  {
    let Some( last ) = stitches.last().copied() else { return stitches.to_vec() };
    if matches!( last.kind, StitchKind::Jump | StitchKind::End )
    {
      return stitches.to_vec();
    }

    let lateral = Stitch { x_mm : last.x_mm - 0.5, y_mm : last.y_mm, kind : StitchKind::Stitch, is_structure : true, ..last };
    let anchor = Stitch { kind : StitchKind::Stitch, is_structure : true, ..last };
    let trim = Stitch { kind : StitchKind::Trim, is_structure : true, ..last };

    let mut out = stitches.to_vec();
    out.push( lateral );
    out.push( anchor );
    out.push( trim );
    out
  }

  /// Walks `stitches`, dropping any `Stitch` record whose distance to
  /// the previous *kept* record is `> 0.01 mm` and `< min_len`. Every
  /// non-`Stitch` record, and the first record, is kept unconditionally.
  pub fn remove_short_stitches( stitches : &[ Stitch ], min_len : f64 ) -> Vec< Stitch >
  {
    let mut out : Vec< Stitch > = Vec::with_capacity( stitches.len() );
    let Some( &first ) = stitches.first() else { return out };
    out.push( first );

    for &s in &stitches[ 1.. ]
    {
      if s.kind == StitchKind::Stitch
      {
        let last_kept = *out.last().unwrap();
        let d = last_kept.dist( &s );
        if d > 0.01 && d < min_len
        {
          log::debug!( "tie: dropping short stitch at ({}, {}), dist {d}", s.x_mm, s.y_mm );
          continue;
        }
      }
      out.push( s );
    }

    out
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    fn s( x : f64, y : f64, kind : StitchKind ) -> Stitch
    {
      Stitch { x_mm : x, y_mm : y, kind, color_index : 0, color_hex : [ 0, 0, 0 ], is_structure : false }
    }

    #[ test ]
    fn test_tie_in_prepends_backtrack()
    {
      let stitches = vec![ s( 1.0, 2.0, StitchKind::Stitch ) ];
      let tied = tie_in( &stitches );
      assert_eq!( tied.len(), 3 );
      assert_eq!( tied[ 0 ].x_mm, 1.5 );
      assert_eq!( tied[ 1 ].x_mm, 1.0 );
      assert!( tied[ 0 ].is_structure && tied[ 1 ].is_structure );
    }

    #[ test ]
    fn test_tie_in_skips_when_first_is_jump()
    {
      let stitches = vec![ s( 1.0, 2.0, StitchKind::Jump ) ];
      assert_eq!( tie_in( &stitches ), stitches );
    }

    #[ test ]
    fn test_tie_off_appends_backtrack_and_trim()
    {
      let stitches = vec![ s( 1.0, 2.0, StitchKind::Stitch ) ];
      let tied = tie_off( &stitches );
      assert_eq!( tied.len(), 4 );
      assert_eq!( tied[ 3 ].kind, StitchKind::Trim );
      assert_eq!( tied[ 1 ].x_mm, 0.5 );
    }

    #[ test ]
    fn test_remove_short_stitches_drops_near_duplicate()
    {
      let stitches = vec!
      [
        s( 0.0, 0.0, StitchKind::Stitch ),
        s( 0.05, 0.0, StitchKind::Stitch ),
        s( 1.0, 0.0, StitchKind::Stitch ),
      ];
      let cleaned = remove_short_stitches( &stitches, 0.3 );
      assert_eq!( cleaned.len(), 2 );
      assert_eq!( cleaned[ 0 ].x_mm, 0.0 );
      assert_eq!( cleaned[ 1 ].x_mm, 1.0 );
    }

    #[ test ]
    fn test_remove_short_stitches_keeps_non_stitch_records()
    {
      let stitches = vec!
      [
        s( 0.0, 0.0, StitchKind::Stitch ),
        s( 0.0, 0.0, StitchKind::Trim ),
        s( 0.0, 0.0, StitchKind::Jump ),
      ];
      let cleaned = remove_short_stitches( &stitches, 1.0 );
      assert_eq!( cleaned.len(), 3 );
    }
  }
}

crate::mod_interface!
{
  own use tie_in;
  own use tie_off;
  own use remove_short_stitches;
}
