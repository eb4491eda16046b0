//! Integration tests for the Melco EXP encoder: scenario S5 and its
//! surrounding invariants.

use embroidery_core::format::exp::encode;
use embroidery_core::stitch::{ Stitch, StitchKind };

fn stitch( x : f64, y : f64, kind : StitchKind ) -> Stitch
{
  Stitch { x_mm : x, y_mm : y, kind, color_index : 0, color_hex : [ 0, 0, 0 ], is_structure : false }
}

#[ test ]
fn scenario_s5_oversize_jump_splits_into_two_records()
{
  let stitches = vec![ stitch( 15.0, 0.0, StitchKind::Jump ) ];
  let bytes = encode( &stitches );
  assert_eq!( bytes, vec![ 0x80, 0x04, 0x78, 0x00, 0x80, 0x04, 0x1E, 0x00 ] );
}

#[ test ]
fn trim_emits_three_jump_triplets_then_continues_from_same_position()
{
  let stitches = vec!
  [
    stitch( 0.0, 0.0, StitchKind::Stitch ),
    stitch( 0.0, 0.0, StitchKind::Trim ),
    stitch( 2.0, 0.0, StitchKind::Stitch ),
  ];
  let bytes = encode( &stitches );
  // stitch(0,0) from origin: Δ0,0; trim: three zero jump triplets;
  // next stitch(2,0) is still a 20-unit delta from the origin since
  // trim never moves the frame.
  let expected = vec!
  [
    0, 0,
    0x80, 0x04, 0, 0,
    0x80, 0x04, 0, 0,
    0x80, 0x04, 0, 0,
    20_i8 as u8, 0,
  ];
  assert_eq!( bytes, expected );
}

#[ test ]
fn color_change_and_end_share_the_stop_encoding()
{
  let change = encode( &[ stitch( 0.0, 0.0, StitchKind::ColorChange ) ] );
  let end = encode( &[ stitch( 0.0, 0.0, StitchKind::End ) ] );
  assert_eq!( change, vec![ 0x80, 0x01, 0x00, 0x00 ] );
  assert_eq!( change, end );
}
