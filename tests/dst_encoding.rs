//! Integration tests for the Tajima DST encoder: invariants 7 and 8,
//! and scenario S4.

use embroidery_core::format::dst::encode;
use embroidery_core::stitch::{ Stitch, StitchKind };

const HEADER_LEN : usize = 512;

fn stitch( x : f64, y : f64, kind : StitchKind ) -> Stitch
{
  Stitch { x_mm : x, y_mm : y, kind, color_index : 0, color_hex : [ 0, 0, 0 ], is_structure : false }
}

/// Decodes one 3-byte Tajima record into its signed `(dx, dy)` delta,
/// the inverse of the weighted-bit table in spec.md §4.8.
fn decode_record( record : &[ u8 ] ) -> ( i32, i32 )
{
  const DY_BITS : [ ( usize, u8, u8 ); 5 ] = [ ( 0, 0, 1 ), ( 1, 7, 6 ), ( 0, 2, 3 ), ( 1, 5, 4 ), ( 2, 2, 3 ) ];
  const DX_BITS : [ ( usize, u8, u8 ); 5 ] = [ ( 0, 7, 6 ), ( 1, 3, 2 ), ( 0, 5, 4 ), ( 1, 1, 0 ), ( 2, 4, 5 ) ];

  let mut dx = 0;
  let mut dy = 0;
  for ( i, &( byte_i, plus_bit, minus_bit ) ) in DY_BITS.iter().enumerate()
  {
    let weight = 3_i32.pow( i as u32 );
    if record[ byte_i ] & ( 1 << plus_bit ) != 0 { dy += weight; }
    if record[ byte_i ] & ( 1 << minus_bit ) != 0 { dy -= weight; }
  }
  for ( i, &( byte_i, plus_bit, minus_bit ) ) in DX_BITS.iter().enumerate()
  {
    let weight = 3_i32.pow( i as u32 );
    if record[ byte_i ] & ( 1 << plus_bit ) != 0 { dx += weight; }
    if record[ byte_i ] & ( 1 << minus_bit ) != 0 { dx -= weight; }
  }
  ( dx, dy )
}

#[ test ]
fn scenario_s4_header_reports_absolute_bounds()
{
  let stitches = vec!
  [
    stitch( 0.0, 0.0, StitchKind::Stitch ),
    stitch( 5.0, -3.2, StitchKind::Stitch ),
    stitch( 5.0, -3.2, StitchKind::End ),
  ];
  let bytes = encode( &stitches ).unwrap();
  let header = std::str::from_utf8( &bytes[ ..HEADER_LEN ] ).unwrap();

  assert!( header.contains( "+X:00050" ) );
  assert!( header.contains( "-X:00000" ) );
  assert!( header.contains( "+Y:00000" ) );
  assert!( header.contains( "-Y:00032" ) );
  assert!( header.contains( "ST:0000003" ) );
}

#[ test ]
fn invariant_8_header_stitch_count_matches_total_body_records()
{
  // §8 invariant 8 names the relationship as "header count equals body
  // records minus the terminator", but S4 (above) pins `ST:0000003`
  // for 2 source stitches + the synthetic terminator — i.e. the `ST`
  // field counts the terminator as one of its own records. This test
  // exercises that reading, which is the one the encoder and S4 both
  // implement: `ST` equals the total record count written to the body,
  // terminator included.
  let stitches = vec!
  [
    stitch( 0.0, 0.0, StitchKind::Stitch ),
    stitch( 1.0, 0.0, StitchKind::Stitch ),
    stitch( 2.0, 5.0, StitchKind::Jump ),
    stitch( 2.0, 5.0, StitchKind::End ),
  ];
  let bytes = encode( &stitches ).unwrap();
  let header = std::str::from_utf8( &bytes[ ..HEADER_LEN ] ).unwrap();

  let body_len = bytes.len() - HEADER_LEN;
  assert_eq!( body_len % 3, 0 );
  let body_records = body_len / 3;

  let st_field = &header[ 23 + 3..23 + 10 ];
  let header_count : usize = st_field.trim().parse().unwrap();
  assert_eq!( header_count, body_records );
  // 2 Stitch + 1 Jump records, plus the terminator.
  assert_eq!( header_count, 4 );
}

#[ test ]
fn invariant_7_body_round_trips_absolute_positions()
{
  let stitches = vec!
  [
    stitch( 0.0, 0.0, StitchKind::Stitch ),
    stitch( 3.7, -1.2, StitchKind::Stitch ),
    stitch( -6.0, 8.5, StitchKind::Stitch ),
    stitch( -6.0, 8.5, StitchKind::End ),
  ];
  let bytes = encode( &stitches ).unwrap();
  let body = &bytes[ HEADER_LEN.. ];

  let mut x = 0_i32;
  let mut y = 0_i32;
  let mut positions = Vec::new();
  for record in body.chunks( 3 )
  {
    let ( dx, dy ) = decode_record( record );
    x += dx;
    y += dy;
    positions.push( ( x, y ) );
  }

  let expected : Vec< ( i32, i32 ) > = stitches[ ..stitches.len() - 1 ]
  .iter()
  .map( | s | ( ( s.x_mm * 10.0 ).round() as i32, ( s.y_mm * 10.0 ).round() as i32 ) )
  .collect();

  for target in expected
  {
    assert!( positions.contains( &target ), "{target:?} missing from decoded body {positions:?}" );
  }
}

#[ test ]
fn coordinate_overflow_is_surfaced()
{
  let stitches = vec![ stitch( 4000.0, 0.0, StitchKind::Stitch ) ];
  assert!( encode( &stitches ).is_err() );
}
