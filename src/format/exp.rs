//!
//! # Melco EXP encoder
//!
//! Body-only format: relative signed 8-bit deltas in 0.1mm units,
//! clamped to `±120` per record and split across multiple records
//! otherwise. No header, no padding, no terminator beyond the stop
//! record.
//!

mod private
{
  use crate::stitch::{ Stitch, StitchKind };

  const MAX_STEP : i32 = 120;

  /// Encodes `stitches` into an EXP body. Unlike DST, EXP has no
  /// header field to overflow, so this never fails — oversize or
  /// out-of-range coordinates are silently clamped per record, the
  /// same way every in-range step already is.
  pub fn encode( stitches : &[ Stitch ] ) -> Vec< u8 >
  {
    let mut out = Vec::with_capacity( stitches.len() * 2 );
    let mut cur_x = 0_i32;
    let mut cur_y = 0_i32;

    for stitch in stitches
    {
      match stitch.kind
      {
        StitchKind::Stitch =>
        {
          let target_x = quantize( stitch.x_mm );
          let target_y = quantize( stitch.y_mm );
          let mut dx = target_x - cur_x;
          let mut dy = target_y - cur_y;

          while dx.abs() > MAX_STEP || dy.abs() > MAX_STEP
          {
            let step_dx = dx.clamp( -MAX_STEP, MAX_STEP );
            let step_dy = dy.clamp( -MAX_STEP, MAX_STEP );
            write_stitch( &mut out, step_dx, step_dy );
            cur_x += step_dx;
            cur_y += step_dy;
            dx = target_x - cur_x;
            dy = target_y - cur_y;
          }

          write_stitch( &mut out, dx, dy );
          cur_x = target_x;
          cur_y = target_y;
        }
        StitchKind::Jump =>
        {
          let target_x = quantize( stitch.x_mm );
          let target_y = quantize( stitch.y_mm );
          let mut dx = target_x - cur_x;
          let mut dy = target_y - cur_y;

          while dx.abs() > MAX_STEP || dy.abs() > MAX_STEP
          {
            let step_dx = dx.clamp( -MAX_STEP, MAX_STEP );
            let step_dy = dy.clamp( -MAX_STEP, MAX_STEP );
            write_jump( &mut out, step_dx, step_dy );
            cur_x += step_dx;
            cur_y += step_dy;
            dx = target_x - cur_x;
            dy = target_y - cur_y;
          }

          write_jump( &mut out, dx, dy );
          cur_x = target_x;
          cur_y = target_y;
        }
        StitchKind::Trim =>
        {
          // Three consecutive zero-delta jump triplets.
          for _ in 0..3
          {
            write_jump( &mut out, 0, 0 );
          }
        }
        StitchKind::ColorChange | StitchKind::End =>
        {
          out.extend_from_slice( &[ 0x80, 0x01, 0x00, 0x00 ] );
        }
      }
    }

    out
  }

  fn quantize( mm : f64 ) -> i32
  {
    ( mm * 10.0 ).round().clamp( -3276.7 * 10.0, 3276.7 * 10.0 ) as i32
  }

  fn write_stitch( out : &mut Vec< u8 >, dx : i32, dy : i32 )
  {
    out.push( dx as i8 as u8 );
    out.push( dy as i8 as u8 );
  }

  fn write_jump( out : &mut Vec< u8 >, dx : i32, dy : i32 )
  {
    out.extend_from_slice( &[ 0x80, 0x04, dx as i8 as u8, dy as i8 as u8 ] );
  }

  #[ cfg( test ) ]
  mod tests
  {
    use super::*;

    fn stitch( x : f64, y : f64, kind : StitchKind ) -> Stitch
    {
      Stitch { x_mm : x, y_mm : y, kind, color_index : 0, color_hex : [ 0, 0, 0 ], is_structure : false }
    }

    #[ test ]
    fn test_oversize_jump_splits_into_two_records()
    {
      let stitches = vec![ stitch( 15.0, 0.0, StitchKind::Jump ) ];
      let bytes = encode( &stitches );
      assert_eq!( bytes, vec![ 0x80, 0x04, 0x78, 0x00, 0x80, 0x04, 0x1E, 0x00 ] );
    }

    #[ test ]
    fn test_stitch_is_two_byte_delta()
    {
      let stitches = vec![ stitch( 1.0, -1.0, StitchKind::Stitch ) ];
      let bytes = encode( &stitches );
      assert_eq!( bytes, vec![ 10_i8 as u8, -10_i8 as u8 ] );
    }

    #[ test ]
    fn test_trim_is_three_jump_triplets()
    {
      let stitches = vec![ stitch( 0.0, 0.0, StitchKind::Trim ) ];
      let bytes = encode( &stitches );
      assert_eq!( bytes, vec![ 0x80, 0x04, 0, 0, 0x80, 0x04, 0, 0, 0x80, 0x04, 0, 0 ] );
    }

    #[ test ]
    fn test_color_change_and_end_share_the_stop_encoding()
    {
      let change = encode( &[ stitch( 0.0, 0.0, StitchKind::ColorChange ) ] );
      let end = encode( &[ stitch( 0.0, 0.0, StitchKind::End ) ] );
      assert_eq!( change, vec![ 0x80, 0x01, 0x00, 0x00 ] );
      assert_eq!( change, end );
    }

    #[ test ]
    fn test_deltas_accumulate_across_stitches()
    {
      let stitches = vec!
      [
        stitch( 1.0, 0.0, StitchKind::Stitch ),
        stitch( 2.0, 0.0, StitchKind::Stitch ),
      ];
      let bytes = encode( &stitches );
      assert_eq!( bytes, vec![ 10_i8 as u8, 0, 10_i8 as u8, 0 ] );
    }
  }
}

crate::mod_interface!
{
  own use encode;
}
