//!
//! # Tajima DST encoder
//!
//! 512-byte ASCII header, space-padded, followed by 3-byte stitch
//! records using Tajima's weighted-bit delta interleaving.
//!

mod private
{
  use crate::stitch::{ Stitch, StitchKind };
  use crate::error::EmbroideryError;

  const HEADER_LEN : usize = 512;
  const MAX_STEP : i32 = 121;
  const COORD_LIMIT : i32 = 32767;

  /// Encodes `stitches` into a complete DST file: the 512-byte header
  /// followed by the 3-byte-per-record body.
  ///
  /// Fails with `CoordinateOverflow` if any stitch's position, scaled
  /// to 0.1mm, falls outside `±32767`.
  pub fn encode( stitches : &[ Stitch ] ) -> Result< Vec< u8 >, EmbroideryError >
  {
    let body = encode_body( stitches )?;
    let header = encode_header( &body );

    let mut out = Vec::with_capacity( HEADER_LEN + body.bytes.len() );
    out.extend_from_slice( &header );
    out.extend_from_slice( &body.bytes );
    Ok( out )
  }

  struct Body
  {
    bytes : Vec< u8 >,
    record_count : u32,
    color_change_count : u32,
    plus_x : i32,
    minus_x : i32,
    plus_y : i32,
    minus_y : i32,
  }

  fn encode_body( stitches : &[ Stitch ] ) -> Result< Body, EmbroideryError >
  {
    let mut bytes = Vec::with_capacity( stitches.len() * 3 + 3 );
    let mut record_count : u32 = 0;
    let mut color_change_count : u32 = 0;

    let mut cur_x = 0_i32;
    let mut cur_y = 0_i32;
    let mut max_x = 0_i32;
    let mut min_x = 0_i32;
    let mut max_y = 0_i32;
    let mut min_y = 0_i32;

    for stitch in stitches
    {
      if stitch.kind == StitchKind::End
      {
        continue;
      }

      let target_x = quantize( stitch.x_mm )?;
      let target_y = quantize( stitch.y_mm )?;
      max_x = max_x.max( target_x );
      min_x = min_x.min( target_x );
      max_y = max_y.max( target_y );
      min_y = min_y.min( target_y );

      if stitch.kind == StitchKind::ColorChange
      {
        color_change_count += 1;
      }

      let ( jump, stop ) = match stitch.kind
      {
        StitchKind::Stitch => ( false, false ),
        StitchKind::Jump | StitchKind::Trim => ( true, false ),
        StitchKind::ColorChange => ( true, true ),
        StitchKind::End => unreachable!(),
      };

      let mut dx = target_x - cur_x;
      let mut dy = target_y - cur_y;

      while dx.abs() > MAX_STEP || dy.abs() > MAX_STEP
      {
        let step_dx = dx.clamp( -MAX_STEP, MAX_STEP );
        let step_dy = dy.clamp( -MAX_STEP, MAX_STEP );
        bytes.extend_from_slice( &encode_delta( step_dx, step_dy, true, false ) );
        record_count += 1;
        cur_x += step_dx;
        cur_y += step_dy;
        dx = target_x - cur_x;
        dy = target_y - cur_y;
      }

      bytes.extend_from_slice( &encode_delta( dx, dy, jump, stop ) );
      record_count += 1;
      cur_x = target_x;
      cur_y = target_y;
    }

    // Terminator: synthetic zero-delta record, both control bits set.
    bytes.extend_from_slice( &encode_delta( 0, 0, true, true ) );
    record_count += 1;

    Ok( Body { bytes, record_count, color_change_count, plus_x : max_x.max( 0 ), minus_x : ( -min_x ).max( 0 ), plus_y : max_y.max( 0 ), minus_y : ( -min_y ).max( 0 ) } )
  }

  fn quantize( mm : f64 ) -> Result< i32, EmbroideryError >
  {
    let units = ( mm * 10.0 ).round();
    if !units.is_finite() || units.abs() > f64::from( COORD_LIMIT )
    {
      log::error!( "dst::encode: {mm} mm is outside +/-3276.7mm" );
      return Err( EmbroideryError::CoordinateOverflow( format!( "{mm} mm is outside +/-3276.7mm" ).into() ) );
    }
    Ok( units as i32 )
  }

  /// Balanced-ternary digits of `n` for weights `3^0..3^4` (i.e.
  /// `1, 3, 9, 27, 81`), least-significant first. Each digit is in
  /// `{-1, 0, 1}`; the weighted sum reconstructs `n` exactly for any
  /// `n` in `[-121, 121]`.
  fn ternary_digits( mut n : i32 ) -> [ i8; 5 ]
  {
    let mut digits = [ 0_i8; 5 ];
    for d in &mut digits
    {
      let r = n.rem_euclid( 3 );
      let digit = if r == 2 { -1 } else { r as i8 };
      *d = digit;
      n = ( n - i32::from( digit ) ) / 3;
    }
    digits
  }

  /// `(byte index, +weight bit, -weight bit)` per ternary digit,
  /// weights `1, 3, 9, 27, 81` in order.
  const DY_BITS : [ ( usize, u8, u8 ); 5 ] = [ ( 0, 0, 1 ), ( 1, 7, 6 ), ( 0, 2, 3 ), ( 1, 5, 4 ), ( 2, 2, 3 ) ];
  const DX_BITS : [ ( usize, u8, u8 ); 5 ] = [ ( 0, 7, 6 ), ( 1, 3, 2 ), ( 0, 5, 4 ), ( 1, 1, 0 ), ( 2, 4, 5 ) ];

  fn encode_delta( dx : i32, dy : i32, jump : bool, stop : bool ) -> [ u8; 3 ]
  {
    let dx_digits = ternary_digits( dx );
    let dy_digits = ternary_digits( dy );
    let mut b = [ 0_u8; 3 ];

    for i in 0..5
    {
      let ( byte_i, plus_bit, minus_bit ) = DY_BITS[ i ];
      match dy_digits[ i ]
      {
        1 => b[ byte_i ] |= 1 << plus_bit,
        -1 => b[ byte_i ] |= 1 << minus_bit,
        _ => {}
      }
      let ( byte_i, plus_bit, minus_bit ) = DX_BITS[ i ];
      match dx_digits[ i ]
      {
        1 => b[ byte_i ] |= 1 << plus_bit,
        -1 => b[ byte_i ] |= 1 << minus_bit,
        _ => {}
      }
    }

    if jump { b[ 2 ] |= 0x80; }
    if stop { b[ 2 ] |= 0x40; }
    b
  }

  fn encode_header( body : &Body ) -> [ u8; HEADER_LEN ]
  {
    let mut header = [ 0x20_u8; HEADER_LEN ];
    put( &mut header, 0, &format!( "LA:{:<16}", "Untitled" ) );
    put( &mut header, 23, &format!( "ST:{:07}", body.record_count ) );
    put( &mut header, 39, &format!( "CO:{:03}", body.color_change_count ) );
    put( &mut header, 54, &format!( "+X:{:05}", body.plus_x ) );
    put( &mut header, 69, &format!( "-X:{:05}", body.minus_x ) );
    put( &mut header, 84, &format!( "+Y:{:05}", body.plus_y ) );
    put( &mut header, 99, &format!( "-Y:{:05}", body.minus_y ) );
    put( &mut header, 114, "AX:+00000" );
    put( &mut header, 129, "AY:+00000" );
    put( &mut header, 144, "MX:+00000" );
    put( &mut header, 159, "MY:+00000" );
    put( &mut header, 174, "PD:******" );
    header
  }

  fn put( header : &mut [ u8; HEADER_LEN ], offset : usize, s : &str )
  {
    header[ offset..offset + s.len() ].copy_from_slice( s.as_bytes() );
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
    fn test_header_bounds_match_absolute_positions()
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
    fn test_body_roundtrips_absolute_positions()
    {
      let stitches = vec!
      [
        stitch( 0.0, 0.0, StitchKind::Stitch ),
        stitch( 1.0, 2.0, StitchKind::Stitch ),
        stitch( 1.0, 2.0, StitchKind::End ),
      ];
      let bytes = encode( &stitches ).unwrap();
      let body = &bytes[ HEADER_LEN.. ];

      let mut x = 0_i32;
      let mut y = 0_i32;
      let mut positions = Vec::new();
      for record in body.chunks( 3 )
      {
        let ( dx, dy ) = decode_delta( record );
        x += dx;
        y += dy;
        positions.push( ( x, y ) );
      }

      assert_eq!( positions[ 0 ], ( 0, 0 ) );
      assert_eq!( positions[ 1 ], ( 10, 20 ) );
    }

    #[ test ]
    fn test_overflow_is_rejected()
    {
      let stitches = vec![ stitch( 4000.0, 0.0, StitchKind::Stitch ) ];
      assert!( matches!( encode( &stitches ), Err( EmbroideryError::CoordinateOverflow( _ ) ) ) );
    }

    #[ test ]
    fn test_terminator_is_zero_delta_both_flags_set()
    {
      let stitches = vec![ stitch( 0.0, 0.0, StitchKind::Stitch ) ];
      let bytes = encode( &stitches ).unwrap();
      let last = &bytes[ bytes.len() - 3.. ];
      assert_eq!( last, &[ 0x00, 0x00, 0xC0 ] );
    }

    #[ test ]
    fn test_oversize_step_splits_into_jump_records()
    {
      let stitches = vec![ stitch( 30.0, 0.0, StitchKind::Stitch ) ];
      let bytes = encode( &stitches ).unwrap();
      let body = &bytes[ HEADER_LEN.. ];
      // 300 units > 121, needs 3 records (121+121+58) plus terminator.
      assert_eq!( body.len(), 4 * 3 );
    }

    /// Test-only inverse of `encode_delta`, used to check round-trip
    /// fidelity of the body encoding.
    fn decode_delta( record : &[ u8 ] ) -> ( i32, i32 )
    {
      let mut dx = 0;
      let mut dy = 0;
      for i in 0..5
      {
        let ( byte_i, plus_bit, minus_bit ) = DY_BITS[ i ];
        let weight = 3_i32.pow( i as u32 );
        if record[ byte_i ] & ( 1 << plus_bit ) != 0 { dy += weight; }
        if record[ byte_i ] & ( 1 << minus_bit ) != 0 { dy -= weight; }
        let ( byte_i, plus_bit, minus_bit ) = DX_BITS[ i ];
        if record[ byte_i ] & ( 1 << plus_bit ) != 0 { dx += weight; }
        if record[ byte_i ] & ( 1 << minus_bit ) != 0 { dx -= weight; }
      }
      ( dx, dy )
    }
  }
}

crate::mod_interface!
{
  own use encode;
}
