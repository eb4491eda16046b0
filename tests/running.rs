//! Integration tests for the running-stitch generator: invariant 4
//! (no face stitch exceeds `max_stitch_length_mm`) and scenario S1.

use embroidery_core::config::{ ProcessingConfig, StitchType };
use embroidery_core::generators::running::running;
use embroidery_core::layer::Point;
use embroidery_core::stitch::StitchKind;

fn config( max : f64 ) -> ProcessingConfig
{
  ProcessingConfig { stitch_type : StitchType::Running, max_stitch_length_mm : max, ..ProcessingConfig::default() }
}

#[ test ]
fn scenario_s1_running_stitch_split()
{
  let path = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
  let stitches = running( &path, 0, [ 0, 0, 0 ], &config( 2.5 ) ).unwrap();

  let xs : Vec< f64 > = stitches.iter().map( | s | s.x_mm ).collect();
  assert_eq!( xs, vec![ 0.0, 2.5, 5.0, 7.5, 10.0 ] );
  assert!( stitches.iter().all( | s | s.y_mm == 0.0 ) );
  assert!( stitches.iter().all( | s | s.kind == StitchKind::Stitch && !s.is_structure ) );
}

#[ test ]
fn invariant_4_no_face_stitch_exceeds_max_length()
{
  let path = vec!
  [
    Point::new( 0.0, 0.0 ),
    Point::new( 3.0, 4.0 ),
    Point::new( 3.0, -9.0 ),
    Point::new( -12.0, -9.0 ),
  ];
  let max = 2.5;
  let stitches = running( &path, 0, [ 0, 0, 0 ], &config( max ) ).unwrap();

  for window in stitches.windows( 2 )
  {
    let d = window[ 0 ].dist( &window[ 1 ] );
    assert!( d <= max + 1e-6, "segment length {d} exceeds max {max}" );
  }
}

#[ test ]
fn invariant_4_holds_across_many_irregular_paths()
{
  let max = 3.0;
  let path = vec!
  [
    Point::new( 0.0, 0.0 ),
    Point::new( 1.0, 0.3 ),
    Point::new( 1.0, 20.0 ),
    Point::new( -5.5, 20.0 ),
    Point::new( -5.5, -5.5 ),
    Point::new( 30.0, -5.5 ),
  ];
  let stitches = running( &path, 0, [ 0, 0, 0 ], &config( max ) ).unwrap();
  for window in stitches.windows( 2 )
  {
    assert!( window[ 0 ].dist( &window[ 1 ] ) <= max + 1e-6 );
  }
}
