//! Integration tests for the satin-stitch generator: invariant 5 (the
//! miter-limit clamp) and scenario S2.

use embroidery_core::config::ProcessingConfig;
use embroidery_core::generators::satin::satin;
use embroidery_core::layer::Point;

fn config() -> ProcessingConfig
{
  ProcessingConfig
  {
    satin_column_width_mm : 2.0,
    density_mm : 0.4,
    pull_compensation_mm : 0.0,
    max_stitch_length_mm : 7.0,
    ..ProcessingConfig::default()
  }
}

#[ test ]
fn scenario_s2_satin_straight_column()
{
  let spine = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
  let stitches = satin( &spine, 0, [ 0, 0, 0 ], &config() ).unwrap();

  // 26 pairs at density 0.4 over a 10mm spine: 25 full steps + the
  // preserved final vertex = 26 resample points, one pair each.
  assert!( stitches.len() >= 48 && stitches.len() <= 54 );

  for pair in stitches.chunks( 2 )
  {
    assert!( ( pair[ 0 ].y_mm - 1.0 ).abs() < 1e-9, "left rail should sit at y=+1.0" );
    assert!( ( pair[ 1 ].y_mm - ( -1.0 ) ).abs() < 1e-9, "right rail should sit at y=-1.0" );
    assert!( pair[ 0 ].x_mm >= -1e-9 && pair[ 0 ].x_mm <= 10.0 + 1e-9 );
  }
}

#[ test ]
fn invariant_5_miter_never_exceeds_three_half_widths()
{
  let h = config().satin_column_width_mm / 2.0 + config().pull_compensation_mm / 2.0;
  // A zig-zag spine with several sharp reversals stresses the miter
  // clamp at every interior vertex.
  let spine = vec!
  [
    Point::new( 0.0, 0.0 ),
    Point::new( 1.0, 0.0 ),
    Point::new( 0.0, 0.0 ),
    Point::new( 1.0, 0.2 ),
    Point::new( 0.0, 0.4 ),
    Point::new( 2.0, 0.4 ),
  ];
  let stitches = satin( &spine, 0, [ 0, 0, 0 ], &config() ).unwrap();
  for pair in stitches.chunks( 2 )
  {
    assert!( pair[ 0 ].dist( &pair[ 1 ] ) <= 3.0 * h + 1e-6 );
  }
}

#[ test ]
fn pull_compensation_widens_the_column()
{
  let wide = ProcessingConfig { pull_compensation_mm : 0.6, ..config() };
  let spine = vec![ Point::new( 0.0, 0.0 ), Point::new( 10.0, 0.0 ) ];
  let stitches = satin( &spine, 0, [ 0, 0, 0 ], &wide ).unwrap();
  let h = wide.satin_column_width_mm / 2.0 + wide.pull_compensation_mm / 2.0;
  for pair in stitches.chunks( 2 )
  {
    assert!( ( pair[ 0 ].y_mm - h ).abs() < 1e-9 );
    assert!( ( pair[ 1 ].y_mm + h ).abs() < 1e-9 );
  }
}
