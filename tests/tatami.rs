//! Integration tests for the tatami-fill generator: invariant 6
//! (penetrations stay inside the bounding box of the offset polygon)
//! and scenario S3.

use embroidery_core::config::ProcessingConfig;
use embroidery_core::generators::tatami::tatami;
use embroidery_core::layer::Point;
use embroidery_core::stitch::StitchKind;

fn square() -> Vec< Point >
{
  vec!
  [
    Point::new( -5.0, -5.0 ),
    Point::new( 5.0, -5.0 ),
    Point::new( 5.0, 5.0 ),
    Point::new( -5.0, 5.0 ),
    Point::new( -5.0, -5.0 ),
  ]
}

fn config() -> ProcessingConfig
{
  ProcessingConfig
  {
    tatami_angle_deg : 0.0,
    density_mm : 0.4,
    max_stitch_length_mm : 7.0,
    pull_compensation_mm : 0.0,
    ..ProcessingConfig::default()
  }
}

#[ test ]
fn scenario_s3_tatami_square_bricks_each_row()
{
  let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &config() ).unwrap();

  // Segment length is 10mm > the 7mm max stitch length, so every row
  // bricks into three penetrations rather than two straight ones.
  let rows : std::collections::BTreeMap< i64, usize > =
    stitches.iter().filter( | s | s.kind != StitchKind::Jump )
    .fold( std::collections::BTreeMap::new(), | mut acc, s |
    {
      let key = ( s.y_mm * 10.0 ).round() as i64;
      *acc.entry( key ).or_insert( 0 ) += 1;
      acc
    } );
  assert!( rows.values().any( | &count | count >= 3 ) );

  let first_row_y = ( -4.6_f64 * 10.0 ).round() as i64;
  assert!( rows.contains_key( &first_row_y ) );
}

#[ test ]
fn invariant_6_penetrations_stay_within_offset_bounds()
{
  let pull = 0.2;
  let cfg = ProcessingConfig { pull_compensation_mm : pull, ..config() };
  let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &cfg ).unwrap();
  let eps = pull + 1e-6;

  for s in &stitches
  {
    assert!( s.x_mm >= -5.0 - eps && s.x_mm <= 5.0 + eps, "x={} out of bounds", s.x_mm );
    assert!( s.y_mm >= -5.0 - eps && s.y_mm <= 5.0 + eps, "y={} out of bounds", s.y_mm );
  }
}

#[ test ]
fn rows_alternate_direction()
{
  let stitches = tatami( &[ square() ], 0, [ 0, 0, 0 ], &config() ).unwrap();
  // With the square centred on the origin, row traversal direction
  // alternates: the x of the first penetration in consecutive rows
  // should differ in sign of progress (increasing then decreasing).
  let mut xs_by_row : Vec< ( i64, f64 ) > = Vec::new();
  for s in &stitches
  {
    let key = ( s.y_mm * 10.0 ).round() as i64;
    if xs_by_row.last().map( | ( k, _ ) | *k != key ).unwrap_or( true )
    {
      xs_by_row.push( ( key, s.x_mm ) );
    }
  }
  assert!( xs_by_row.len() > 1 );
}
