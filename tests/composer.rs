//! Integration tests for the layer composer: scenario S6 and the
//! universal sequence invariants (1-3).

use embroidery_core::compose::digitize;
use embroidery_core::config::{ ProcessingConfig, StitchType };
use embroidery_core::generators::tie::remove_short_stitches;
use embroidery_core::layer::{ Point, Polygon, VectorLayer };
use embroidery_core::stitch::{ Stitch, StitchKind };

fn stitch( x : f64, y : f64, kind : StitchKind ) -> Stitch
{
  Stitch { x_mm : x, y_mm : y, kind, color_index : 0, color_hex : [ 0, 0, 0 ], is_structure : false }
}

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

fn triangle_far() -> Polygon
{
  vec!
  [
    Point::new( 100.0, 100.0 ),
    Point::new( 110.0, 100.0 ),
    Point::new( 110.0, 110.0 ),
    Point::new( 100.0, 100.0 ),
  ]
}

#[ test ]
fn scenario_s6_small_stitch_removal()
{
  let stitches = vec!
  [
    stitch( 0.0, 0.0, StitchKind::Stitch ),
    stitch( 0.05, 0.0, StitchKind::Stitch ),
    stitch( 1.0, 0.0, StitchKind::Stitch ),
  ];
  let cleaned = remove_short_stitches( &stitches, 0.3 );
  let xs : Vec< f64 > = cleaned.iter().map( | s | s.x_mm ).collect();
  assert_eq!( xs, vec![ 0.0, 1.0 ] );
}

#[ test ]
fn invariant_1_exactly_one_trailing_end()
{
  let layer = VectorLayer::new( "336699", vec![ square(), triangle_far() ] ).unwrap();
  let config = ProcessingConfig { stitch_type : StitchType::Running, enable_underlay : false, ..ProcessingConfig::default() };
  let stitches = digitize( &[ layer ], &config ).unwrap();

  assert_eq!( stitches.iter().filter( | s | s.kind == StitchKind::End ).count(), 1 );
  assert_eq!( stitches.last().unwrap().kind, StitchKind::End );
}

#[ test ]
fn invariant_2_every_trim_precedes_jump_color_change_or_end()
{
  let layers = vec!
  [
    VectorLayer::new( "ff0000", vec![ square(), triangle_far() ] ).unwrap(),
    VectorLayer::new( "00ff00", vec![ square() ] ).unwrap(),
  ];
  let config = ProcessingConfig
  {
    stitch_type : StitchType::Tatami,
    density_mm : 1.5,
    enable_underlay : true,
    trim_jump_distance_mm : 2.0,
    ..ProcessingConfig::default()
  };
  let stitches = digitize( &layers, &config ).unwrap();

  for window in stitches.windows( 2 )
  {
    if window[ 0 ].kind == StitchKind::Trim
    {
      assert!( matches!( window[ 1 ].kind, StitchKind::Jump | StitchKind::ColorChange | StitchKind::End ) );
    }
  }
}

#[ test ]
fn invariant_3_consecutive_stitches_respect_min_length_or_are_coincident()
{
  let layer = VectorLayer::new( "112233", vec![ square() ] ).unwrap();
  let config = ProcessingConfig
  {
    stitch_type : StitchType::Running,
    min_stitch_length_mm : 0.25,
    enable_underlay : false,
    ..ProcessingConfig::default()
  };
  let stitches = digitize( &[ layer ], &config ).unwrap();

  let mut prev : Option< &Stitch > = None;
  for s in &stitches
  {
    if s.kind == StitchKind::Stitch
    {
      if let Some( p ) = prev
      {
        let d = p.dist( s );
        assert!( d >= config.min_stitch_length_mm - 1e-9 || d == 0.0 );
      }
      prev = Some( s );
    }
  }
}

#[ test ]
fn trim_inserted_only_when_gap_exceeds_threshold()
{
  let layer = VectorLayer::new( "abcdef", vec![ square(), triangle_far() ] ).unwrap();
  let config = ProcessingConfig
  {
    stitch_type : StitchType::Running,
    enable_underlay : false,
    trim_jump_distance_mm : 2.0,
    ..ProcessingConfig::default()
  };
  let stitches = digitize( &[ layer ], &config ).unwrap();
  assert!( stitches.iter().any( | s | s.kind == StitchKind::Trim ) );
}
