//!
//! # Vector layer input contract
//!

mod private
{
  use crate::error::EmbroideryError;

  /// A single closed contour in the design's millimetre coordinate
  /// space. The first and last points are numerically equal for a
  /// closed contour.
  pub type Polygon = Vec< Point >;

  /// A 2-D position in millimetres, origin at design centre, +x right,
  /// +y up.
  #[ derive( Debug, Clone, Copy, PartialEq ) ]
  pub struct Point
  {
    /// X coordinate in millimetres.
    pub x : f64,
    /// Y coordinate in millimetres.
    pub y : f64,
  }

  impl Point
  {
    /// Creates a new point.
    pub fn new( x : f64, y : f64 ) -> Self
    {
      Self { x, y }
    }

    /// Vector sum.
    pub fn add( self, other : Point ) -> Point
    {
      Point::new( self.x + other.x, self.y + other.y )
    }

    /// Vector difference, `self - other`.
    pub fn sub( self, other : Point ) -> Point
    {
      Point::new( self.x - other.x, self.y - other.y )
    }

    /// Scalar multiplication.
    pub fn scale( self, s : f64 ) -> Point
    {
      Point::new( self.x * s, self.y * s )
    }

    /// Dot product.
    pub fn dot( self, other : Point ) -> f64
    {
      self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn len( self ) -> f64
    {
      self.dot( self ).sqrt()
    }

    /// Squared euclidean distance to `other`. Cheaper than `dist` when
    /// only relative ordering matters.
    pub fn dist_sq( self, other : Point ) -> f64
    {
      self.sub( other ).dot( self.sub( other ) )
    }

    /// Euclidean distance to `other`.
    pub fn dist( self, other : Point ) -> f64
    {
      self.dist_sq( other ).sqrt()
    }

    /// Unit vector in the same direction, or `(0, 0)` if this vector
    /// is shorter than `1e-9`.
    pub fn normalize( self ) -> Point
    {
      let len = self.len();
      if len < 1e-9 { Point::new( 0.0, 0.0 ) } else { self.scale( 1.0 / len ) }
    }

    /// Left-hand perpendicular, i.e. rotated +90 degrees: `(-y, x)`.
    pub fn left_normal( self ) -> Point
    {
      Point::new( -self.y, self.x )
    }

    /// Rotates the point by `angle_deg` degrees around the origin.
    pub fn rotate_deg( self, angle_deg : f64 ) -> Point
    {
      let rad = angle_deg.to_radians();
      let ( sin, cos ) = rad.sin_cos();
      Point::new( self.x * cos - self.y * sin, self.x * sin + self.y * cos )
    }
  }

  /// A `(color, polygons)` pair — one colour's worth of closed shapes
  /// in the design.
  #[ derive( Debug, Clone ) ]
  pub struct VectorLayer
  {
    /// The layer's colour, carried opaquely by the core.
    pub color : [ u8; 3 ],
    /// Ordered closed polygons, all in the same millimetre coordinate
    /// space.
    pub polygons : Vec< Polygon >,
  }

  impl VectorLayer
  {
    /// Builds a layer from a six-hex-digit colour string (with or
    /// without a leading `#`) and its polygons.
    pub fn new( color_hex : &str, polygons : Vec< Polygon > ) -> Result< Self, EmbroideryError >
    {
      Ok( Self { color : parse_hex_color( color_hex )?, polygons } )
    }
  }

  /// Parses a six-hex-digit RGB colour string (`"1a2b3c"` or
  /// `"#1a2b3c"`) into its three byte components.
  pub fn parse_hex_color( hex : &str ) -> Result< [ u8; 3 ], EmbroideryError >
  {
    let hex = hex.strip_prefix( '#' ).unwrap_or( hex );
    if hex.len() != 6
    {
      return Err( EmbroideryError::ConfigOutOfRange( format!( "color `{hex}` is not 6 hex digits" ).into() ) );
    }

    let byte = | slice : &str | -> Result< u8, EmbroideryError >
    {
      u8::from_str_radix( slice, 16 )
      .map_err( | _ | EmbroideryError::ConfigOutOfRange( format!( "color `{hex}` is not valid hex" ).into() ) )
    };

    Ok( [ byte( &hex[ 0..2 ] )?, byte( &hex[ 2..4 ] )?, byte( &hex[ 4..6 ] )? ] )
  }

}

crate::mod_interface!
{
  own use Point;
  own use Polygon;
  own use VectorLayer;
  own use parse_hex_color;
}
