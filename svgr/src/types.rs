use std::str::FromStr;

use crate::arc::convert_arc_to_bezier;
use crate::error::DocumentError;
use crate::sink::CommandSink;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
	Point { x, y }
    }

    ///Point mirrored through `center`
    pub fn reflect_about(self, center: Point) -> Point {
	Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
	(self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Absolute,
    Relative,
}

impl Position {
    pub fn of(command: char) -> Position {
	if command.is_ascii_lowercase() {
	    Position::Relative
	} else {
	    Position::Absolute
	}
    }

    ///Resolves `(x, y)` against the current point
    pub fn resolve(self, current: Point, x: f64, y: f64) -> Point {
	match self {
	    Position::Absolute => Point::new(x, y),
	    Position::Relative => Point::new(current.x + x, current.y + y),
	}
    }
}

/// A single path-construction instruction.
///
/// All coordinates are absolute; relative forms and arcs are resolved by the
/// interpreter before a command is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    QuadraticTo(f64, f64, f64, f64),
    ClosePath,
}

impl PathCommand {
    pub fn send_to<S: CommandSink + ?Sized>(&self, sink: &mut S) {
	match *self {
	    PathCommand::MoveTo(x, y) => sink.move_to(x, y),
	    PathCommand::LineTo(x, y) => sink.line_to(x, y),
	    PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => sink.cubic_to(c1x, c1y, c2x, c2y, x, y),
	    PathCommand::QuadraticTo(cx, cy, x, y) => sink.quadratic_to(cx, cy, x, y),
	    PathCommand::ClosePath => sink.close_path(),
	}
    }

    pub fn end_point(&self) -> Option<Point> {
	match *self {
	    PathCommand::MoveTo(x, y)
	    | PathCommand::LineTo(x, y)
	    | PathCommand::CubicTo(_, _, _, _, x, y)
	    | PathCommand::QuadraticTo(_, _, x, y) => Some(Point::new(x, y)),
	    PathCommand::ClosePath => None,
	}
    }
}

/// Endpoint parameterization of an elliptical arc, as written in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameters {
    pub rx: f64,
    pub ry: f64,
    ///Degrees
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub end: Point,
}

impl ArcParameters {
    pub fn to_bezier<S: CommandSink + ?Sized>(&self, start: Point, sink: &mut S) {
	convert_arc_to_bezier(
	    self.rx,
	    self.ry,
	    self.x_rotation.to_radians(),
	    self.large_arc,
	    self.sweep,
	    start,
	    self.end,
	    sink,
	);
    }
}

/// Affine matrix in cairo's field order:
/// `x' = xx * x + xy * y + x0`, `y' = yx * x + yy * y + y0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Transform {
    fn default() -> Self {
	Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
	xx: 1.0,
	yx: 0.0,
	xy: 0.0,
	yy: 1.0,
	x0: 0.0,
	y0: 0.0,
    };

    pub fn new(xx: f64, yx: f64, xy: f64, yy: f64, x0: f64, y0: f64) -> Self {
	Transform { xx, yx, xy, yy, x0, y0 }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
	Transform::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
	Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn rotate(radians: f64) -> Self {
	let (sin, cos) = radians.sin_cos();
	Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn skew_x(radians: f64) -> Self {
	Transform::new(1.0, 0.0, radians.tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(radians: f64) -> Self {
	Transform::new(1.0, radians.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    ///`self * other`: the result applies `other` first, then `self`
    pub fn multiply(&self, other: &Transform) -> Transform {
	let s = self;
	let o = other;
	Transform {
	    xx: s.xx * o.xx + s.xy * o.yx,
	    yx: s.yx * o.xx + s.yy * o.yx,
	    xy: s.xx * o.xy + s.xy * o.yy,
	    yy: s.yx * o.xy + s.yy * o.yy,
	    x0: s.xx * o.x0 + s.xy * o.y0 + s.x0,
	    y0: s.yx * o.x0 + s.yy * o.y0 + s.y0,
	}
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
	(
	    self.xx * x + self.xy * y + self.x0,
	    self.yx * x + self.yy * y + self.y0,
	)
    }

    pub fn is_identity(&self) -> bool {
	*self == Transform::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FromStr for ViewBox {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	let err = || DocumentError::ViewBox(String::from(s));

	let values = s
	    .split(|c: char| c == ',' || c.is_ascii_whitespace())
	    .filter(|it| !it.is_empty())
	    .map(|it| it.parse::<f64>().map_err(|_| err()))
	    .collect::<Result<Vec<f64>, _>>()?;

	match values[..] {
	    [x, y, width, height] if width >= 0.0 && height >= 0.0 => Ok(ViewBox { x, y, width, height }),
	    _ => Err(err()),
	}
    }
}
