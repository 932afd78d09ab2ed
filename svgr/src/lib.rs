//! Interpreter for SVG path data.
//!
//! Path strings are parsed into absolute [`PathCommand`]s which are streamed
//! into a [`CommandSink`] while parsing. Elliptical arcs are converted into
//! cubic Beziers, so sinks only ever see moves, lines, cubics, quadratics and
//! closepaths.
//!
//! ```
//! use svgr::{interpret, PathCommand};
//!
//! let mut commands: Vec<PathCommand> = Vec::new();
//! interpret("m5,5 l5,0", &mut commands).unwrap();
//! assert_eq!(commands, vec![PathCommand::MoveTo(5.0, 5.0), PathCommand::LineTo(10.0, 5.0)]);
//! ```

mod arc;
mod cursor;
mod error;
mod interpret;
mod parse;
mod sink;
mod style;
mod transform;
mod types;

pub use arc::convert_arc_to_bezier;
pub use cursor::ParserCursor;
pub use error::{DocumentError, ParseError};
pub use interpret::{interpret, interpret_range, CurveState};
pub use parse::{load_svg, Document, PathElement};
pub use sink::{replay, Bounds, CommandSink, Transformed};
pub use style::{Color, DisplayVal, FillRule, ParseStyleError, Style};
pub use transform::parse_transform;
pub use types::{ArcParameters, PathCommand, Point, Position, Transform, ViewBox};
