use std::ops::Range;

use crate::cursor::ParserCursor;
use crate::error::ParseError;
use crate::sink::CommandSink;
use crate::types::{ArcParameters, Point, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl Verb {
    fn from_letter(c: char) -> Option<(Verb, Position)> {
	let verb = match c.to_ascii_uppercase() {
	    'M' => Verb::Move,
	    'L' => Verb::Line,
	    'H' => Verb::Horizontal,
	    'V' => Verb::Vertical,
	    'C' => Verb::Cubic,
	    'S' => Verb::SmoothCubic,
	    'Q' => Verb::Quadratic,
	    'T' => Verb::SmoothQuadratic,
	    'A' => Verb::Arc,
	    'Z' => Verb::Close,
	    _ => return None,
	};

	Some((verb, Position::of(c)))
    }

    ///What a bare argument list after this verb repeats
    fn repeated(self) -> Option<Verb> {
	match self {
	    Verb::Move => Some(Verb::Line),
	    Verb::Close => None,
	    other => Some(other),
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Cubic,
    Quadratic,
    Other,
}

impl Default for Segment {
    fn default() -> Self {
	Segment::Other
    }
}

/// Interpreter state carried from one command to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveState {
    pub last: Point,
    ///Start of the current subpath, target of closepath
    pub first: Point,
    ///Second control point of the last cubic, or control point of the last quadratic
    pub last_control: Point,
    previous: Segment,
}

impl CurveState {
    fn finish(&mut self, end: Point, control: Point, segment: Segment) {
	self.last = end;
	self.last_control = control;
	self.previous = segment;
    }

    fn execute<S: CommandSink + ?Sized>(
	&mut self,
	verb: Verb,
	position: Position,
	cursor: &mut ParserCursor<'_>,
	sink: &mut S,
    ) -> Result<(), ParseError> {
	let current = self.last;
	let point = |cursor: &mut ParserCursor<'_>| -> Result<Point, ParseError> {
	    let (x, y) = cursor.pair()?;
	    Ok(position.resolve(current, x, y))
	};

	match verb {
	    Verb::Move => {
		// a leading `m` resolves against the origin, the same as `M`
		let p = point(cursor)?;
		sink.move_to(p.x, p.y);
		self.first = p;
		self.finish(p, p, Segment::Other);
	    }
	    Verb::Line => {
		let p = point(cursor)?;
		sink.line_to(p.x, p.y);
		self.finish(p, p, Segment::Other);
	    }
	    Verb::Horizontal => {
		let x = cursor.number()?;
		let p = position.resolve(current, x, 0.0);
		let p = Point::new(p.x, current.y);
		sink.line_to(p.x, p.y);
		self.finish(p, p, Segment::Other);
	    }
	    Verb::Vertical => {
		let y = cursor.number()?;
		let p = position.resolve(current, 0.0, y);
		let p = Point::new(current.x, p.y);
		sink.line_to(p.x, p.y);
		self.finish(p, p, Segment::Other);
	    }
	    Verb::Cubic => {
		let c1 = point(cursor)?;
		let c2 = point(cursor)?;
		let p = point(cursor)?;
		sink.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
		self.finish(p, c2, Segment::Cubic);
	    }
	    Verb::SmoothCubic => {
		let c2 = point(cursor)?;
		let p = point(cursor)?;
		let c1 = match self.previous {
		    Segment::Cubic => self.last_control.reflect_about(current),
		    _ => current,
		};
		sink.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
		self.finish(p, c2, Segment::Cubic);
	    }
	    Verb::Quadratic => {
		let c = point(cursor)?;
		let p = point(cursor)?;
		sink.quadratic_to(c.x, c.y, p.x, p.y);
		self.finish(p, c, Segment::Quadratic);
	    }
	    Verb::SmoothQuadratic => {
		let p = point(cursor)?;
		let c = match self.previous {
		    Segment::Quadratic => self.last_control.reflect_about(current),
		    _ => current,
		};
		sink.quadratic_to(c.x, c.y, p.x, p.y);
		self.finish(p, c, Segment::Quadratic);
	    }
	    Verb::Arc => {
		let rx = cursor.number()?;
		let ry = cursor.number()?;
		let x_rotation = cursor.number()?;
		let large_arc = cursor.flag()?;
		let sweep = cursor.flag()?;
		let end = point(cursor)?;

		let arc = ArcParameters { rx, ry, x_rotation, large_arc, sweep, end };
		arc.to_bezier(current, sink);
		self.finish(end, end, Segment::Other);
	    }
	    Verb::Close => {
		sink.close_path();
		let first = self.first;
		self.finish(first, first, Segment::Other);
	    }
	}

	Ok(())
    }
}

/// Interprets SVG path data, emitting commands to `sink` as they are parsed.
///
/// Parsing stops at the first error. Commands already emitted are not
/// taken back; the caller decides whether a partial path is usable.
pub fn interpret<S: CommandSink + ?Sized>(path_data: &str, sink: &mut S) -> Result<(), ParseError> {
    let mut cursor = ParserCursor::new(path_data);
    let mut state = CurveState::default();
    let mut repeat: Option<(Verb, Position)> = None;

    cursor.skip_whitespace();
    while let Some(c) = cursor.peek() {
	let offset = cursor.position();

	let (verb, position) = if cursor.at_number() {
	    repeat.ok_or(ParseError::MissingCommand { offset })?
	} else {
	    let command = Verb::from_letter(c).ok_or(ParseError::UnknownCommand { command: c, offset })?;
	    cursor.advance();
	    cursor.skip_whitespace();
	    command
	};

	state.execute(verb, position, &mut cursor, sink)?;
	repeat = verb.repeated().map(|verb| (verb, position));

	cursor.skip_whitespace();
    }

    Ok(())
}

/// Interprets the byte range `range` of `path_data`.
///
/// Error offsets are reported relative to the whole of `path_data`.
pub fn interpret_range<S: CommandSink + ?Sized>(
    path_data: &str,
    range: Range<usize>,
    sink: &mut S,
) -> Result<(), ParseError> {
    let Range { start, end } = range;
    let data = path_data.get(start..end).ok_or(ParseError::InvalidRange { start, end })?;

    interpret(data, sink).map_err(|err| match err {
	ParseError::UnknownCommand { command, offset } => ParseError::UnknownCommand { command, offset: offset + start },
	ParseError::MalformedNumber { offset } => ParseError::MalformedNumber { offset: offset + start },
	ParseError::MalformedFlag { offset } => ParseError::MalformedFlag { offset: offset + start },
	ParseError::MissingCommand { offset } => ParseError::MissingCommand { offset: offset + start },
	other => other,
    })
}
