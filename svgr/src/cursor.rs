use nom::{
    character::complete::{char, multispace0},
    combinator::{map_res, opt, value},
    number::complete::recognize_float,
    sequence::tuple,
    IResult,
};

use crate::error::ParseError;

pub(crate) fn float_literal(input: &str) -> IResult<&str, f64> {
    map_res(recognize_float, |s: &str| s.parse::<f64>())(input)
}

/// `wsp* comma? wsp*`
pub(crate) fn comma_wsp(input: &str) -> IResult<&str, ()> {
    value((), tuple((multispace0, opt(char(',')), multispace0)))(input)
}

/// Scan position over immutable path data.
///
/// The position only moves forward, never past the end of the text, and
/// always rests on a char boundary.
#[derive(Debug, Clone)]
pub struct ParserCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> ParserCursor<'a> {
    pub fn new(text: &'a str) -> Self {
	ParserCursor { text, pos: 0 }
    }

    pub fn position(&self) -> usize {
	self.pos
    }

    pub fn rest(&self) -> &'a str {
	&self.text[self.pos..]
    }

    pub fn at_end(&self) -> bool {
	self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
	self.rest().chars().next()
    }

    pub fn advance(&mut self) {
	if let Some(c) = self.peek() {
	    self.pos += c.len_utf8();
	}
    }

    ///True if the next token can only be the start of a numeric literal
    pub fn at_number(&self) -> bool {
	matches!(self.peek(), Some('0'..='9' | '.' | '-' | '+'))
    }

    fn seek(&mut self, rest: &'a str) {
	self.pos = self.text.len() - rest.len();
    }

    pub fn skip_whitespace(&mut self) {
	let res: IResult<&str, &str> = multispace0(self.rest());
	if let Ok((rest, _)) = res {
	    self.seek(rest);
	}
    }

    pub fn skip_comma_wsp(&mut self) {
	if let Ok((rest, _)) = comma_wsp(self.rest()) {
	    self.seek(rest);
	}
    }

    /// Reads one numeric literal and the separator after it.
    pub fn number(&mut self) -> Result<f64, ParseError> {
	let offset = self.pos;
	let (rest, num) = float_literal(self.rest()).map_err(|_| ParseError::MalformedNumber { offset })?;
	self.seek(rest);
	self.skip_comma_wsp();

	Ok(num)
    }

    /// Reads a single-character arc flag: `'0'` is false, anything else true.
    pub fn flag(&mut self) -> Result<bool, ParseError> {
	let offset = self.pos;
	let flag = match self.peek() {
	    Some('0') => false,
	    Some(c) if c.is_ascii_graphic() && c != ',' => true,
	    _ => return Err(ParseError::MalformedFlag { offset }),
	};
	self.advance();
	self.skip_comma_wsp();

	Ok(flag)
    }

    pub fn pair(&mut self) -> Result<(f64, f64), ParseError> {
	let x = self.number()?;
	let y = self.number()?;
	Ok((x, y))
    }
}
