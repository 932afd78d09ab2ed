use nom::{
    character::complete::{alpha1, char, multispace0},
    combinator::map_opt,
    error::Error,
    multi::many0,
    sequence::{delimited, preceded, terminated},
    Finish, IResult, Parser,
};

use crate::cursor::{comma_wsp, float_literal};
use crate::error::DocumentError;
use crate::types::Transform;

fn snd<T, U>(input: (U, T)) -> T {
    input.1
}

/// `name ( args )`, whitespace allowed around the parentheses.
fn css_function<'a, F, O>(arg_parser: F) -> impl FnMut(&'a str) -> IResult<&'a str, (&'a str, O)>
where
    F: Parser<&'a str, O, Error<&'a str>>,
{
    let mut parser = alpha1::<&'a str, Error<&'a str>>.and(
	multispace0::<&'a str, Error<&'a str>>
	    .and(delimited(char('(').and(multispace0), arg_parser, multispace0.and(char(')'))))
	    .map(snd),
    );

    move |s| parser.parse(s)
}

fn number_list(input: &str) -> IResult<&str, Vec<f64>> {
    float_literal
	.and(many0(preceded(comma_wsp, float_literal)))
	.map(|(fst, rest)| {
	    let mut list = Vec::with_capacity(rest.len() + 1);
	    list.push(fst);
	    list.extend(rest);
	    list
	})
	.parse(input)
}

fn build(name: &str, args: &[f64]) -> Option<Transform> {
    Some(match (name, args) {
	("matrix", &[a, b, c, d, e, f]) => Transform::new(a, b, c, d, e, f),
	("translate", &[dx]) => Transform::translate(dx, 0.0),
	("translate", &[dx, dy]) => Transform::translate(dx, dy),
	("scale", &[s]) => Transform::scale(s, s),
	("scale", &[sx, sy]) => Transform::scale(sx, sy),
	("rotate", &[a]) => Transform::rotate(a.to_radians()),
	("rotate", &[a, cx, cy]) => Transform::translate(cx, cy)
	    .multiply(&Transform::rotate(a.to_radians()))
	    .multiply(&Transform::translate(-cx, -cy)),
	("skewX", &[a]) => Transform::skew_x(a.to_radians()),
	("skewY", &[a]) => Transform::skew_y(a.to_radians()),
	_ => return None,
    })
}

fn transform_function(input: &str) -> IResult<&str, Transform> {
    map_opt(css_function(number_list), |(name, args)| build(name, &args))(input)
}

/// Parses the value of a `transform` attribute.
///
/// The functions of a list compose left to right, so the rightmost one is
/// applied to the geometry first. An empty value is the identity.
pub fn parse_transform(transform_data: &str) -> Result<Transform, DocumentError> {
    let err = || DocumentError::Transform(String::from(transform_data));

    let mut list = preceded(multispace0, many0(terminated(transform_function, comma_wsp)));
    let (rest, transforms) = list.parse(transform_data).finish().map_err(|_: Error<&str>| err())?;
    if !rest.is_empty() {
	return Err(err());
    }

    Ok(transforms
	.iter()
	.fold(Transform::IDENTITY, |acc, it| acc.multiply(it)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
	(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn translate_with_one_or_two_args() {
	assert_eq!(parse_transform("translate(10)").unwrap(), Transform::translate(10.0, 0.0));
	assert_eq!(parse_transform("translate( 10 , -4 )").unwrap(), Transform::translate(10.0, -4.0));
    }

    #[test]
    fn matrix_keeps_cairo_order() {
	let t = parse_transform("matrix(1,2,3,4,5,6)").unwrap();
	assert_eq!(t, Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
	assert_eq!(t.apply(1.0, 1.0), (9.0, 12.0));
    }

    #[test]
    fn list_applies_rightmost_first() {
	let t = parse_transform("translate(10 0) scale(2)").unwrap();
	assert_eq!(t.apply(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn rotate_about_a_point() {
	let t = parse_transform("rotate(90 5 5)").unwrap();
	assert!(close(t.apply(10.0, 5.0), (5.0, 10.0)));
    }

    #[test]
    fn empty_is_identity() {
	assert!(parse_transform("").unwrap().is_identity());
	assert!(parse_transform("  ").unwrap().is_identity());
    }

    #[test]
    fn rejects_garbage_and_bad_arity() {
	assert!(parse_transform("translate(1) wobble").is_err());
	assert!(parse_transform("matrix(1 2 3)").is_err());
	assert!(parse_transform("scale()").is_err());
    }
}
