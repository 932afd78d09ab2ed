use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid style value: {0}")]
pub struct ParseStyleError(pub String);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    RGBA(f64, f64, f64, f64),
    RGB(f64, f64, f64),
    None,
}

impl Color {
    ///Channels in `[0, 1]`, `None` for the `none` paint
    pub fn rgba(self) -> Option<(f64, f64, f64, f64)> {
	match self {
	    Color::RGBA(r, g, b, a) => Some((r, g, b, a)),
	    Color::RGB(r, g, b) => Some((r, g, b, 1.0)),
	    Color::None => None,
	}
    }

    fn named(name: &str) -> Option<Color> {
	Some(match name {
	    "black" => Color::RGB(0.0, 0.0, 0.0),
	    "white" => Color::RGB(1.0, 1.0, 1.0),
	    "red" => Color::RGB(1.0, 0.0, 0.0),
	    "green" => Color::RGB(0.0, 128.0 / 255.0, 0.0),
	    "blue" => Color::RGB(0.0, 0.0, 1.0),
	    "gray" | "grey" => Color::RGB(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0),
	    _ => return None,
	})
    }
}

impl FromStr for Color {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	let s = s.trim();
	if s.eq_ignore_ascii_case("none") {
	    return Ok(Color::None);
	}
	if let Some(color) = Color::named(&s.to_ascii_lowercase()) {
	    return Ok(color);
	}

	let err = || ParseStyleError(String::from(s));
	let hex = s.strip_prefix('#').ok_or_else(err)?;
	if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
	    return Err(err());
	}

	let parse_hex = |s_rep: &str| {
	    u8::from_str_radix(s_rep, 16)
		.map(|v| (v as f64) / 255.0)
		.map_err(|_| err())
	};
	// #rgb is shorthand for #rrggbb
	let parse_nibble = |s_rep: &str| parse_hex(&s_rep.repeat(2));

	match hex.len() {
	    3 => Ok(Color::RGB(parse_nibble(&hex[0..1])?, parse_nibble(&hex[1..2])?, parse_nibble(&hex[2..3])?)),
	    6 => Ok(Color::RGB(parse_hex(&hex[0..2])?, parse_hex(&hex[2..4])?, parse_hex(&hex[4..6])?)),
	    8 => Ok(Color::RGBA(
		parse_hex(&hex[0..2])?,
		parse_hex(&hex[2..4])?,
		parse_hex(&hex[4..6])?,
		parse_hex(&hex[6..8])?,
	    )),
	    _ => Err(err()),
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FromStr for FillRule {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	Ok(match s.trim() {
	    "nonzero" => FillRule::NonZero,
	    "evenodd" => FillRule::EvenOdd,
	    other => return Err(ParseStyleError(String::from(other))),
	})
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayVal {
    Inline,
    None,
}

impl FromStr for DisplayVal {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	if s.trim().eq_ignore_ascii_case("none") {
	    Ok(DisplayVal::None)
	} else {
	    Ok(DisplayVal::Inline)
	}
    }
}

/// Paint properties of an element. `None` fields are unspecified and
/// inherit from the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub display: Option<DisplayVal>,
    pub fill: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub fill_rule: Option<FillRule>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl Style {
    pub fn new() -> Self {
	Style::default()
    }

    /// Applies one property. Properties that don't affect path painting are
    /// ignored.
    pub fn set(&mut self, prop_name: &str, val: &str) -> Result<(), ParseStyleError> {
	let val = val.trim();
	let number = |val: &str| val.parse::<f64>().map_err(|_| ParseStyleError(String::from(val)));

	match prop_name.trim() {
	    "display" => self.display = Some(val.parse()?),
	    "fill" => self.fill = Some(val.parse()?),
	    "fill-opacity" => self.fill_opacity = Some(number(val)?),
	    "fill-rule" => self.fill_rule = Some(val.parse()?),
	    "stroke" => self.stroke = Some(val.parse()?),
	    "stroke-width" => self.stroke_width = Some(number(val.trim_end_matches("px"))?),
	    "stroke-opacity" => self.stroke_opacity = Some(number(val)?),
	    _ => (),
	};

	Ok(())
    }

    ///Fills unspecified properties from `parent`
    pub fn inherit(&self, parent: &Style) -> Style {
	Style {
	    display: self.display.or(parent.display),
	    fill: self.fill.or(parent.fill),
	    fill_opacity: self.fill_opacity.or(parent.fill_opacity),
	    fill_rule: self.fill_rule.or(parent.fill_rule),
	    stroke: self.stroke.or(parent.stroke),
	    stroke_width: self.stroke_width.or(parent.stroke_width),
	    stroke_opacity: self.stroke_opacity.or(parent.stroke_opacity),
	}
    }

    pub fn is_visible(&self) -> bool {
	self.display != Some(DisplayVal::None)
    }

    ///Resolved fill, black unless specified
    pub fn fill_paint(&self) -> Option<(f64, f64, f64, f64)> {
	let (r, g, b, a) = self.fill.unwrap_or(Color::RGB(0.0, 0.0, 0.0)).rgba()?;
	Some((r, g, b, a * self.fill_opacity.unwrap_or(1.0)))
    }

    ///Resolved stroke, none unless specified
    pub fn stroke_paint(&self) -> Option<(f64, f64, f64, f64)> {
	let (r, g, b, a) = self.stroke.unwrap_or(Color::None).rgba()?;
	Some((r, g, b, a * self.stroke_opacity.unwrap_or(1.0)))
    }

    pub fn stroke_width(&self) -> f64 {
	self.stroke_width.unwrap_or(1.0)
    }

    pub fn fill_rule(&self) -> FillRule {
	self.fill_rule.unwrap_or(FillRule::NonZero)
    }
}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, ParseStyleError> {
	let decls = s.split(';').filter(|decl| !decl.trim().is_empty());
	let decl_err = |decl: &str| ParseStyleError(format!("Invalid decl pair: {}", decl));

	let mut result = Style::new();

	for decl in decls {
	    let mut decl_pair = decl.splitn(2, ':');
	    let prop_name = decl_pair.next().ok_or_else(|| decl_err(decl))?;
	    let val = decl_pair.next().ok_or_else(|| decl_err(decl))?;

	    result.set(prop_name, val)?;
	}

	Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
	assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::RGB(1.0, 0.0, 0.0));
	assert_eq!("#fff".parse::<Color>().unwrap(), Color::RGB(1.0, 1.0, 1.0));
	assert_eq!("#00000000".parse::<Color>().unwrap(), Color::RGBA(0.0, 0.0, 0.0, 0.0));
	assert_eq!("NONE".parse::<Color>().unwrap(), Color::None);
	assert_eq!("White".parse::<Color>().unwrap(), Color::RGB(1.0, 1.0, 1.0));
    }

    #[test]
    fn bad_colors() {
	assert!("#12345".parse::<Color>().is_err());
	assert!("#gggggg".parse::<Color>().is_err());
	assert!("chartreuse".parse::<Color>().is_err());
	assert!("#+fffff".parse::<Color>().is_err());
	assert!("#+ff".parse::<Color>().is_err());
    }

    #[test]
    fn style_declarations() {
	let style: Style = "fill:#000000; stroke : none;stroke-width:1.5px;".parse().unwrap();
	assert_eq!(style.fill, Some(Color::RGB(0.0, 0.0, 0.0)));
	assert_eq!(style.stroke, Some(Color::None));
	assert_eq!(style.stroke_width, Some(1.5));
	assert_eq!(style.stroke_paint(), None);
    }

    #[test]
    fn declaration_without_value() {
	assert!("fill".parse::<Style>().is_err());
    }

    #[test]
    fn defaults_and_inheritance() {
	let style = Style::new();
	assert_eq!(style.fill_paint(), Some((0.0, 0.0, 0.0, 1.0)));
	assert_eq!(style.stroke_paint(), None);
	assert_eq!(style.stroke_width(), 1.0);

	let parent: Style = "stroke:#fff;fill-opacity:0.5".parse().unwrap();
	let child: Style = "fill:#ff0000".parse().unwrap();
	let resolved = child.inherit(&parent);
	assert_eq!(resolved.fill_paint(), Some((1.0, 0.0, 0.0, 0.5)));
	assert_eq!(resolved.stroke_paint(), Some((1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn display_none_hides() {
	let style: Style = "display:none".parse().unwrap();
	assert!(!style.is_visible());
	assert!(Style::new().is_visible());
    }
}
