//! Transform origin declared on flipped elements.
//!
//! Scale corrections are applied around the element's transform origin, so an
//! element that wants to grow from its top-left corner declares `top left`.
//! The origin is written to the inline `transform-origin` style once per
//! animation start. Keyword origins are written in `<x> <y>` order (`top left`
//! becomes `left top`) and pixel or percentage pairs in normalized form. Every
//! other valid CSS origin is written exactly as declared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::matrix::css_number;
use crate::error::FlipError;

/// Transform origin specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformOrigin {
    /// Origin at absolute pixel coordinates.
    Absolute { x: f64, y: f64 },
    /// Origin at a fraction of the element size (0.0 = 0%, 1.0 = 100%).
    Percentage { x: f64, y: f64 },
    /// Named origin positions.
    Named { position: NamedOrigin },
    /// Validated CSS origin with no structured form (`0 0`, `left 10px`,
    /// `50% 50% 20px`), written unchanged.
    Raw { value: String },
}

/// Named transform origin positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedOrigin {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::center()
    }
}

impl TransformOrigin {
    pub fn center() -> Self {
        Self::Named {
            position: NamedOrigin::Center,
        }
    }

    pub fn top_left() -> Self {
        Self::Named {
            position: NamedOrigin::TopLeft,
        }
    }

    pub fn absolute(x: f64, y: f64) -> Self {
        Self::Absolute { x, y }
    }

    pub fn percentage(x: f64, y: f64) -> Self {
        Self::Percentage { x, y }
    }

    /// CSS value for the inline `transform-origin` style.
    pub fn to_css(&self) -> String {
        match self {
            Self::Absolute { x, y } => format!("{}px {}px", css_number(*x), css_number(*y)),
            Self::Percentage { x, y } => {
                format!("{}% {}%", css_number(x * 100.0), css_number(y * 100.0))
            }
            Self::Named { position } => position.to_css().to_string(),
            Self::Raw { value } => value.clone(),
        }
    }
}

impl NamedOrigin {
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::TopLeft => "left top",
            Self::TopCenter => "center top",
            Self::TopRight => "right top",
            Self::CenterLeft => "left center",
            Self::Center => "center",
            Self::CenterRight => "right center",
            Self::BottomLeft => "left bottom",
            Self::BottomCenter => "center bottom",
            Self::BottomRight => "right bottom",
        }
    }

    fn from_axes(horizontal: Axis, vertical: Axis) -> Self {
        match (horizontal, vertical) {
            (Axis::Start, Axis::Start) => Self::TopLeft,
            (Axis::Middle, Axis::Start) => Self::TopCenter,
            (Axis::End, Axis::Start) => Self::TopRight,
            (Axis::Start, Axis::Middle) => Self::CenterLeft,
            (Axis::Middle, Axis::Middle) => Self::Center,
            (Axis::End, Axis::Middle) => Self::CenterRight,
            (Axis::Start, Axis::End) => Self::BottomLeft,
            (Axis::Middle, Axis::End) => Self::BottomCenter,
            (Axis::End, Axis::End) => Self::BottomRight,
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy)]
enum Keyword {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl Keyword {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "center" => Some(Self::Center),
            _ => None,
        }
    }

    fn horizontal(self) -> Option<Axis> {
        match self {
            Self::Left => Some(Axis::Start),
            Self::Center => Some(Axis::Middle),
            Self::Right => Some(Axis::End),
            _ => None,
        }
    }

    fn vertical(self) -> Option<Axis> {
        match self {
            Self::Top => Some(Axis::Start),
            Self::Center => Some(Axis::Middle),
            Self::Bottom => Some(Axis::End),
            _ => None,
        }
    }
}

/// CSS length units accepted in origin values.
const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "cm", "mm", "in", "pt", "pc", "q",
];

/// One token of a `transform-origin` value.
#[derive(Clone, Copy)]
enum Term {
    Keyword(Keyword),
    Percentage,
    Length,
}

impl Term {
    fn parse(token: &str) -> Option<Self> {
        if let Some(keyword) = Keyword::parse(token) {
            return Some(Self::Keyword(keyword));
        }
        if let Some(number) = token.strip_suffix('%') {
            return number
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|_| Self::Percentage);
        }
        let split = token
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(token.len());
        let (number, unit) = token.split_at(split);
        let value = number.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let unit = unit.to_ascii_lowercase();
        if (unit.is_empty() && value == 0.0) || LENGTH_UNITS.contains(&unit.as_str()) {
            Some(Self::Length)
        } else {
            None
        }
    }

    fn fits_horizontal(self) -> bool {
        match self {
            Self::Keyword(k) => k.horizontal().is_some(),
            Self::Percentage | Self::Length => true,
        }
    }

    fn fits_vertical(self) -> bool {
        match self {
            Self::Keyword(k) => k.vertical().is_some(),
            Self::Percentage | Self::Length => true,
        }
    }
}

/// Resolve one or two keywords, accepting pairs in either order.
fn keyword_axes(keywords: &[Keyword]) -> Option<(Axis, Axis)> {
    match keywords {
        [single] => match (single.horizontal(), single.vertical()) {
            (Some(h), Some(v)) => Some((h, v)),
            (Some(h), None) => Some((h, Axis::Middle)),
            (None, Some(v)) => Some((Axis::Middle, v)),
            (None, None) => None,
        },
        [first, second] => match (first.horizontal(), second.vertical()) {
            (Some(h), Some(v)) => Some((h, v)),
            // `top left` style: vertical keyword first
            _ => match (second.horizontal(), first.vertical()) {
                (Some(h), Some(v)) => Some((h, v)),
                _ => None,
            },
        },
        _ => None,
    }
}

/// Validate the grammar `<x/y position> [<length>]`.
fn is_valid_origin(terms: &[Term]) -> bool {
    let position = match terms {
        [_] | [_, _] => terms,
        [_, _, Term::Length] => &terms[..2],
        _ => return false,
    };

    let keywords: Option<Vec<Keyword>> = position
        .iter()
        .map(|t| match t {
            Term::Keyword(k) => Some(*k),
            _ => None,
        })
        .collect();
    match (keywords, position) {
        (Some(keywords), _) => keyword_axes(&keywords).is_some(),
        (None, [_]) => true,
        (None, [x, y]) => x.fits_horizontal() && y.fits_vertical(),
        _ => false,
    }
}

impl FromStr for TransformOrigin {
    type Err = FlipError;

    /// Keyword forms (`top left`, `center`), percentage pairs (`50% 0%`) and
    /// pixel pairs (`10px 20px`) parse into structured origins. Any other
    /// valid CSS origin (`0 0`, `left 10px`, `50% 50% 20px`) is kept as
    /// written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FlipError::InvalidTransformOrigin(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();

        let keywords: Option<Vec<Keyword>> = tokens.iter().map(|t| Keyword::parse(t)).collect();
        if let Some(keywords) = keywords.filter(|k| k.len() <= 2) {
            let (h, v) = keyword_axes(&keywords).ok_or_else(invalid)?;
            return Ok(Self::Named {
                position: NamedOrigin::from_axes(h, v),
            });
        }

        if let [x, y] = tokens.as_slice() {
            if let (Some(x), Some(y)) = (parse_suffixed(x, "%"), parse_suffixed(y, "%")) {
                return Ok(Self::Percentage {
                    x: x / 100.0,
                    y: y / 100.0,
                });
            }
            if let (Some(x), Some(y)) = (parse_suffixed(x, "px"), parse_suffixed(y, "px")) {
                return Ok(Self::Absolute { x, y });
            }
        }

        let terms: Option<Vec<Term>> = tokens.iter().map(|t| Term::parse(t)).collect();
        match terms {
            Some(terms) if is_valid_origin(&terms) => Ok(Self::Raw {
                value: s.trim().to_string(),
            }),
            _ => Err(invalid()),
        }
    }
}

fn parse_suffixed(token: &str, suffix: &str) -> Option<f64> {
    token.strip_suffix(suffix)?.parse().ok()
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
