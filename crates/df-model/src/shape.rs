//! Duct shapes and cross sections.

use core::fmt;
use df_core::{DfError, DfResult, ensure_positive, sq_in_to_sq_ft};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Round,
    #[serde(alias = "rect")]
    Rectangular,
}

impl Shape {
    /// Short token used in shape signatures ("round", "rect").
    pub fn token(self) -> &'static str {
        match self {
            Shape::Round => "round",
            Shape::Rectangular => "rect",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "round" => Some(Shape::Round),
            "rect" | "rectangular" => Some(Shape::Rectangular),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Inside dimensions of a duct, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    Round {
        diameter_in: f64,
    },
    #[serde(alias = "rect")]
    Rectangular {
        width_in: f64,
        height_in: f64,
    },
}

impl CrossSection {
    pub fn round(diameter_in: f64) -> Self {
        CrossSection::Round { diameter_in }
    }

    pub fn rect(width_in: f64, height_in: f64) -> Self {
        CrossSection::Rectangular {
            width_in,
            height_in,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            CrossSection::Round { .. } => Shape::Round,
            CrossSection::Rectangular { .. } => Shape::Rectangular,
        }
    }

    pub fn area_sq_in(&self) -> f64 {
        match *self {
            CrossSection::Round { diameter_in } => core::f64::consts::PI * diameter_in.powi(2) / 4.0,
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => width_in * height_in,
        }
    }

    pub fn area_sq_ft(&self) -> f64 {
        sq_in_to_sq_ft(self.area_sq_in())
    }

    /// Horizontal and vertical extents. A round duct spans its diameter both ways.
    pub fn extents_in(&self) -> (f64, f64) {
        match *self {
            CrossSection::Round { diameter_in } => (diameter_in, diameter_in),
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Largest change of extent between two sections, in inches.
    pub fn max_offset_in(&self, other: &CrossSection) -> f64 {
        let (ha, va) = self.extents_in();
        let (hb, vb) = other.extents_in();
        (ha - hb).abs().max((va - vb).abs())
    }

    /// Vertical drop between two sections when their centerlines line up.
    pub fn vertical_offset_in(&self, other: &CrossSection) -> f64 {
        (self.extents_in().1 - other.extents_in().1).abs()
    }

    /// Same shape and dimensions within `tol_in`.
    pub fn matches(&self, other: &CrossSection, tol_in: f64) -> bool {
        self.shape() == other.shape() && self.max_offset_in(other) <= tol_in
    }

    /// Largest side (or the diameter), used against min/max size limits.
    pub fn governing_dimension_in(&self) -> f64 {
        let (h, v) = self.extents_in();
        h.max(v)
    }

    /// Smallest side (or the diameter).
    pub fn minor_dimension_in(&self) -> f64 {
        let (h, v) = self.extents_in();
        h.min(v)
    }

    /// Long side over short side; 1.0 for round.
    pub fn aspect_ratio(&self) -> f64 {
        self.governing_dimension_in() / self.minor_dimension_in()
    }

    /// Every dimension is positive and finite.
    pub fn check(&self) -> DfResult<()> {
        match *self {
            CrossSection::Round { diameter_in } => {
                ensure_positive(diameter_in, "diameter_in")?;
            }
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => {
                ensure_positive(width_in, "width_in")?;
                ensure_positive(height_in, "height_in")?;
            }
        }
        Ok(())
    }

    /// Name of the single scalar property that describes this section's size,
    /// if there is exactly one.
    pub fn scalar_property(&self) -> Option<&'static str> {
        match self {
            CrossSection::Round { .. } => Some("diameter"),
            CrossSection::Rectangular { .. } => None,
        }
    }
}

impl fmt::Display for CrossSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CrossSection::Round { diameter_in } => write!(f, "{diameter_in}\" round"),
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => write!(f, "{width_in}\"x{height_in}\" rect"),
        }
    }
}

/// `"<shapeA>-><shapeB>"`, e.g. `"round->rect"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeSignature {
    pub from: Shape,
    pub to: Shape,
}

impl ShapeSignature {
    pub fn new(from: Shape, to: Shape) -> Self {
        Self { from, to }
    }

    pub fn is_shape_change(&self) -> bool {
        self.from != self.to
    }

    pub fn parse(text: &str) -> DfResult<Self> {
        let (a, b) = text
            .split_once("->")
            .ok_or_else(|| DfError::InvalidArg {
                what: format!("shape signature '{text}' is missing '->'"),
            })?;
        let from = Shape::from_token(a.trim()).ok_or_else(|| DfError::InvalidArg {
            what: format!("unknown shape '{a}' in signature"),
        })?;
        let to = Shape::from_token(b.trim()).ok_or_else(|| DfError::InvalidArg {
            what: format!("unknown shape '{b}' in signature"),
        })?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for ShapeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from.token(), self.to.token())
    }
}

impl TryFrom<String> for ShapeSignature {
    type Error = DfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShapeSignature> for String {
    fn from(value: ShapeSignature) -> Self {
        value.to_string()
    }
}
