//! Duct materials and SMACNA pressure classes.

use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    GalvanizedSteel,
    Aluminum,
    StainlessSteel,
    /// Welded black steel, required for grease exhaust.
    BlackSteel,
    FiberglassDuctboard,
    Pvc,
}

impl Material {
    pub fn label(self) -> &'static str {
        match self {
            Material::GalvanizedSteel => "Galvanized steel",
            Material::Aluminum => "Aluminum",
            Material::StainlessSteel => "Stainless steel",
            Material::BlackSteel => "Black steel",
            Material::FiberglassDuctboard => "Fiberglass duct board",
            Material::Pvc => "PVC",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static pressure class, ordered from lowest to highest rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PressureClass {
    #[serde(rename = "0.5in")]
    HalfInch,
    #[serde(rename = "1in")]
    OneInch,
    #[serde(rename = "2in")]
    TwoInch,
    #[serde(rename = "3in")]
    ThreeInch,
    #[serde(rename = "4in")]
    FourInch,
    #[serde(rename = "6in")]
    SixInch,
    #[serde(rename = "10in")]
    TenInch,
}

impl PressureClass {
    pub const ALL: [PressureClass; 7] = [
        PressureClass::HalfInch,
        PressureClass::OneInch,
        PressureClass::TwoInch,
        PressureClass::ThreeInch,
        PressureClass::FourInch,
        PressureClass::SixInch,
        PressureClass::TenInch,
    ];

    /// Rated static pressure in inches of water gauge.
    pub fn rating_in_wg(self) -> f64 {
        match self {
            PressureClass::HalfInch => 0.5,
            PressureClass::OneInch => 1.0,
            PressureClass::TwoInch => 2.0,
            PressureClass::ThreeInch => 3.0,
            PressureClass::FourInch => 4.0,
            PressureClass::SixInch => 6.0,
            PressureClass::TenInch => 10.0,
        }
    }

    pub fn from_rating(rating_in_wg: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.rating_in_wg() == rating_in_wg)
    }

    /// A duct built to `self` may serve a system that requires `required`.
    pub fn satisfies(self, required: PressureClass) -> bool {
        self >= required
    }
}

impl fmt::Display for PressureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in. w.g.", self.rating_in_wg())
    }
}
