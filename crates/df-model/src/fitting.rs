//! Fitting kinds and the request recipe strategies hand to the resolver.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::service::ServiceId;
use crate::shape::CrossSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingType {
    #[serde(rename = "elbow_90_short_radius")]
    Elbow90ShortRadius,
    #[serde(rename = "elbow_90_long_radius")]
    Elbow90LongRadius,
    #[serde(rename = "elbow_45")]
    Elbow45,
    /// Gored/mitered elbow built to an arbitrary angle.
    MiteredElbow,
    /// Same-shape size change.
    Reducer,
    /// Shape change (with or without a size change).
    Transition,
    Tee,
    Wye,
    Cap,
}

impl FittingType {
    pub fn is_elbow(self) -> bool {
        matches!(
            self,
            FittingType::Elbow90ShortRadius
                | FittingType::Elbow90LongRadius
                | FittingType::Elbow45
                | FittingType::MiteredElbow
        )
    }

    pub fn is_branch(self) -> bool {
        matches!(self, FittingType::Tee | FittingType::Wye)
    }

    pub fn is_transition(self) -> bool {
        matches!(self, FittingType::Reducer | FittingType::Transition)
    }

    pub fn label(self) -> &'static str {
        match self {
            FittingType::Elbow90ShortRadius => "90° elbow (short radius)",
            FittingType::Elbow90LongRadius => "90° elbow (long radius)",
            FittingType::Elbow45 => "45° elbow",
            FittingType::MiteredElbow => "Mitered elbow",
            FittingType::Reducer => "Reducer",
            FittingType::Transition => "Transition",
            FittingType::Tee => "Tee",
            FittingType::Wye => "Wye",
            FittingType::Cap => "End cap",
        }
    }
}

impl fmt::Display for FittingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the two ends of a reducer/transition line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Concentric,
    FlatBottom,
    FlatTop,
}

/// Recipe for one synthesized fitting.
///
/// Produced by a strategy and consumed right away by the resolver, which
/// either renders it as a ghost preview or hands it to the entity store.
/// Every request is marked auto-inserted; the type has no `Deserialize` impl
/// so the flag cannot be smuggled in from outside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittingRequest {
    pub fitting_type: FittingType,
    pub material: Material,
    /// Nominal (inlet) section the fitting is sized to.
    pub section: CrossSection,
    /// Outlet section for reducers and transitions.
    pub outlet: Option<CrossSection>,
    pub length_in: Option<f64>,
    pub alignment: Option<Alignment>,
    pub angle_deg: Option<f64>,
    pub service_id: Option<ServiceId>,
    pub sequence_index: usize,
    auto_inserted: bool,
}

impl FittingRequest {
    pub fn new(
        fitting_type: FittingType,
        material: Material,
        section: CrossSection,
        sequence_index: usize,
    ) -> Self {
        Self {
            fitting_type,
            material,
            section,
            outlet: None,
            length_in: None,
            alignment: None,
            angle_deg: None,
            service_id: None,
            sequence_index,
            auto_inserted: true,
        }
    }

    pub fn with_outlet(mut self, outlet: CrossSection) -> Self {
        self.outlet = Some(outlet);
        self
    }

    pub fn with_length(mut self, length_in: f64) -> Self {
        self.length_in = Some(length_in);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = Some(angle_deg);
        self
    }

    pub fn with_service(mut self, service_id: Option<ServiceId>) -> Self {
        self.service_id = service_id;
        self
    }

    pub fn auto_inserted(&self) -> bool {
        self.auto_inserted
    }
}
