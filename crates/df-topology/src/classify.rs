//! Junction classification.
//!
//! Decides from connection count, relative direction and cross sections
//! which kind of fitting layout a junction needs. Classification is a pure
//! function of its input; running it twice yields equal contexts.

use df_model::ShapeSignature;
use serde::{Deserialize, Serialize};

use crate::connection::{ConnectionPoint, deflection_deg};
use crate::error::{TopologyError, TopologyResult};
use crate::topology::{Topology, TopologyContext};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Deflection below which two connections count as colinear, degrees.
    pub colinear_tolerance_deg: f64,
    /// Largest dimension difference still treated as the same size, inches.
    pub dimension_tolerance_in: f64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            colinear_tolerance_deg: 1.0,
            dimension_tolerance_in: 1e-6,
        }
    }
}

pub fn classify(connections: Vec<ConnectionPoint>) -> TopologyResult<TopologyContext> {
    classify_with(connections, &ClassifyOptions::default())
}

pub fn classify_with(
    connections: Vec<ConnectionPoint>,
    options: &ClassifyOptions,
) -> TopologyResult<TopologyContext> {
    check_connections(&connections)?;

    let topology = match connections.as_slice() {
        [] => return Err(TopologyError::Empty),
        [_] => Topology::Termination,
        [a, b] => classify_pair(a, b, options),
        many => {
            let primary_run = largest_area_index(many);
            Topology::Junction {
                primary_run,
                branches: (0..many.len()).filter(|&i| i != primary_run).collect(),
                synthetic: false,
            }
        }
    };

    let ctx = TopologyContext::new(connections, topology);
    ctx.check_invariants()?;
    Ok(ctx)
}

fn classify_pair(a: &ConnectionPoint, b: &ConnectionPoint, options: &ClassifyOptions) -> Topology {
    let deflection = deflection_deg(&a.direction, &b.direction);
    let colinear = deflection <= options.colinear_tolerance_deg;
    let same_section = a.section.matches(&b.section, options.dimension_tolerance_in);
    let same_shape = a.shape() == b.shape();
    let signature = ShapeSignature::new(a.shape(), b.shape());

    match (colinear, same_section, same_shape) {
        (true, true, _) => Topology::Straight,
        (true, false, _) => Topology::Transition {
            signature,
            angle_deg: None,
        },
        (false, true, _) => Topology::Turn {
            angle_deg: deflection,
        },
        (false, false, true) => Topology::Transition {
            signature,
            angle_deg: Some(deflection),
        },
        (false, false, false) => {
            let pair = [a.clone(), b.clone()];
            let primary_run = largest_area_index(&pair);
            Topology::Junction {
                primary_run,
                branches: vec![1 - primary_run],
                synthetic: true,
            }
        }
    }
}

/// Index of the largest cross section; the first wins a tie.
fn largest_area_index(connections: &[ConnectionPoint]) -> usize {
    let mut best = 0;
    for (i, cp) in connections.iter().enumerate().skip(1) {
        if cp.area_sq_in() > connections[best].area_sq_in() {
            best = i;
        }
    }
    best
}

fn check_connections(connections: &[ConnectionPoint]) -> TopologyResult<()> {
    if connections.is_empty() {
        return Err(TopologyError::Empty);
    }
    for (index, cp) in connections.iter().enumerate() {
        if cp.unit_direction().is_none() {
            return Err(TopologyError::DegenerateDirection { index });
        }
        if !(cp.position.x.is_finite() && cp.position.y.is_finite()) {
            return Err(TopologyError::NonFinitePosition { index });
        }
        cp.section
            .check()
            .map_err(|e| TopologyError::InvalidSection {
                index,
                reason: e.to_string(),
            })?;
    }
    Ok(())
}
