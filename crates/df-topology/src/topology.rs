//! Classified junction topology and the context strategies consume.

use df_model::{DesignConstraints, ShapeSignature};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::connection::ConnectionPoint;
use crate::error::{TopologyError, TopologyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    Termination,
    Straight,
    Turn,
    Transition,
    Junction,
}

impl TopologyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TopologyKind::Termination => "termination",
            TopologyKind::Straight => "straight",
            TopologyKind::Turn => "turn",
            TopologyKind::Transition => "transition",
            TopologyKind::Junction => "junction",
        }
    }
}

impl std::fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a junction, with the data each case needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Topology {
    Termination,
    Straight,
    /// Same section on both sides, direction changes by `angle_deg`.
    Turn { angle_deg: f64 },
    /// Section changes; `angle_deg` is set when the direction changes too.
    Transition {
        signature: ShapeSignature,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle_deg: Option<f64>,
    },
    /// `synthetic` marks a two-connection layout that is both turned and
    /// reshaped, handled as a one-branch junction.
    Junction {
        primary_run: usize,
        branches: Vec<usize>,
        #[serde(default)]
        synthetic: bool,
    },
}

impl Topology {
    pub fn kind(&self) -> TopologyKind {
        match self {
            Topology::Termination => TopologyKind::Termination,
            Topology::Straight => TopologyKind::Straight,
            Topology::Turn { .. } => TopologyKind::Turn,
            Topology::Transition { .. } => TopologyKind::Transition,
            Topology::Junction { .. } => TopologyKind::Junction,
        }
    }
}

/// One junction evaluation: the connections, what they form, and the
/// constraints that apply. Built by `classify`; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyContext {
    connections: Vec<ConnectionPoint>,
    topology: Topology,
    #[serde(default)]
    constraints: DesignConstraints,
}

impl TopologyContext {
    pub(crate) fn new(connections: Vec<ConnectionPoint>, topology: Topology) -> Self {
        Self {
            connections,
            topology,
            constraints: DesignConstraints::unconstrained(),
        }
    }

    pub fn with_constraints(mut self, constraints: DesignConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the primary run of a junction. Branches are re-derived from
    /// the remaining connections in input order.
    pub fn with_primary_run(mut self, index: usize) -> TopologyResult<Self> {
        let len = self.connections.len();
        match &mut self.topology {
            Topology::Junction {
                primary_run,
                branches,
                ..
            } => {
                if index >= len {
                    return Err(TopologyError::PrimaryRunOutOfRange { index, len });
                }
                *primary_run = index;
                *branches = (0..len).filter(|&i| i != index).collect();
            }
            other => {
                return Err(TopologyError::NotAJunction {
                    kind: other.kind().as_str(),
                });
            }
        }
        self.check_invariants()?;
        Ok(self)
    }

    pub fn connections(&self) -> &[ConnectionPoint] {
        &self.connections
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn kind(&self) -> TopologyKind {
        self.topology.kind()
    }

    pub fn constraints(&self) -> &DesignConstraints {
        &self.constraints
    }

    pub fn angle_deg(&self) -> Option<f64> {
        match self.topology {
            Topology::Turn { angle_deg } => Some(angle_deg),
            Topology::Transition { angle_deg, .. } => angle_deg,
            _ => None,
        }
    }

    pub fn shape_signature(&self) -> Option<ShapeSignature> {
        match self.topology {
            Topology::Transition { signature, .. } => Some(signature),
            _ => None,
        }
    }

    pub fn primary_run_index(&self) -> Option<usize> {
        match self.topology {
            Topology::Junction { primary_run, .. } => Some(primary_run),
            _ => None,
        }
    }

    pub fn branch_indices(&self) -> &[usize] {
        match &self.topology {
            Topology::Junction { branches, .. } => branches,
            _ => &[],
        }
    }

    /// The run air arrives from: the primary run of a junction, otherwise
    /// the first connection.
    pub fn upstream(&self) -> Option<&ConnectionPoint> {
        self.connections
            .get(self.primary_run_index().unwrap_or(0))
    }

    /// Branch indices are in range, unique, and never the primary run.
    pub fn check_invariants(&self) -> TopologyResult<()> {
        let len = self.connections.len();
        if len == 0 {
            return Err(TopologyError::Empty);
        }
        let Topology::Junction {
            primary_run,
            branches,
            ..
        } = &self.topology
        else {
            return Ok(());
        };
        if *primary_run >= len {
            return Err(TopologyError::PrimaryRunOutOfRange {
                index: *primary_run,
                len,
            });
        }
        let mut seen = vec![false; len];
        for &branch in branches {
            if branch >= len {
                return Err(TopologyError::InvalidBranch {
                    index: branch,
                    reason: "out of range",
                });
            }
            if branch == *primary_run {
                return Err(TopologyError::InvalidBranch {
                    index: branch,
                    reason: "is the primary run",
                });
            }
            if seen[branch] {
                return Err(TopologyError::InvalidBranch {
                    index: branch,
                    reason: "listed twice",
                });
            }
            seen[branch] = true;
        }
        Ok(())
    }

    /// SHA-256 of the serialized context, hex encoded. Equal contexts give
    /// equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        let json = serde_json::to_string(self).unwrap_or_default();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
