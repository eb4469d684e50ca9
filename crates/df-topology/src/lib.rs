//! df-topology: junction classification for ductflow.
//!
//! Takes the connection points meeting at one location and decides whether
//! they form a termination, a straight run, a turn, a transition or a
//! junction.
//!
//! # Example
//!
//! ```
//! use df_core::EntityId;
//! use df_model::{CrossSection, Material};
//! use df_topology::{ConnectionPoint, TopologyKind, classify};
//! use nalgebra::{Point2, Vector2};
//!
//! let inlet = ConnectionPoint::new(
//!     EntityId::from_index(0),
//!     Point2::origin(),
//!     Vector2::new(-1.0, 0.0),
//!     CrossSection::round(12.0),
//!     Material::GalvanizedSteel,
//! );
//! let outlet = ConnectionPoint::new(
//!     EntityId::from_index(1),
//!     Point2::origin(),
//!     Vector2::new(0.0, 1.0),
//!     CrossSection::round(12.0),
//!     Material::GalvanizedSteel,
//! );
//! let ctx = classify(vec![inlet, outlet]).unwrap();
//! assert_eq!(ctx.kind(), TopologyKind::Turn);
//! ```

pub mod classify;
pub mod connection;
pub mod error;
pub mod topology;

pub use classify::{ClassifyOptions, classify, classify_with};
pub use connection::{ConnectionPoint, angle_between_deg, deflection_deg};
pub use error::{TopologyError, TopologyResult};
pub use topology::{Topology, TopologyContext, TopologyKind};
