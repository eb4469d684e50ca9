//! df-sizing: duct engineering math.
//!
//! Auto-sizing from airflow and a velocity window, friction loss, equivalent
//! diameters, velocity checks and alternative-size suggestions. Everything is
//! in US customary units: inches, feet, FPM, CFM, in. w.g.

pub mod error;
pub mod friction;
pub mod sizing;
pub mod standard;
pub mod suggest;

pub use error::{SizingError, SizingResult};
pub use friction::{
    equivalent_diameter_in, hydraulic_diameter_in, pressure_drop_per_100ft, velocity_pressure,
};
pub use sizing::{
    DEFAULT_ASPECT_RATIO, DuctSizingResult, calculate_duct_size, round_diameter_fits,
    round_diameter_for, size_at_velocity, validate_sizing, velocity_violations,
    within_velocity_window,
};
pub use standard::{ROUND_DIAMETERS_IN, next_even_inch, next_round_size, previous_round_size};
pub use suggest::{
    Recommendation, SUGGESTION_POINTS, SizingOption, linear_points, suggest_duct_sizes,
};
