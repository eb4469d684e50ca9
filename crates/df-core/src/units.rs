// df-core/src/units.rs
//
// Duct work is specified in US customary units (inches, feet, FPM, CFM).
// The engine computes on plain `f64` in those units; these helpers are the
// single place where conversions go through uom so the factors are never
// hand-typed.

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

pub type Area = UomArea;
pub type Length = UomLength;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn inches(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn feet(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn fpm(v: f64) -> Velocity {
    use uom::si::velocity::foot_per_minute;
    Velocity::new::<foot_per_minute>(v)
}

#[inline]
pub fn cfm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_foot_per_minute;
    VolumeRate::new::<cubic_foot_per_minute>(v)
}

#[inline]
pub fn sq_ft(v: f64) -> Area {
    use uom::si::area::square_foot;
    Area::new::<square_foot>(v)
}

/// Inches to feet.
#[inline]
pub fn in_to_ft(v: f64) -> f64 {
    use uom::si::length::foot;
    inches(v).get::<foot>()
}

/// Feet to inches.
#[inline]
pub fn ft_to_in(v: f64) -> f64 {
    use uom::si::length::inch;
    feet(v).get::<inch>()
}

/// Square inches to square feet.
#[inline]
pub fn sq_in_to_sq_ft(v: f64) -> f64 {
    use uom::si::area::{square_foot, square_inch};
    Area::new::<square_inch>(v).get::<square_foot>()
}

/// Airflow divided by a flow area, in FPM.
///
/// CFM over square feet is already FPM, so this stays an exact quotient.
#[inline]
pub fn velocity_fpm(airflow_cfm: f64, area_sq_ft: f64) -> f64 {
    airflow_cfm / area_sq_ft
}
