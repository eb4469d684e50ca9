//! Friction loss and equivalent-diameter correlations.

use df_core::in_to_ft;
use df_model::{AirCoefficients, CrossSection};

/// ASHRAE rectangular-to-round equivalent diameter, inches in, inches out.
pub fn equivalent_diameter_in(width_in: f64, height_in: f64) -> f64 {
    1.3 * (width_in * height_in).powf(0.625) / (width_in + height_in).powf(0.25)
}

/// Diameter used for friction: the diameter itself for round ducts, the
/// ASHRAE equivalent for rectangular ones.
pub fn hydraulic_diameter_in(section: &CrossSection) -> f64 {
    match *section {
        CrossSection::Round { diameter_in } => diameter_in,
        CrossSection::Rectangular {
            width_in,
            height_in,
        } => equivalent_diameter_in(width_in, height_in),
    }
}

/// Velocity pressure in in. w.g., corrected for air density.
pub fn velocity_pressure(velocity_fpm: f64, coefficients: &AirCoefficients) -> f64 {
    coefficients.density_ratio()
        * (velocity_fpm / coefficients.velocity_pressure_constant).powi(2)
}

/// Friction loss per 100 ft of duct:
///
/// `f * rho * (V / 4005)^2 / (D_ft * 100)`
///
/// `f`, `rho` and the velocity-pressure constant come from `coefficients`.
pub fn pressure_drop_per_100ft(
    velocity_fpm: f64,
    diameter_in: f64,
    coefficients: &AirCoefficients,
) -> f64 {
    let diameter_ft = in_to_ft(diameter_in);
    coefficients.friction_factor
        * coefficients.air_density
        * (velocity_fpm / coefficients.velocity_pressure_constant).powi(2)
        / (diameter_ft * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_diameter_of_square_is_slightly_larger_than_side() {
        // 12x12 -> ~13.1 in per the ASHRAE table
        let de = equivalent_diameter_in(12.0, 12.0);
        assert!((de - 13.1).abs() < 0.05, "de = {de}");
    }

    #[test]
    fn equivalent_diameter_matches_table_for_24x12() {
        let de = equivalent_diameter_in(24.0, 12.0);
        assert!((de - 18.3).abs() < 0.1, "de = {de}");
    }

    #[test]
    fn pressure_drop_grows_with_velocity_and_shrinks_with_size() {
        let c = AirCoefficients::default();
        let base = pressure_drop_per_100ft(1000.0, 12.0, &c);
        assert!(pressure_drop_per_100ft(1500.0, 12.0, &c) > base);
        assert!(pressure_drop_per_100ft(1000.0, 18.0, &c) < base);
    }

    #[test]
    fn pressure_drop_formula_literal() {
        let c = AirCoefficients::default();
        let expected = 0.02 * 0.075 * (1000.0_f64 / 4005.0).powi(2) / (1.0 * 100.0);
        let got = pressure_drop_per_100ft(1000.0, 12.0, &c);
        assert!((got - expected).abs() < 1e-15);
    }

    #[test]
    fn thin_air_has_lower_velocity_pressure() {
        let sea = AirCoefficients::default();
        let high = AirCoefficients::at_site(5000.0, 70.0);
        assert!(velocity_pressure(1000.0, &high) < velocity_pressure(1000.0, &sea));
        assert!((velocity_pressure(4005.0, &sea) - 1.0).abs() < 1e-12);
    }
}
