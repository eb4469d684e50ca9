use df_core::EntityId;
use df_model::{
    ConstraintProfile, CrossSection, DuctEntity, Entity, EquipmentEntity, EquipmentKind,
    FittingEntity, FittingRequest, FittingRules, FittingType, IndustrialConstraints, Material,
    PressureClass, ServiceDef, ServiceId, Severity, Shape, SizingConstraints, SuggestedFix,
    ViolationKind,
};
use df_validate::{StatusBook, validate, validate_all, validate_all_par};

fn profile() -> ConstraintProfile {
    let mut supply = ServiceDef::new("supply", "Supply air");
    supply.allowed_shapes = vec![Shape::Round, Shape::Rectangular];
    supply.allowed_materials = vec![Material::GalvanizedSteel];
    supply.pressure_class = Some(PressureClass::TwoInch);
    supply.sizing = Some(SizingConstraints::new(600.0, 1000.0));
    supply.fitting_rules =
        Some(FittingRules::default().forbid(FittingType::MiteredElbow, "noise at high velocity"));

    ConstraintProfile {
        name: "plant".to_string(),
        services: vec![supply],
        industrial: Some(IndustrialConstraints::default()),
        ..Default::default()
    }
}

fn duct(id: u32, section: CrossSection, airflow: Option<f64>) -> DuctEntity {
    DuctEntity {
        id: EntityId::from_index(id),
        name: format!("D{id}"),
        section,
        material: Material::GalvanizedSteel,
        length_ft: 10.0,
        airflow_cfm: airflow,
        pressure_class: Some(PressureClass::TwoInch),
        service_id: Some(ServiceId::from("supply")),
    }
}

fn kinds(entity: &Entity) -> Vec<ViolationKind> {
    validate(entity, &profile())
        .violations
        .iter()
        .map(|v| v.kind)
        .collect()
}

#[test]
fn compliant_duct_is_clean() {
    let status = validate(
        &Entity::Duct(duct(0, CrossSection::round(20.0), Some(2000.0))),
        &profile(),
    );
    assert!(status.is_clean(), "{:?}", status.violations);
    assert!(!status.blocks_export());
}

#[test]
fn checks_run_in_fixed_order() {
    // Slow at 100", inside the window at the 96" limit.
    let mut d = duct(1, CrossSection::round(100.0), Some(31_000.0));
    d.material = Material::Aluminum;
    d.pressure_class = Some(PressureClass::HalfInch);
    let entity = Entity::Duct(d);

    assert_eq!(
        kinds(&entity),
        vec![
            ViolationKind::Material,
            ViolationKind::Dimension,
            ViolationKind::Velocity,
            ViolationKind::PressureClass,
        ]
    );

    let status = validate(&entity, &profile());
    let dimension = &status.violations[1];
    assert_eq!(
        dimension.suggested_fix,
        Some(SuggestedFix::patch("diameter", 96.0))
    );
    let pressure = &status.violations[3];
    assert_eq!(
        pressure.suggested_fix,
        Some(SuggestedFix::patch("pressure_class", 2.0))
    );
}

#[test]
fn fast_round_duct_gets_next_standard_diameter() {
    let status = validate(
        &Entity::Duct(duct(2, CrossSection::round(12.0), Some(1200.0))),
        &profile(),
    );
    assert_eq!(status.violations.len(), 1);
    let v = &status.violations[0];
    assert_eq!(v.kind, ViolationKind::Velocity);
    assert_eq!(v.severity, Severity::Error);
    assert_eq!(v.suggested_fix, Some(SuggestedFix::patch("diameter", 16.0)));
}

#[test]
fn size_patch_is_dropped_when_it_would_overspeed() {
    // 96" carries 60000 CFM at ~1194 FPM, past the 1000 FPM maximum.
    let status = validate(
        &Entity::Duct(duct(12, CrossSection::round(100.0), Some(60_000.0))),
        &profile(),
    );
    let dimension = status
        .violations
        .iter()
        .find(|v| v.kind == ViolationKind::Dimension)
        .unwrap();
    assert!(matches!(
        dimension.suggested_fix,
        Some(SuggestedFix::Text { .. })
    ));
}

#[test]
fn narrow_window_velocity_fix_falls_back_to_text() {
    let mut profile = profile();
    profile.services[0].sizing = Some(SizingConstraints::new(950.0, 1000.0));
    let status = validate(
        &Entity::Duct(duct(13, CrossSection::round(12.0), Some(1000.0))),
        &profile,
    );
    assert_eq!(status.violations.len(), 1);
    let v = &status.violations[0];
    assert_eq!(v.kind, ViolationKind::Velocity);
    assert_eq!(v.severity, Severity::Error);
    // The next stocked size, 14", would fall below 950 FPM.
    assert!(matches!(v.suggested_fix, Some(SuggestedFix::Text { .. })));
}

#[test]
fn slow_duct_warns_without_blocking() {
    let status = validate(
        &Entity::Duct(duct(3, CrossSection::round(24.0), Some(1000.0))),
        &profile(),
    );
    assert_eq!(status.violations.len(), 1);
    assert_eq!(status.violations[0].severity, Severity::Warning);
    assert!(!status.blocks_export());
}

#[test]
fn flat_rect_duct_flags_side_and_ratio() {
    let entity = Entity::Duct(duct(4, CrossSection::rect(24.0, 3.0), None));
    assert_eq!(
        kinds(&entity),
        vec![
            ViolationKind::Dimension,
            ViolationKind::AspectRatio,
            ViolationKind::MissingData,
        ]
    );
    let status = validate(&entity, &profile());
    assert_eq!(
        status.violations[0].suggested_fix,
        Some(SuggestedFix::patch("height", 4.0))
    );
    assert!(matches!(
        status.violations[1].suggested_fix,
        Some(SuggestedFix::Text { .. })
    ));
    assert_eq!(status.violations[2].severity, Severity::Info);
}

#[test]
fn unknown_service_warns_first() {
    let mut d = duct(5, CrossSection::round(20.0), Some(2000.0));
    d.service_id = Some(ServiceId::from("return"));
    let status = validate(&Entity::Duct(d), &profile());
    assert_eq!(status.violations[0].kind, ViolationKind::UnknownService);
    assert_eq!(status.violations[0].severity, Severity::Warning);
}

#[test]
fn auto_inserted_fittings_are_rechecked() {
    let request = FittingRequest::new(
        FittingType::MiteredElbow,
        Material::GalvanizedSteel,
        CrossSection::round(12.0),
        0,
    )
    .with_angle(135.0)
    .with_service(Some(ServiceId::from("supply")));
    let fitting = FittingEntity::from_request(EntityId::from_index(6), &request);
    let status = validate(&Entity::Fitting(fitting), &profile());
    let kinds: Vec<_> = status.violations.iter().map(|v| v.kind).collect();
    // Missing pressure class, then the service rule, then geometry.
    assert_eq!(
        kinds,
        vec![
            ViolationKind::PressureClass,
            ViolationKind::FittingRule,
            ViolationKind::Geometry,
        ]
    );
    assert!(status.violations[1].message.contains("noise"));
}

#[test]
fn manual_fittings_skip_geometry_recheck() {
    let mut fitting = FittingEntity::manual(
        EntityId::from_index(7),
        FittingType::Elbow45,
        CrossSection::round(10.0),
        Material::GalvanizedSteel,
    );
    fitting.pressure_class = Some(PressureClass::FourInch);
    fitting.service_id = Some(ServiceId::from("supply"));
    let status = validate(&Entity::Fitting(fitting), &profile());
    assert!(status.is_clean(), "{:?}", status.violations);
}

#[test]
fn equipment_is_checked_by_its_connection() {
    let hood = EquipmentEntity {
        id: EntityId::from_index(8),
        name: "Hood 1".to_string(),
        kind: EquipmentKind::Hood,
        connection: Some(CrossSection::round(12.0)),
        airflow_cfm: Some(1200.0),
        service_id: Some(ServiceId::from("supply")),
    };
    let status = validate(&Entity::Equipment(hood), &profile());
    assert_eq!(status.violations.len(), 1);
    assert_eq!(status.violations[0].kind, ViolationKind::Velocity);
}

#[test]
fn errors_block_only_their_entity() {
    let good = Entity::Duct(duct(10, CrossSection::round(20.0), Some(2000.0)));
    let mut bad_duct = duct(11, CrossSection::round(20.0), Some(2000.0));
    bad_duct.material = Material::Pvc;
    let bad = Entity::Duct(bad_duct);

    let entities = vec![good.clone(), bad.clone()];
    let statuses = validate_all(&entities, &profile());
    let mut book = StatusBook::new();
    book.record_all(statuses.into_values());

    assert!(book.is_exportable(good.id()));
    assert!(!book.is_exportable(bad.id()));
}

#[test]
fn parallel_pass_matches_sequential() {
    let entities: Vec<Entity> = (0..64)
        .map(|i| {
            let airflow = 400.0 + 50.0 * f64::from(i);
            Entity::Duct(duct(i, CrossSection::round(14.0), Some(airflow)))
        })
        .collect();
    let profile = profile();
    assert_eq!(
        validate_all(&entities, &profile),
        validate_all_par(&entities, &profile)
    );
}

#[test]
fn status_serializes_with_patch() {
    let status = validate(
        &Entity::Duct(duct(2, CrossSection::round(12.0), Some(1200.0))),
        &profile(),
    );
    let json = serde_json::to_value(&status).unwrap();
    let fix = &json["violations"][0]["suggested_fix"];
    assert_eq!(fix["type"], "patch");
    assert_eq!(fix["property"], "diameter");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn blocks_iff_velocity_above_window(airflow in 100.0..2000.0_f64) {
            let entity = Entity::Duct(duct(1, CrossSection::round(12.0), Some(airflow)));
            let v = airflow / CrossSection::round(12.0).area_sq_ft();
            prop_assume!((v - 1000.0).abs() > 1e-3 && (v - 600.0).abs() > 1e-3);

            let status = validate(&entity, &profile());
            prop_assert_eq!(status.blocks_export(), v > 1000.0);
            prop_assert_eq!(status.count(Severity::Warning) > 0, v < 600.0);
        }
    }
}
