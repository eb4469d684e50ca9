use df_bom::{BomCategory, ExclusionReason, PriceBook, PriceEntry, aggregate};
use df_core::EntityId;
use df_model::{
    ConstraintProfile, CrossSection, DuctEntity, Entity, FittingEntity, FittingRequest,
    FittingType, Material, ServiceDef,
};
use df_validate::{StatusBook, validate_all};

fn duct(id: u32, section: CrossSection, length_ft: f64, material: Material) -> Entity {
    Entity::Duct(DuctEntity {
        id: EntityId::from_index(id),
        name: String::new(),
        section,
        material,
        length_ft,
        airflow_cfm: None,
        pressure_class: None,
        service_id: Some("supply".into()),
    })
}

fn profile() -> ConstraintProfile {
    let mut supply = ServiceDef::new("supply", "Supply");
    supply.allowed_materials = vec![Material::GalvanizedSteel];
    ConstraintProfile {
        services: vec![supply],
        ..Default::default()
    }
}

fn design() -> Vec<Entity> {
    let elbow = FittingRequest::new(
        FittingType::Elbow90LongRadius,
        Material::GalvanizedSteel,
        CrossSection::round(12.0),
        0,
    )
    .with_angle(90.0)
    .with_service(Some("supply".into()));
    vec![
        duct(0, CrossSection::round(12.0), 10.0, Material::GalvanizedSteel),
        duct(1, CrossSection::round(12.0), 6.5, Material::GalvanizedSteel),
        duct(2, CrossSection::rect(16.0, 8.0), 4.0, Material::GalvanizedSteel),
        // Wrong material for the service: blocked.
        duct(3, CrossSection::round(12.0), 20.0, Material::Aluminum),
        Entity::Fitting(FittingEntity::from_request(EntityId::from_index(4), &elbow)),
        Entity::Fitting(FittingEntity::manual(
            EntityId::from_index(5),
            FittingType::Elbow90LongRadius,
            CrossSection::round(12.0),
            Material::GalvanizedSteel,
        )),
    ]
}

fn validated(entities: &[Entity], skip: Option<u32>) -> StatusBook {
    let mut book = StatusBook::new();
    for (id, status) in validate_all(entities, &profile()) {
        if Some(id.index()) != skip {
            book.record(status);
        }
    }
    book
}

#[test]
fn groups_identical_parts() {
    let entities = design();
    let report = aggregate(&entities, &validated(&entities, None), None);

    assert_eq!(report.line_items.len(), 3);
    let round = &report.line_items[0];
    assert_eq!(round.category, BomCategory::Duct);
    assert_eq!(round.size, "12\" round");
    assert_eq!(round.quantity, 2);
    assert_eq!(round.total_length_ft, Some(16.5));

    let elbows = &report.line_items[2];
    assert_eq!(elbows.category, BomCategory::Fitting);
    assert_eq!(elbows.quantity, 2);
    assert_eq!(elbows.auto_inserted, 1);

    assert_eq!(report.total_duct_length_ft(), 20.5);
    assert_eq!(report.auto_inserted_count(), 1);
    assert_eq!(report.total_price, None);
}

#[test]
fn blocked_and_unchecked_entities_are_excluded() {
    let entities = design();
    let report = aggregate(&entities, &validated(&entities, Some(2)), None);

    assert_eq!(report.excluded.len(), 2);
    assert_eq!(report.excluded[0].entity_id, EntityId::from_index(2));
    assert_eq!(report.excluded[0].reason, ExclusionReason::Unchecked);
    assert_eq!(report.excluded[1].entity_id, EntityId::from_index(3));
    assert_eq!(
        report.excluded[1].reason,
        ExclusionReason::BlockingViolations { count: 1 }
    );
}

#[test]
fn prices_extend_by_length_or_count() {
    let prices = PriceBook {
        entries: vec![
            PriceEntry {
                category: BomCategory::Duct,
                item: "duct".into(),
                material: Some(Material::GalvanizedSteel),
                unit_price: 4.0,
            },
            PriceEntry {
                category: BomCategory::Fitting,
                item: FittingType::Elbow90LongRadius.label().into(),
                material: None,
                unit_price: 25.0,
            },
        ],
    };
    let entities = design();
    let report = aggregate(&entities, &validated(&entities, None), Some(&prices));

    assert_eq!(report.line_items[0].extended_price, Some(66.0));
    assert_eq!(report.line_items[1].extended_price, Some(16.0));
    assert_eq!(report.line_items[2].extended_price, Some(50.0));
    assert_eq!(report.total_price, Some(132.0));
}

#[test]
fn fingerprint_follows_content() {
    let entities = design();
    let book = validated(&entities, None);
    let a = aggregate(&entities, &book, None);
    let b = aggregate(&entities, &book, None);
    assert_eq!(a.fingerprint, b.fingerprint);

    let fewer = &entities[..2];
    let c = aggregate(fewer, &book, None);
    assert_ne!(a.fingerprint, c.fingerprint);
}

#[test]
fn report_roundtrips_through_json() {
    let entities = design();
    let report = aggregate(&entities, &validated(&entities, None), None);
    let dir = std::env::temp_dir().join(format!("df-bom-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bom.json");
    df_bom::export_json(&path, &report).unwrap();
    let loaded = df_bom::load_json(&path).unwrap();
    assert_eq!(loaded, report);
    std::fs::remove_dir_all(&dir).unwrap();
}
