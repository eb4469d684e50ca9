use df_core::EntityId;
use df_fittings::{
    FittingStrategy, JunctionStrategy, Strategy, TerminationStrategy, TransitionStrategy,
    TurnStrategy, calculate,
};
use df_model::{
    Alignment, CrossSection, DesignConstraints, FittingType, Material, ServiceId,
};
use df_topology::{ConnectionPoint, TopologyKind, classify};
use nalgebra::{Point2, Vector2};

fn cp(owner: u32, dir: (f64, f64), section: CrossSection) -> ConnectionPoint {
    ConnectionPoint::new(
        EntityId::from_index(owner),
        Point2::origin(),
        Vector2::new(dir.0, dir.1),
        section,
        Material::GalvanizedSteel,
    )
    .with_service(ServiceId::from("supply"))
}

#[test]
fn ninety_degree_turn_gets_one_elbow() {
    let ctx = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(12.0)),
        cp(1, (0.0, 1.0), CrossSection::round(12.0)),
    ])
    .unwrap();
    let requests = TurnStrategy.calculate(&ctx);
    assert_eq!(requests.len(), 1);
    let elbow = &requests[0];
    assert_eq!(elbow.fitting_type, FittingType::Elbow90LongRadius);
    assert_eq!(elbow.sequence_index, 0);
    assert_eq!(elbow.material, Material::GalvanizedSteel);
    assert_eq!(elbow.service_id, Some(ServiceId::from("supply")));
    assert!(elbow.auto_inserted());
}

#[test]
fn odd_angle_turn_is_mitered() {
    let r = 120.0_f64.to_radians();
    let ctx = classify(vec![
        cp(0, (1.0, 0.0), CrossSection::rect(16.0, 10.0)),
        cp(1, (r.cos(), r.sin()), CrossSection::rect(16.0, 10.0)),
    ])
    .unwrap();
    let requests = TurnStrategy.calculate(&ctx);
    assert_eq!(requests[0].fitting_type, FittingType::MiteredElbow);
    assert!((requests[0].angle_deg.unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn round_to_rect_transition_has_positive_length() {
    let ctx = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(12.0)),
        cp(1, (1.0, 0.0), CrossSection::rect(16.0, 8.0)),
    ])
    .unwrap();
    assert_eq!(ctx.shape_signature().unwrap().to_string(), "round->rect");
    let requests = TransitionStrategy.calculate(&ctx);
    assert_eq!(requests.len(), 1);
    let t = &requests[0];
    assert_eq!(t.fitting_type, FittingType::Transition);
    assert_eq!(t.outlet, Some(CrossSection::rect(16.0, 8.0)));
    // 12 -> 8 in height drops 4 in on one wall.
    assert_eq!(t.alignment, Some(Alignment::FlatBottom));
    assert_eq!(t.length_in, Some(16.0));
}

#[test]
fn turned_reducer_is_transition_then_elbow() {
    let ctx = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(14.0)),
        cp(1, (0.0, -1.0), CrossSection::round(10.0)),
    ])
    .unwrap();
    let requests = TransitionStrategy.calculate(&ctx);
    let kinds: Vec<_> = requests.iter().map(|r| r.fitting_type).collect();
    assert_eq!(kinds, vec![FittingType::Reducer, FittingType::Elbow90LongRadius]);
    assert_eq!(requests[0].sequence_index, 0);
    assert_eq!(requests[1].sequence_index, 1);
    assert_eq!(requests[1].section, CrossSection::round(10.0));
    assert_eq!(requests[0].length_in, Some(8.0));
}

#[test]
fn three_way_junction_gets_two_branch_fittings() {
    let wye = 45.0_f64.to_radians();
    let ctx = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(16.0)),
        cp(1, (0.0, 1.0), CrossSection::round(10.0)),
        cp(2, (wye.cos(), wye.sin()), CrossSection::round(8.0)),
    ])
    .unwrap();
    assert_eq!(ctx.primary_run_index(), Some(0));
    let requests = JunctionStrategy.calculate(&ctx);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].sequence_index, 0);
    assert_eq!(requests[1].sequence_index, 1);
    assert_eq!(requests[0].fitting_type, FittingType::Tee);
    assert_eq!(requests[0].outlet, Some(CrossSection::round(10.0)));
    assert_eq!(requests[1].fitting_type, FittingType::Wye);
    assert_eq!(requests[1].outlet, Some(CrossSection::round(8.0)));
}

#[test]
fn synthetic_junction_reshapes_then_turns() {
    let ctx = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(10.0)),
        cp(1, (0.0, 1.0), CrossSection::rect(24.0, 12.0)),
    ])
    .unwrap();
    let requests = JunctionStrategy.calculate(&ctx);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].fitting_type, FittingType::Transition);
    assert_eq!(requests[0].section, CrossSection::rect(24.0, 12.0));
    assert_eq!(requests[0].outlet, Some(CrossSection::round(10.0)));
    assert!(requests[1].fitting_type.is_elbow());
}

#[test]
fn cap_sized_to_lone_connection() {
    let ctx = classify(vec![cp(0, (1.0, 0.0), CrossSection::rect(12.0, 6.0))]).unwrap();
    let requests = TerminationStrategy.calculate(&ctx);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].fitting_type, FittingType::Cap);
    assert_eq!(requests[0].section, CrossSection::rect(12.0, 6.0));
}

#[test]
fn mismatched_strategy_returns_nothing() {
    let ctx = classify(vec![cp(0, (1.0, 0.0), CrossSection::round(6.0))]).unwrap();
    assert!(TurnStrategy.calculate(&ctx).is_empty());
    assert!(TransitionStrategy.calculate(&ctx).is_empty());
    assert!(JunctionStrategy.calculate(&ctx).is_empty());
}

#[test]
fn selection_is_total_over_kinds() {
    for kind in [
        TopologyKind::Termination,
        TopologyKind::Turn,
        TopologyKind::Transition,
        TopologyKind::Junction,
    ] {
        let strategy = Strategy::select(kind).unwrap();
        assert_eq!(strategy.handles(), kind);
    }
    assert!(Strategy::select(TopologyKind::Straight).is_none());

    let straight = classify(vec![
        cp(0, (-1.0, 0.0), CrossSection::round(12.0)),
        cp(1, (1.0, 0.0), CrossSection::round(12.0)),
    ])
    .unwrap()
    .with_constraints(DesignConstraints::unconstrained());
    assert!(calculate(&straight).is_none());
}
