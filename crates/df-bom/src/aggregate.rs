//! Groups validated entities into BOM line items.

use std::collections::BTreeMap;

use df_model::{Entity, EquipmentKind, Material, Severity};
use df_validate::{StatusBook, ValidationState};

use crate::hash::compute_fingerprint;
use crate::types::{
    BomCategory, BomReport, Exclusion, ExclusionReason, LineItem, PriceBook, size_label,
};

type LineKey = (BomCategory, String, Option<Material>, String);

/// Build the BOM from entities the status book clears for export.
///
/// Entities never validated, or whose status carries an error, are left out
/// and listed in `excluded` with the reason. Line items come out sorted by
/// category, item, material and size.
pub fn aggregate<'a>(
    entities: impl IntoIterator<Item = &'a Entity>,
    book: &StatusBook,
    prices: Option<&PriceBook>,
) -> BomReport {
    let mut lines: BTreeMap<LineKey, LineItem> = BTreeMap::new();
    let mut excluded = Vec::new();

    for entity in entities {
        let id = entity.id();
        match book.state(id) {
            ValidationState::Unchecked => {
                excluded.push(Exclusion {
                    entity_id: id,
                    reason: ExclusionReason::Unchecked,
                });
                continue;
            }
            ValidationState::Validated(status) if status.blocks_export() => {
                excluded.push(Exclusion {
                    entity_id: id,
                    reason: ExclusionReason::BlockingViolations {
                        count: status.count(Severity::Error),
                    },
                });
                continue;
            }
            ValidationState::Validated(_) => {}
        }

        let key = line_key(entity);
        let line = lines.entry(key.clone()).or_insert_with(|| LineItem {
            category: key.0,
            item: key.1.clone(),
            material: key.2,
            size: key.3.clone(),
            quantity: 0,
            total_length_ft: None,
            auto_inserted: 0,
            unit_price: None,
            extended_price: None,
        });
        line.quantity += 1;
        match entity {
            Entity::Duct(duct) => {
                *line.total_length_ft.get_or_insert(0.0) += duct.length_ft;
            }
            Entity::Fitting(fitting) if fitting.auto_inserted() => line.auto_inserted += 1,
            Entity::Fitting(_) | Entity::Equipment(_) => {}
        }
    }

    let mut line_items: Vec<LineItem> = lines.into_values().collect();
    if let Some(prices) = prices {
        for line in &mut line_items {
            apply_price(line, prices);
        }
    }

    let total_price =
        prices.map(|_| line_items.iter().filter_map(|l| l.extended_price).sum::<f64>());
    let fingerprint = compute_fingerprint(&line_items);

    tracing::debug!(
        lines = line_items.len(),
        excluded = excluded.len(),
        "BOM aggregated"
    );

    BomReport {
        line_items,
        excluded,
        total_price,
        fingerprint,
    }
}

fn line_key(entity: &Entity) -> LineKey {
    match entity {
        Entity::Duct(d) => (
            BomCategory::Duct,
            "duct".to_string(),
            Some(d.material),
            size_label(&d.section),
        ),
        Entity::Fitting(f) => {
            let size = match &f.outlet {
                Some(outlet) => format!("{} to {}", size_label(&f.section), size_label(outlet)),
                None => size_label(&f.section),
            };
            (
                BomCategory::Fitting,
                f.fitting_type.label().to_string(),
                Some(f.material),
                size,
            )
        }
        Entity::Equipment(e) => (
            BomCategory::Equipment,
            equipment_label(e.kind).to_string(),
            None,
            e.connection
                .as_ref()
                .map(size_label)
                .unwrap_or_else(|| "-".to_string()),
        ),
    }
}

fn equipment_label(kind: EquipmentKind) -> &'static str {
    match kind {
        EquipmentKind::AirHandler => "Air handler",
        EquipmentKind::Fan => "Fan",
        EquipmentKind::Diffuser => "Diffuser",
        EquipmentKind::Grille => "Grille",
        EquipmentKind::Damper => "Damper",
        EquipmentKind::Hood => "Hood",
    }
}

fn apply_price(line: &mut LineItem, prices: &PriceBook) {
    let Some(unit) = prices.lookup(line.category, &line.item, line.material) else {
        return;
    };
    let units = line
        .total_length_ft
        .unwrap_or_else(|| f64::from(line.quantity));
    line.unit_price = Some(unit);
    line.extended_price = Some(unit * units);
}
