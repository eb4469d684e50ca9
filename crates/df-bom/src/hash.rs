//! Content fingerprint for BOM reports.

use sha2::{Digest, Sha256};

use crate::types::LineItem;

pub fn compute_fingerprint(line_items: &[LineItem]) -> String {
    let mut hasher = Sha256::new();
    let json = serde_json::to_string(line_items).unwrap_or_default();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BomCategory;

    fn line(quantity: u32) -> LineItem {
        LineItem {
            category: BomCategory::Fitting,
            item: "Tee".into(),
            material: None,
            size: "12\" round".into(),
            quantity,
            total_length_ft: None,
            auto_inserted: 0,
            unit_price: None,
            extended_price: None,
        }
    }

    #[test]
    fn fingerprint_stability() {
        assert_eq!(
            compute_fingerprint(&[line(2)]),
            compute_fingerprint(&[line(2)])
        );
    }

    #[test]
    fn fingerprint_differs_for_different_content() {
        assert_ne!(
            compute_fingerprint(&[line(2)]),
            compute_fingerprint(&[line(3)])
        );
    }
}
