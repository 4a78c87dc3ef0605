//! Merge rule between curated and external records
//!
//! Curated content is clinically reviewed and wins on every field except
//! brand names, where external data fills gaps.

use crate::medication::{MedicationRecord, Source};

/// Combine an external record with its curated counterpart
///
/// - Both absent: `None`
/// - One present: that record, unchanged
/// - Both present: identity and text fields from `curated`; brand names from
///   `curated` when non-empty, else from `external`; tagged [`Source::Curated`]
///
/// # Examples
///
/// ```
/// use medlookup_domain::merge_records;
///
/// assert_eq!(merge_records(None, None), None);
/// ```
pub fn merge_records(
    external: Option<MedicationRecord>,
    curated: Option<MedicationRecord>,
) -> Option<MedicationRecord> {
    match (external, curated) {
        (None, None) => None,
        (Some(external), None) => Some(external),
        (None, Some(curated)) => Some(curated),
        (Some(external), Some(curated)) => {
            let brand_names = if curated.brand_names.is_empty() {
                external.brand_names
            } else {
                curated.brand_names
            };

            Some(MedicationRecord {
                id: curated.id,
                generic_name: curated.generic_name,
                brand_names,
                primary_use: curated.primary_use,
                how_to_take: curated.how_to_take,
                warnings: curated.warnings,
                side_effects: curated.side_effects,
                source: Some(Source::Curated),
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = MedicationRecord> {
        (
            "[a-z-]{1,12}",
            "[A-Za-z ]{1,16}",
            "[A-Za-z, ]{0,20}",
            "[a-z ]{0,20}",
        )
            .prop_map(|(id, generic, brands, text)| MedicationRecord {
                id,
                generic_name: generic,
                brand_names: brands,
                primary_use: text.clone(),
                how_to_take: text.clone(),
                warnings: text.clone(),
                side_effects: text,
                source: None,
            })
    }

    proptest! {
        /// Property: curated identity always survives a merge
        #[test]
        fn test_curated_identity_wins(external in arb_record(), curated in arb_record()) {
            let merged = merge_records(Some(external), Some(curated.clone())).unwrap();
            prop_assert_eq!(merged.id, curated.id);
            prop_assert_eq!(merged.generic_name, curated.generic_name);
            prop_assert_eq!(merged.source, Some(Source::Curated));
        }

        /// Property: a lone record passes through untouched
        #[test]
        fn test_single_side_identity(record in arb_record()) {
            prop_assert_eq!(merge_records(Some(record.clone()), None), Some(record.clone()));
            prop_assert_eq!(merge_records(None, Some(record.clone())), Some(record));
        }
    }
}
