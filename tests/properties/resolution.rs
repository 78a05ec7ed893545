//! Property tests for service resolution.

use proptest::prelude::*;

use nbport::domain::services::{resolve, resolve_token, ServiceCatalog};
use nbport::ServiceId;

fn synonym_index() -> impl Strategy<Value = usize> {
    0..ServiceCatalog::builtin().synonyms().len()
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("_"), Just("-"), Just("/"), Just(" & ")]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every synonym resolves to its service regardless of case and separators.
    #[test]
    fn property_synonym_surface_forms_resolve(
        idx in synonym_index(),
        sep in separator(),
        upper in any::<bool>(),
    ) {
        let catalog = ServiceCatalog::builtin();
        let (syn, id) = catalog.synonyms()[idx];
        let mut token = syn.replace(' ', sep);
        if upper {
            token = token.to_uppercase();
        }
        prop_assert_eq!(resolve_token(&token, &catalog).unwrap(), id);
    }

    /// PROPERTY: Resolved sets have no duplicates and include every dependency.
    #[test]
    fn property_resolved_sets_are_closed_and_unique(
        picks in proptest::collection::vec(0..ServiceId::ALL.len(), 0..6),
    ) {
        let catalog = ServiceCatalog::builtin();
        let field: Vec<&str> = picks.iter().map(|i| ServiceId::ALL[*i].as_str()).collect();
        let set = resolve(&field.join(", "), &catalog).unwrap();

        let mut seen = set.as_slice().to_vec();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), set.len());

        for id in set.iter() {
            for dep in catalog.spec(id).requires {
                prop_assert!(set.contains(*dep));
            }
        }
    }

    /// PROPERTY: Joining services with `&`, `/` or "and" resolves like a comma list.
    #[test]
    fn property_conjunctions_match_comma_lists(
        picks in proptest::collection::vec(0..ServiceId::ALL.len(), 1..5),
        joiner in prop_oneof![Just(" & "), Just(" / "), Just(" and ")],
    ) {
        let catalog = ServiceCatalog::builtin();
        let names: Vec<&str> = picks.iter().map(|i| ServiceId::ALL[*i].as_str()).collect();
        let listed = resolve(&names.join(", "), &catalog).unwrap();
        let joined = resolve(&names.join(joiner), &catalog).unwrap();
        prop_assert_eq!(joined.as_slice(), listed.as_slice());
    }
}
