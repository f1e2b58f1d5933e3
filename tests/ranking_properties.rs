// Property-based tests for relevance ranking invariants.
// CI: 128 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use dbpedia_explorer::{providers::InMemoryResolver, EntityRecord, Explorer, RelevanceEngine};
use std::sync::Arc;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(128),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

const WORDS: &[&str] = &[
    "paris", "lyon", "city", "river", "france", "capital", "europe", "port", "the", "of",
];

const LINKS: &[&str] = &["A", "B", "C", "D", "E", "F"];

fn arb_comment() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(String::new())),
        4 => prop::collection::vec(prop::sample::select(WORDS), 1..8)
            .prop_map(|words| Some(words.join(" "))),
    ]
}

fn arb_links() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(LINKS), 0..6)
        .prop_map(|links| links.into_iter().map(String::from).collect())
}

fn arb_entity() -> impl Strategy<Value = EntityRecord> {
    ("[A-Z][a-z]{1,8}", arb_comment(), arb_links()).prop_map(|(name, comment, links)| {
        let mut entity = EntityRecord::new(name).with_see_also(links);
        entity.data.comment = comment;
        entity
    })
}

fn arb_see_also_link() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(&["Lyon", "Seine", "Atlantis"][..])
            .prop_map(|name| format!("http://dbpedia.org/resource/{}", name)),
        1 => prop::sample::select(&["", "  ", "///", "http://dbpedia.org/resource/%20", "http://dbpedia.org/resource/"][..])
            .prop_map(String::from),
    ]
}

/// Suffix identifiers with their input position so duplicates stay distinguishable
fn tag_positions(main: EntityRecord, candidates: Vec<EntityRecord>) -> (EntityRecord, Vec<EntityRecord>) {
    let main = EntityRecord { identifier: format!("{}#0", main.identifier), ..main };
    let candidates = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| EntityRecord { identifier: format!("{}#{}", c.identifier, i + 1), ..c })
        .collect();
    (main, candidates)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn one_row_per_input(main in arb_entity(), candidates in prop::collection::vec(arb_entity(), 0..12)) {
        let expected = 1 + candidates.len();
        let ranked = RelevanceEngine::new().rank(main, candidates).unwrap();
        prop_assert_eq!(ranked.len(), expected);
    }

    #[test]
    fn main_entity_pinned(main in arb_entity(), candidates in prop::collection::vec(arb_entity(), 0..12)) {
        let (main, candidates) = tag_positions(main, candidates);
        let name = main.identifier.clone();
        let ranked = RelevanceEngine::new().rank(main, candidates).unwrap();

        let pinned: Vec<_> = ranked
            .iter()
            .filter(|r| r.identifier() == name && r.relevance == 1.0 && r.card_size == 100.0 && r.distance == 0.0)
            .collect();
        prop_assert_eq!(pinned.len(), 1);
    }

    #[test]
    fn fan_out_keeps_every_usable_link(links in prop::collection::vec(arb_see_also_link(), 0..10)) {
        let resolver: InMemoryResolver = vec![
            EntityRecord::new("Lyon").with_comment("city of france"),
            EntityRecord::new("Seine").with_comment("river of paris"),
        ]
        .into_iter()
        .collect();
        let explorer = Explorer::new(Arc::new(resolver));

        let usable = links.iter().filter(|l| !l.trim().is_empty()).count();
        let main = EntityRecord::new("Paris").with_comment("capital of france").with_see_also(links);

        let ranked = tokio_test::block_on(explorer.related(main));
        prop_assert!(ranked.is_ok());
        prop_assert_eq!(ranked.unwrap().len(), 1 + usable);
    }

    #[test]
    fn values_stay_in_range(main in arb_entity(), candidates in prop::collection::vec(arb_entity(), 0..12)) {
        for r in RelevanceEngine::new().rank(main, candidates).unwrap() {
            prop_assert!((0.0..=1.0).contains(&r.relevance));
            prop_assert!((50.0..=100.0).contains(&r.card_size));
            prop_assert!((0.0..=100.0).contains(&r.distance));
            prop_assert!((r.card_size + r.distance / 2.0 - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sorted_descending_and_stable(main in arb_entity(), candidates in prop::collection::vec(arb_entity(), 0..12)) {
        let (main, candidates) = tag_positions(main, candidates);

        let ranked = RelevanceEngine::new().rank(main, candidates).unwrap();
        let position = |id: &str| -> usize { id.rsplit('#').next().unwrap().parse().unwrap() };

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].relevance >= pair[1].relevance);
            if pair[0].relevance == pair[1].relevance {
                prop_assert!(position(pair[0].identifier()) < position(pair[1].identifier()));
            }
        }
    }

    #[test]
    fn ranking_is_deterministic(main in arb_entity(), candidates in prop::collection::vec(arb_entity(), 0..8)) {
        let engine = RelevanceEngine::new();
        let first = engine.rank(main.clone(), candidates.clone()).unwrap();
        let second = engine.rank(main, candidates).unwrap();
        prop_assert_eq!(first, second);
    }
}
