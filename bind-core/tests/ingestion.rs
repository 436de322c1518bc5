//! End-to-end ingestion tests.
//!
//! These exercise the store, identity and resolver together, the way the
//! generator drives them: one batch per run, read back in key order.

use bind_core::{
    load_declarations, ConflictResolver, FunctionDeclaration, GroupedStore, OverloadIdentity,
    ParameterType, ResolverConfig, SignatureIdentity,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn decl(name: &str, extension: &str, params: &[(&str, ParameterType)]) -> FunctionDeclaration {
    params
        .iter()
        .fold(FunctionDeclaration::new(name, extension), |d, (n, ty)| d.with_parameter(*n, *ty))
}

fn resolve(batch: Vec<FunctionDeclaration>) -> GroupedStore {
    let mut store = GroupedStore::new();
    store.ingest_all(batch);
    store
}

fn retained(store: &GroupedStore, extension: &str) -> Vec<FunctionDeclaration> {
    store.group(extension).map(<[_]>::to_vec).unwrap_or_default()
}

// ============================================================
// Resolution Scenarios
// ============================================================

#[test]
fn test_unsigned_name_wins_for_unsigned_parameters() {
    let existing = decl("glTexImage", "Core", &[("x", ParameterType::unsigned())]);
    let candidate = decl("glTexImageuiv", "Core", &[("x", ParameterType::unsigned())]);

    let store = resolve(vec![existing, candidate.clone()]);
    assert_eq!(retained(&store, "Core"), vec![candidate]);
}

#[test]
fn test_signed_name_wins_for_signed_parameters() {
    let existing = decl("glTexImageuiv", "Core", &[("x", ParameterType::scalar())]);
    let candidate = decl("glTexImage", "Core", &[("x", ParameterType::scalar())]);

    let store = resolve(vec![existing, candidate.clone()]);
    assert_eq!(retained(&store, "Core"), vec![candidate]);
}

#[test]
fn test_identical_declarations_keep_first() {
    let first = decl("glColor4fv", "Core", &[("v", ParameterType::array(4))]);
    let store = resolve(vec![first.clone(), first.clone()]);
    assert_eq!(retained(&store, "Core"), vec![first]);
}

#[test]
fn test_scalar_candidate_replaces_array_entry() {
    let existing = decl("glColor4fv", "Core", &[("v", ParameterType::array(4))]);
    let candidate = decl("glColor4fv", "Core", &[("v", ParameterType::scalar())]);

    let store = resolve(vec![existing, candidate.clone()]);
    assert_eq!(retained(&store, "Core"), vec![candidate]);
}

#[test]
fn test_order_decides_when_no_rule_votes() {
    let a = decl("glTexImageiv", "Core", &[("x", ParameterType::scalar())]);
    let b = decl("glTexImage", "Core", &[("x", ParameterType::scalar())]);

    let ab = resolve(vec![a.clone(), b.clone()]);
    assert_eq!(retained(&ab, "Core"), vec![a.clone()]);

    let ba = resolve(vec![b.clone(), a]);
    assert_eq!(retained(&ba, "Core"), vec![b]);
}

#[test]
fn test_element_type_variants_are_all_retained() {
    let batch = vec![
        decl("glUniform1i", "Core", &[("location", ParameterType::scalar()), ("v0", ParameterType::scalar())]),
        decl("glUniform1f", "Core", &[("location", ParameterType::scalar()), ("v0", ParameterType::scalar())]),
        decl("glVertex3d", "Core", &[("x", ParameterType::scalar())]),
        decl("glVertex3f", "Core", &[("x", ParameterType::scalar())]),
    ];

    let mut store = GroupedStore::new();
    let report = store.ingest_all(batch.clone());
    assert_eq!(report.inserted, 4);
    assert_eq!(retained(&store, "Core"), batch);
}

#[test]
fn test_same_function_in_two_extensions() {
    let arb = decl("glTexImage", "ARB", &[("x", ParameterType::unsigned())]);
    let ext = decl("glTexImage", "EXT", &[("x", ParameterType::unsigned())]);

    let store = resolve(vec![arb.clone(), ext.clone()]);
    assert_eq!(retained(&store, "ARB"), vec![arb]);
    assert_eq!(retained(&store, "EXT"), vec![ext]);
}

#[test]
fn test_groups_sorted_regardless_of_input_order() {
    let store = resolve(vec![
        decl("glFinish", "NV", &[]),
        decl("glFinish", "Core", &[]),
        decl("glFinish", "AMD", &[]),
        decl("glFinish", "ARB", &[]),
    ]);

    let keys: Vec<&str> = store.groups().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["AMD", "ARB", "Core", "NV"]);
}

#[test]
fn test_configured_resolver_skips_disabled_rule() {
    let config = ResolverConfig::from_toml_str("[rules]\nscalar_regression = false\n").unwrap();
    let mut store = GroupedStore::new().with_resolver(ConflictResolver::from_config(&config));

    let existing = decl("glColor4fv", "Core", &[("v", ParameterType::array(4))]);
    store.ingest_all(vec![
        existing.clone(),
        decl("glColor4fv", "Core", &[("v", ParameterType::scalar())]),
    ]);
    assert_eq!(retained(&store, "Core"), vec![existing]);
}

#[test]
fn test_json_batch_end_to_end() {
    let json = r#"[
        { "name": "glUniform4iv", "extension": "Core", "parameters": [
            { "name": "location" },
            { "name": "value", "type": { "is_unsigned": true, "element_count": 4 } }
        ] },
        { "name": "glUniform4uiv", "extension": "Core", "parameters": [
            { "name": "location" },
            { "name": "value", "type": { "is_unsigned": true, "element_count": 4 } }
        ] },
        { "name": "glFlush", "extension": "Core" }
    ]"#;

    let store = resolve(load_declarations(json).unwrap());
    let names: Vec<&str> = store.group("Core").unwrap().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["glUniform4uiv", "glFlush"]);
}

// ============================================================
// Properties
// ============================================================

fn arb_parameter_type() -> impl Strategy<Value = ParameterType> {
    (any::<bool>(), prop_oneof![Just(0u32), 1u32..=4])
        .prop_map(|(is_unsigned, element_count)| ParameterType { is_unsigned, element_count })
}

fn arb_declaration() -> impl Strategy<Value = FunctionDeclaration> {
    (
        prop::sample::select(vec![
            "glTexImage",
            "glTexImageiv",
            "glTexImageuiv",
            "glColor4fv",
            "glColor4ubv",
            "glFinish",
        ]),
        prop::sample::select(vec!["ARB", "Core", "EXT", "NV"]),
        prop::collection::vec(arb_parameter_type(), 0..3),
    )
        .prop_map(|(name, extension, types)| {
            types
                .into_iter()
                .enumerate()
                .fold(FunctionDeclaration::new(name, extension), |d, (i, ty)| {
                    d.with_parameter(format!("p{i}"), ty)
                })
        })
}

proptest! {
    #[test]
    fn prop_reingestion_is_deterministic(batch in prop::collection::vec(arb_declaration(), 0..40)) {
        let first = resolve(batch.clone()).into_groups();
        let second = resolve(batch).into_groups();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_partitioned_matches_sequential(batch in prop::collection::vec(arb_declaration(), 0..40)) {
        let sequential = resolve(batch.clone()).into_groups();

        let mut partitioned = GroupedStore::new();
        partitioned.ingest_partitioned(batch);
        prop_assert_eq!(sequential, partitioned.into_groups());
    }

    #[test]
    fn prop_groups_strictly_ascending(batch in prop::collection::vec(arb_declaration(), 0..40)) {
        let store = resolve(batch);
        let keys: Vec<&str> = store.groups().map(|(key, _)| key).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_groups_hold_one_entry_per_function(batch in prop::collection::vec(arb_declaration(), 0..40)) {
        let store = resolve(batch.clone());
        for (extension, group) in store.groups() {
            for (i, a) in group.iter().enumerate() {
                prop_assert_eq!(a.extension.as_str(), extension);
                prop_assert!(batch.contains(a));
                for b in &group[i + 1..] {
                    prop_assert!(!OverloadIdentity.same_function(a, b));
                }
            }
        }
    }

    #[test]
    fn prop_report_accounts_for_every_declaration(batch in prop::collection::vec(arb_declaration(), 0..40)) {
        let mut store = GroupedStore::new();
        let report = store.ingest_all(batch.clone());
        prop_assert_eq!(report.total(), batch.len());
        prop_assert_eq!(report.inserted, store.len());
    }
}
