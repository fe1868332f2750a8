//! Host edits: version bumps, stale snapshots and invalidation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use kindgen_codegen::{ClassPath, Synthesizer};
use kindgen_model::{Config, Declaration, DeclarationId, DeclarationSet, Request, WellKnownNames};
use kindgen_provider::{AugmentProvider, CacheKey, VersionSource};

#[derive(Default)]
struct HostVersions(RwLock<HashMap<DeclarationId, u64>>);

impl HostVersions {
    fn set(&self, id: &DeclarationId, version: u64) {
        self.0.write().unwrap().insert(id.clone(), version);
    }
}

impl VersionSource for HostVersions {
    fn current_version(&self, id: &DeclarationId) -> Option<u64> {
        self.0.read().unwrap().get(id).copied()
    }
}

fn provider(host: &Arc<HostVersions>) -> AugmentProvider<ClassPath, Arc<HostVersions>> {
    AugmentProvider::with_versions(
        Synthesizer::from_config(&Config::default()),
        Arc::clone(host),
    )
}

fn pair() -> Declaration {
    Declaration::new("com.example.Pair", ["A", "B"])
        .with_annotation(WellKnownNames::default().higher_kind)
}

#[test]
fn stale_snapshot_answers_empty_and_is_not_cached() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    let mut decl = pair();
    host.set(&decl.id, 1);

    assert!(p.augments(&decl, Request::Methods).unwrap().is_empty());
    assert!(p.cache().is_empty());

    decl.bump_version();
    assert_eq!(p.augments(&decl, Request::Methods).unwrap().len(), 4);
    assert_eq!(p.cache().len(), 1);
}

#[test]
fn superseded_snapshot_answers_empty_even_when_cached() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    let snapshot = pair();
    host.set(&snapshot.id, 0);
    assert_eq!(p.augments(&snapshot, Request::Methods).unwrap().len(), 4);

    host.set(&snapshot.id, 1);
    assert!(p.augments(&snapshot, Request::Methods).unwrap().is_empty());
    assert!(p.augments(&snapshot, Request::Class).unwrap().is_empty());
    assert_eq!(p.cache().len(), 1);
}

#[test]
fn newer_version_replaces_older_entries() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    let mut decl = pair();
    host.set(&decl.id, 0);

    p.all_augments(&decl).unwrap();
    assert_eq!(p.cache().len(), 2);

    decl.bump_version();
    host.set(&decl.id, 1);
    p.augments(&decl, Request::Methods).unwrap();

    assert_eq!(p.cache().len(), 1);
    let old = CacheKey::new(decl.id.clone(), 0, Request::Class);
    assert!(p.cache().get(&old).is_none());
}

#[test]
fn edit_removing_the_marker_takes_effect() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    let decl = pair();
    host.set(&decl.id, 0);
    assert_eq!(p.augments(&decl, Request::Methods).unwrap().len(), 4);

    let mut edited = Declaration::new("com.example.Pair", ["A", "B"]);
    edited.version = 1;
    host.set(&edited.id, 1);
    assert!(p.augments(&edited, Request::Methods).unwrap().is_empty());
    assert_eq!(p.cache().len(), 1);
}

#[test]
fn untracked_declarations_are_trusted() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    assert_eq!(p.augments(&pair(), Request::Class).unwrap().len(), 1);
    assert_eq!(p.cache().len(), 1);
}

#[test]
fn invalidate_then_recompute() {
    let host = Arc::new(HostVersions::default());
    let p = provider(&host);
    let decl = pair();
    p.all_augments(&decl).unwrap();

    p.invalidate(&decl.id);
    assert!(p.cache().is_empty());
    assert_eq!(p.all_augments(&decl).unwrap().len(), 5);
}

#[test]
fn declaration_set_reports_versions() {
    let set = DeclarationSet::from_json(
        r#"{ "declarations": [
            { "qualified_name": "com.example.Box", "type_parameters": ["A"],
              "annotations": ["com.github.tonivade.purefun.HigherKind"], "version": 2 }
        ] }"#,
    )
    .unwrap();
    let current = set.declarations[0].clone();
    let mut outdated = current.clone();
    outdated.version = 1;

    let p = AugmentProvider::with_versions(Synthesizer::from_config(&Config::default()), set);
    assert!(p.augments(&outdated, Request::Methods).unwrap().is_empty());
    assert_eq!(p.augments(&current, Request::Methods).unwrap().len(), 2);
}
