//! The grouped declaration store.
//!
//! Declarations are grouped by extension. Each group keeps first-seen order,
//! and groups iterate in ascending key order so generated output does not
//! depend on input order across groups.
//!
//! Within a group ingestion is sequential: whether a candidate is kept can
//! depend on what arrived before it. Groups never interact, which is what
//! [`GroupedStore::ingest_partitioned`] relies on.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::decl::FunctionDeclaration;
use crate::identity::{OverloadIdentity, SignatureIdentity};
use crate::resolve::{ConflictResolver, Resolution};

/// What happened to a single ingested declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    /// Appended to its group at `index`.
    Inserted { index: usize },
    /// Overwrote the structurally equal entry at `index`.
    Replaced { index: usize },
    /// Dropped in favour of the entry at `index`.
    Discarded { index: usize },
}

/// Counts of ingestion outcomes for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub inserted: usize,
    pub replaced: usize,
    pub discarded: usize,
}

impl IngestReport {
    /// Records one outcome.
    pub fn record(&mut self, outcome: Ingested) {
        match outcome {
            Ingested::Inserted { .. } => self.inserted += 1,
            Ingested::Replaced { .. } => self.replaced += 1,
            Ingested::Discarded { .. } => self.discarded += 1,
        }
    }

    /// Adds the counts of another report.
    pub fn merge(&mut self, other: IngestReport) {
        self.inserted += other.inserted;
        self.replaced += other.replaced;
        self.discarded += other.discarded;
    }

    /// Total number of declarations seen.
    pub fn total(&self) -> usize {
        self.inserted + self.replaced + self.discarded
    }
}

/// Canonical declarations, grouped by extension.
///
/// The store owns its groups outright. Callers feed it through the ingestion
/// methods and read it back through [`groups`](Self::groups); there is no
/// mutable access to a group.
#[derive(Debug, Clone)]
pub struct GroupedStore<I = OverloadIdentity> {
    groups: BTreeMap<String, Vec<FunctionDeclaration>>,
    resolver: ConflictResolver,
    identity: I,
}

impl GroupedStore {
    /// Creates an empty store using the default identity and every rule.
    pub fn new() -> Self {
        Self::with_identity(OverloadIdentity)
    }
}

impl Default for GroupedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SignatureIdentity> GroupedStore<I> {
    /// Creates an empty store that matches declarations with `identity`.
    pub fn with_identity(identity: I) -> Self {
        Self {
            groups: BTreeMap::new(),
            resolver: ConflictResolver::new(),
            identity,
        }
    }

    /// Replaces the conflict resolver.
    pub fn with_resolver(mut self, resolver: ConflictResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The resolver used for conflicts.
    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    /// Ingests declarations in order.
    pub fn ingest_all<D>(&mut self, declarations: D) -> IngestReport
    where
        D: IntoIterator<Item = FunctionDeclaration>,
    {
        let mut report = IngestReport::default();
        for declaration in declarations {
            report.record(self.ingest_one(declaration));
        }
        self.log_summary(&report);
        report
    }

    /// Ingests one declaration into its group.
    ///
    /// The declaration is appended when nothing in its group matches it.
    /// Otherwise the resolver decides between it and the matching entry; a
    /// replacement keeps the entry's position.
    pub fn ingest_one(&mut self, declaration: FunctionDeclaration) -> Ingested {
        let group = self.groups.entry(declaration.extension.clone()).or_default();
        ingest_into(group, declaration, &self.resolver, &self.identity)
    }

    /// Iterates groups in ascending key order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[FunctionDeclaration])> + '_ {
        self.groups.iter().map(|(key, group)| (key.as_str(), group.as_slice()))
    }

    /// Returns the group for `extension`, if any declaration landed there.
    pub fn group(&self, extension: &str) -> Option<&[FunctionDeclaration]> {
        self.groups.get(extension).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of retained declarations across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the store, yielding the ordered groups.
    pub fn into_groups(self) -> BTreeMap<String, Vec<FunctionDeclaration>> {
        self.groups
    }

    fn log_summary(&self, report: &IngestReport) {
        info!(
            inserted = report.inserted,
            replaced = report.replaced,
            discarded = report.discarded,
            groups = self.groups.len(),
            "ingested declarations"
        );
    }
}

impl<I: SignatureIdentity + Sync> GroupedStore<I> {
    /// Ingests declarations with one worker per extension.
    ///
    /// Declarations are partitioned by extension, keeping their relative
    /// order, and each partition is resolved against its own group. The
    /// result is the same as [`ingest_all`](Self::ingest_all).
    pub fn ingest_partitioned<D>(&mut self, declarations: D) -> IngestReport
    where
        D: IntoIterator<Item = FunctionDeclaration>,
    {
        let mut partitions: BTreeMap<String, Vec<FunctionDeclaration>> = BTreeMap::new();
        for declaration in declarations {
            partitions
                .entry(declaration.extension.clone())
                .or_default()
                .push(declaration);
        }

        let work: Vec<_> = partitions
            .into_iter()
            .map(|(key, batch)| {
                let group = self.groups.remove(&key).unwrap_or_default();
                (key, group, batch)
            })
            .collect();

        let resolver = self.resolver;
        let identity = &self.identity;
        let resolved: Vec<_> = work
            .into_par_iter()
            .map(|(key, mut group, batch)| {
                let mut report = IngestReport::default();
                for declaration in batch {
                    report.record(ingest_into(&mut group, declaration, &resolver, identity));
                }
                (key, group, report)
            })
            .collect();

        let mut report = IngestReport::default();
        for (key, group, partial) in resolved {
            self.groups.insert(key, group);
            report.merge(partial);
        }
        self.log_summary(&report);
        report
    }
}

impl<I: SignatureIdentity> Extend<FunctionDeclaration> for GroupedStore<I> {
    fn extend<D: IntoIterator<Item = FunctionDeclaration>>(&mut self, declarations: D) {
        self.ingest_all(declarations);
    }
}

impl FromIterator<FunctionDeclaration> for GroupedStore {
    fn from_iter<D: IntoIterator<Item = FunctionDeclaration>>(declarations: D) -> Self {
        let mut store = GroupedStore::new();
        store.ingest_all(declarations);
        store
    }
}

/// Serializes as `{ extension: [declaration, ...] }` in key order.
impl<I> Serialize for GroupedStore<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.groups.serialize(serializer)
    }
}

fn ingest_into<I: SignatureIdentity>(
    group: &mut Vec<FunctionDeclaration>,
    declaration: FunctionDeclaration,
    resolver: &ConflictResolver,
    identity: &I,
) -> Ingested {
    let Some(index) = group
        .iter()
        .position(|existing| identity.same_function(existing, &declaration))
    else {
        debug!(declaration = %declaration, "inserted");
        group.push(declaration);
        return Ingested::Inserted { index: group.len() - 1 };
    };

    match resolver.resolve(&group[index], &declaration) {
        Resolution::Replace => {
            debug!(declaration = %declaration, replaced = %group[index], "replaced");
            group[index] = declaration;
            Ingested::Replaced { index }
        }
        Resolution::KeepExisting => {
            debug!(declaration = %declaration, kept = %group[index], "discarded");
            Ingested::Discarded { index }
        }
    }
}
