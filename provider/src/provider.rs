//! The augment provider: what a host calls to learn a declaration's
//! synthetic members.

use std::sync::Arc;

use kindgen_codegen::{SynthError, SynthesisReport, Synthesizer, TypeFactory};
use kindgen_model::{Declaration, DeclarationId, DeclarationSet, Request, SyntheticMember};

use crate::cache::{CacheKey, Members, MemoCache};
use crate::guard::RecursionGuard;

/// The host's view of which version of a declaration is current.
pub trait VersionSource {
    /// Current modification counter of `id`, or `None` if the source does not
    /// track it, in which case the caller's snapshot is taken as current.
    fn current_version(&self, id: &DeclarationId) -> Option<u64>;
}

impl VersionSource for DeclarationSet {
    fn current_version(&self, id: &DeclarationId) -> Option<u64> {
        self.find(id).map(|d| d.version)
    }
}

impl<V: VersionSource + ?Sized> VersionSource for Arc<V> {
    fn current_version(&self, id: &DeclarationId) -> Option<u64> {
        (**self).current_version(id)
    }
}

/// Tracks nothing, so every snapshot is taken as current.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustSnapshots;

impl VersionSource for TrustSnapshots {
    fn current_version(&self, _id: &DeclarationId) -> Option<u64> {
        None
    }
}

/// Memoizing, reentrancy-safe front of a [`Synthesizer`].
///
/// Results are cached per `(declaration, version, request)`. A request made
/// while the same key is being computed on the same thread answers empty, and
/// a result computed from a snapshot the host has since superseded is
/// returned empty and never cached.
pub struct AugmentProvider<F, V = TrustSnapshots> {
    synth: Synthesizer<F>,
    versions: V,
    cache: MemoCache,
    class_guard: RecursionGuard,
    methods_guard: RecursionGuard,
}

impl<F: TypeFactory> AugmentProvider<F, TrustSnapshots> {
    /// Creates a provider that trusts every snapshot it is handed.
    pub fn new(synth: Synthesizer<F>) -> Self {
        Self::with_versions(synth, TrustSnapshots)
    }
}

impl<F: TypeFactory, V: VersionSource> AugmentProvider<F, V> {
    /// Creates a provider that checks results against `versions`.
    pub fn with_versions(synth: Synthesizer<F>, versions: V) -> Self {
        Self {
            synth,
            versions,
            cache: MemoCache::new(),
            class_guard: RecursionGuard::new("class"),
            methods_guard: RecursionGuard::new("methods"),
        }
    }

    /// Synthetic members of `decl` for one request kind.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails; failures are not
    /// cached.
    pub fn augments(&self, decl: &Declaration, request: Request) -> Result<Members, SynthError> {
        if self.is_stale(decl) {
            tracing::debug!(
                declaration = %decl.id,
                snapshot = decl.version,
                "snapshot superseded; answering empty"
            );
            return Ok(empty());
        }

        let key = CacheKey::new(decl.id.clone(), decl.version, request);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(declaration = %decl.id, request = request.as_str(), "cache hit");
            return Ok(hit);
        }

        let guard = match request {
            Request::Class => &self.class_guard,
            Request::Methods => &self.methods_guard,
        };
        let Some(computed) = guard.prevent(&key, || self.synth.synthesize(decl, request)) else {
            return Ok(empty());
        };
        let members = computed?;

        if self.is_stale(decl) {
            tracing::debug!(
                declaration = %decl.id,
                snapshot = decl.version,
                "declaration changed during synthesis; discarding result"
            );
            return Ok(empty());
        }
        Ok(self.cache.insert(key, Arc::from(members)))
    }

    /// Both request kinds concatenated, nested types first.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails.
    pub fn all_augments(&self, decl: &Declaration) -> Result<Vec<SyntheticMember>, SynthError> {
        let mut members = Vec::new();
        for request in Request::ALL {
            members.extend(self.augments(decl, request)?.iter().cloned());
        }
        Ok(members)
    }

    /// Synthesizes every requested member kind for each declaration, in
    /// order, and counts what was produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the type factory fails for any declaration.
    pub fn synthesize_all<'a>(
        &self,
        declarations: &'a [Declaration],
        requests: &[Request],
    ) -> Result<(Vec<DeclarationMembers<'a>>, SynthesisReport), SynthError> {
        let mut report = SynthesisReport::default();
        let mut results = Vec::with_capacity(declarations.len());

        for decl in declarations {
            let mut members = Vec::new();
            for request in requests {
                members.extend(self.augments(decl, *request)?.iter().cloned());
            }
            report.record(&members);
            results.push(DeclarationMembers {
                declaration: decl,
                members,
            });
        }

        Ok((results, report))
    }

    /// Forgets everything cached for `id`.
    pub fn invalidate(&self, id: &DeclarationId) {
        let removed = self.cache.invalidate(id);
        tracing::debug!(declaration = %id, removed, "invalidated");
    }

    /// The underlying cache.
    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// The wrapped synthesizer.
    pub fn synthesizer(&self) -> &Synthesizer<F> {
        &self.synth
    }

    fn is_stale(&self, decl: &Declaration) -> bool {
        match self.versions.current_version(&decl.id) {
            Some(current) => current != decl.version,
            None => false,
        }
    }
}

/// Members synthesized for one declaration, in request order.
#[derive(Debug, Clone)]
pub struct DeclarationMembers<'a> {
    /// The declaration.
    pub declaration: &'a Declaration,
    /// Its members.
    pub members: Vec<SyntheticMember>,
}

fn empty() -> Members {
    Arc::from(Vec::new())
}
