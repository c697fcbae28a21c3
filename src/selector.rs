use std::sync::Arc;

use rand::seq::IndexedRandom as _;
use rand::Rng as _;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pattern::PatternCache;
use crate::store::RecordStore;
use crate::types::{FilterSpec, UserAgentRecord};

/// Filtering and weighted sampling over a [`RecordStore`].
///
/// A single instance is safe to share across threads: the store is read-only
/// after load and the pattern cache supports concurrent insertion. Returned
/// records borrow from the store, so they stay valid as long as the selector
/// does.
pub struct Selector {
    store: Arc<RecordStore>,
    patterns: PatternCache,
}

impl Selector {
    /// Build a selector over an already-loaded store.
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            patterns: PatternCache::default(),
        }
    }

    /// Convenience: a selector over the dataset embedded in the crate.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Arc::new(RecordStore::embedded()?)))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Weighted draw over the whole store.
    pub fn get_random(&self) -> Result<&UserAgentRecord> {
        self.get_random_with(None, false)
    }

    /// Draw one record, optionally filtered and/or ignoring weights.
    ///
    /// Fails with [`Error::NoMatch`] when the filter leaves no candidates and
    /// with [`Error::InvalidPattern`] when the filter's pattern does not
    /// compile.
    pub fn get_random_with(
        &self,
        filter: Option<&FilterSpec>,
        ignore_weights: bool,
    ) -> Result<&UserAgentRecord> {
        let candidates = self.candidates(filter)?;
        pick(&candidates, ignore_weights)
    }

    /// Like [`get_random_with`](Self::get_random_with), but an empty
    /// candidate set yields `None` instead of failing. Pattern and argument
    /// errors still propagate.
    pub fn get_random_opt(
        &self,
        filter: Option<&FilterSpec>,
        ignore_weights: bool,
    ) -> Result<Option<&UserAgentRecord>> {
        match self.get_random_with(filter, ignore_weights) {
            Ok(record) => Ok(Some(record)),
            Err(Error::NoMatch) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `count` weighted draws (with replacement) over the whole store.
    pub fn get_many_random(&self, count: usize) -> Result<Vec<&UserAgentRecord>> {
        self.get_many_random_with(count, None, false)
    }

    /// `count` independent draws with replacement from the filtered
    /// candidate set. The filter is applied once up front; each draw is
    /// independent of prior draws, so duplicates are expected.
    pub fn get_many_random_with(
        &self,
        count: usize,
        filter: Option<&FilterSpec>,
        ignore_weights: bool,
    ) -> Result<Vec<&UserAgentRecord>> {
        if count == 0 {
            return Err(Error::InvalidArgument("count must be greater than zero"));
        }
        let candidates = self.candidates(filter)?;
        (0..count)
            .map(|_| pick(&candidates, ignore_weights))
            .collect()
    }

    /// Every record satisfying `filter`, in store order. An empty result is
    /// a valid answer to an enumeration query, not an error.
    pub fn get_all_matching(&self, filter: &FilterSpec) -> Result<Vec<&UserAgentRecord>> {
        self.apply_filters(self.store.records(), filter)
    }

    /// Drop all cached compiled patterns. Later calls recompile on demand.
    pub fn clear_pattern_cache(&self) {
        self.patterns.clear();
    }

    fn candidates(&self, filter: Option<&FilterSpec>) -> Result<Vec<&UserAgentRecord>> {
        match filter {
            Some(spec) => self.apply_filters(self.store.records(), spec),
            None => Ok(self.store.iter().collect()),
        }
    }

    /// Intersect all present predicates over `records`, preserving order.
    fn apply_filters<'a>(
        &self,
        records: &'a [UserAgentRecord],
        spec: &FilterSpec,
    ) -> Result<Vec<&'a UserAgentRecord>> {
        // Compile (or fetch) the pattern before touching any record, so an
        // invalid pattern fails the whole operation rather than one record.
        let pattern = spec
            .user_agent_pattern
            .as_deref()
            .map(|p| self.patterns.get_or_compile(p))
            .transpose()?;

        let matched: Vec<&UserAgentRecord> = records
            .iter()
            .filter(|record| record_matches(record, spec, pattern.as_deref()))
            .collect();
        debug!(
            candidates = matched.len(),
            total = records.len(),
            "applied user-agent filter"
        );
        Ok(matched)
    }
}

/// Evaluate every present predicate against one record, short-circuiting on
/// the first failure: platform, vendor, pattern, screen bounds, connection
/// type, effective connection type. A record missing an optional field fails
/// any predicate that references it.
fn record_matches(
    record: &UserAgentRecord,
    spec: &FilterSpec,
    pattern: Option<&fancy_regex::Regex>,
) -> bool {
    if let Some(platform) = spec.platform.as_deref() {
        if !record.platform.eq_ignore_ascii_case(platform) {
            return false;
        }
    }
    if let Some(vendor) = spec.vendor.as_deref() {
        if !record.vendor.eq_ignore_ascii_case(vendor) {
            return false;
        }
    }
    if let Some(re) = pattern {
        // A match attempt that overruns the backtracking budget counts as a
        // non-match, not an error.
        if !re.is_match(&record.user_agent).unwrap_or(false) {
            return false;
        }
    }
    if let Some(min) = spec.min_screen_width {
        if record.screen_width < min {
            return false;
        }
    }
    if let Some(max) = spec.max_screen_width {
        if record.screen_width > max {
            return false;
        }
    }
    if let Some(min) = spec.min_screen_height {
        if record.screen_height < min {
            return false;
        }
    }
    if let Some(max) = spec.max_screen_height {
        if record.screen_height > max {
            return false;
        }
    }
    if let Some(kind) = spec.connection_type.as_deref() {
        match record.connection.as_ref().and_then(|c| c.kind.as_deref()) {
            Some(k) if k.eq_ignore_ascii_case(kind) => {}
            _ => return false,
        }
    }
    if let Some(effective) = spec.effective_connection_type.as_deref() {
        match record
            .connection
            .as_ref()
            .and_then(|c| c.effective_type.as_deref())
        {
            Some(e) if e.eq_ignore_ascii_case(effective) => {}
            _ => return false,
        }
    }
    true
}

/// Cumulative-weight draw with a uniform fallback.
///
/// The target is uniform in `[0, total_weight)`; walking the candidates in
/// order, the first one whose running sum reaches the target wins. A
/// degenerate total (zero, or all weights non-positive) skips straight to a
/// uniform pick over the same candidates; the same fallback catches a walk
/// left unfinished by floating-point rounding.
fn pick<'a>(
    candidates: &[&'a UserAgentRecord],
    ignore_weights: bool,
) -> Result<&'a UserAgentRecord> {
    if candidates.is_empty() {
        return Err(Error::NoMatch);
    }
    let mut rng = rand::rng();

    if !ignore_weights {
        let total: f64 = candidates.iter().map(|r| r.weight).sum();
        if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            for &record in candidates {
                cumulative += record.weight;
                if target <= cumulative {
                    return Ok(record);
                }
            }
        }
    }

    candidates.choose(&mut rng).copied().ok_or(Error::NoMatch)
}
