//! Stale-view invalidation seam.
//!
//! Room mutations leave previously rendered pages stale. The serving
//! layer installs an implementation wired to its page cache; mutating
//! operations then name the paths whose views must re-render. The
//! default implementation does nothing, which is correct for callers
//! with no render cache (tests, CLIs, background jobs).

/// Receives stale-path notices after room mutations.
pub trait ViewCache: Send + Sync {
    /// Marks the rendered view at `path` stale.
    fn invalidate(&self, path: &str);
}

/// View cache that ignores invalidations.
#[derive(Debug, Default)]
pub struct NoopViewCache;

impl ViewCache for NoopViewCache {
    fn invalidate(&self, _path: &str) {}
}
