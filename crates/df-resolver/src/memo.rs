//! Single-entry preview memo.
//!
//! Hover previews recompute on every tick; when the context has not changed
//! the last preview is reused. The key is the context's content
//! fingerprint, so any change to connections, topology or constraints
//! misses.

use df_topology::TopologyContext;

use crate::preview::FittingPreview;
use crate::resolver::FittingResolver;

#[derive(Debug, Clone, Default)]
pub struct PreviewMemo {
    entry: Option<(String, FittingPreview)>,
    hits: u64,
    misses: u64,
}

impl PreviewMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preview(&mut self, resolver: &FittingResolver, ctx: &TopologyContext) -> FittingPreview {
        let key = ctx.fingerprint();
        if let Some((cached_key, preview)) = &self.entry
            && *cached_key == key
        {
            self.hits += 1;
            return preview.clone();
        }
        self.misses += 1;
        let preview = resolver.preview(ctx);
        self.entry = Some((key, preview.clone()));
        preview
    }

    /// Drop the cached preview, e.g. after the entity store changed.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
