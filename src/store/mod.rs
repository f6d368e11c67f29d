pub mod applicants;
pub mod listings;
pub mod profile;
pub mod workspace;
pub mod workspace_select;

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Fresh id for a newly opened store. Requests remember it so an answer that
/// arrives after the page was reopened is not applied to the new store.
pub(crate) fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}
