use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique id with the given prefix, e.g. `scene_42`.
///
/// Deterministic within a process run, which keeps test output stable.
pub fn next_id(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = next_id("scene");
        let b = next_id("scene");
        assert!(a.starts_with("scene_"));
        assert!(b.starts_with("scene_"));
        assert_ne!(a, b);
    }
}
