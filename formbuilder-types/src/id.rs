use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Generate an identifier for a form, field or option.
///
/// The id is the current Unix time in milliseconds plus a random offset
/// below 1000. Ids handed out by one process are strictly increasing, so two
/// ids drawn in the same millisecond never collide.
pub fn generate_unique_id() -> u64 {
    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    let candidate = millis + rand::thread_rng().gen_range(0..1000);

    let previous = LAST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(candidate.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    candidate.max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_based_on_now() {
        let before = chrono::Utc::now().timestamp_millis() as u64;
        let id = generate_unique_id();
        assert!(id >= before);
    }

    #[test]
    fn ids_do_not_repeat() {
        let mut ids: Vec<u64> = (0..500).map(|_| generate_unique_id()).collect();
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
