use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{PreferencePolicy, Snapshot};

/// Load the desired-availability document.
///
/// Unlike a missing snapshot, a missing or malformed policy file is an
/// error: the caller asked for filtered alerts and we cannot guess what
/// they wanted. The unfiltered path is unaffected.
pub fn load_policy(path: &Path) -> Result<PreferencePolicy> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read preference policy {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid preference policy {}", path.display()))
}

/// Narrow a diff to the slots the policy allows.
///
/// A slot survives iff its park, its date's weekday name and its exact
/// time-range string are all present in the policy. Order within each
/// (park, date) list is preserved, and empty entries are pruned the
/// same way `diff` prunes them.
pub fn filter(new_slots: &Snapshot, policy: &PreferencePolicy) -> Snapshot {
    let mut matched = Snapshot::default();

    for (location, dates) in &new_slots.0 {
        for (date, slots) in dates {
            let weekday = date.format("%A").to_string();
            let wanted: Vec<_> = slots
                .iter()
                .filter(|slot| policy.allows(location, &weekday, &slot.time.to_string()))
                .cloned()
                .collect();
            if !wanted.is_empty() {
                matched
                    .0
                    .entry(location.clone())
                    .or_default()
                    .insert(*date, wanted);
            }
        }
    }

    matched
}
