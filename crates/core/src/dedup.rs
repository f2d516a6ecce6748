//! Identity-keyed lead deduplication
//!
//! Single-pass online grouping: two hash indices (by `id`, by `email`)
//! resolve to group slots, each slot holding the arena index of the group's
//! current representative. Replacing a representative rewrites the slot and
//! re-keys both indices in the same step, so later records always match
//! against the current representative, not the group's founder.

use ahash::AHashMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::changelog::{field_diff, ChangeLogEntry};
use crate::record::{LeadRecord, EMAIL_FIELD, ID_FIELD};
use crate::Result;

/// Statistics for one deduplication run
#[derive(Debug, Clone, Default)]
pub struct DedupStats {
    /// Total number of records seen
    pub total_seen: usize,
    /// Number of surviving representatives
    pub unique_count: usize,
    /// Number of representatives replaced by a more recent record
    pub superseded: usize,
    /// Number of incoming records discarded as stale
    pub discarded: usize,
}

impl DedupStats {
    /// Get the deduplication rate as a percentage
    pub fn dedup_rate(&self) -> f64 {
        if self.total_seen == 0 {
            0.0
        } else {
            let dropped = self.superseded + self.discarded;
            (dropped as f64 / self.total_seen as f64) * 100.0
        }
    }
}

/// Result of a deduplication run
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Surviving records in group founding order, bookkeeping-free
    pub unique_records: Vec<Map<String, Value>>,
    /// Supersession events in the order they occurred
    pub change_log: Vec<ChangeLogEntry>,
    /// Run statistics
    pub stats: DedupStats,
}

/// Deduplicate an ordered sequence of lead records
///
/// A record joins an existing identity group if its `id` matches the group's
/// current `id` or (failing that) its `email` matches the group's current
/// `email`. Within a group the record with the latest parsed `entryDate`
/// survives; exact timestamp ties go to the later input position. Each
/// content-changing replacement appends a change-log entry.
///
/// Output order is the order in which groups were founded. The function is
/// pure: it owns its indices for the duration of one call and keeps no state
/// between calls.
pub fn deduplicate(records: Vec<Map<String, Value>>) -> Result<DedupOutcome> {
    let mut stats = DedupStats {
        total_seen: records.len(),
        ..DedupStats::default()
    };

    // Append-only arena of admitted records. Group slots point into it;
    // replacement rewrites the slot, never an arena entry.
    let mut arena: Vec<LeadRecord> = Vec::with_capacity(records.len());
    let mut groups: Vec<usize> = Vec::new();
    let mut by_id: AHashMap<String, usize> = AHashMap::new();
    let mut by_email: AHashMap<String, usize> = AHashMap::new();
    let mut change_log: Vec<ChangeLogEntry> = Vec::new();

    for (position, fields) in records.into_iter().enumerate() {
        let incoming = LeadRecord::admit(fields, position)?;
        let id = incoming.identity_key(ID_FIELD)?;
        let email = incoming.identity_key(EMAIL_FIELD)?;

        // First-match lookup: id index, then email index.
        let slot = by_id.get(&id).or_else(|| by_email.get(&email)).copied();

        let slot = match slot {
            Some(slot) => slot,
            None => {
                let slot = groups.len();
                groups.push(arena.len());
                arena.push(incoming);
                by_id.insert(id, slot);
                by_email.insert(email, slot);
                continue;
            }
        };

        let rep = &arena[groups[slot]];
        let replaces = incoming.entry_date > rep.entry_date
            || (incoming.entry_date == rep.entry_date && incoming.position > rep.position);

        if !replaces {
            debug!(
                "Discarding stale record at position {} (kept position {})",
                incoming.position, rep.position
            );
            stats.discarded += 1;
            continue;
        }

        stats.superseded += 1;

        let changes = field_diff(&rep.fields, &incoming.fields);
        if changes.is_empty() {
            debug!(
                "Record at position {} replaces position {} with no content change",
                incoming.position, rep.position
            );
        } else {
            change_log.push(ChangeLogEntry {
                replaced_record: rep.fields.clone(),
                new_record: incoming.fields.clone(),
                changes,
            });
        }

        // Re-key both indices to the incoming identities so that membership
        // is judged against the current representative from here on.
        let old_id = rep.identity_key(ID_FIELD)?;
        let old_email = rep.identity_key(EMAIL_FIELD)?;
        by_id.remove(&old_id);
        by_email.remove(&old_email);

        groups[slot] = arena.len();
        arena.push(incoming);
        by_id.insert(id, slot);
        by_email.insert(email, slot);
    }

    let unique_records: Vec<Map<String, Value>> = groups
        .iter()
        .map(|&idx| arena[idx].fields.clone())
        .collect();
    stats.unique_count = unique_records.len();

    info!(
        "Deduplication complete: {} in, {} unique, {} superseded, {} discarded",
        stats.total_seen, stats.unique_count, stats.superseded, stats.discarded
    );

    Ok(DedupOutcome {
        unique_records,
        change_log,
        stats,
    })
}
