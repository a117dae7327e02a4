use std::collections::HashSet;

/// Result of aligning a stored column list with the live schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// A permutation of exactly the live field names.
    pub order: Vec<String>,
    /// True when `order` differs from what was stored and must be written back.
    pub changed: bool,
}

/// Align a persisted column order with the live schema.
///
/// Stored fields that still exist keep their relative order; fields the
/// server added since are appended in server order; fields that disappeared
/// are dropped. With nothing stored, the server order is used as-is.
pub fn reconcile(stored: Option<&[String]>, live: &[String]) -> Reconciliation {
    let Some(stored) = stored else {
        return Reconciliation {
            order: dedup(live),
            changed: false,
        };
    };

    let live_set: HashSet<&str> = live.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(live.len());
    let mut order = Vec::with_capacity(live.len());

    for field in stored {
        if live_set.contains(field.as_str()) && seen.insert(field.as_str()) {
            order.push(field.clone());
        }
    }
    for field in live {
        if seen.insert(field.as_str()) {
            order.push(field.clone());
        }
    }

    // Stored was already a permutation of live iff nothing moved.
    let changed = order.as_slice() != stored;
    Reconciliation { order, changed }
}

fn dedup(fields: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(fields.len());
    fields
        .iter()
        .filter(|field| seen.insert(field.as_str()))
        .cloned()
        .collect()
}
