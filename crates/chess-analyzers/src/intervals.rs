//! Canonical interval timeline: merging overlapping intervals and formatting
//! them as move tags.

use chess_core::{move_tag, Ply};
use serde::{Deserialize, Serialize};

const DESCRIPTION_SEPARATOR: &str = "; ";

/// An extended interval in plies, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: Ply,
    pub end: Ply,
    pub description: Option<String>,
    pub detected_by: Vec<String>,
}

impl Interval {
    pub fn to_highlight(&self) -> Highlight {
        Highlight {
            start_tag: move_tag(self.start),
            end_tag: move_tag(self.end),
            description: self.description.clone(),
        }
    }

    fn absorb(&mut self, other: Interval) {
        self.end = self.end.max(other.end);

        let mut parts = description_parts(self.description.as_deref());
        for part in description_parts(other.description.as_deref()) {
            if !parts.contains(&part) {
                parts.push(part);
            }
        }
        self.description = (!parts.is_empty()).then(|| parts.join(DESCRIPTION_SEPARATOR));

        self.detected_by.extend(other.detected_by);
        self.detected_by.sort();
        self.detected_by.dedup();
    }
}

fn description_parts(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| {
            d.split(DESCRIPTION_SEPARATOR)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A highlight as handed to downstream consumers, e.g. `{"start_tag": "3W", "end_tag": "5B"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub start_tag: String,
    pub end_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Merge overlapping or touching intervals into a sorted, disjoint list.
///
/// Intervals whose start is at or before the running end are folded into it.
/// The result does not depend on input order, and merging it again is a no-op.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals
        .into_iter()
        .map(|mut iv| {
            iv.detected_by.sort();
            iv.detected_by.dedup();
            iv
        })
        .collect();
    sorted.sort();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        debug_assert!(interval.start <= interval.end, "inverted interval {interval:?}");
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => last.absorb(interval),
            _ => merged.push(interval),
        }
    }
    merged
}

/// Format merged intervals as move-tag highlights.
pub fn intervals_format(intervals: &[Interval]) -> Vec<Highlight> {
    intervals.iter().map(Interval::to_highlight).collect()
}
