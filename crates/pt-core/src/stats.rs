//! Minutes per activity.

use std::collections::HashMap;

use serde::Serialize;

use crate::training::Training;

/// Total minutes recorded for one activity label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityTotal {
    pub activity: String,
    pub minutes: u64,
}

/// Activities ranked by total minutes, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    pub entries: Vec<ActivityTotal>,
}

impl ActivityReport {
    /// Number of distinct activities present.
    pub fn activity_count(&self) -> usize {
        self.entries.len()
    }

    /// Minutes across every activity.
    pub fn total_minutes(&self) -> u64 {
        self.entries.iter().map(|e| e.minutes).sum()
    }

    /// The activity with the most minutes, if any sessions exist.
    pub fn most_popular(&self) -> Option<&ActivityTotal> {
        self.entries.first()
    }
}

/// Groups sessions by exact activity label and sums their durations.
///
/// Only labels that occur are reported. Equal totals keep first-seen order.
pub fn aggregate_by_activity(trainings: &[Training]) -> ActivityReport {
    let mut entries: Vec<ActivityTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for training in trainings {
        let minutes = u64::from(training.duration);
        if let Some(&i) = index.get(training.activity.as_str()) {
            entries[i].minutes += minutes;
        } else {
            index.insert(&training.activity, entries.len());
            entries.push(ActivityTotal {
                activity: training.activity.clone(),
                minutes,
            });
        }
    }

    entries.sort_by_key(|e| std::cmp::Reverse(e.minutes));
    tracing::debug!(activities = entries.len(), "aggregated trainings by activity");

    ActivityReport { entries }
}
