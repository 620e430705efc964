//! Milestones - user-defined goals with explicit completion.
//!
//! Milestones never auto-expire or auto-fail; both creation and completion
//! are deliberate user actions. The gamification facade wires them into the
//! achievement tracker (`goal_created` / `action_implemented`) and pays the
//! flat completion bonus.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::new_id;

/// A user-created goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub category: String,
    pub is_completed: bool,
    pub progress: u32,
    pub max_progress: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a milestone; the log assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub category: String,
    #[serde(default = "default_max_progress")]
    pub max_progress: u32,
}

fn default_max_progress() -> u32 {
    1
}

/// The user's milestone collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneLog {
    pub milestones: Vec<Milestone>,
}

impl MilestoneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Add a milestone with a generated id. Returns the stored record.
    pub fn add(&mut self, new: NewMilestone) -> &Milestone {
        let milestone = Milestone {
            id: new_id("ms"),
            title: new.title,
            description: new.description,
            target_date: new.target_date,
            category: new.category,
            is_completed: false,
            progress: 0,
            max_progress: new.max_progress.max(1),
            completed_at: None,
        };
        self.milestones.push(milestone);
        let idx = self.milestones.len() - 1;
        &self.milestones[idx]
    }

    /// Mark a milestone completed. Returns true only on the first
    /// completion; repeat calls and unknown ids are no-ops.
    pub fn complete(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        match self.milestones.iter_mut().find(|m| m.id == id) {
            Some(m) if !m.is_completed => {
                m.is_completed = true;
                m.progress = m.max_progress;
                m.completed_at = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.is_completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewMilestone {
        NewMilestone {
            title: "Finish portfolio".into(),
            description: "Three projects, written up".into(),
            target_date: "2026-12-01".parse().unwrap(),
            category: "career".into(),
            max_progress: 1,
        }
    }

    #[test]
    fn test_add_assigns_id_and_defaults() {
        let mut log = MilestoneLog::new();
        let m = log.add(sample());
        assert!(m.id.starts_with("ms-"));
        assert!(!m.is_completed);
        assert_eq!(m.progress, 0);
        assert!(m.completed_at.is_none());
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut log = MilestoneLog::new();
        let id = log.add(sample()).id.clone();
        let now = Utc.timestamp_opt(1_000, 0).unwrap();

        assert!(log.complete(&id, now));
        assert!(!log.complete(&id, Utc.timestamp_opt(2_000, 0).unwrap()));

        let m = log.get(&id).unwrap();
        assert!(m.is_completed);
        assert_eq!(m.completed_at, Some(now), "first completion timestamp sticks");
        assert_eq!(log.completed_count(), 1);
    }

    #[test]
    fn test_complete_unknown_id_is_noop() {
        let mut log = MilestoneLog::new();
        assert!(!log.complete("ms-missing", Utc::now()));
    }

    #[test]
    fn test_zero_max_progress_is_raised_to_one() {
        let mut log = MilestoneLog::new();
        let mut new = sample();
        new.max_progress = 0;
        let m = log.add(new);
        assert_eq!(m.max_progress, 1);
    }
}
