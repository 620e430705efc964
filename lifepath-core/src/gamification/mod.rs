//! Gamification service facade.
//!
//! Single owner of the achievement tracker, user stats, and milestone log.
//! Consumers receive this service by explicit injection rather than through
//! ambient shared state, and every point award funnels through `UserStats`
//! so the level invariant holds everywhere. The whole service serializes
//! wholesale for persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementTracker, Unlock, UserStats};
use crate::constants::MILESTONE_BONUS_POINTS;
use crate::milestones::{Milestone, MilestoneLog, NewMilestone};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationService {
    pub tracker: AchievementTracker,
    pub stats: UserStats,
    pub milestones: MilestoneLog,
}

impl Default for GamificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl GamificationService {
    pub fn new() -> Self {
        Self {
            tracker: AchievementTracker::new(),
            stats: UserStats::new(),
            milestones: MilestoneLog::new(),
        }
    }

    /// Record a named action against the achievement tracker.
    pub fn track_action(&mut self, action: &str, value: u32, now: DateTime<Utc>) -> Vec<Unlock> {
        self.tracker.track_action(action, value, now, &mut self.stats)
    }

    /// Create a milestone and credit the `goal_created` action.
    /// Returns the new milestone's id and any unlocks the action produced.
    pub fn add_milestone(&mut self, new: NewMilestone, now: DateTime<Utc>) -> (String, Vec<Unlock>) {
        let id = self.milestones.add(new).id.clone();
        let unlocks = self.track_action("goal_created", 1, now);
        (id, unlocks)
    }

    /// Complete a milestone: flat bonus points plus the
    /// `action_implemented` action. Repeat completions are no-ops and award
    /// nothing.
    pub fn complete_milestone(&mut self, id: &str, now: DateTime<Utc>) -> Vec<Unlock> {
        if !self.milestones.complete(id, now) {
            return Vec::new();
        }
        self.stats.award_points(MILESTONE_BONUS_POINTS);
        self.track_action("action_implemented", 1, now)
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn goal(title: &str) -> NewMilestone {
        NewMilestone {
            title: title.into(),
            description: String::new(),
            target_date: "2026-10-01".parse().unwrap(),
            category: "growth".into(),
            max_progress: 1,
        }
    }

    #[test]
    fn test_add_milestone_credits_goal_setter() {
        let mut svc = GamificationService::new();
        svc.add_milestone(goal("a"), at(0));
        svc.add_milestone(goal("b"), at(1));
        let (_, unlocks) = svc.add_milestone(goal("c"), at(2));

        assert_eq!(unlocks.len(), 1);
        assert_eq!(unlocks[0].achievement_id, "goal-setter");
        assert_eq!(svc.stats.total_points, 75);
    }

    #[test]
    fn test_complete_milestone_awards_bonus_once() {
        let mut svc = GamificationService::new();
        let (id, _) = svc.add_milestone(goal("a"), at(0));
        let before = svc.stats.total_points;

        svc.complete_milestone(&id, at(10));
        assert_eq!(svc.stats.total_points, before + MILESTONE_BONUS_POINTS);
        assert_eq!(svc.tracker.get("action-taker").unwrap().progress, 1);

        // Completing again changes nothing
        let after_first = svc.stats.total_points;
        svc.complete_milestone(&id, at(20));
        assert_eq!(svc.stats.total_points, after_first);
        assert_eq!(svc.tracker.get("action-taker").unwrap().progress, 1);
    }

    #[test]
    fn test_complete_unknown_milestone_is_noop() {
        let mut svc = GamificationService::new();
        let unlocks = svc.complete_milestone("ms-missing", at(0));
        assert!(unlocks.is_empty());
        assert_eq!(svc.stats.total_points, 0);
    }

    #[test]
    fn test_state_round_trips_wholesale() {
        let mut svc = GamificationService::new();
        let (id, _) = svc.add_milestone(goal("a"), at(0));
        svc.complete_milestone(&id, at(5));
        svc.track_action("scenario_explored", 2, at(6));

        let json = serde_json::to_string(&svc).unwrap();
        let restored: GamificationService = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.stats.total_points, svc.stats.total_points);
        assert_eq!(restored.milestones.completed_count(), 1);
        assert_eq!(
            restored.tracker.get("deep-diver").unwrap().progress,
            svc.tracker.get("deep-diver").unwrap().progress
        );
    }
}
