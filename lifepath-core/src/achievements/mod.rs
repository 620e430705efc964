//! Achievement System
//!
//! Progress-counter achievements over a stream of named user actions:
//! - Explore 5 life scenarios
//! - Connect with 3 mentors
//! - Complete 5 milestone actions
//!
//! A static action table maps each action type to the achievements it
//! credits; one action may credit several achievements (shared credit).
//! Unlocks are monotonic and award their point value exactly once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LEVEL_POINTS_STEP;

/// Achievement categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Explorer,  // scenario exploration
    Growth,    // goals and follow-through
    Community, // mentors and posts
}

/// A single achievement: immutable identity plus mutable progress state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub icon: String,
    pub points: u32,
    pub max_progress: u32,
    pub progress: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Add progress, clamped to `max_progress`. Progress never decreases.
    fn add_progress(&mut self, amount: u32) {
        self.progress = (self.progress + amount).min(self.max_progress);
    }

    /// Unlock if the threshold is reached and the achievement is still
    /// locked. Returns true only on the transition.
    fn check_and_unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        if self.progress >= self.max_progress {
            self.unlocked = true;
            self.unlocked_at = Some(now);
            return true;
        }
        false
    }

    pub fn progress_percent(&self) -> f32 {
        if self.max_progress == 0 {
            1.0
        } else {
            (self.progress as f32 / self.max_progress as f32).min(1.0)
        }
    }
}

/// Aggregate user statistics derived from tracked actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u32,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub scenarios_explored: u32,
    pub mentor_connections: u32,
    pub community_posts: u32,
    pub achievements_unlocked: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl UserStats {
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Default::default()
        }
    }

    /// Award points and recompute the level. The level is a pure function
    /// of total points, so it can only grow.
    pub fn award_points(&mut self, points: u32) {
        self.total_points += points;
        self.level = self.total_points / LEVEL_POINTS_STEP + 1;
    }

    /// Daily streak update: consecutive day extends the streak, the same
    /// day leaves it unchanged, a gap resets it to 1.
    pub fn touch_active_day(&mut self, today: NaiveDate) {
        match self.last_active_date {
            Some(last) if last == today => {}
            Some(last) if last.succ_opt() == Some(today) => {
                self.current_streak += 1;
            }
            _ => {
                self.current_streak = 1;
            }
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_active_date = Some(today);
    }
}

/// Notice returned to the caller when an achievement unlocks. The caller
/// owns the user-facing notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unlock {
    pub achievement_id: String,
    pub title: String,
    pub points: u32,
}

/// Action table: action type -> achievement ids it credits.
///
/// Data-driven so the mapping is testable in isolation. `mentor_connected`
/// intentionally credits two achievements (shared credit).
pub const ACTION_EFFECTS: &[(&str, &[&str])] = &[
    ("scenario_explored", &["deep-diver", "horizon-scanner"]),
    ("path_compared", &["possibility-mapper"]),
    ("mentor_connected", &["perspective-seeker", "network-expander"]),
    ("community_post", &["community-voice"]),
    ("goal_created", &["goal-setter"]),
    ("action_implemented", &["action-taker"]),
    ("profile_completed", &["self-aware"]),
];

/// Achievement ids credited by an action type, or None for unknown actions.
pub fn effects_for(action: &str) -> Option<&'static [&'static str]> {
    ACTION_EFFECTS
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, ids)| *ids)
}

/// The user's achievement tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementTracker {
    pub achievements: Vec<Achievement>,
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementTracker {
    /// Initialize with the full catalog at zero progress
    pub fn new() -> Self {
        Self {
            achievements: catalog(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Record a named action. Unknown action types are a no-op, not an
    /// error. Returns the unlocks produced by this call; the point award
    /// for each is applied to `stats` exactly once, at the moment of
    /// unlock.
    pub fn track_action(
        &mut self,
        action: &str,
        value: u32,
        now: DateTime<Utc>,
        stats: &mut UserStats,
    ) -> Vec<Unlock> {
        let Some(ids) = effects_for(action) else {
            return Vec::new();
        };

        for ach in &mut self.achievements {
            if ids.contains(&ach.id.as_str()) {
                ach.add_progress(value);
            }
        }

        match action {
            "scenario_explored" => stats.scenarios_explored += value,
            "mentor_connected" => stats.mentor_connections += value,
            "community_post" => stats.community_posts += value,
            _ => {}
        }
        stats.touch_active_day(now.date_naive());

        self.sweep_unlocks(now, stats)
    }

    /// Unlock sweep: every achievement at threshold and not yet unlocked
    /// transitions exactly once. Re-sweeping is a no-op.
    pub fn sweep_unlocks(&mut self, now: DateTime<Utc>, stats: &mut UserStats) -> Vec<Unlock> {
        let mut unlocks = Vec::new();
        for ach in &mut self.achievements {
            if ach.check_and_unlock(now) {
                stats.award_points(ach.points);
                stats.achievements_unlocked += 1;
                tracing::info!(achievement = %ach.id, points = ach.points, "achievement unlocked");
                unlocks.push(Unlock {
                    achievement_id: ach.id.clone(),
                    title: ach.title.clone(),
                    points: ach.points,
                });
            }
        }
        unlocks
    }

    pub fn by_category(&self, category: AchievementCategory) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    pub fn completion_percent(&self) -> f32 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        let unlocked = self.achievements.iter().filter(|a| a.unlocked).count() as f32;
        unlocked / self.achievements.len() as f32
    }
}

fn entry(
    id: &str,
    title: &str,
    description: &str,
    category: AchievementCategory,
    icon: &str,
    points: u32,
    max_progress: u32,
) -> Achievement {
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category,
        icon: icon.into(),
        points,
        max_progress,
        progress: 0,
        unlocked: false,
        unlocked_at: None,
    }
}

/// The full achievement catalog
fn catalog() -> Vec<Achievement> {
    use AchievementCategory::*;
    vec![
        // === Explorer ===
        entry(
            "deep-diver",
            "Deep Diver",
            "Explore 5 life scenarios.",
            Explorer,
            "telescope",
            100,
            5,
        ),
        entry(
            "horizon-scanner",
            "Horizon Scanner",
            "Explore 15 life scenarios.",
            Explorer,
            "map",
            250,
            15,
        ),
        entry(
            "possibility-mapper",
            "Possibility Mapper",
            "Compare 3 pairs of paths side by side.",
            Explorer,
            "scale",
            75,
            3,
        ),
        // === Growth ===
        entry(
            "goal-setter",
            "Goal Setter",
            "Create 3 milestones.",
            Growth,
            "target",
            75,
            3,
        ),
        entry(
            "action-taker",
            "Action Taker",
            "Complete 5 milestones.",
            Growth,
            "rocket",
            150,
            5,
        ),
        entry(
            "self-aware",
            "Self Aware",
            "Complete your personalization profile.",
            Growth,
            "mirror",
            50,
            1,
        ),
        // === Community ===
        entry(
            "perspective-seeker",
            "Perspective Seeker",
            "Connect with 3 mentors.",
            Community,
            "ear",
            100,
            3,
        ),
        entry(
            "network-expander",
            "Network Expander",
            "Connect with 10 mentors.",
            Community,
            "web",
            200,
            10,
        ),
        entry(
            "community-voice",
            "Community Voice",
            "Share 5 posts with the community.",
            Community,
            "megaphone",
            125,
            5,
        ),
    ]
}
