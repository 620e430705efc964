//! Personalization profile and recommendation rules.
//!
//! The profile is a small weighted-interest record persisted per user.
//! Recommendations are derived by fixed threshold rules over the weights
//! and engagement level; the rule set is pure and ordered by priority.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

/// Per-user personalization record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationProfile {
    pub user_id: String,
    /// Interest weights in [0, 1]
    pub exploration: f32,
    pub mentorship: f32,
    pub community: f32,
    pub planning: f32,
    pub engagement: EngagementLevel,
    pub scenarios_viewed: u32,
    pub updated_at: DateTime<Utc>,
}

impl PersonalizationProfile {
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            exploration: 0.5,
            mentorship: 0.5,
            community: 0.5,
            planning: 0.5,
            engagement: EngagementLevel::Medium,
            scenarios_viewed: 0,
            updated_at: now,
        }
    }

    /// Apply a partial update; weights clamp to [0, 1].
    pub fn merge(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        if let Some(v) = update.exploration {
            self.exploration = v.clamp(0.0, 1.0);
        }
        if let Some(v) = update.mentorship {
            self.mentorship = v.clamp(0.0, 1.0);
        }
        if let Some(v) = update.community {
            self.community = v.clamp(0.0, 1.0);
        }
        if let Some(v) = update.planning {
            self.planning = v.clamp(0.0, 1.0);
        }
        if let Some(v) = update.engagement {
            self.engagement = v;
        }
        if let Some(v) = update.scenarios_viewed {
            self.scenarios_viewed = v;
        }
        self.updated_at = now;
    }
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub exploration: Option<f32>,
    pub mentorship: Option<f32>,
    pub community: Option<f32>,
    pub planning: Option<f32>,
    pub engagement: Option<EngagementLevel>,
    pub scenarios_viewed: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Scenario,
    Mentor,
    Milestone,
    Community,
}

/// One suggested next step for the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub rec_type: RecommendationType,
    pub id: String,
    pub title: String,
    pub reason: String,
    pub priority: u8,
}

fn rec(
    rec_type: RecommendationType,
    id: &str,
    title: &str,
    reason: &str,
    priority: u8,
) -> Recommendation {
    Recommendation {
        rec_type,
        id: id.into(),
        title: title.into(),
        reason: reason.into(),
        priority,
    }
}

/// Threshold rules over the profile, highest priority first.
pub fn recommendations_for(profile: &PersonalizationProfile) -> Vec<Recommendation> {
    use RecommendationType::*;
    let mut out = Vec::new();

    if profile.engagement == EngagementLevel::Low {
        out.push(rec(
            Scenario,
            "rec-reengage",
            "Pick up where you left off",
            "It has been a while since your last session",
            90,
        ));
    }
    if profile.scenarios_viewed == 0 {
        out.push(rec(
            Scenario,
            "rec-first-scenario",
            "Explore your first scenario",
            "Seeing one concrete path makes the rest easier to compare",
            85,
        ));
    }
    if profile.mentorship >= 0.6 {
        out.push(rec(
            Mentor,
            "rec-mentor",
            "Talk to a mentor in your field",
            "Your answers show you value guidance from people ahead of you",
            80,
        ));
    }
    if profile.exploration >= 0.6 && profile.scenarios_viewed > 0 {
        out.push(rec(
            Scenario,
            "rec-contrast-scenario",
            "Explore a contrasting scenario",
            "You lean toward exploring; a contrasting path sharpens the picture",
            70,
        ));
    }
    if profile.planning >= 0.5 {
        out.push(rec(
            Milestone,
            "rec-milestone",
            "Set a milestone for the next quarter",
            "You respond well to concrete goals",
            65,
        ));
    }
    if profile.community >= 0.5 {
        out.push(rec(
            Community,
            "rec-community",
            "Join the community discussion",
            "Others are weighing the same decisions",
            60,
        ));
    }

    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_merge_clamps_weights() {
        let mut p = PersonalizationProfile::new("u1", now());
        p.merge(
            ProfileUpdate {
                exploration: Some(1.7),
                mentorship: Some(-0.2),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(p.exploration, 1.0);
        assert_eq!(p.mentorship, 0.0);
    }

    #[test]
    fn test_merge_leaves_unset_fields() {
        let mut p = PersonalizationProfile::new("u1", now());
        p.merge(
            ProfileUpdate {
                planning: Some(0.9),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(p.community, 0.5);
        assert_eq!(p.planning, 0.9);
    }

    #[test]
    fn test_recommendations_ordered_by_priority() {
        let mut p = PersonalizationProfile::new("u1", now());
        p.engagement = EngagementLevel::Low;
        p.mentorship = 0.8;
        p.scenarios_viewed = 3;

        let recs = recommendations_for(&p);
        assert!(recs.len() >= 2);
        assert_eq!(recs[0].id, "rec-reengage");
        assert!(recs.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_new_user_gets_first_scenario() {
        let p = PersonalizationProfile::new("u1", now());
        let recs = recommendations_for(&p);
        assert!(recs.iter().any(|r| r.id == "rec-first-scenario"));
        assert!(
            !recs.iter().any(|r| r.id == "rec-contrast-scenario"),
            "contrast rec needs at least one viewed scenario"
        );
    }

    #[test]
    fn test_low_weights_produce_few_recommendations() {
        let mut p = PersonalizationProfile::new("u1", now());
        p.exploration = 0.1;
        p.mentorship = 0.1;
        p.community = 0.1;
        p.planning = 0.1;
        p.scenarios_viewed = 5;
        p.engagement = EngagementLevel::High;

        assert!(recommendations_for(&p).is_empty());
    }
}
