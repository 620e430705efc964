//! Property-based tests using proptest
//!
//! Tests invariants that must hold for ALL inputs:
//! - Tracking: progress monotonic and clamped, unlocks monotonic
//! - Points: awarded exactly once per unlock, level formula always holds
//! - Canvas: connections stay symmetric under arbitrary operations
//! - Insights: regeneration is idempotent
//! - Market fallback: total, never panics, percentile ordering

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use lifepath_core::achievements::{AchievementTracker, UserStats};
use lifepath_core::canvas::{category_by_id, CanvasPosition, EventCanvas, NewEvent};
use lifepath_core::constants::LEVEL_POINTS_STEP;
use lifepath_core::insights::generate_insights;
use lifepath_core::market::{fallback_cost_of_living, fallback_job_market, fallback_salary};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn action_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "scenario_explored".to_string(),
        "path_compared".to_string(),
        "mentor_connected".to_string(),
        "community_post".to_string(),
        "goal_created".to_string(),
        "action_implemented".to_string(),
        "profile_completed".to_string(),
        "unknown_action".to_string(),
        String::new(),
    ])
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "career".to_string(),
        "relationships".to_string(),
        "achievements".to_string(),
        "health".to_string(),
        "learning".to_string(),
        "travel".to_string(),
        "finance".to_string(),
    ])
}

fn new_event(category: &str, satisfaction: u8, day_offset: i64) -> NewEvent {
    NewEvent {
        title: "e".into(),
        description: String::new(),
        date: base_time() - Duration::days(day_offset),
        category: category_by_id(category).expect("known category"),
        position: CanvasPosition::default(),
        satisfaction,
        financial_impact: None,
        photos: Vec::new(),
        mood: None,
        prediction_id: None,
        tags: Vec::new(),
        is_private: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_progress_monotonic_and_clamped(
        actions in prop::collection::vec((action_strategy(), 0u32..20), 0..40)
    ) {
        let mut tracker = AchievementTracker::new();
        let mut stats = UserStats::new();

        for (step, (action, value)) in actions.iter().enumerate() {
            let before: Vec<(String, u32, bool)> = tracker
                .achievements
                .iter()
                .map(|a| (a.id.clone(), a.progress, a.unlocked))
                .collect();

            tracker.track_action(action, *value, base_time() + Duration::hours(step as i64), &mut stats);

            for ((id, prev_progress, prev_unlocked), after) in
                before.iter().zip(tracker.achievements.iter())
            {
                prop_assert_eq!(id, &after.id);
                prop_assert!(after.progress >= *prev_progress, "progress decreased for {}", id);
                prop_assert!(after.progress <= after.max_progress, "progress overflow for {}", id);
                prop_assert!(!prev_unlocked || after.unlocked, "unlock reverted for {}", id);
            }
        }
    }

    #[test]
    fn prop_points_awarded_exactly_once_per_unlock(
        actions in prop::collection::vec((action_strategy(), 0u32..20), 0..40)
    ) {
        let mut tracker = AchievementTracker::new();
        let mut stats = UserStats::new();

        for (step, (action, value)) in actions.iter().enumerate() {
            tracker.track_action(action, *value, base_time() + Duration::hours(step as i64), &mut stats);
        }

        let unlocked_points: u32 = tracker
            .achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.points)
            .sum();
        let unlocked_count = tracker.achievements.iter().filter(|a| a.unlocked).count() as u32;

        prop_assert_eq!(stats.total_points, unlocked_points);
        prop_assert_eq!(stats.achievements_unlocked, unlocked_count);
    }

    #[test]
    fn prop_level_formula_always_holds(
        actions in prop::collection::vec((action_strategy(), 0u32..50), 0..30)
    ) {
        let mut tracker = AchievementTracker::new();
        let mut stats = UserStats::new();

        prop_assert_eq!(stats.level, stats.total_points / LEVEL_POINTS_STEP + 1);
        for (step, (action, value)) in actions.iter().enumerate() {
            tracker.track_action(action, *value, base_time() + Duration::hours(step as i64), &mut stats);
            prop_assert_eq!(stats.level, stats.total_points / LEVEL_POINTS_STEP + 1);
        }
    }

    #[test]
    fn prop_connections_stay_symmetric(
        pairs in prop::collection::vec((0usize..8, 0usize..8), 0..30),
        event_count in 2usize..8
    ) {
        let mut canvas = EventCanvas::new();
        for i in 0..event_count {
            canvas.add_event(new_event("career", 3, i as i64), base_time());
        }
        let ids: Vec<String> = canvas.events.iter().map(|e| e.id.clone()).collect();

        for (a, b) in pairs {
            let a = &ids[a % ids.len()];
            let b = &ids[b % ids.len()];
            canvas.connect_events(a, b);
        }

        for event in &canvas.events {
            for other_id in &event.connections {
                let other = canvas.get(other_id).expect("no dangling connection ids");
                prop_assert!(
                    other.connections.contains(&event.id),
                    "asymmetric connection {} -> {}",
                    event.id,
                    other_id
                );
                prop_assert_ne!(other_id, &event.id, "self connection");
            }
        }
    }

    #[test]
    fn prop_insight_generation_idempotent(
        specs in prop::collection::vec((category_strategy(), 1u8..=5, 0i64..500), 0..25)
    ) {
        let mut canvas = EventCanvas::new();
        for (category, satisfaction, offset) in &specs {
            canvas.add_event(new_event(category, *satisfaction, *offset), base_time());
        }

        let first = generate_insights(&canvas.events, base_time());
        let second = generate_insights(&canvas.events, base_time());
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= 3, "at most one insight per rule");
    }

    #[test]
    fn prop_fallback_salary_total_and_ordered(occ in ".{0,40}", loc in ".{0,40}") {
        let s = fallback_salary(&occ, &loc);
        prop_assert!(s.median_salary > 0);
        prop_assert!(s.percentile_25 < s.median_salary);
        prop_assert!(s.percentile_75 > s.median_salary);
    }

    #[test]
    fn prop_fallback_col_and_job_market_total(city in ".{0,40}", occ in ".{0,40}") {
        let c = fallback_cost_of_living(&city, "XX");
        prop_assert!(c.overall_cost_index > 0);
        prop_assert!(c.average_rent_1br > 0);

        let j = fallback_job_market(&occ);
        prop_assert!(j.openings > 0);
    }
}
