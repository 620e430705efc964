//! Insight generation over the life canvas.
//!
//! Three independent rules, each producing at most one insight:
//! 1. Success pattern - clusters of high-satisfaction events
//! 2. Achievement momentum - achievements within the trailing year
//! 3. Career progression - mean satisfaction across career events
//!
//! Generation is a pure reduction over the full event collection. The
//! output list fully replaces the previous one on every change; nothing is
//! cached or persisted. Insight ids are deterministic per rule so
//! regenerating over an unchanged collection yields identical output.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::canvas::LifeEvent;
use crate::constants::{
    CAREER_MIN_EVENTS, CAREER_SATISFACTION_SUGGEST_BELOW, MOMENTUM_WINDOW_DAYS,
    SUCCESS_PATTERN_MIN_EVENTS, SUCCESS_PATTERN_TOP_CATEGORIES, SUCCESS_SATISFACTION_MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Pattern,
    Deviation,
    Achievement,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Medium,
    High,
}

/// A derived observation; ephemeral, recomputed from the events wholesale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeInsight {
    pub id: String,
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    /// Ids of the events this insight was derived from
    pub related_events: Vec<String>,
    pub importance: Importance,
    pub actionable: bool,
    pub suggestion: Option<String>,
}

/// Run all rules over the event collection. Order-independent with respect
/// to the input; each rule sees the full collection.
pub fn generate_insights(events: &[LifeEvent], now: DateTime<Utc>) -> Vec<LifeInsight> {
    let mut insights = Vec::new();
    if let Some(i) = success_pattern(events) {
        insights.push(i);
    }
    if let Some(i) = achievement_momentum(events, now) {
        insights.push(i);
    }
    if let Some(i) = career_progression(events) {
        insights.push(i);
    }
    insights
}

/// Rule 1: enough high-satisfaction events form a success pattern.
/// Reports the most frequent category names among them; ties keep
/// first-encountered order.
fn success_pattern(events: &[LifeEvent]) -> Option<LifeInsight> {
    let successes: Vec<&LifeEvent> = events
        .iter()
        .filter(|e| e.satisfaction >= SUCCESS_SATISFACTION_MIN)
        .collect();
    if successes.len() < SUCCESS_PATTERN_MIN_EVENTS {
        return None;
    }

    // Frequency count preserving first-encountered order for stable ties
    let mut counts: Vec<(String, usize)> = Vec::new();
    for event in &successes {
        match counts.iter_mut().find(|(name, _)| *name == event.category.name) {
            Some((_, n)) => *n += 1,
            None => counts.push((event.category.name.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top: Vec<String> = counts
        .into_iter()
        .take(SUCCESS_PATTERN_TOP_CATEGORIES)
        .map(|(name, _)| name)
        .collect();

    Some(LifeInsight {
        id: "success-pattern".into(),
        insight_type: InsightType::Pattern,
        title: "Success pattern".into(),
        description: format!(
            "Your most satisfying moments cluster around: {}.",
            top.join(", ")
        ),
        related_events: successes.iter().map(|e| e.id.clone()).collect(),
        importance: Importance::High,
        actionable: true,
        suggestion: Some("Plan more of what already works for you.".into()),
    })
}

/// Rule 2: achievements recorded within the trailing year.
fn achievement_momentum(events: &[LifeEvent], now: DateTime<Utc>) -> Option<LifeInsight> {
    let cutoff = now - Duration::days(MOMENTUM_WINDOW_DAYS);
    let recent: Vec<&LifeEvent> = events
        .iter()
        .filter(|e| e.category.id == "achievements" && e.date > cutoff && e.date <= now)
        .collect();
    if recent.is_empty() {
        return None;
    }

    let n = recent.len();
    Some(LifeInsight {
        id: "achievement-momentum".into(),
        insight_type: InsightType::Achievement,
        title: "Achievement momentum".into(),
        description: if n == 1 {
            "You recorded 1 achievement in the last year.".into()
        } else {
            format!("You recorded {n} achievements in the last year.")
        },
        related_events: recent.iter().map(|e| e.id.clone()).collect(),
        importance: Importance::Medium,
        actionable: false,
        suggestion: None,
    })
}

/// Rule 3: mean satisfaction across career events, date-ascending.
fn career_progression(events: &[LifeEvent]) -> Option<LifeInsight> {
    let mut career: Vec<&LifeEvent> = events
        .iter()
        .filter(|e| e.category.id == "career")
        .collect();
    if career.len() < CAREER_MIN_EVENTS {
        return None;
    }
    career.sort_by_key(|e| e.date);

    let mean =
        career.iter().map(|e| e.satisfaction as f32).sum::<f32>() / career.len() as f32;
    let mean = (mean * 10.0).round() / 10.0;

    let needs_change = mean < CAREER_SATISFACTION_SUGGEST_BELOW;
    Some(LifeInsight {
        id: "career-progression".into(),
        insight_type: InsightType::Pattern,
        title: "Career progression".into(),
        description: format!(
            "Across {} career events your average satisfaction is {mean:.1} out of 5.",
            career.len()
        ),
        related_events: career.iter().map(|e| e.id.clone()).collect(),
        importance: Importance::Medium,
        actionable: needs_change,
        suggestion: needs_change.then(|| {
            "Your career satisfaction is trending low. Consider what would \
             change that - a mentor conversation, a new role, or a scenario \
             you have not explored yet."
                .into()
        }),
    })
}
