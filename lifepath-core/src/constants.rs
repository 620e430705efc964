//! Centralized tunables for the Lifepath domain core.
//!
//! Eliminates magic numbers duplicated across the gamification and insight
//! modules. Per-module data (the achievement catalog, the market tables)
//! stays in its own module as the single source of truth.

// =====================================================
// Gamification
// =====================================================

/// Points required per level: level = total_points / step + 1
pub const LEVEL_POINTS_STEP: u32 = 500;

/// Flat bonus awarded when a milestone is completed, independent of any
/// achievement unlock it also triggers
pub const MILESTONE_BONUS_POINTS: u32 = 50;

// =====================================================
// Insight rules
// =====================================================

/// Minimum number of high-satisfaction events for the success-pattern rule
pub const SUCCESS_PATTERN_MIN_EVENTS: usize = 3;

/// Satisfaction rating (1-5) at or above which an event counts as a success
pub const SUCCESS_SATISFACTION_MIN: u8 = 4;

/// Number of category names reported by the success-pattern insight
pub const SUCCESS_PATTERN_TOP_CATEGORIES: usize = 3;

/// Trailing window for the achievement-momentum rule
pub const MOMENTUM_WINDOW_DAYS: i64 = 365;

/// Minimum number of career events for the career-progression rule
pub const CAREER_MIN_EVENTS: usize = 2;

/// Mean career satisfaction below which the career insight turns actionable
pub const CAREER_SATISFACTION_SUGGEST_BELOW: f32 = 3.5;
