//! Lifepath - Domain Core Library
//!
//! This crate provides the deterministic domain logic for the Lifepath
//! planning app:
//! - Achievement tracking (progress counters, unlock sweep, points/levels)
//! - Milestones (user-defined goals with completion bonuses)
//! - Gamification service facade (single owner of all point awards)
//! - Life canvas (dated, rated life events with symmetric connections)
//! - Insight generation (pure rules over the event collection)
//! - Labor-market fallback tables (salary, cost of living, job market)
//! - Scenario records built from questionnaire answers + market data
//! - Personalization profile and recommendation rules
//!
//! All operations are total functions over in-memory state; persistence and
//! transport live in the server crate.

mod ids;

pub mod achievements;
pub mod canvas;
pub mod constants;
pub mod gamification;
pub mod insights;
pub mod logging;
pub mod market;
pub mod milestones;
pub mod profile;
pub mod scenario;
