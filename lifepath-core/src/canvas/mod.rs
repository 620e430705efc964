//! Life Canvas - the user's personal timeline.
//!
//! Events are user-authored, dated, rated records placed on a 2-D canvas.
//! Connections between events are undirected: connecting A and B records
//! each id in the other's connection set. The collection persists wholesale
//! through an injected storage collaborator; dates round-trip through serde
//! as RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::new_id;

/// A category an event belongs to (career, relationships, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
}

/// The built-in category set
pub fn default_categories() -> Vec<EventCategory> {
    let cat = |id: &str, name: &str, icon: &str, color: &str, description: &str| EventCategory {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
        description: description.into(),
    };
    vec![
        cat("career", "Career", "briefcase", "#4a7fb5", "Work and professional growth"),
        cat("relationships", "Relationships", "heart", "#c75d6a", "Family, friends, and partners"),
        cat("achievements", "Achievements", "trophy", "#d9a441", "Wins worth remembering"),
        cat("health", "Health", "leaf", "#5da06b", "Physical and mental wellbeing"),
        cat("learning", "Learning", "book", "#8263b8", "Skills, study, and curiosity"),
        cat("travel", "Travel", "plane", "#3f9bb0", "Places and journeys"),
        cat("finance", "Finance", "coins", "#7a8a54", "Money decisions and changes"),
    ]
}

/// Look up a built-in category by id
pub fn category_by_id(id: &str) -> Option<EventCategory> {
    default_categories().into_iter().find(|c| c.id == id)
}

/// Position of an event on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPosition {
    pub x: f32,
    pub y: f32,
}

/// A single dated, rated entry in the user's timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: EventCategory,
    pub position: CanvasPosition,
    /// Satisfaction rating, 1-5
    pub satisfaction: u8,
    pub financial_impact: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub mood: Option<String>,
    /// Optional link back to the prediction this event realized
    pub prediction_id: Option<String>,
    /// Ids of connected events; symmetric with the other side
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an event; the canvas assigns id and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: EventCategory,
    #[serde(default)]
    pub position: CanvasPosition,
    pub satisfaction: u8,
    pub financial_impact: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub mood: Option<String>,
    pub prediction_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<EventCategory>,
    pub position: Option<CanvasPosition>,
    pub satisfaction: Option<u8>,
    pub financial_impact: Option<f64>,
    pub photos: Option<Vec<String>>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_private: Option<bool>,
}

/// The user's event collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCanvas {
    pub events: Vec<LifeEvent>,
}

impl EventCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<LifeEvent>) -> Self {
        Self { events }
    }

    pub fn get(&self, id: &str) -> Option<&LifeEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Add an event; assigns a generated id and created/updated timestamps.
    pub fn add_event(&mut self, new: NewEvent, now: DateTime<Utc>) -> &LifeEvent {
        let event = LifeEvent {
            id: new_id("evt"),
            title: new.title,
            description: new.description,
            date: new.date,
            category: new.category,
            position: new.position,
            satisfaction: new.satisfaction.clamp(1, 5),
            financial_impact: new.financial_impact,
            photos: new.photos,
            mood: new.mood,
            prediction_id: new.prediction_id,
            connections: Vec::new(),
            tags: new.tags,
            is_private: new.is_private,
            created_at: now,
            updated_at: now,
        };
        self.events.push(event);
        let idx = self.events.len() - 1;
        &self.events[idx]
    }

    /// Apply a partial update and stamp `updated_at`. Unknown ids are a
    /// no-op; returns whether an event was touched.
    pub fn update_event(&mut self, id: &str, patch: EventPatch, now: DateTime<Utc>) -> bool {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(position) = patch.position {
            event.position = position;
        }
        if let Some(satisfaction) = patch.satisfaction {
            event.satisfaction = satisfaction.clamp(1, 5);
        }
        if let Some(financial_impact) = patch.financial_impact {
            event.financial_impact = Some(financial_impact);
        }
        if let Some(photos) = patch.photos {
            event.photos = photos;
        }
        if let Some(mood) = patch.mood {
            event.mood = Some(mood);
        }
        if let Some(tags) = patch.tags {
            event.tags = tags;
        }
        if let Some(is_private) = patch.is_private {
            event.is_private = is_private;
        }
        event.updated_at = now;
        true
    }

    /// Delete an event and strip its id from every other event's
    /// connection set, so no dangling references survive.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return false;
        }
        for event in &mut self.events {
            event.connections.retain(|c| c != id);
        }
        true
    }

    /// Connect two events symmetrically. No-ops (without corrupting state)
    /// when either id is missing, the ids are equal, or the connection
    /// already exists.
    pub fn connect_events(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let ia = self.events.iter().position(|e| e.id == a);
        let ib = self.events.iter().position(|e| e.id == b);
        let (Some(ia), Some(ib)) = (ia, ib) else {
            return false;
        };
        let mut changed = false;
        if !self.events[ia].connections.iter().any(|c| c == b) {
            self.events[ia].connections.push(b.to_string());
            changed = true;
        }
        if !self.events[ib].connections.iter().any(|c| c == a) {
            self.events[ib].connections.push(a.to_string());
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample(title: &str, category: &str) -> NewEvent {
        NewEvent {
            title: title.into(),
            description: String::new(),
            date: at(0),
            category: category_by_id(category).unwrap(),
            position: CanvasPosition::default(),
            satisfaction: 4,
            financial_impact: None,
            photos: Vec::new(),
            mood: None,
            prediction_id: None,
            tags: Vec::new(),
            is_private: false,
        }
    }

    #[test]
    fn test_add_assigns_id_and_timestamps() {
        let mut canvas = EventCanvas::new();
        let e = canvas.add_event(sample("Started new job", "career"), at(100));
        assert!(e.id.starts_with("evt-"));
        assert_eq!(e.created_at, at(100));
        assert_eq!(e.updated_at, at(100));
        assert!(e.connections.is_empty());
    }

    #[test]
    fn test_update_stamps_updated_at_only() {
        let mut canvas = EventCanvas::new();
        let id = canvas.add_event(sample("a", "career"), at(100)).id.clone();
        let patch = EventPatch {
            title: Some("b".into()),
            ..Default::default()
        };
        assert!(canvas.update_event(&id, patch, at(200)));
        let e = canvas.get(&id).unwrap();
        assert_eq!(e.title, "b");
        assert_eq!(e.created_at, at(100));
        assert_eq!(e.updated_at, at(200));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut canvas = EventCanvas::new();
        assert!(!canvas.update_event("evt-missing", EventPatch::default(), at(0)));
    }

    #[test]
    fn test_satisfaction_clamped() {
        let mut canvas = EventCanvas::new();
        let mut new = sample("a", "health");
        new.satisfaction = 9;
        let id = canvas.add_event(new, at(0)).id.clone();
        assert_eq!(canvas.get(&id).unwrap().satisfaction, 5);

        let patch = EventPatch {
            satisfaction: Some(0),
            ..Default::default()
        };
        canvas.update_event(&id, patch, at(1));
        assert_eq!(canvas.get(&id).unwrap().satisfaction, 1);
    }

    #[test]
    fn test_connections_are_symmetric() {
        let mut canvas = EventCanvas::new();
        let a = canvas.add_event(sample("a", "career"), at(0)).id.clone();
        let b = canvas.add_event(sample("b", "travel"), at(0)).id.clone();

        assert!(canvas.connect_events(&a, &b));
        assert!(canvas.get(&a).unwrap().connections.contains(&b));
        assert!(canvas.get(&b).unwrap().connections.contains(&a));
    }

    #[test]
    fn test_connect_missing_or_self_is_noop() {
        let mut canvas = EventCanvas::new();
        let a = canvas.add_event(sample("a", "career"), at(0)).id.clone();

        assert!(!canvas.connect_events(&a, "evt-missing"));
        assert!(!canvas.connect_events(&a, &a));
        assert!(canvas.get(&a).unwrap().connections.is_empty());
    }

    #[test]
    fn test_connect_twice_does_not_duplicate() {
        let mut canvas = EventCanvas::new();
        let a = canvas.add_event(sample("a", "career"), at(0)).id.clone();
        let b = canvas.add_event(sample("b", "career"), at(0)).id.clone();

        assert!(canvas.connect_events(&a, &b));
        assert!(!canvas.connect_events(&b, &a));
        assert_eq!(canvas.get(&a).unwrap().connections.len(), 1);
        assert_eq!(canvas.get(&b).unwrap().connections.len(), 1);
    }

    #[test]
    fn test_delete_strips_dangling_connections() {
        let mut canvas = EventCanvas::new();
        let a = canvas.add_event(sample("a", "career"), at(0)).id.clone();
        let b = canvas.add_event(sample("b", "career"), at(0)).id.clone();
        canvas.connect_events(&a, &b);

        assert!(canvas.delete_event(&a));
        assert!(canvas.get(&a).is_none());
        assert!(canvas.get(&b).unwrap().connections.is_empty());
        assert!(!canvas.delete_event(&a), "second delete is a no-op");
    }

    #[test]
    fn test_dates_survive_serde_round_trip() {
        let mut canvas = EventCanvas::new();
        let mut new = sample("a", "finance");
        new.date = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        canvas.add_event(new, at(0));

        let json = serde_json::to_string(&canvas).unwrap();
        let restored: EventCanvas = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.events[0].date, canvas.events[0].date);
        assert_eq!(restored.events[0].created_at, canvas.events[0].created_at);
    }
}
