/*!
 * Authorization Audit Trail
 * Records check verdicts for security monitoring
 */

use crate::types::Action;
use ahash::RandomState;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::time::SystemTime;

/// Maximum events kept in the ring buffer
const MAX_AUDIT_EVENTS: usize = 10_000;

/// Verdict severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
}

/// One recorded authorization verdict
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    pub action: Action,
    pub object_type: String,
    pub allowed: bool,
    /// Whether an acting subject was present at check time
    pub authenticated: bool,
    pub severity: AuditSeverity,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(action: Action, object_type: &str, allowed: bool, authenticated: bool) -> Self {
        let severity = if allowed {
            AuditSeverity::Info
        } else {
            AuditSeverity::Warning
        };

        Self {
            action,
            object_type: object_type.to_string(),
            allowed,
            authenticated,
            severity,
            logged_at: SystemTime::now(),
        }
    }
}

/// Bounded in-memory log of authorization verdicts
pub struct AuditLog {
    /// Global event log (ring buffer)
    events: parking_lot::RwLock<VecDeque<AuditEvent>>,
    /// Per-action denial counters
    denial_counts: DashMap<Action, u64, RandomState>,
    capacity: usize,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_AUDIT_EVENTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: parking_lot::RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            denial_counts: DashMap::with_hasher(RandomState::new()),
            capacity,
        }
    }

    /// Record a verdict
    pub fn record(&self, event: AuditEvent) {
        if !event.allowed {
            self.denial_counts
                .entry(event.action.clone())
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }

        let mut events = self.events.write();
        if events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.read();
        events.iter().rev().take(limit).cloned().collect()
    }

    /// Denial count for an action
    pub fn denials_for(&self, action: &Action) -> u64 {
        self.denial_counts.get(action).map(|e| *e).unwrap_or(0)
    }

    /// All actions with denials
    pub fn denied_actions(&self) -> Vec<(Action, u64)> {
        self.denial_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Clear all recorded events and counters
    pub fn clear(&self) {
        self.events.write().clear();
        self.denial_counts.clear();
    }

    /// Get statistics
    pub fn stats(&self) -> AuditStats {
        let total_events = self.events.read().len();
        let total_denials: u64 = self.denial_counts.iter().map(|e| *e.value()).sum();
        let actions_tracked = self.denial_counts.len();

        AuditStats {
            total_events,
            total_denials,
            actions_tracked,
        }
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_denials: u64,
    pub actions_tracked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied(action: &str) -> AuditEvent {
        AuditEvent::new(Action::from(action), "Document", false, true)
    }

    fn allowed(action: &str) -> AuditEvent {
        AuditEvent::new(Action::from(action), "Document", true, true)
    }

    #[test]
    fn test_record_and_recent() {
        let log = AuditLog::new();
        log.record(allowed("read"));
        log.record(denied("edit"));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        // Newest first
        assert_eq!(recent[0].action.as_str(), "edit");
        assert!(!recent[0].allowed);
    }

    #[test]
    fn test_denial_counters() {
        let log = AuditLog::new();
        log.record(denied("edit"));
        log.record(denied("edit"));
        log.record(allowed("edit"));
        log.record(denied("delete"));

        assert_eq!(log.denials_for(&Action::from("edit")), 2);
        assert_eq!(log.denials_for(&Action::from("delete")), 1);
        assert_eq!(log.denials_for(&Action::from("read")), 0);

        let mut actions = log.denied_actions();
        actions.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].0.as_str(), "delete");
    }

    #[test]
    fn test_severity_follows_verdict() {
        assert_eq!(allowed("read").severity, AuditSeverity::Info);
        assert_eq!(denied("edit").severity, AuditSeverity::Warning);
    }

    #[test]
    fn test_ring_buffer_bound() {
        let log = AuditLog::with_capacity(8);
        for i in 0..20 {
            log.record(allowed(&format!("action{}", i)));
        }

        let stats = log.stats();
        assert_eq!(stats.total_events, 8);
        // Oldest events were dropped
        assert_eq!(log.recent(1)[0].action.as_str(), "action19");
    }

    #[test]
    fn test_stats_and_clear() {
        let log = AuditLog::new();
        log.record(denied("edit"));
        log.record(denied("edit"));
        log.record(allowed("read"));

        let stats = log.stats();
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.total_denials, 2);
        assert_eq!(stats.actions_tracked, 1);

        log.clear();
        let stats = log.stats();
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.total_denials, 0);
    }

    #[test]
    fn test_event_serde() {
        let event = denied("edit");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["action"], "edit");
        assert_eq!(value["allowed"], false);
        assert_eq!(value["severity"], "warning");
        assert!(value["logged_at"].is_i64());
    }
}
