//! Audit logging for data-changing requests.
//!
//! Events are emitted on the `audit` tracing target so they can be routed
//! separately from application logs.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some(7), "community.join", Some(format!("community:{}", id)), AuditOutcome::Success)
//!     .with_ip(extract_ip_from_headers(&headers))
//!     .with_user_agent(extract_user_agent(&headers))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// Structured audit event; build it, then call [`log`](Self::log).
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Acting user id, when the request names one
    pub actor: Option<i32>,
    /// Action performed (e.g. "community.create", "post.delete")
    pub action: String,
    /// Resource affected (e.g. "community:3", "comment:12")
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        actor: Option<i32>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            actor,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Attach extra details; serialization failures drop the details.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit the event on the `audit` target.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            actor = self.actor,
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// Client IP from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 10.0.0.2".parse().unwrap());
        headers.insert("x-real-ip", "192.168.1.1".parse().unwrap());
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.1"));

        headers.remove("x-forwarded-for");
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("192.168.1.1"));
    }

    #[test]
    fn test_audit_event_serializes_actor_and_details() {
        let event = AuditEvent::new(
            Some(7),
            "community.join",
            Some("community:3".to_string()),
            AuditOutcome::Success,
        )
        .with_details(serde_json::json!({"member_count": 4}));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["actor"], 7);
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["details"]["member_count"], 4);
    }
}
