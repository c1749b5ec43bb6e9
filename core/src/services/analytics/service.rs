//! Bounded in-memory email event log

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::entities::email_event::{AnalyticsSummary, EmailEvent, EmailEventKind};

pub const DEFAULT_CAPACITY: usize = 10_000;

pub struct EmailAnalytics {
    capacity: usize,
    events: Mutex<VecDeque<EmailEvent>>,
}

impl EmailAnalytics {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Append an event, dropping the oldest one when full
    pub fn record(&self, event: EmailEvent) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        if events.len() >= self.capacity {
            events.pop_front();
        }
        tracing::debug!(kind = ?event.kind, email_id = ?event.email_id, "email event recorded");
        events.push_back(event);
    }

    /// Most recent events first, at most `limit`
    pub fn events(&self, limit: usize) -> Vec<EmailEvent> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> AnalyticsSummary {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let mut summary = AnalyticsSummary {
            total: events.len(),
            ..Default::default()
        };

        for event in events.iter() {
            match event.kind {
                EmailEventKind::Sent => summary.sent += 1,
                EmailEventKind::Delivered => summary.delivered += 1,
                EmailEventKind::Opened => summary.opened += 1,
                EmailEventKind::Clicked => summary.clicked += 1,
                EmailEventKind::Bounced => summary.bounced += 1,
                EmailEventKind::Complained => summary.complained += 1,
                EmailEventKind::DeliveryDelayed => {}
            }
        }

        // Rates are relative to delivered mail once delivery events arrive
        let base = if summary.delivered > 0 {
            summary.delivered
        } else {
            summary.sent
        };
        summary.open_rate = ratio(summary.opened, base);
        summary.click_rate = ratio(summary.clicked, base);
        summary.bounce_rate = ratio(summary.bounced, summary.sent.max(base));
        summary
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for EmailAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
