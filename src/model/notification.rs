use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

wire_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Severity of a notification, which picks its icon and accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

wire_enum!(NotificationKind, "notification type", {
    Info => "info",
    Success => "success",
    Warning => "warning",
    Error => "error",
});

/// A notification shown in the header dropdown and the notifications page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Fields supplied by the caller when raising a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        kind: NotificationKind,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            priority,
            kind,
        }
    }

    pub(crate) fn into_notification(self, id: String, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            read: false,
            created_at,
            priority: self.priority,
            kind: self.kind,
        }
    }
}

const MINUTES_IN_DAY: i64 = 24 * 60;
const MINUTES_IN_MONTH: i64 = 30 * MINUTES_IN_DAY;
const MINUTES_IN_YEAR: i64 = 365 * MINUTES_IN_DAY;

impl Notification {
    /// Human-readable age relative to `now`, e.g. `"about 2 hours ago"`.
    ///
    /// Timestamps in the future are treated as just created.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        let seconds = (now - self.created_at).num_seconds().max(0);
        let minutes = (seconds as f64 / 60.0).round() as i64;

        let distance = if minutes == 0 {
            "less than a minute".to_string()
        } else if minutes < 45 {
            plural(minutes, "minute")
        } else if minutes < 90 {
            "about 1 hour".to_string()
        } else if minutes < MINUTES_IN_DAY {
            format!("about {}", plural(round_div(minutes, 60), "hour"))
        } else if minutes < 42 * 60 {
            "1 day".to_string()
        } else if minutes < MINUTES_IN_MONTH {
            plural(round_div(minutes, MINUTES_IN_DAY), "day")
        } else if minutes < 2 * MINUTES_IN_MONTH {
            format!("about {}", plural(round_div(minutes, MINUTES_IN_MONTH), "month"))
        } else if minutes < MINUTES_IN_YEAR {
            plural(round_div(minutes, MINUTES_IN_MONTH), "month")
        } else {
            years(minutes / MINUTES_IN_MONTH)
        };

        format!("{distance} ago")
    }
}

/// Whole years qualified by how far into the next year `months` reaches.
fn years(months: i64) -> String {
    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
