//! Fixture records returned by the mock backend.

use crate::model::{avatar_url, Notification, NotificationKind, Priority, Role, User, UserStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// The notification seed set, with timestamps relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let entry = |id: &str,
                 title: &str,
                 message: &str,
                 read: bool,
                 ago: Duration,
                 priority: Priority,
                 kind: NotificationKind| Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        read,
        created_at: now - ago,
        priority,
        kind,
    };

    vec![
        entry(
            "1",
            "System Update",
            "System will be updated in 30 minutes. Please save your work.",
            false,
            Duration::minutes(30),
            Priority::High,
            NotificationKind::Warning,
        ),
        entry(
            "2",
            "New User Registered",
            "A new user has registered on the platform.",
            true,
            Duration::hours(2),
            Priority::Low,
            NotificationKind::Info,
        ),
        entry(
            "3",
            "Task Completed",
            "Your scheduled task has been completed successfully.",
            false,
            Duration::hours(5),
            Priority::Medium,
            NotificationKind::Success,
        ),
        entry(
            "4",
            "Security Alert",
            "Multiple login attempts detected from unrecognized device.",
            false,
            Duration::hours(24),
            Priority::High,
            NotificationKind::Error,
        ),
    ]
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The user seed set.
pub fn users() -> Vec<User> {
    let entry = |id: &str,
                 first_name: &str,
                 last_name: &str,
                 role: Role,
                 status: UserStatus,
                 created_at: DateTime<Utc>,
                 last_login: Option<DateTime<Utc>>| User {
        id: id.to_string(),
        name: format!("{first_name} {last_name}"),
        email: format!("{}@example.com", first_name.to_lowercase()),
        role,
        status,
        avatar: Some(avatar_url(first_name)),
        created_at,
        last_login,
    };

    vec![
        entry(
            "1",
            "John",
            "Smith",
            Role::Admin,
            UserStatus::Active,
            date(2023, 1, 15),
            Some(date(2023, 8, 10)),
        ),
        entry(
            "2",
            "Sarah",
            "Johnson",
            Role::Manager,
            UserStatus::Active,
            date(2023, 3, 22),
            Some(date(2023, 8, 5)),
        ),
        entry(
            "3",
            "Michael",
            "Brown",
            Role::User,
            UserStatus::Inactive,
            date(2023, 5, 12),
            Some(date(2023, 7, 20)),
        ),
        entry(
            "4",
            "Emily",
            "Davis",
            Role::User,
            UserStatus::Pending,
            date(2023, 7, 8),
            None,
        ),
        entry(
            "5",
            "David",
            "Wilson",
            Role::Manager,
            UserStatus::Active,
            date(2023, 2, 18),
            Some(date(2023, 8, 1)),
        ),
    ]
}
