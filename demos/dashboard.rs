//! Walk through a dashboard session: load, react to changes, edit users.
//!
//! Run with `RUST_LOG=pulseboard=debug cargo run --example dashboard`.

use pulseboard::{
    Config, NewNotification, NewUser, NotificationKind, Priority, Role, Session, UserPatch,
    UserStatus,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = pulseboard::setup_logging();
    let config = Config::from_env()?;

    println!("=== Dashboard session ===\n");
    let session = Session::new(config);

    // Header badge
    let _badge = session.notifications().watch_unread_count(|count| {
        println!("   [Header] unread: {count}");
    });

    println!("1. Loading stores");
    session.load().await;

    println!("\n2. Header dropdown:");
    let now = chrono::Utc::now();
    for notification in session.notifications().recent(pulseboard::notifications::RECENT_LIMIT) {
        let marker = if notification.read { " " } else { "*" };
        println!(
            "   [{marker}] {} ({}, {})",
            notification.title,
            notification.age(now),
            notification.priority
        );
    }

    println!("\n3. Raising a notification");
    session.notifications().add_notification(NewNotification::new(
        "Backup finished",
        "Nightly backup completed in 4m12s.",
        Priority::Low,
        NotificationKind::Success,
    ));

    println!("\n4. Marking everything as read");
    session.notifications().mark_all_as_read();

    println!("\n5. Adding a user");
    let form = NewUser::new("Grace Hopper", "grace@example.com").with_role(Role::Admin);
    form.validate()?;
    let grace = session.users().add_user(form).await?;
    println!("   created {} ({})", grace.name, grace.id);

    println!("\n6. Deactivating and searching");
    session
        .users()
        .update_user(&grace.id, UserPatch::status(UserStatus::Inactive))
        .await?;
    for user in session.users().search("admin") {
        println!("   {} <{}> {} / {}", user.name, user.email, user.role, user.status);
    }

    println!("\n✓ Example complete!");
    Ok(())
}
