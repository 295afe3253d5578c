//! Storefront notifications.

use clap::Args;
use sphere_app::{context::AppContext, notifications::Notification};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct NotificationsArgs {
    /// Filter by description substring
    #[arg(long)]
    search: Option<String>,
}

#[derive(Tabled)]
struct NotificationRow {
    id: i64,
    description: String,
    timeline: i64,
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.into_raw(),
            description: notification.description.clone(),
            timeline: notification.timeline,
            created_at: notification.created_at.to_string(),
        }
    }
}

pub async fn run(ctx: &AppContext, args: NotificationsArgs) -> Result<(), CliError> {
    let mut notifications = ctx.notifications();
    notifications.load().await?;

    if let Some(term) = args.search {
        notifications.search(term);
    }

    let rows: Vec<NotificationRow> = notifications
        .view()
        .into_iter()
        .map(NotificationRow::from)
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}
