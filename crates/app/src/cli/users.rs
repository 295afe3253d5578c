//! Admin user management.

use clap::{Args, Subcommand};
use sphere_app::{
    context::AppContext,
    users::{User, UserId},
};
use tabled::{Table, Tabled};

use super::CliError;

#[derive(Debug, Args)]
pub struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// List user accounts
    List(ListArgs),
    /// Suspend an account
    Suspend(UserArgs),
    /// Reactivate a suspended account
    Activate(UserArgs),
    /// Overwrite an account's password
    ResetPassword(ResetPasswordArgs),
    /// Remove an account
    Delete(UserArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Filter by username substring
    #[arg(long)]
    search: Option<String>,

    /// Order by merit points, highest first
    #[arg(long)]
    sort_merit: bool,
}

#[derive(Debug, Args)]
struct UserArgs {
    /// Target user id
    user_id: i64,
}

#[derive(Debug, Args)]
struct ResetPasswordArgs {
    /// Target user id
    user_id: i64,

    #[arg(long)]
    new_password: String,

    #[arg(long)]
    confirm_password: String,
}

#[derive(Tabled)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    merit_points: u64,
    active: bool,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_raw(),
            username: user.username.clone(),
            email: user.email.clone(),
            merit_points: user.merit_points,
            active: user.is_active,
        }
    }
}

pub async fn run(ctx: &AppContext, command: UsersCommand) -> Result<(), CliError> {
    let mut users = ctx.users();

    match command.command {
        UsersSubcommand::List(args) => {
            users.load().await?;
            if let Some(term) = args.search {
                users.search(term);
            }
            users.sort_by_merit_points(args.sort_merit);

            let rows: Vec<UserRow> = users.view().into_iter().map(UserRow::from).collect();
            println!("{}", Table::new(rows));
        }
        UsersSubcommand::Suspend(args) => {
            users.load().await?;
            users.suspend(UserId::from_raw(args.user_id)).await?;
            println!("user {} suspended", args.user_id);
        }
        UsersSubcommand::Activate(args) => {
            users.load().await?;
            users.activate(UserId::from_raw(args.user_id)).await?;
            println!("user {} activated", args.user_id);
        }
        UsersSubcommand::ResetPassword(args) => {
            users.load().await?;
            users.edit_reset_draft(|draft| {
                draft.new_password = args.new_password;
                draft.confirm_password = args.confirm_password;
            });
            users.reset_password(UserId::from_raw(args.user_id)).await?;
            println!("password reset for user {}", args.user_id);
        }
        UsersSubcommand::Delete(args) => {
            users.load().await?;
            users.delete(UserId::from_raw(args.user_id)).await?;
            println!("user {} deleted", args.user_id);
        }
    }

    Ok(())
}
