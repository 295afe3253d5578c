//! The comment wall.

use clap::{Args, Subcommand};
use sphere_app::{context::AppContext, feedback::FeedbackId};

use super::CliError;

#[derive(Debug, Args)]
pub struct FeedbackCommand {
    #[command(subcommand)]
    command: FeedbackSubcommand,
}

#[derive(Debug, Subcommand)]
enum FeedbackSubcommand {
    /// Show the comment wall
    List(ListArgs),
    /// Post a comment
    Post(PostArgs),
    /// Replace one of your comments
    Edit(EditArgs),
    /// Delete one of your comments
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Show every comment instead of the first few
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Args)]
struct PostArgs {
    /// Comment body
    comment: String,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Comment id to edit
    comment_id: i64,

    /// Replacement body
    comment: String,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Comment id to delete
    comment_id: i64,
}

pub async fn run(ctx: &AppContext, command: FeedbackCommand) -> Result<(), CliError> {
    let mut feedback = ctx.feedback();

    match command.command {
        FeedbackSubcommand::List(args) => {
            feedback.load().await?;
            if args.all {
                feedback.view_more();
            }
            for comment in feedback.displayed() {
                println!("{}: {}", comment.username, comment.comment);
            }
        }
        FeedbackSubcommand::Post(args) => {
            feedback.edit_draft(|draft| draft.comment = args.comment);
            feedback.post().await?;
            println!("comment posted");
        }
        FeedbackSubcommand::Edit(args) => {
            feedback.load().await?;
            feedback
                .edit(FeedbackId::from_raw(args.comment_id), args.comment)
                .await?;
            println!("comment updated");
        }
        FeedbackSubcommand::Delete(args) => {
            feedback.load().await?;
            feedback.delete(FeedbackId::from_raw(args.comment_id)).await?;
            println!("comment deleted");
        }
    }

    Ok(())
}
