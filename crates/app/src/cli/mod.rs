//! Command-line front-end.
//!
//! Every command builds its view from [`AppContext`], drives the matching
//! service, and renders the result as a table or a line of text. No
//! domain logic lives here.

pub mod account;
pub mod cart;
pub mod dashboard;
pub mod feedback;
pub mod notifications;
pub mod offers;
pub mod orders;
pub mod products;
pub mod users;

use clap::{Parser, Subcommand};
use sphere_app::{config::AppConfig, context::AppContext};

pub type CliError = Box<dyn std::error::Error>;

#[derive(Debug, Parser)]
#[command(name = "sphere", about = "Swaggy Sphere storefront client", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login(account::LoginArgs),
    /// Log out and forget the session
    Logout,
    /// Create a new account
    Signup(account::SignupArgs),
    /// Show the logged-in user's profile
    Profile,
    /// Change the logged-in user's password
    ChangePassword(account::ChangePasswordArgs),
    /// Redeem merit points
    Redeem(account::RedeemArgs),
    /// Delete the logged-in user's account
    DeleteAccount,
    /// Browse the product catalog
    Products(products::ProductsArgs),
    /// Browse and book offers
    Offers(offers::OffersCommand),
    /// Manage the local cart and check out
    Cart(cart::CartCommand),
    /// Orders and the delivery queue
    Orders(orders::OrdersCommand),
    /// Manage user accounts (admin)
    Users(users::UsersCommand),
    /// Storefront notifications
    Notifications(notifications::NotificationsArgs),
    /// The comment wall
    Feedback(feedback::FeedbackCommand),
    /// Dashboard figures (admin)
    Dashboard,
}

/// Commands that belong to the admin back-office.
fn require_admin(ctx: &AppContext) -> Result<(), CliError> {
    if ctx.session().is_some_and(sphere_app::session::Session::is_admin) {
        Ok(())
    } else {
        Err("this command needs an admin session".into())
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut ctx = AppContext::new(&cli.config);

    match cli.command {
        Commands::Login(args) => account::login(&mut ctx, args).await,
        Commands::Logout => account::logout(&mut ctx),
        Commands::Signup(args) => account::signup(&ctx, args).await,
        Commands::Profile => account::profile(&ctx).await,
        Commands::ChangePassword(args) => account::change_password(&ctx, args).await,
        Commands::Redeem(args) => account::redeem(&ctx, args).await,
        Commands::DeleteAccount => account::delete_account(&mut ctx).await,
        Commands::Products(args) => products::run(&ctx, args).await,
        Commands::Offers(command) => offers::run(&ctx, command).await,
        Commands::Cart(command) => cart::run(&ctx, &cli.config, command).await,
        Commands::Orders(command) => orders::run(&ctx, command).await,
        Commands::Users(command) => {
            require_admin(&ctx)?;
            users::run(&ctx, command).await
        }
        Commands::Notifications(args) => notifications::run(&ctx, args).await,
        Commands::Feedback(command) => feedback::run(&ctx, command).await,
        Commands::Dashboard => {
            require_admin(&ctx)?;
            dashboard::run(&ctx).await
        }
    }
}
