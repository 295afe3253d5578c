//! Account commands: session, profile and merit points.

use clap::Args;
use sphere_app::{auth::models::Credentials, context::AppContext};

use super::CliError;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username or email
    #[arg(long)]
    identifier: String,

    /// Account password
    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    password: String,

    #[arg(long)]
    confirm_password: String,
}

#[derive(Debug, Args)]
pub struct ChangePasswordArgs {
    #[arg(long)]
    old_password: String,

    #[arg(long)]
    new_password: String,

    #[arg(long)]
    confirm_password: String,
}

#[derive(Debug, Args)]
pub struct RedeemArgs {
    /// Points to redeem from the merit balance
    points: u64,
}

pub async fn login(ctx: &mut AppContext, args: LoginArgs) -> Result<(), CliError> {
    let session = ctx
        .auth()
        .login(Credentials {
            identifier: args.identifier,
            password: args.password,
        })
        .await?;

    let username = session.user.username.clone();
    ctx.adopt_session(session)?;
    println!("logged in as {username}");
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.clear_session()?;
    println!("logged out");
    Ok(())
}

pub async fn signup(ctx: &AppContext, args: SignupArgs) -> Result<(), CliError> {
    let mut auth = ctx.auth();
    auth.edit_signup(|draft| {
        draft.username = args.username;
        draft.email = args.email;
        draft.phone = args.phone;
        draft.password = args.password;
        draft.confirm_password = args.confirm_password;
    });

    let user = auth.signup().await?;
    println!("account created for {}", user.username);
    Ok(())
}

pub async fn profile(ctx: &AppContext) -> Result<(), CliError> {
    let mut auth = ctx.auth();
    let user = auth.load_profile().await?;

    println!("username:     {}", user.username);
    println!("email:        {}", user.email);
    println!("phone:        {}", user.phone);
    println!("merit points: {}", user.merit_points);
    Ok(())
}

pub async fn change_password(ctx: &AppContext, args: ChangePasswordArgs) -> Result<(), CliError> {
    let mut auth = ctx.auth();
    auth.edit_password(|draft| {
        draft.old_password = args.old_password;
        draft.new_password = args.new_password;
        draft.confirm_password = args.confirm_password;
    });

    auth.change_password().await?;
    println!("password changed");
    Ok(())
}

pub async fn redeem(ctx: &AppContext, args: RedeemArgs) -> Result<(), CliError> {
    let mut auth = ctx.auth();
    auth.load_profile().await?;
    auth.edit_redeem(|draft| draft.points = args.points);

    auth.redeem_points().await?;

    let balance = auth.profile().map_or(0, |user| user.merit_points);
    println!("redeemed {} points, {balance} remaining", args.points);
    Ok(())
}

pub async fn delete_account(ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.auth().delete_account().await?;
    ctx.clear_session()?;
    println!("account deleted");
    Ok(())
}
