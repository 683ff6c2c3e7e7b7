//! Session CLI commands
//!
//! Login and registration store the returned token and profile in
//! `session.json`; logout removes it.

use super::CliContext;
use crate::client::types::RegisterRequest;
use crate::client::Session;
use crate::display::format_user;
use crate::error::{PulseError, PulseResult};
use crate::models::Money;

fn validate_email(email: &str) -> PulseResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(PulseError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(email.to_string())
}

pub fn handle_login(ctx: &CliContext, email: &str) -> PulseResult<()> {
    let email = validate_email(email)?;
    let response = ctx.anonymous_client()?.login(&email)?;

    let session = Session::new(response.token, response.user);
    session.save(&ctx.paths)?;
    tracing::info!(user = %session.user.id, "logged in");
    println!("Logged in as {} <{}>", session.user.username, session.user.email);
    Ok(())
}

pub fn handle_register(
    ctx: &CliContext,
    username: &str,
    email: &str,
    income: Option<&str>,
) -> PulseResult<()> {
    let username = username.trim();
    if username.is_empty() {
        return Err(PulseError::Validation("Username is required".into()));
    }
    let email = validate_email(email)?;
    let monthly_income = income
        .map(|s| {
            Money::parse(s).map_err(|e| PulseError::Validation(format!("Invalid income: {}", e)))
        })
        .transpose()?;

    let response = ctx.anonymous_client()?.register(&RegisterRequest {
        username: username.to_string(),
        email,
        monthly_income,
    })?;

    let session = Session::new(response.token, response.user);
    session.save(&ctx.paths)?;
    tracing::info!(user = %session.user.id, "registered");
    println!("Welcome, {}! You are now logged in.", session.user.username);
    Ok(())
}

pub fn handle_logout(ctx: &CliContext) -> PulseResult<()> {
    if Session::clear(&ctx.paths)? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn handle_whoami(ctx: &CliContext) -> PulseResult<()> {
    let session = Session::require(&ctx.paths)?;
    print!("{}", format_user(&session.user, ctx.symbol()));
    Ok(())
}
