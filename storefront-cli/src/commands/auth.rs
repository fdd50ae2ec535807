//! Authentication commands

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use comfy_table::Cell;
use dialoguer::{Input, Password};
use serde::Serialize;
use storefront_sdk::{AuthStatus, Credentials, Session, User};

use crate::commands::with_spinner;
use crate::config::ProfileCredentials;
use crate::context::Context;
use crate::output::{print_field, print_section, TableDisplay};

/// Authentication commands
#[derive(Debug, Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthSubcommand {
    /// Log in and store the access token for the profile
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted if omitted)
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the server session and forget the stored token
    Logout,

    /// Check whether the session is valid
    Status,

    /// Show the logged-in user
    Whoami,
}

/// Execute authentication commands
pub async fn execute(ctx: &Context, cmd: AuthCommands) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login { username, password } => login(ctx, username, password).await,
        AuthSubcommand::Logout => logout(ctx).await,
        AuthSubcommand::Status => status(ctx).await,
        AuthSubcommand::Whoami => whoami(ctx).await,
    }
}

async fn login(ctx: &Context, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to get username")?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to get password")?,
    };
    let credentials = Credentials::new(username, password);

    let client = ctx.create_client()?;
    let mut session = Session::new();
    let envelope = with_spinner(ctx, "Logging in...", session.login(&client, &credentials))
        .await
        .context("Login request failed")?;
    let token = envelope.into_result().context("Login failed")?;

    let mut stored = ctx.credentials.clone();
    stored.set(
        &ctx.profile_name,
        ProfileCredentials::from_login(&credentials.username, &token),
    );
    stored
        .save(&ctx.paths.credentials_file())
        .context("Failed to save credentials")?;

    let name = session
        .user()
        .map(|u| u.full_name())
        .unwrap_or_else(|| credentials.username.clone());
    ctx.output.success(&format!(
        "Logged in as {} (profile '{}')",
        name, ctx.profile_name
    ));
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    let client = ctx.create_client()?;
    let mut session = Session::new();
    let result = with_spinner(ctx, "Logging out...", session.logout(&client)).await;

    // The stored token goes whatever the server says
    let mut stored = ctx.credentials.clone();
    if stored.remove(&ctx.profile_name).is_some() {
        stored
            .save(&ctx.paths.credentials_file())
            .context("Failed to save credentials")?;
    } else {
        ctx.output.warning(&format!(
            "No stored login for profile '{}'",
            ctx.profile_name
        ));
    }

    result
        .context("Logout request failed")?
        .into_result()
        .context("Server rejected logout")?;

    ctx.output
        .success(&format!("Logged out of profile '{}'", ctx.profile_name));
    Ok(())
}

/// What `auth status` reports
#[derive(Debug, Serialize)]
struct SessionReport {
    profile: String,
    api_url: String,
    stored_login: Option<String>,
    status: AuthStatus,
    user: Option<User>,
}

impl TableDisplay for SessionReport {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.profile),
            Cell::new(&self.api_url),
            Cell::new(self.stored_login.as_deref().unwrap_or("-")),
            Cell::new(self.status_label()),
        ]
    }

    fn display_single(&self) {
        print_section("Session");
        print_field("Profile", &self.profile);
        print_field("API URL", &self.api_url);
        print_field("Stored login", self.stored_login.as_deref().unwrap_or("none"));
        let status = match self.status {
            AuthStatus::Authenticated => self.status_label().green().to_string(),
            _ => self.status_label().yellow().to_string(),
        };
        print_field("Status", &status);
        if let Some(user) = &self.user {
            print_field("User", &format!("{} ({})", user.full_name(), user.username));
        }
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}", self.profile, self.status_label(), self.api_url);
    }
}

impl SessionReport {
    fn status_label(&self) -> &'static str {
        match self.status {
            AuthStatus::Authenticated => "authenticated",
            AuthStatus::Anonymous => "anonymous",
            AuthStatus::Unknown => "unknown",
        }
    }
}

async fn status(ctx: &Context) -> Result<()> {
    let client = ctx.create_client()?;
    let mut session = Session::new();
    let status = with_spinner(ctx, "Checking session...", session.init(&client)).await;

    let report = SessionReport {
        profile: ctx.profile_name.clone(),
        api_url: ctx.api_url().to_string(),
        stored_login: ctx
            .credentials
            .get(&ctx.profile_name)
            .map(|c| c.username.clone()),
        status,
        user: session.user().cloned(),
    };
    ctx.output.write(&report)
}

async fn whoami(ctx: &Context) -> Result<()> {
    let client = ctx.create_client()?;
    let user = with_spinner(ctx, "Fetching user...", client.auth().me())
        .await
        .context("Request failed")?
        .into_result()
        .context("Failed to fetch the current user")?;

    ctx.output.write(&user)
}
