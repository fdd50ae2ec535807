//! Commands for the logged-in user's own profile

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use storefront_sdk::{Session, User, UserUpdate};

use crate::commands::with_spinner;
use crate::context::Context;

/// Profile commands
#[derive(Debug, Args)]
pub struct ProfileCommands {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileSubcommand {
    /// Show the logged-in user
    Show,

    /// Edit the logged-in user
    Update(ProfileFields),
}

/// Editable profile fields
#[derive(Debug, Default, Args)]
pub struct ProfileFields {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<ProfileFields> for UserUpdate {
    fn from(fields: ProfileFields) -> Self {
        UserUpdate {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            ..Default::default()
        }
    }
}

/// Execute profile commands
pub async fn execute(ctx: &Context, cmd: ProfileCommands) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Show => show(ctx).await,
        ProfileSubcommand::Update(fields) => update(ctx, fields.into()).await,
    }
}

async fn load_session(ctx: &Context) -> Result<(storefront_sdk::StorefrontClient, Session)> {
    let client = ctx.create_client()?;
    let mut session = Session::new();
    with_spinner(ctx, "Checking session...", session.init(&client)).await;

    if !session.is_authenticated() {
        bail!(
            "Not logged in. Run 'storefront auth login --profile {}' first.",
            ctx.profile_name
        );
    }
    Ok((client, session))
}

async fn show(ctx: &Context) -> Result<()> {
    let (_, session) = load_session(ctx).await?;
    let user = session.user().context("Session has no user")?;
    ctx.output.write(user)
}

async fn update(ctx: &Context, update: UserUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }

    let (client, mut session) = load_session(ctx).await?;
    let id = session.user().context("Session has no user")?.id;

    let saved = with_spinner(ctx, "Saving profile...", client.users().update(id, &update))
        .await
        .context("Request failed")?
        .into_result()
        .context("Failed to update profile")?;

    record_saved_profile(&mut session, &update, saved);
    ctx.output.success("Profile updated");
    match session.user() {
        Some(user) => ctx.output.write(user),
        None => Ok(()),
    }
}

/// Merge the sent fields into the session user, then take the server's copy
/// when it is the same user.
fn record_saved_profile(session: &mut Session, update: &UserUpdate, saved: User) {
    session.update_user(update);
    if session.user().map(|u| u.id) == Some(saved.id) {
        session.set_user(Some(saved));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fields_become_partial_update() {
        let update: UserUpdate = ProfileFields {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        }
        .into();

        assert_eq!(update, UserUpdate::new().with_email("ada@example.com"));
    }

    fn user(value: serde_json::Value) -> User {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_saved_profile_replaces_session_user() {
        let mut session = Session::new();
        session.set_user(Some(user(serde_json::json!({
            "id": 7, "username": "ada", "email": "old@example.com"
        }))));
        let update = UserUpdate::new().with_email("ada@example.com");
        let saved = user(serde_json::json!({
            "id": 7, "username": "ada", "email": "ada@example.com", "firstName": "Ada"
        }));

        record_saved_profile(&mut session, &update, saved.clone());

        assert_eq!(session.user(), Some(&saved));
    }

    #[test]
    fn test_saved_profile_for_other_user_keeps_merge() {
        let mut session = Session::new();
        session.set_user(Some(user(serde_json::json!({"id": 7, "username": "ada"}))));
        let update = UserUpdate::new().with_email("ada@example.com");

        record_saved_profile(
            &mut session,
            &update,
            user(serde_json::json!({"id": 8, "username": "someone"})),
        );

        let current = session.user().unwrap();
        assert_eq!(current.id, 7);
        assert_eq!(current.email, "ada@example.com");
    }

    #[test]
    fn test_no_fields_is_empty_update() {
        let update: UserUpdate = ProfileFields::default().into();
        assert!(update.is_empty());
    }
}
