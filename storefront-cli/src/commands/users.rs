//! User management commands

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use comfy_table::Cell;
use storefront_sdk::{PageRequest, User};

use crate::commands::{confirm, next_page_hint, with_spinner};
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, TableDisplay};

/// User management commands
#[derive(Debug, Args)]
pub struct UsersCommands {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersSubcommand {
    /// List one page of users
    List {
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Users per page
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show user details
    Get {
        /// User ID
        id: u64,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: u64,

        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Execute user commands
pub async fn execute(ctx: &Context, cmd: UsersCommands) -> Result<()> {
    match cmd.command {
        UsersSubcommand::List { page, limit } => list(ctx, page, limit).await,
        UsersSubcommand::Get { id } => get(ctx, id).await,
        UsersSubcommand::Delete { id, force } => delete(ctx, id, force).await,
    }
}

async fn list(ctx: &Context, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    let client = ctx.create_client()?;
    let request = PageRequest {
        page,
        page_size: Some(ctx.page_size(limit)),
    };

    let page = with_spinner(ctx, "Fetching users...", client.users().list(request))
        .await
        .context("Request failed")?
        .into_result()
        .context("Failed to list users")?;

    ctx.output
        .write_page(&page, &["ID", "Username", "Name", "Email", "Role"])?;
    next_page_hint(ctx, &page.pagination);
    Ok(())
}

async fn get(ctx: &Context, id: u64) -> Result<()> {
    let client = ctx.create_client()?;
    let user = with_spinner(ctx, "Fetching user...", client.users().get(id))
        .await
        .context("Request failed")?
        .into_result()
        .with_context(|| format!("Failed to fetch user {}", id))?;

    ctx.output.write(&user)
}

async fn delete(ctx: &Context, id: u64, force: bool) -> Result<()> {
    if !confirm(format!("Delete user {}?", id), force)? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let client = ctx.create_client()?;
    with_spinner(ctx, "Deleting user...", client.users().delete(id))
        .await
        .context("Request failed")?
        .into_result()
        .with_context(|| format!("Failed to delete user {}", id))?;

    ctx.output.success(&format!("Deleted user {}", id));
    Ok(())
}

impl TableDisplay for User {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.username),
            Cell::new(self.full_name()),
            Cell::new(&self.email),
            Cell::new(self.role.as_deref().unwrap_or("-")),
        ]
    }

    fn display_single(&self) {
        print_section("User");
        print_field("ID", &self.id.to_string());
        print_field("Username", &self.username);
        print_field("Name", &self.full_name());
        print_field("Email", &self.email);
        print_optional_field("Phone", self.phone.as_deref());
        print_optional_field("Role", self.role.as_deref());
        print_optional_field("Birth date", self.birth_date.as_deref());
        if let Some(age) = self.age {
            print_field("Age", &age.to_string());
        }

        if let Some(address) = &self.address {
            print_section("Address");
            print_field("Street", &address.address);
            print_field("City", &address.city);
            print_field("State", &address.state);
            print_field("Postal code", &address.postal_code);
            print_field("Country", &address.country);
        }

        if let Some(company) = &self.company {
            print_section("Company");
            print_field("Name", &company.name);
            print_field("Title", &company.title);
            print_field("Department", &company.department);
        }
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}", self.id, self.username, self.email);
    }
}
