//! Subcommand implementations

pub mod auth;
pub mod config;
pub mod products;
pub mod profile;
pub mod users;

use anyhow::{Context as _, Result};
use std::future::Future;
use storefront_sdk::Pagination;

use crate::context::Context;
use crate::output::{finish_spinner, OutputFormat};

/// Run a request with a spinner shown while it is in flight
pub(crate) async fn with_spinner<F: Future>(ctx: &Context, message: &str, request: F) -> F::Output {
    let spinner = ctx.output.spinner(message);
    let result = request.await;
    finish_spinner(spinner);
    result
}

/// Ask before a destructive action unless `force` is set
pub(crate) fn confirm(prompt: String, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to get confirmation")
}

/// Point at the next page when a table listing is not the last page
pub(crate) fn next_page_hint(ctx: &Context, pagination: &Pagination) {
    if ctx.output.format() == OutputFormat::Table && pagination.has_next() {
        ctx.output
            .info(&format!("More results: --page {}", pagination.current_page + 1));
    }
}
