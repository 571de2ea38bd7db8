//! Saved-build command handlers
//!
//! Listing, rating, and deletion of saved builds, plus the submitted-
//! ratings listing. All of these require an authenticated session.

use crate::api::SavedBuild;
use crate::config::Config;
use crate::error::{PcforgeError, Result};
use crate::workflow::{BuildWorkflow, Confirm, PresetConfirm, StdinConfirm};

use prettytable::{row, Table};

/// List the saved builds for the authenticated user
pub async fn list(config: Config) -> Result<()> {
    let mut workflow = workflow(&config)?;
    let builds = workflow.refresh_saved().await?;

    if builds.is_empty() {
        println!("No saved builds yet.");
        return Ok(());
    }
    render_saved_builds(builds);
    Ok(())
}

/// Rate a build by id
pub async fn rate(
    config: Config,
    build_id: String,
    rating: u8,
    comment: Option<String>,
) -> Result<()> {
    let mut workflow = workflow(&config)?;
    workflow.rate_build(&build_id, rating, comment).await
}

/// Delete a saved build behind a confirmation gate
///
/// `--yes` substitutes for the interactive prompt; either way the
/// destructive call is only issued after an explicit confirmation.
pub async fn delete(config: Config, build_id: String, yes: bool) -> Result<()> {
    let mut workflow = workflow(&config)?;
    let gate: Box<dyn Confirm> = if yes {
        Box::new(PresetConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };
    workflow.delete(&build_id, gate.as_ref()).await?;
    Ok(())
}

/// List the ratings the authenticated user has submitted
pub async fn ratings(config: Config) -> Result<()> {
    let notifier = super::notifier();
    let session = super::session_manager(&config, notifier);
    session.initialize()?;

    let token = match session.bearer_token()? {
        Some(token) => token,
        None => {
            return Err(PcforgeError::Authentication(
                "You must be logged in to view your ratings.".to_string(),
            )
            .into())
        }
    };

    let report = super::api_client(&config)?.my_ratings(&token).await?;
    if report.ratings.is_empty() {
        println!("No ratings submitted yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Build", "Rating", "Comment", "Submitted"]);
    for entry in &report.ratings {
        table.add_row(row![
            entry.build_id,
            entry.rating,
            entry.comment.as_deref().unwrap_or("-"),
            entry.timestamp
        ]);
    }
    table.printstd();
    Ok(())
}

/// Construct an initialized workflow for build operations
fn workflow(config: &Config) -> Result<BuildWorkflow> {
    let notifier = super::notifier();
    let session = super::session_manager(config, notifier.clone());
    session.initialize()?;
    let api = super::api_client(config)?;
    Ok(BuildWorkflow::new(api, session, notifier))
}

/// Render saved builds, one table per build
fn render_saved_builds(builds: &[SavedBuild]) {
    for saved in builds {
        let build = &saved.build;
        let mut table = Table::new();
        table.add_row(row!["Build", build.build_id]);
        table.add_row(row!["CPU", build.cpu_name]);
        table.add_row(row!["GPU", build.gpu_name]);
        table.add_row(row!["Motherboard", build.motherboard_name]);
        table.add_row(row!["RAM", build.ram_name]);
        table.add_row(row!["Storage", build.storage_name]);
        table.add_row(row!["Power Supply", build.psu_name]);
        table.add_row(row!["Case", build.case_name]);
        table.add_row(row!["Total Cost", format!("${:.2}", saved.total_cost)]);
        table.printstd();
    }
}
