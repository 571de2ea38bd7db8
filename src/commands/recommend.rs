//! Recommendation command handler
//!
//! Submits a budget/use-case query and renders the recommended build,
//! optionally saving and rating it in the same invocation.

use crate::api::Recommendation;
use crate::config::Config;
use crate::error::Result;
use crate::workflow::{BuildQuery, BuildWorkflow, UseCase};

use prettytable::{row, Table};

/// Run a recommendation query
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `budget` - Build budget, minimum 100
/// * `use_case` - Build use case; gaming requires `game`
/// * `game` - Game title used as the query term for gaming builds
/// * `save` - Save the recommended build after display
/// * `rate` - Rate the recommended build after display (1-5)
pub async fn run_recommend(
    config: Config,
    budget: u32,
    use_case: UseCase,
    game: Option<String>,
    save: bool,
    rate: Option<u8>,
) -> Result<()> {
    let notifier = super::notifier();
    let session = super::session_manager(&config, notifier.clone());
    session.initialize()?;

    let api = super::api_client(&config)?;
    let mut workflow = BuildWorkflow::new(api, session.clone(), notifier);

    // Load the saved list up front when authenticated so the save
    // idempotency check has a snapshot to consult.
    if session.current().is_authenticated() {
        workflow.refresh_saved().await?;
    }

    let query = BuildQuery {
        budget,
        use_case,
        game,
    };
    let recommendation = workflow.recommend(&query).await?;
    render_recommendation(recommendation);

    if save {
        workflow.save_current().await?;
    }
    if let Some(value) = rate {
        workflow.select_rating(value)?;
        workflow.submit_rating().await?;
    }
    Ok(())
}

/// Render a recommended build as a component table
fn render_recommendation(recommendation: &Recommendation) {
    let build = &recommendation.recommended_build;

    let mut table = Table::new();
    table.add_row(row!["Build", build.build_id]);
    table.add_row(row!["CPU", build.cpu_name]);
    table.add_row(row!["GPU", build.gpu_name]);
    table.add_row(row!["Motherboard", build.motherboard_name]);
    table.add_row(row!["RAM", build.ram_name]);
    table.add_row(row!["Storage", build.storage_name]);
    table.add_row(row!["Power Supply", build.psu_name]);
    table.add_row(row!["Case", build.case_name]);
    table.add_row(row![
        "Total Cost",
        format!("${:.2}", recommendation.total_cost)
    ]);
    table.printstd();
}
