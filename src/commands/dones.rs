use colored::Colorize;
use serde_json::json;
use tabled::Tabled;
use tracing::{debug, info};

use crate::cli::{DoArgs, DoneListArgs};
use crate::client::Api;
use crate::commands::{interactive, teams};
use crate::config::Config;
use crate::error::{DidError, Result};
use crate::filter::{page_count, DoneFilter};
use crate::output;
use crate::responses::{error_detail, CreatedDoneResponse};
use crate::types::{Done, DoneListPage, GOAL_MARKER};

const DONES_PATH: &str = "dones/";

#[derive(Tabled)]
struct DoneRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Text")]
    text: String,
}

impl From<&Done> for DoneRow {
    fn from(done: &Done) -> Self {
        Self {
            date: output::format_date(&done.done_date),
            owner: done.owner.clone(),
            team: done.team.clone().unwrap_or_default(),
            text: output::truncate(&done.raw_text, 60),
        }
    }
}

/// Text actually submitted: goals always get the marker prepended, even if
/// the text already starts with it.
pub fn submitted_text(text: &str, is_goal: bool) -> String {
    if is_goal {
        format!("{GOAL_MARKER} {text}")
    } else {
        text.to_string()
    }
}

/// Create exactly one done for `team` (a short identifier).
///
/// Not idempotent, so never retried.
pub async fn create_done<A: Api>(api: &A, team: &str, text: &str, is_goal: bool) -> Result<Done> {
    let body = json!({
        "raw_text": submitted_text(text, is_goal),
        "team": team,
    });

    let body = api.post(DONES_PATH, &body).await?.expect(201)?;
    let response: CreatedDoneResponse = serde_json::from_value(body)?;

    info!("created done for {team}");
    Ok(response.result)
}

/// Fetch one page of dones; `query` comes from [`DoneFilter::to_query`].
pub async fn fetch_dones<A: Api>(api: &A, query: &str) -> Result<DoneListPage> {
    let response = api.get(DONES_PATH, query).await?;

    let body = match response.status {
        200 => response.into_ok_body()?,
        400 => {
            return Err(DidError::InvalidFilter {
                detail: error_detail(&response.body),
            })
        }
        404 => return Err(DidError::PageNotFound),
        status => return Err(DidError::Unauthorized { status }),
    };

    Ok(serde_json::from_value(body)?)
}

/// Resolve the team filter (if any), then fetch the requested page.
pub async fn list_dones<A: Api>(
    api: &A,
    team_name: Option<&str>,
    mut filter: DoneFilter,
) -> Result<(DoneFilter, DoneListPage)> {
    if let Some(name) = team_name {
        filter.team = Some(teams::resolve_team(api, name).await?);
    }

    let query = filter.to_query();
    debug!("listing dones with query {query:?}");
    let page = fetch_dones(api, &query).await?;

    Ok((filter, page))
}

pub fn filter_from_args(args: &DoneListArgs) -> DoneFilter {
    DoneFilter {
        team: None,
        owner: args.owner.clone(),
        done_date: args.done_date,
        done_date_after: args.done_after,
        done_date_before: args.done_before,
        tags: args.tags.clone(),
        order_by: args.sort_by.clone(),
        page_size: args.limit,
        page: args.page,
    }
}

/// Footer line for a non-empty page, e.g. `Page 1 of 3 (25 dones)`.
pub fn page_summary(filter: &DoneFilter, count: u64) -> String {
    let pages = page_count(count, filter.page_size_or_default());
    let noun = if count == 1 { "done" } else { "dones" };
    format!(
        "Page {} of {} ({} {})",
        filter.page_or_default(),
        pages,
        count,
        noun
    )
}

pub async fn list<A: Api>(api: &A, config: &Config, args: DoneListArgs) -> Result<()> {
    let team = config.resolve_team(args.team.as_deref());
    let filter = filter_from_args(&args);

    let (filter, page) = list_dones(api, team.as_deref(), filter).await?;

    output::print_item(&page, |page| {
        if page.count == 0 {
            output::print_warning("No dones found");
            return;
        }
        output::print_table(&page.results, |d| DoneRow::from(d));
        println!("{}", page_summary(&filter, page.count));
    });

    Ok(())
}

pub fn print_created(done: &Done, team_name: &str) {
    output::print_item(done, |done| {
        let heading = if done.is_goal() {
            "Your goal was created!"
        } else {
            "Your done was created!"
        };
        println!("{}", heading.green().underline());
        println!(
            "{}",
            output::success(&format!(
                "Created for \"{}\" in the team \"{team_name}\" on {}",
                done.owner,
                output::format_date(&done.done_date)
            ))
        );
        println!("{}", output::success(&format!("Text: {}", done.raw_text)));
    });
}

/// `did do <team> [task]`, or an interactive session with `--interactive`.
pub async fn run_do<A: Api>(api: &A, args: DoArgs, is_goal: bool, interactive: bool) -> Result<()> {
    let task = match (&args.task, interactive) {
        (_, true) => None,
        (Some(task), false) if !task.trim().is_empty() => Some(task.clone()),
        _ => return Err(DidError::MissingTask),
    };

    let team = teams::resolve_team(api, &args.team).await?;

    match task {
        Some(task) => {
            let done = create_done(api, &team, &task, is_goal).await?;
            print_created(&done, &args.team);
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let session = interactive::Session {
                team: &team,
                team_name: &args.team,
                is_goal,
            };
            session.run(api, stdin).await?;
        }
    }

    Ok(())
}
