use tabled::Tabled;
use tracing::debug;

use crate::client::Api;
use crate::error::{DidError, Result};
use crate::output;
use crate::responses::TeamsResponse;
use crate::types::Team;

const TEAMS_PATH: &str = "teams/";

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Short name")]
    short_name: String,
}

impl From<&Team> for TeamRow {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            short_name: team.short_name.clone(),
        }
    }
}

/// Fetch the caller's teams in server order.
///
/// An empty list is reported as [`DidError::NoTeams`], which the top-level
/// handler treats as a successful exit.
pub async fn list_teams<A: Api>(api: &A) -> Result<Vec<Team>> {
    let body = api.get(TEAMS_PATH, "").await?.expect(200)?;
    let response: TeamsResponse = serde_json::from_value(body)?;

    if response.results.is_empty() {
        return Err(DidError::NoTeams);
    }

    debug!("caller is on {} team(s)", response.results.len());
    Ok(response.results)
}

/// Map a team display name to the short identifier the API expects.
pub async fn resolve_team<A: Api>(api: &A, name: &str) -> Result<String> {
    let teams = list_teams(api).await?;
    let short_name = find_short_name(&teams, name)?;
    debug!("resolved team {name:?} to {short_name:?}");
    Ok(short_name)
}

/// Exact, case-sensitive match on the display name.
fn find_short_name(teams: &[Team], name: &str) -> Result<String> {
    teams
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.short_name.clone())
        .ok_or_else(|| DidError::TeamNotFound(name.to_string()))
}

pub async fn list<A: Api>(api: &A) -> Result<()> {
    let teams = list_teams(api).await?;

    if !output::is_json_output() {
        println!("{}", output::title("Teams:"));
    }
    output::print_table(&teams, |t| TeamRow::from(t));

    Ok(())
}
