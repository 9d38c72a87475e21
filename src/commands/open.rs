use std::process::{Command, Stdio};

use tracing::debug;
use url::Url;

use crate::client::Api;
use crate::commands::teams;
use crate::config::Config;
use crate::error::{DidError, Result};
use crate::output;

const WEB_ROOT: &str = "https://idonethis.com/t/";

/// Web page for a team short identifier.
pub fn team_url(short_name: &str) -> Result<Url> {
    let root = Url::parse(WEB_ROOT).map_err(|_| DidError::InvalidUrl(WEB_ROOT.to_string()))?;
    root.join(&format!("{short_name}/"))
        .map_err(|_| DidError::InvalidUrl(format!("{WEB_ROOT}{short_name}/")))
}

/// `did open [team]`: print the team's page and hand it to the platform opener.
pub async fn run<A: Api>(api: &A, config: &Config, team: Option<String>) -> Result<()> {
    let name = config
        .resolve_team(team.as_deref())
        .ok_or(DidError::NoTeam)?;
    let short_name = teams::resolve_team(api, &name).await?;
    let url = team_url(&short_name)?;

    output::print_message(&format!("Opening {url}"));

    if let Err(e) = launch(url.as_str()) {
        debug!("opener failed: {e}");
        output::print_warning("Could not launch a browser; open the URL above manually.");
    }

    Ok(())
}

fn launch(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_url() {
        assert_eq!(
            team_url("eng").unwrap().as_str(),
            "https://idonethis.com/t/eng/"
        );
    }

    #[test]
    fn test_team_url_escapes() {
        assert_eq!(
            team_url("a b").unwrap().as_str(),
            "https://idonethis.com/t/a%20b/"
        );
    }
}
