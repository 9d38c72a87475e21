use std::io::{self, BufRead, Write};

use crate::cli::ConfigArgs;
use crate::config::{Config, ConfigKey};
use crate::error::Result;
use crate::output;

/// `did config`: persist the token and/or default team.
///
/// With no values on the command line the user is prompted for both;
/// an empty answer keeps the current value.
pub fn run(config: &mut Config, api_token: Option<&str>, args: ConfigArgs) -> Result<()> {
    if args.show {
        show(config);
        return Ok(());
    }

    let mut updates: Vec<(ConfigKey, String)> = Vec::new();
    if let Some(token) = api_token {
        updates.push((ConfigKey::ApiToken, token.to_string()));
    }
    if let Some(team) = args.default_team {
        updates.push((ConfigKey::DefaultTeam, team));
    }

    if updates.is_empty() {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        println!("{}", output::title("did configuration"));
        for key in [ConfigKey::ApiToken, ConfigKey::DefaultTeam] {
            if let Some(answer) = ask(&mut input, key, config.get(key))? {
                updates.push((key, answer));
            }
        }
    }

    for (key, value) in &updates {
        config.set(*key, value);
    }

    let path = config.save()?;
    output::print_message(&format!("Config saved to {}", path.display()));

    Ok(())
}

fn ask(input: &mut impl BufRead, key: ConfigKey, current: Option<&str>) -> Result<Option<String>> {
    let shown = match (key, current) {
        (_, None) => "unset".to_string(),
        (ConfigKey::ApiToken, Some(token)) => mask(token),
        (ConfigKey::DefaultTeam, Some(team)) => team.to_string(),
    };
    print!("{key} [{shown}]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();

    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn show(config: &Config) {
    let token = config.api_token.as_deref().map(mask);
    if output::is_json_output() {
        let value = serde_json::json!({
            "apiToken": token,
            "defaultTeam": config.default_team,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }
    println!("{}: {}", ConfigKey::ApiToken, token.as_deref().unwrap_or("-"));
    println!(
        "{}: {}",
        ConfigKey::DefaultTeam,
        config.default_team.as_deref().unwrap_or("-")
    );
}

/// Keep only the last four characters of a token visible.
fn mask(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("****{tail}")
}
