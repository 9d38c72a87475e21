use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::client::Api;
use crate::commands::dones::{create_done, print_created};
use crate::error::Result;
use crate::output;

/// Entering this (after trimming) ends the session.
pub const SENTINEL: &str = "done";

#[derive(Debug, PartialEq)]
enum State {
    AwaitingInput,
    Submitting(String),
    Terminated,
}

#[derive(Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Read-submit loop creating one done per input line for a resolved team.
pub struct Session<'a> {
    /// Short identifier sent to the API.
    pub team: &'a str,
    /// Display name, only used for output.
    pub team_name: &'a str,
    pub is_goal: bool,
}

impl Session<'_> {
    pub async fn run<A, R>(&self, api: &A, mut input: R) -> Result<SessionSummary>
    where
        A: Api,
        R: AsyncBufRead + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut state = State::AwaitingInput;
        let mut line = String::new();

        output::print_message(&format!(
            "Logging dones for \"{}\". Type \"{SENTINEL}\" when you are finished.",
            self.team_name
        ));

        loop {
            state = match state {
                State::AwaitingInput => {
                    prompt()?;
                    line.clear();
                    if input.read_line(&mut line).await? == 0 {
                        debug!("input closed");
                        State::Terminated
                    } else {
                        State::Submitting(line.trim().to_string())
                    }
                }
                State::Submitting(entry) => self.submit(api, &entry, &mut summary).await?,
                State::Terminated => break,
            };
        }

        let mut message = format!(
            "Created {} done{}.",
            summary.created,
            if summary.created == 1 { "" } else { "s" }
        );
        if summary.skipped > 0 {
            message.push_str(&format!(
                " Skipped {} empty entr{}.",
                summary.skipped,
                if summary.skipped == 1 { "y" } else { "ies" }
            ));
        }
        output::print_message(&message);
        Ok(summary)
    }

    async fn submit<A: Api>(
        &self,
        api: &A,
        entry: &str,
        summary: &mut SessionSummary,
    ) -> Result<State> {
        if entry == SENTINEL {
            return Ok(State::Terminated);
        }

        if entry.is_empty() {
            summary.skipped += 1;
            output::print_warning("Nothing entered, nothing submitted.");
            return Ok(State::AwaitingInput);
        }

        let done = create_done(api, self.team, entry, self.is_goal).await?;
        print_created(&done, self.team_name);
        summary.created += 1;

        Ok(State::AwaitingInput)
    }
}

fn prompt() -> Result<()> {
    if !output::is_json_output() {
        print!("{} ", "did>".cyan().bold());
        std::io::stdout().flush()?;
    }
    Ok(())
}
