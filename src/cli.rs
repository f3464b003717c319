#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::fmt::Write;

use clap::{Parser, Subcommand};
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};
use crate::models::Message;
use crate::session::{Session, StreamingEngine};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"Manage the conversations of a local chat client

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/chatty-sessions/config.toml
    * $HOME/.config/chatty-sessions/config.toml
    * $HOME/.chatty-sessions.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Action {
    /// List conversations, the active one is marked with `*`
    List,
    /// Start a new conversation and make it active
    New,
    /// Make a conversation active
    Select { id: String },
    /// Delete a conversation
    Delete { id: String },
    /// Print the transcript of a conversation, the active one by default
    Show { id: Option<String> },
    /// Send a message in the active conversation
    Send { text: String },
    /// Record how long a reply took, in milliseconds
    Duration { message_id: String, ms: f64 },
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        if config_path.is_empty() {
            // No config path is specified just use the default config
            return Ok(Configuration::default());
        }
        Ok(load_configuration(config_path.as_str()).wrap_err("loading configuration")?)
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }

    pub fn action(&self) -> Action {
        self.action.clone().unwrap_or(Action::List)
    }
}

impl Action {
    /// Applies the action to an initialized session and renders the result.
    pub fn run<E: StreamingEngine>(&self, session: &mut Session<E>) -> Result<String> {
        match self {
            Action::List => Ok(render_list(session)),
            Action::New => Ok(session.new_conversation()),
            Action::Select { id } => {
                if !session.select_conversation(id) {
                    eyre::bail!("conversation {} not found", id);
                }
                Ok(format!("selected {}", id))
            }
            Action::Delete { id } => {
                if !session.delete_conversation(id) {
                    eyre::bail!("conversation {} not found", id);
                }
                Ok(format!(
                    "deleted {}, active: {}",
                    id,
                    session.active_id().unwrap_or("none")
                ))
            }
            Action::Show { id: None } => Ok(render_transcript(&session.messages())),
            Action::Show { id: Some(id) } => {
                let convo = session
                    .conversation(id)
                    .ok_or_else(|| eyre::eyre!("conversation {} not found", id))?;
                Ok(render_transcript(convo.messages()))
            }
            Action::Send { text } => {
                session.send(text);
                Ok(render_transcript(&session.messages()))
            }
            Action::Duration { message_id, ms } => {
                if !session.record_duration(message_id, *ms) {
                    eyre::bail!("invalid duration {}", ms);
                }
                Ok(format!("{} took {}ms", message_id, ms))
            }
        }
    }
}

fn render_list<E: StreamingEngine>(session: &Session<E>) -> String {
    let active = session.active_id();
    let mut out = String::new();
    for summary in session.conversations() {
        let marker = if active == Some(summary.id.as_str()) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {}  {}", marker, summary.id, summary.display_title());
    }
    out.trim_end().to_string()
}

fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            message.id(),
            message.role().as_str(),
            message.text().unwrap_or("")
        );
    }
    out.trim_end().to_string()
}
