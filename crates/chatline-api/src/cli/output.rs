//! Rendering of response envelopes for the terminal.

use std::process::ExitCode;

use anyhow::Result;
use console::style;

use chatline_types::envelope::{Payload, ResponseEnvelope};

/// Global output flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

/// Print an envelope and map its status to the process exit code.
///
/// `success` is the one-line summary shown for a successful envelope without data.
pub fn render(envelope: &ResponseEnvelope, success: &str, mode: OutputMode) -> Result<ExitCode> {
    let code = if envelope.status {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if mode.json {
        println!("{}", serde_json::to_string_pretty(envelope)?);
        return Ok(code);
    }

    if !envelope.status {
        eprintln!("  {} {}", style("✗").red(), envelope.message);
        return Ok(code);
    }

    if mode.quiet {
        return Ok(code);
    }

    match &envelope.data {
        None => println!("  {} {success}", style("✓").green()),
        Some(Payload::Messages(messages)) => {
            if messages.is_empty() {
                println!("  {}", style("No messages.").dim());
            }
            for message in messages {
                println!(
                    "  {} {} {} {}: {}",
                    style(message.timestamp).dim(),
                    style(&message.sender).cyan(),
                    style("→").dim(),
                    style(&message.recipient).cyan(),
                    message.content
                );
            }
        }
        Some(Payload::Contacts(contacts)) => {
            if contacts.is_empty() {
                println!("  {}", style("No contacts.").dim());
            }
            for contact in contacts {
                println!(
                    "  {}  {}",
                    style(&contact.username).cyan(),
                    style(format!("last active {}", contact.last_activity)).dim()
                );
            }
        }
    }

    if let Some(total) = envelope.total {
        println!("  {}", style(format!("total: {total}")).dim());
    }

    Ok(code)
}
