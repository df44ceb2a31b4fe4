//! Parsing of interactive terminal input into flow actions.
//!
//! One line is one command. Verbs are case-insensitive; `set` takes the field
//! wire name followed by the rest of the line as the value, so multi-word values
//! such as `third party` need no quoting.
use std::str::FromStr;

use cover_common::{FlowAction, QuoteError};

/// Text shown for `help`.
pub const HELP: &str = "\
Commands:
  start                  open the quote form
  set <field> <value>    edit a form field, e.g. `set bodyType pick-up`
  submit                 calculate the quote
  cancel                 close the form
  another                discard the quote and start over
  buy                    purchase the shown quote
  home                   return to the landing page
  show                   print the current view
  help                   print this text
  quit                   exit";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Forward to the quote flow.
    Flow(FlowAction),
    /// Re-render the current view.
    Show,
    /// Print the command list.
    Help,
    /// Leave the client.
    Quit,
}

impl FromStr for ClientCommand {
    type Err = QuoteError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" | "quote" => ClientCommand::Flow(FlowAction::StartQuote),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(QuoteError::UnknownCommand(line.to_string()));
                }
                ClientCommand::Flow(FlowAction::UpdateField {
                    name: name.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "submit" | "calculate" => ClientCommand::Flow(FlowAction::Submit),
            "cancel" => ClientCommand::Flow(FlowAction::Cancel),
            "another" => ClientCommand::Flow(FlowAction::AnotherQuote),
            "buy" | "purchase" => ClientCommand::Flow(FlowAction::Purchase),
            "home" => ClientCommand::Flow(FlowAction::ReturnHome),
            "show" => ClientCommand::Show,
            "help" | "?" => ClientCommand::Help,
            "quit" | "exit" => ClientCommand::Quit,
            _ => return Err(QuoteError::UnknownCommand(line.to_string())),
        };
        Ok(command)
    }
}
