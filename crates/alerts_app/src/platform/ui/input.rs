use alerts_core::{Msg, ParamError, SearchParams};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  n                 next page
  p                 previous page
  g <offset>        jump to the page starting at <offset>
  o <n>             open hit <n> of the current page
  c                 close the open alert
  x                 export the alert on screen
  s [key=value ..]  start a new search
  show <id>         show alert <alert_id>:<index>
  h                 this help
  q                 quit";

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Search(SearchParams),
    Show(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?} (h for help)")]
    Unknown(String),
    #[error("{command} expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Param(#[from] ParamError),
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Msg(Msg::NoOp));
    };
    let rest: Vec<&str> = words.collect();

    let command = match head {
        "n" | "next" => Command::Msg(Msg::NextPage),
        "p" | "prev" => Command::Msg(Msg::PreviousPage),
        "g" | "goto" => {
            let offset = single_number(&rest).ok_or(InputError::BadArgument {
                command: "g",
                expected: "a result offset",
            })?;
            Command::Msg(Msg::PageSelected { offset })
        }
        "o" | "open" => {
            // Users count hits from 1.
            let index = single_number(&rest)
                .filter(|n| *n > 0)
                .and_then(|n| usize::try_from(n - 1).ok())
                .ok_or(InputError::BadArgument {
                    command: "o",
                    expected: "a hit number starting at 1",
                })?;
            Command::Msg(Msg::HitOpened { index })
        }
        "c" | "close" => Command::Msg(Msg::ModalClosed),
        "x" | "export" => Command::Msg(Msg::ExportRequested),
        "s" | "search" => Command::Search(SearchParams::from_pairs(rest)?),
        "show" => match rest.as_slice() {
            [id] => Command::Show((*id).to_string()),
            _ => {
                return Err(InputError::BadArgument {
                    command: "show",
                    expected: "one <alert_id>:<index> identifier",
                })
            }
        },
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn single_number(rest: &[&str]) -> Option<u64> {
    match rest {
        [value] => value.parse().ok(),
        _ => None,
    }
}
