//! # Commands
//!
//! The line-oriented command loop that drives the storefront.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► Command::from_str ──► execute(&Storefront) ──► stdout  │
//! │                      │                      │                           │
//! │                      └──── CommandError ────┴──► "! message", continue │
//! │                                                                         │
//! │  Catalog card            Cart panel row          Page                   │
//! │  ────────────            ──────────────          ────                   │
//! │  inc <id>                cart-inc <id>           list                   │
//! │  dec <id>                cart-dec <id>           cart                   │
//! │  qty <id> <value>        cart-qty <id> <value>   clear                  │
//! │  toggle <id>             remove <id>             config / help / quit   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::error::{AppError, AppResult, CommandError};
use crate::storefront::Storefront;
use crate::view::{text, CardAction};

pub const HELP: &str = "\
Commands:
  list                   show the catalog
  cart                   show the cart
  inc <id>               increase a card's quantity
  dec <id>               decrease a card's quantity
  qty <id> <value>       type a card's quantity
  toggle <id>            add the product to the cart or remove it
  cart-inc <id>          increase a cart line
  cart-dec <id>          decrease a cart line (removes it at 1)
  cart-qty <id> <value>  type a cart line quantity (0 or text removes it)
  remove <id>            remove a cart line
  clear                  empty the cart
  config                 show the configuration
  help                   show this text
  quit                   exit";

const PROMPT: &str = "> ";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Cart,
    Increase(String),
    Decrease(String),
    SetQuantity { id: String, value: String },
    Toggle(String),
    CartIncrease(String),
    CartDecrease(String),
    CartSetQuantity { id: String, value: String },
    Remove(String),
    Clear,
    Config,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();

        let mut id = |command: &'static str| {
            words
                .next()
                .map(str::to_string)
                .ok_or(CommandError::MissingArgument {
                    command,
                    argument: "product id",
                })
        };

        let command = match name {
            "list" | "ls" => Command::List,
            "cart" => Command::Cart,
            "inc" => Command::Increase(id("inc")?),
            "dec" => Command::Decrease(id("dec")?),
            "toggle" => Command::Toggle(id("toggle")?),
            "cart-inc" => Command::CartIncrease(id("cart-inc")?),
            "cart-dec" => Command::CartDecrease(id("cart-dec")?),
            "remove" | "rm" => Command::Remove(id("remove")?),
            "qty" | "cart-qty" => {
                let command = if name == "qty" { "qty" } else { "cart-qty" };
                let id = id(command)?;
                let value = quantity_argument(line, command)?;
                if command == "qty" {
                    Command::SetQuantity { id, value }
                } else {
                    Command::CartSetQuantity { id, value }
                }
            }
            "clear" => Command::Clear,
            "config" => Command::Config,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Everything after the command name and id, so typed values keep their
/// inner spaces.
fn quantity_argument(line: &str, command: &'static str) -> Result<String, CommandError> {
    let value = line
        .split_whitespace()
        .skip(2)
        .collect::<Vec<_>>()
        .join(" ");
    if value.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "quantity",
        });
    }
    Ok(value)
}

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Runs one command against the storefront.
pub fn execute(store: &Storefront, command: Command) -> AppResult<Outcome> {
    debug!(?command, "executing command");

    let output = match command {
        Command::List => store.render_catalog(),
        Command::Cart => store.render_cart(),

        Command::Increase(id) => {
            let card = store.card(&id)?;
            card.increase();
            card.render(store.config())
        }
        Command::Decrease(id) => {
            let card = store.card(&id)?;
            card.decrease();
            card.render(store.config())
        }
        Command::SetQuantity { id, value } => {
            let card = store.card(&id)?;
            card.set_quantity(value.as_str());
            card.render(store.config())
        }
        Command::Toggle(id) => {
            let card = store.card(&id)?;
            match card.toggle() {
                CardAction::Added { cart_total_cents } => format!(
                    "{} {} {}",
                    text::ITEM_ADDED,
                    text::CART_TOTAL,
                    store.config().format_currency(cart_total_cents)
                ),
                CardAction::Removed => text::ITEM_REMOVED.to_string(),
            }
        }

        Command::CartIncrease(id) => {
            store.panel().increase(&id)?;
            store.render_cart()
        }
        Command::CartDecrease(id) => {
            store.panel().decrease(&id)?;
            store.render_cart()
        }
        Command::CartSetQuantity { id, value } => {
            store.panel().set_quantity(&id, value.as_str())?;
            store.render_cart()
        }
        Command::Remove(id) => {
            store.panel().remove(&id);
            store.render_cart()
        }
        Command::Clear => {
            store.panel().clear();
            store.render_cart()
        }

        Command::Config => serde_json::to_string_pretty(store.config())?,
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(output))
}

/// Reads commands from `input` until EOF or `quit`, writing views to
/// `output`. Command errors are printed and the loop continues.
pub fn repl<R, W>(store: &Storefront, input: R, mut output: W) -> AppResult<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}\n", store.render_catalog())?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
            continue;
        }

        let result = line
            .parse::<Command>()
            .map_err(AppError::from)
            .and_then(|command| execute(store, command));

        match result {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => writeln!(output, "{}", text)?,
            Err(AppError::Command(err)) => writeln!(output, "! {}", err)?,
            Err(err) => return Err(err),
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    Ok(())
}
