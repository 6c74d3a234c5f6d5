//! # Storefront REPL
//!
//! Line-oriented front end: one command per line, one reply per command.
//!
//! ```text
//! > menu
//! Burgers (burger.jpg)
//!   [1] Cheeseburger - 5.50€
//! Pizzas (pizza.jpg)
//!   (nothing here)
//! catalog: loaded (1 products)
//! > add 1
//! ...
//! > pay
//! redirect: https://checkout.stripe.com/c/pay/cs_test_...
//! ```
//!
//! Parsing is pure ([`parse`]); execution only goes through the commands.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands;
use crate::error::ApiError;
use crate::Storefront;
use fastfood_client::LoginForm;

pub const PROMPT: &str = "> ";

pub const HELP: &str = "\
commands:
  menu                       show the catalog by category
  add <product-id>           add a product to the cart
  cart                       show the cart
  user <email> [name]        set the session user
  user clear                 clear the session user
  login <email> [password]   log in and store the token
  pay                        start the hosted checkout
  status                     show loading status
  config                     show the configuration
  help                       show this help
  quit                       leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Menu,
    Add(String),
    Cart,
    SetUser { email: String, name: Option<String> },
    ClearUser,
    Login { email: String, password: String },
    Pay,
    Status,
    Config,
    Help,
    Quit,
}

/// Parses one input line.
///
/// `login` takes everything after the email as the password, so passwords may
/// contain spaces. Both login fields may be empty.
pub fn parse(line: &str) -> Result<ReplCommand, ApiError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Empty,
        "menu" | "catalog" => ReplCommand::Menu,
        "add" => {
            if rest.is_empty() {
                return Err(ApiError::validation("usage: add <product-id>"));
            }
            ReplCommand::Add(rest.to_string())
        }
        "cart" => ReplCommand::Cart,
        "user" => match rest.split_once(char::is_whitespace) {
            _ if rest.is_empty() => {
                return Err(ApiError::validation("usage: user <email> [name] | user clear"))
            }
            _ if rest == "clear" => ReplCommand::ClearUser,
            Some((email, name)) => ReplCommand::SetUser {
                email: email.to_string(),
                name: Some(name.trim().to_string()),
            },
            None => ReplCommand::SetUser {
                email: rest.to_string(),
                name: None,
            },
        },
        "login" => {
            let (email, password) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ReplCommand::Login {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "pay" => ReplCommand::Pay,
        "status" => ReplCommand::Status,
        "config" => ReplCommand::Config,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "unknown command '{}' (try help)",
                other
            )))
        }
    };
    Ok(command)
}

/// Runs one command and returns the text to print.
pub async fn execute(storefront: &Storefront, command: ReplCommand) -> Result<String, ApiError> {
    let sf = storefront;
    let out = match command {
        ReplCommand::Empty | ReplCommand::Quit => String::new(),
        ReplCommand::Menu => commands::catalog::get_menu(&sf.catalog, &sf.config).to_string(),
        ReplCommand::Add(id) => {
            commands::cart::add_to_cart(&sf.store, &sf.catalog, &sf.config, &id)?.to_string()
        }
        ReplCommand::Cart => commands::cart::get_cart(&sf.store, &sf.config).to_string(),
        ReplCommand::SetUser { email, name } => {
            commands::cart::set_user(&sf.store, &email, name.as_deref()).to_string()
        }
        ReplCommand::ClearUser => commands::cart::clear_user(&sf.store).to_string(),
        ReplCommand::Login { email, password } => {
            let form = LoginForm::new(email, password);
            commands::auth::login(&sf.auth, &form).await?.to_string()
        }
        ReplCommand::Pay => commands::checkout::pay(&sf.checkout).await?.to_string(),
        ReplCommand::Status => {
            commands::status::get_status(&sf.store, &sf.catalog, &sf.checkout, &sf.auth).to_string()
        }
        ReplCommand::Config => commands::config::get_config(&sf.config)?,
        ReplCommand::Help => HELP.to_string(),
    };
    Ok(out)
}

/// Reads commands from `input` until `quit` or end of input.
pub async fn run<R, W>(storefront: &Storefront, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(b"fast food storefront - type 'help' for commands\n").await?;
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        debug!(line = %line.trim(), "REPL input");

        let reply = match parse(&line) {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => execute(storefront, command).await,
            Err(e) => Err(e),
        };

        match reply {
            Ok(text) if text.is_empty() => {}
            Ok(text) => {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            Err(e) => {
                output.write_all(format!("error {}\n", e).as_bytes()).await?;
            }
        }
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }

    output.write_all(b"bye\n").await?;
    output.flush().await
}
