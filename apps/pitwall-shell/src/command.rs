//! # Commands
//!
//! Typed commands: the shell's equivalent of clicks and keystrokes.
//!
//! | Command | Storefront equivalent |
//! |---|---|
//! | `home` | header logo |
//! | `go <page>` | any navigation link |
//! | `category <id>` | category tile on the home page |
//! | `search [text]` | search box (empty text clears it) |
//! | `view <product-id>` | product card |
//! | `add <product-id>` | ADD TO CART |
//! | `qty <product-id> <n>` | quantity input (n <= 0 removes) |
//! | `inc` / `dec <product-id>` | `+` / `-` buttons in the cart |
//! | `remove <product-id>` | remove button |
//! | `clear` | empty cart |
//! | `auth <trigger>` | auth links and buttons |
//! | `email` / `otp` / `password <value>` | auth inputs |
//! | `show` | re-render without changing state |

use std::str::FromStr;

use pitwall_core::{AuthField, AuthTrigger, PageId};

use crate::error::{ShellError, ShellResult};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Go(PageId),
    Category(String),
    Search(String),
    View(String),
    Add(String),
    Quantity { item_id: String, quantity: i64 },
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
    Auth(AuthTrigger),
    Field { field: AuthField, value: String },
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> ShellResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "home" => Command::Home,
            "go" | "nav" => Command::Go(PageId::from_str(required(rest, "go", "a page")?)?),
            "cart" => Command::Go(PageId::Cart),
            "checkout" => Command::Go(PageId::Checkout),
            "category" | "cat" => Command::Category(required(rest, "category", "a category id")?.to_string()),
            "search" => Command::Search(rest.to_string()),
            "view" => Command::View(single(rest, "view")?),
            "add" => Command::Add(single(rest, "add")?),
            "qty" | "quantity" => parse_quantity(rest)?,
            "inc" | "+" => Command::Increment(single(rest, "inc")?),
            "dec" | "-" => Command::Decrement(single(rest, "dec")?),
            "remove" | "rm" => Command::Remove(single(rest, "remove")?),
            "clear" => Command::Clear,
            "auth" => Command::Auth(AuthTrigger::from_str(required(rest, "auth", "a trigger")?)?),
            "email" => field(AuthField::Email, rest, "email")?,
            "otp" => field(AuthField::Otp, rest, "otp")?,
            "password" => field(AuthField::NewPassword, rest, "password")?,
            "show" | "render" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ShellError::UnknownCommand(word.to_string())),
        };

        Ok(Some(command))
    }

    /// One-line-per-command usage text.
    pub fn help_text() -> String {
        let triggers: Vec<&str> = AuthTrigger::ALL.iter().map(AuthTrigger::as_str).collect();
        [
            "Commands:".to_string(),
            "  home | go <page> | cart | checkout".to_string(),
            "  category <id>            open a category".to_string(),
            "  search [text]            filter the category page".to_string(),
            "  view <product-id>        open a product page".to_string(),
            "  add <product-id>         add one to the cart".to_string(),
            "  qty <product-id> <n>     set quantity (<= 0 removes)".to_string(),
            "  inc | dec <product-id>   +1 / -1".to_string(),
            "  remove <product-id> | clear".to_string(),
            format!("  auth <{}>", triggers.join("|")),
            "  email | otp | password <value>".to_string(),
            "  show | help | quit".to_string(),
            format!(
                "Pages: {}",
                PageId::ALL
                    .iter()
                    .map(PageId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ]
        .join("\n")
    }
}

fn required<'a>(rest: &'a str, command: &'static str, argument: &'static str) -> ShellResult<&'a str> {
    if rest.is_empty() {
        return Err(ShellError::MissingArgument { command, argument });
    }
    Ok(rest)
}

/// Exactly one product id.
fn single(rest: &str, command: &'static str) -> ShellResult<String> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(id), None) => Ok(id.to_string()),
        (None, _) => Err(ShellError::MissingArgument {
            command,
            argument: "a product id",
        }),
        (Some(_), Some(_)) => Err(ShellError::InvalidArgument {
            argument: "product id",
            value: rest.to_string(),
        }),
    }
}

fn parse_quantity(rest: &str) -> ShellResult<Command> {
    let mut words = rest.split_whitespace();
    let (Some(item_id), Some(raw)) = (words.next(), words.next()) else {
        return Err(ShellError::MissingArgument {
            command: "qty",
            argument: "a product id and a quantity",
        });
    };

    let quantity = raw.parse::<i64>().map_err(|_| ShellError::InvalidArgument {
        argument: "quantity",
        value: raw.to_string(),
    })?;

    Ok(Command::Quantity {
        item_id: item_id.to_string(),
        quantity,
    })
}

fn field(field: AuthField, rest: &str, command: &'static str) -> ShellResult<Command> {
    Ok(Command::Field {
        field,
        value: required(rest, command, "a value")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# open the cart").unwrap(), None);
    }

    #[test]
    fn test_search_keeps_whole_remainder() {
        assert_eq!(
            Command::parse("search  Racing Tee ").unwrap(),
            Some(Command::Search("Racing Tee".to_string()))
        );
        assert_eq!(
            Command::parse("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn test_single_rejects_extra_words() {
        let err = Command::parse("add tee-1 tee-2").unwrap_err();
        assert!(matches!(err, ShellError::InvalidArgument { .. }));
    }
}
