//! # Session
//!
//! Owns the [`StateStore`] for one shell run and turns [`Command`]s into
//! store operations.
//!
//! Product ids typed by the user are resolved against the catalog before
//! anything is dispatched, so `add tee-99` is an error reported to the user
//! rather than a silent no-op.

use pitwall_core::{CoreError, Outcome, PageId, Product, StateStore};
use tracing::debug;

use crate::command::Command;
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A store operation ran. Applied operations have already produced a
    /// frame through the subscription.
    Done(Outcome),
    /// Print text without touching the store.
    Text(String),
    /// Re-render the current frame.
    Show,
    Quit,
}

pub struct Session {
    store: StateStore,
    config: ShellConfig,
}

impl Session {
    pub fn new(store: StateStore, config: ShellConfig) -> Self {
        Session { store, config }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Runs one command.
    pub fn execute(&mut self, command: Command) -> ShellResult<Reply> {
        debug!(?command, "execute");

        let outcome = match command {
            Command::Home => self.store.navigate_to(PageId::Home),
            Command::Go(page) => self.store.navigate_to(page),
            Command::Category(id) => {
                if self.store.get().categories.iter().all(|c| c.id != id) {
                    return Err(CoreError::CategoryNotFound(id).into());
                }
                self.store.open_category(&id)
            }
            Command::Search(query) => self.store.set_search_query(query),
            Command::View(id) => {
                let product = self.product(&id)?;
                self.store.select_product(product)
            }
            Command::Add(id) => {
                let product = self.product(&id)?;
                self.store.add_to_cart(product)
            }
            Command::Quantity { item_id, quantity } => {
                self.store.update_quantity(&item_id, quantity)
            }
            Command::Increment(id) => self.step_quantity(&id, 1)?,
            Command::Decrement(id) => self.step_quantity(&id, -1)?,
            Command::Remove(id) => self.store.remove_from_cart(&id),
            Command::Clear => self.store.clear_cart(),
            Command::Auth(trigger) => self.store.advance_auth_step(trigger),
            Command::Field { field, value } => self.store.set_auth_field(field, value),
            Command::Show => return Ok(Reply::Show),
            Command::Help => return Ok(Reply::Text(Command::help_text())),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Done(outcome))
    }

    fn product(&self, id: &str) -> ShellResult<Product> {
        self.store
            .get()
            .find_product(id)
            .cloned()
            .ok_or_else(|| ShellError::Core(CoreError::ProductNotFound(id.to_string())))
    }

    /// The cart's `+` / `-` buttons: current quantity plus `delta`.
    fn step_quantity(&mut self, item_id: &str, delta: i64) -> ShellResult<Outcome> {
        let current = self
            .store
            .get()
            .cart
            .get(item_id)
            .map(|item| item.quantity)
            .ok_or_else(|| ShellError::InvalidArgument {
                argument: "cart item",
                value: item_id.to_string(),
            })?;

        Ok(self.store.update_quantity(item_id, current.saturating_add(delta)))
    }
}
