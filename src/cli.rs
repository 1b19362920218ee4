mod account;
mod guest;
mod host;
mod session;
mod store;

use clap::{Parser, Subcommand};

use crate::{
    cli::{account::AccountArgs, guest::GuestArgs, host::HostArgs, store::StoreArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        let db = self.store.open()?;
        match self.command {
            Command::Account(args) => args.run(&db),
            Command::Host(args) => args.run(&db),
            Command::Guest(args) => args.run(&db),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Manage accounts.
    Account(AccountArgs),

    /// Offer cages to other snake owners.
    Host(Box<HostArgs>),

    /// Find and book a cage for your snake.
    Guest(Box<GuestArgs>),
}

/// Pick an item by the 1-based position that the listing tables show.
fn nth<T>(items: &[T], position: usize, what: &str) -> Result<T>
where
    T: Clone,
{
    ensure!(position >= 1, "{what} numbers start from 1");
    items
        .get(position - 1)
        .cloned()
        .with_context(|| format!("there is no {what} #{position}, only {} listed", items.len()))
}
