use clap::{Parser, Subcommand};

use crate::{db::Db, prelude::*};

#[derive(Parser)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommand,
}

impl AccountArgs {
    pub fn run(self, db: &Db) -> Result {
        match self.command {
            AccountCommand::Create(args) => args.run(db),
        }
    }
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Create a new account.
    Create(CreateAccountArgs),
}

#[derive(Parser)]
struct CreateAccountArgs {
    #[clap(long)]
    name: String,

    #[clap(long)]
    email: String,
}

impl CreateAccountArgs {
    fn run(self, db: &Db) -> Result {
        let owner = db.create_account(&self.name, &self.email)?;
        println!("Welcome, {}! Your account is #{} ({}).", owner.name, owner.id, owner.email);
        Ok(())
    }
}
