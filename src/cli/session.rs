use clap::Parser;

use crate::{
    db::{Db, account::Owner},
    prelude::*,
};

#[derive(Parser)]
pub struct SessionArgs {
    /// Email of the account to act on behalf of.
    #[clap(long, env = "SNAKEBNB_EMAIL")]
    email: String,
}

impl SessionArgs {
    #[instrument(skip_all, fields(email = %self.email))]
    pub fn sign_in(&self, db: &Db) -> Result<Owner> {
        let owner = db
            .find_account_by_email(&self.email)?
            .with_context(|| format!("no account with email `{}`, create one first", self.email))?;
        debug!(id = %owner.id, name = %owner.name, "signed in");
        Ok(owner)
    }
}
