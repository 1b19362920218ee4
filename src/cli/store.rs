use std::path::PathBuf;

use clap::Parser;

use crate::{db::Db, prelude::*};

#[derive(Parser)]
pub struct StoreArgs {
    /// TOML file that keeps accounts, snakes, cages, and bookings.
    #[clap(
        long = "store-path",
        env = "SNAKEBNB_STORE_PATH",
        default_value = "snakebnb.toml",
        global = true
    )]
    path: PathBuf,
}

impl StoreArgs {
    pub fn open(&self) -> Result<Db> {
        Db::open(&self.path)
    }
}
