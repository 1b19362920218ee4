use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    cli::{nth, session::SessionArgs},
    core::{
        availability::Availability,
        booking::bookings_of_host,
        cage::NewCage,
        registry::CageRegistry,
    },
    db::{Db, account::Owner},
    prelude::*,
    quantity::{area::SquareMeters, price::Price},
    tables::{build_bookings_table, build_cages_table},
};

#[derive(Parser)]
pub struct HostArgs {
    #[clap(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: HostCommand,
}

impl HostArgs {
    pub fn run(self, db: &Db) -> Result {
        let host = self.session.sign_in(db)?;
        match self.command {
            HostCommand::RegisterCage(args) => args.run(db, &host),
            HostCommand::Cages => {
                let cages = CageRegistry::new(db).cages_of(host.id)?;
                println!("{}", build_cages_table(&cages));
                Ok(())
            }
            HostCommand::Publish(args) => args.run(db, &host),
            HostCommand::Bookings => {
                let bookings = bookings_of_host(db, host.id)?;
                println!("{}", build_bookings_table(&bookings));
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
enum HostCommand {
    /// Register a new cage.
    RegisterCage(RegisterCageArgs),

    /// List your cages together with their availability windows.
    Cages,

    /// Publish availability for one of your cages.
    Publish(PublishArgs),

    /// List the bookings of your cages.
    Bookings,
}

#[derive(Parser)]
struct RegisterCageArgs {
    #[clap(long)]
    name: String,

    /// Floor area in square meters.
    #[clap(long = "square-meters")]
    square_meters: SquareMeters,

    #[clap(long = "carpeted")]
    is_carpeted: bool,

    #[clap(long = "toys")]
    has_toys: bool,

    /// Accept venomous snakes.
    #[clap(long = "allow-dangerous-snakes")]
    allow_dangerous_snakes: bool,

    #[clap(long = "price-per-night")]
    price_per_night: Price,
}

impl RegisterCageArgs {
    fn run(self, db: &Db, host: &Owner) -> Result {
        let cage = CageRegistry::new(db).register(
            NewCage::builder()
                .owner_id(host.id)
                .name(self.name)
                .square_meters(self.square_meters)
                .is_carpeted(self.is_carpeted)
                .has_toys(self.has_toys)
                .allow_dangerous_snakes(self.allow_dangerous_snakes)
                .price_per_night(self.price_per_night)
                .build(),
        )?;
        println!("Registered cage #{}: {}", cage.id, cage.name);
        Ok(())
    }
}

#[derive(Parser)]
struct PublishArgs {
    /// Cage number as listed by the `cages` command.
    #[clap(long)]
    cage: usize,

    /// First night, `YYYY-MM-DD`.
    #[clap(long)]
    from: NaiveDate,

    /// Number of nights.
    #[clap(long)]
    days: u64,
}

impl PublishArgs {
    fn run(self, db: &Db, host: &Owner) -> Result {
        let cage = nth(&CageRegistry::new(db).cages_of(host.id)?, self.cage, "cage")?;
        let window = Availability::new(db).publish_days(cage.id, self.from, self.days, Local::now())?;
        let stay = window.stay();
        println!(
            "{} is now available from {} to {} ({} nights).",
            cage.name,
            stay.start,
            stay.end,
            stay.nights(),
        );
        Ok(())
    }
}
