use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    cli::{nth, session::SessionArgs},
    core::{
        booking::bookings_of_guest,
        coordinator::BookingCoordinator,
        error::BookingError,
        matcher::Matcher,
    },
    db::{
        Db,
        account::{NewSnake, Owner, Snake},
    },
    prelude::*,
    quantity::length::Meters,
    tables::{build_bookings_table, build_matches_table, build_snakes_table},
};

#[derive(Parser)]
pub struct GuestArgs {
    #[clap(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: GuestCommand,
}

impl GuestArgs {
    pub fn run(self, db: &Db) -> Result {
        let guest = self.session.sign_in(db)?;
        match self.command {
            GuestCommand::AddSnake(args) => args.run(db, &guest),
            GuestCommand::Snakes => {
                println!("{}", build_snakes_table(&db.snakes_of(guest.id)?));
                Ok(())
            }
            GuestCommand::Search(args) => args.run(db, &guest),
            GuestCommand::Book(args) => args.run(db, &guest),
            GuestCommand::Bookings => {
                let bookings = bookings_of_guest(db, guest.id)?;
                println!("{}", build_bookings_table(&bookings));
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
enum GuestCommand {
    /// Add a snake to your account.
    AddSnake(AddSnakeArgs),

    /// List your snakes.
    Snakes,

    /// Find cages for one of your snakes.
    Search(SearchArgs),

    /// Book one of the found cages.
    Book(BookArgs),

    /// List your bookings.
    Bookings,
}

#[derive(Parser)]
struct AddSnakeArgs {
    #[clap(long)]
    name: String,

    #[clap(long)]
    species: String,

    /// Length in meters.
    #[clap(long)]
    length: Meters,

    #[clap(long = "venomous")]
    is_venomous: bool,
}

impl AddSnakeArgs {
    fn run(self, db: &Db, guest: &Owner) -> Result {
        let snake = db.add_snake(
            NewSnake::builder()
                .owner_id(guest.id)
                .name(self.name)
                .species(self.species)
                .length(self.length)
                .is_venomous(self.is_venomous)
                .build(),
        )?;
        println!("Added {} the {} ({}).", snake.name, snake.species, snake.length);
        Ok(())
    }
}

#[derive(Parser)]
struct SearchArgs {
    /// Snake number as listed by the `snakes` command.
    #[clap(long)]
    snake: usize,

    /// First night, `YYYY-MM-DD`.
    #[clap(long = "check-in")]
    check_in: NaiveDate,

    /// Day of departure, `YYYY-MM-DD`.
    #[clap(long = "check-out")]
    check_out: NaiveDate,
}

impl SearchArgs {
    fn snake(&self, db: &Db, guest: &Owner) -> Result<Snake> {
        nth(&db.snakes_of(guest.id)?, self.snake, "snake")
    }

    fn run(self, db: &Db, guest: &Owner) -> Result {
        let snake = self.snake(db, guest)?;
        let matches = Matcher::new(db).search(self.check_in, self.check_out, &snake.profile())?;
        if matches.is_empty() {
            println!("No cages available for {} over these dates.", snake.name);
        } else {
            println!("{}", build_matches_table(&matches));
        }
        Ok(())
    }
}

#[derive(Parser)]
struct BookArgs {
    #[clap(flatten)]
    search: SearchArgs,

    /// Cage number as listed by the `search` command.
    #[clap(long)]
    cage: usize,
}

impl BookArgs {
    fn run(self, db: &Db, guest: &Owner) -> Result {
        let snake = self.search.snake(db, guest)?;
        let profile = snake.profile();
        let matches = Matcher::new(db).search(self.search.check_in, self.search.check_out, &profile)?;
        let cage_match = nth(&matches, self.cage, "cage")?;
        let window = cage_match.first_window().context("the cage has no candidate windows")?;

        let booking = match BookingCoordinator::new(db).book_cage(
            cage_match.cage.id,
            window.id(),
            guest.id,
            &profile,
            Local::now(),
        ) {
            Ok(booking) => booking,
            Err(error @ BookingError::AlreadyClaimed { .. }) => {
                return Err(Error::new(error).context("someone was faster, please search again"));
            }
            Err(error) => return Err(error.into()),
        };
        println!(
            "Booked {} for {} from {} to {}, {} in total.",
            booking.cage_name,
            snake.name,
            booking.stay.start,
            booking.stay.end,
            booking.total_price(),
        );
        Ok(())
    }
}
