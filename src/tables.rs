use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::{booking::Booking, cage::Cage, matcher::CageMatch, window::Window},
    db::account::Snake,
    ops::Stay,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn format_stay(stay: Stay) -> String {
    format!("{} → {}", stay.start.format("%b %d, %Y"), stay.end.format("%b %d, %Y"))
}

fn yes_no(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").add_attribute(Attribute::Dim)
    }
}

/// Cages of a host, one row per published window.
pub fn build_cages_table(cages: &[Cage]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Cage", "Area", "Price", "Window", "Dates", "Nights", "Booked"]);
    for (position, cage) in (1..).zip(cages) {
        let header = [
            Cell::new(position).add_attribute(Attribute::Bold),
            Cell::new(&cage.name),
            Cell::new(cage.square_meters).set_alignment(CellAlignment::Right),
            Cell::new(cage.price_per_night).set_alignment(CellAlignment::Right),
        ];
        if cage.windows.is_empty() {
            table.add_row(
                header.into_iter().chain(
                    ["-", "not published yet", "", ""]
                        .into_iter()
                        .map(|text| Cell::new(text).add_attribute(Attribute::Dim)),
                ),
            );
            continue;
        }
        for (index, window) in cage.windows.iter().enumerate() {
            let leading = if index == 0 {
                header.iter().cloned().collect_vec()
            } else {
                vec![Cell::new(""); header.len()]
            };
            table.add_row(leading.into_iter().chain(window_cells(window)));
        }
    }
    table
}

fn window_cells(window: &Window) -> [Cell; 4] {
    let stay = window.stay();
    [
        Cell::new(window.id()).add_attribute(Attribute::Dim),
        Cell::new(format_stay(stay)),
        Cell::new(stay.nights()).set_alignment(CellAlignment::Right),
        if window.is_open() {
            Cell::new("no").fg(Color::Green)
        } else {
            Cell::new("yes").fg(Color::Red)
        },
    ]
}

/// Search results in their ranking order.
pub fn build_matches_table(matches: &[CageMatch]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Cage", "Area", "Carpeted", "Toys", "Price", "Windows"]);
    for (position, cage_match) in (1..).zip(matches) {
        let cage = &cage_match.cage;
        table.add_row(vec![
            Cell::new(position).add_attribute(Attribute::Bold),
            Cell::new(&cage.name),
            Cell::new(cage.square_meters).set_alignment(CellAlignment::Right),
            yes_no(cage.is_carpeted),
            yes_no(cage.has_toys),
            Cell::new(cage.price_per_night).set_alignment(CellAlignment::Right).fg(Color::Cyan),
            Cell::new(
                cage_match.candidate_windows.iter().map(|window| format_stay(window.stay())).join("\n"),
            ),
        ]);
    }
    table
}

/// Bookings, as seen by either side.
pub fn build_bookings_table(bookings: &[Booking]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Dates", "Nights", "Cage", "Guest", "Snake", "Total", "Booked at"]);
    for booking in bookings {
        table.add_row(vec![
            Cell::new(format_stay(booking.stay)),
            Cell::new(booking.stay.nights()).set_alignment(CellAlignment::Right),
            Cell::new(&booking.cage_name),
            Cell::new(format!("#{}", booking.guest_owner_id)).add_attribute(Attribute::Dim),
            Cell::new(format!("#{}", booking.guest_snake_id)).add_attribute(Attribute::Dim),
            Cell::new(booking.total_price()).set_alignment(CellAlignment::Right).fg(Color::Cyan),
            Cell::new(booking.booked_at.format("%b %d %H:%M")).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_snakes_table(snakes: &[Snake]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Name", "Species", "Length", "Venomous"]);
    for (position, snake) in (1..).zip(snakes) {
        table.add_row(vec![
            Cell::new(position).add_attribute(Attribute::Bold),
            Cell::new(&snake.name),
            Cell::new(&snake.species),
            Cell::new(snake.length).set_alignment(CellAlignment::Right),
            if snake.is_venomous { Cell::new("yes").fg(Color::Red) } else { yes_no(false) },
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};

    use super::*;
    use crate::{
        core::{
            cage::NewCage,
            id::{CageId, OwnerId},
        },
        quantity::{area::SquareMeters, price::Price},
    };

    #[test]
    fn cages_table_lists_every_window() {
        let mut cage = Cage::new(
            CageId(1),
            NewCage::builder()
                .owner_id(OwnerId(1))
                .name("Jungle")
                .square_meters(SquareMeters(20.0))
                .price_per_night(Price(10.0))
                .build(),
        );
        for day in [1, 15] {
            let check_in = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
            let stay = Stay::try_new(check_in, check_in.succ_opt().unwrap()).unwrap();
            cage.windows.push(Window::open(cage.next_window_id(), stay, Local::now()));
        }
        let table = build_cages_table(&[cage]);
        assert_eq!(table.row_count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Jungle"));
        assert!(rendered.contains("Jun 15, 2024"));
    }

    #[test]
    fn unpublished_cage_has_a_row() {
        let cage = Cage::new(
            CageId(1),
            NewCage::builder()
                .owner_id(OwnerId(1))
                .name("Desert")
                .square_meters(SquareMeters(5.0))
                .price_per_night(Price(3.0))
                .build(),
        );
        let rendered = build_cages_table(&[cage]).to_string();
        assert!(rendered.contains("not published yet"));
    }
}
