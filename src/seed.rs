use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::domain::Rental;
use crate::history::UndoRedo;
use crate::service::Catalog;

const NAMES: &[&str] = &[
    "John", "Alex Mercer", "John Doe", "Ion Vasile", "George", "Marian", "Sandy", "Jane", "Mariah Jones",
];
const TITLES: &[&str] = &[
    "Creative", "No regrets", "Alone", "Alone 2", "For kids 1", "For kids 2", "For kids 3", "Sailor",
];
const DESCRIPTIONS: &[&str] = &[
    "great movie", "a movie you won't forget", "such a masterpiece", "just a generic film",
];
const GENRES: &[&str] = &["action", "horror", "comedy", "indie", "drama", "romantic", "thriller"];

/// Entities of each kind generated at start-up
pub const DEFAULT_COUNT: usize = 20;

/// Give up on a kind after this many tries per requested entity
const ATTEMPTS_PER_ENTITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub clients: usize,
    pub movies: usize,
    pub rentals: usize,
}

fn random_id(rng: &mut impl Rng) -> String {
    rng.gen_range(0..=100).to_string()
}

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Loose `d.m.yyyy` date; impossible days are left for parsing to reject
fn random_date(rng: &mut impl Rng) -> String {
    format!(
        "{}.{}.{}",
        rng.gen_range(1..=31),
        rng.gen_range(1..=12),
        rng.gen_range(1950..=2050)
    )
}

/// Retry `attempt` until it succeeds `count` times or the attempt cap is hit
fn fill(count: usize, mut attempt: impl FnMut() -> bool) -> usize {
    let mut added = 0;
    let mut tries = 0;
    while added < count && tries < count * ATTEMPTS_PER_ENTITY {
        tries += 1;
        if attempt() {
            added += 1;
        }
    }
    added
}

pub fn seed_clients(catalog: &mut Catalog, history: &mut UndoRedo, rng: &mut impl Rng, count: usize) -> usize {
    fill(count, || {
        let id = random_id(rng);
        let name = pick(rng, NAMES);
        match catalog.add_client(&id, name) {
            Ok(()) => {
                history.add_client_handler(&id, name);
                true
            }
            Err(_) => false,
        }
    })
}

pub fn seed_movies(catalog: &mut Catalog, history: &mut UndoRedo, rng: &mut impl Rng, count: usize) -> usize {
    fill(count, || {
        let id = random_id(rng);
        let title = pick(rng, TITLES);
        let description = pick(rng, DESCRIPTIONS);
        let genre = pick(rng, GENRES);
        match catalog.add_movie(&id, title, description, genre) {
            Ok(()) => {
                history.add_movie_handler(&id, title, description, genre);
                true
            }
            Err(_) => false,
        }
    })
}

pub fn seed_rentals(catalog: &mut Catalog, history: &mut UndoRedo, rng: &mut impl Rng, count: usize) -> usize {
    fill(count, || {
        let returned = if rng.gen_bool(0.5) {
            "N.A.".to_string()
        } else {
            random_date(rng)
        };
        let rental = match Rental::parse(
            &random_id(rng),
            &random_id(rng),
            &random_id(rng),
            &random_date(rng),
            &random_date(rng),
            &returned,
        ) {
            Ok(rental) => rental,
            Err(_) => return false,
        };

        match catalog.add_rental(rental.clone()) {
            Ok(()) => {
                history.add_rental_handler(&rental);
                true
            }
            Err(_) => false,
        }
    })
}

/// Populate an empty catalog with random clients, movies and rentals,
/// recording each insertion so it can be undone.
pub fn seed(catalog: &mut Catalog, history: &mut UndoRedo, rng: &mut impl Rng, count: usize) -> SeedReport {
    let report = SeedReport {
        clients: seed_clients(catalog, history, rng, count),
        movies: seed_movies(catalog, history, rng, count),
        rentals: seed_rentals(catalog, history, rng, count),
    };

    if report.rentals < count {
        warn!(requested = count, added = report.rentals, "could not generate every rental");
    }
    info!(clients = report.clients, movies = report.movies, rentals = report.rentals, "catalog seeded");
    report
}
