use chrono::NaiveDate;

use crate::domain::{Client, Movie, Rental};

use super::{Catalog, CatalogError};

/// A report line: a day count attached to the entity it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic<T> {
    pub days: i64,
    pub item: T,
}

/// Days a rental has been (or was) out, counting up to `today` when unreturned
fn rented_days(rental: &Rental, today: NaiveDate) -> i64 {
    (rental.returned.unwrap_or(today) - rental.rented).num_days()
}

fn sort_descending<T>(stats: &mut [Statistic<T>]) {
    stats.sort_by(|a, b| b.days.cmp(&a.days));
}

impl Catalog {
    /// Movies ordered by the total number of days they were rented
    pub fn movie_statistics(&self, today: NaiveDate) -> Result<Vec<Statistic<&Movie>>, CatalogError> {
        let movies = self.movies.all()?;
        let rentals = self.rentals.all()?;

        let mut stats: Vec<Statistic<&Movie>> = movies
            .iter()
            .map(|movie| Statistic {
                days: rentals
                    .iter()
                    .filter(|r| r.movie_id == movie.id)
                    .map(|r| rented_days(r, today))
                    .sum(),
                item: movie,
            })
            .collect();
        sort_descending(&mut stats);
        Ok(stats)
    }

    /// Clients ordered by the total number of days they had movies rented
    pub fn client_statistics(&self, today: NaiveDate) -> Result<Vec<Statistic<&Client>>, CatalogError> {
        let clients = self.clients.all()?;
        let rentals = self.rentals.all()?;

        let mut stats: Vec<Statistic<&Client>> = clients
            .iter()
            .map(|client| Statistic {
                days: rentals
                    .iter()
                    .filter(|r| r.client_id == client.id)
                    .map(|r| rented_days(r, today))
                    .sum(),
                item: client,
            })
            .collect();
        sort_descending(&mut stats);
        Ok(stats)
    }

    /// Movies currently out past their due date, by days of delay
    pub fn late_rentals(&self, today: NaiveDate) -> Result<Vec<Statistic<&Movie>>, CatalogError> {
        let rentals = self.rentals.all()?;

        let mut stats: Vec<Statistic<&Movie>> = rentals
            .iter()
            .filter(|r| !r.is_returned() && today > r.due)
            .filter_map(|r| {
                let movie = self.movies.iter().find(|m| m.id == r.movie_id)?;
                Some(Statistic { days: (today - r.due).num_days(), item: movie })
            })
            .collect();
        sort_descending(&mut stats);
        Ok(stats)
    }
}
