pub mod menu;

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::{debug, info};

use crate::domain::{date, Movie, Rental};
use crate::history::UndoRedo;
use crate::service::{Catalog, CatalogError, Statistic};

use menu::{EntityAction, MainAction, Menus, RentalAction, SearchAction, StatisticsAction};

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented menu loop. Every successful catalog mutation is
/// reported to the history right away so it can be undone.
pub struct Console<R, W> {
    catalog: Catalog,
    history: UndoRedo,
    menus: Menus,
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(catalog: Catalog, history: UndoRedo, input: R, output: W) -> Self {
        Self {
            catalog,
            history,
            menus: Menus::default(),
            input,
            output,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[allow(dead_code)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[allow(dead_code)]
    pub fn history(&self) -> &UndoRedo {
        &self.history
    }

    /// Run until the user exits or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!("input closed");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    // === I/O helpers ===

    fn say(&mut self, msg: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", msg)
    }

    fn error(&mut self, msg: impl Display) -> io::Result<()> {
        let msg = msg.to_string();
        if self.color {
            writeln!(self.output, "{}", msg.as_str().red())
        } else {
            writeln!(self.output, "{}", msg)
        }
    }

    /// Print `label` and read one trimmed line; end of input is an error
    fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim().to_string())
    }

    fn show_menu(&mut self, text: String, indent: usize) -> io::Result<String> {
        write!(self.output, "{}", text)?;
        let prompt = format!("{}> ", "\t".repeat(indent));
        self.ask(&prompt)
    }

    fn invalid_command(&mut self) -> io::Result<Flow> {
        self.error("The command is not valid!")?;
        Ok(Flow::Continue)
    }

    fn print_all<T: Display>(&mut self, items: &[T]) -> io::Result<()> {
        for item in items {
            writeln!(self.output, "{}", item)?;
        }
        Ok(())
    }

    // === Main menu ===

    fn step(&mut self) -> io::Result<Flow> {
        writeln!(self.output)?;
        let text = self.menus.main.render(0);
        let choice = self.show_menu(text, 0)?;

        match self.menus.main.match_input(&choice) {
            Some(MainAction::Clients) => self.clients(),
            Some(MainAction::Movies) => self.movies(),
            Some(MainAction::Rentals) => self.rentals(),
            Some(MainAction::Statistics) => self.statistics(),
            Some(MainAction::Undo) => self.undo(),
            Some(MainAction::Redo) => self.redo(),
            Some(MainAction::Exit) => {
                self.say("You exited the program.")?;
                Ok(Flow::Exit)
            }
            None => self.invalid_command(),
        }
    }

    fn undo(&mut self) -> io::Result<Flow> {
        match self.history.undo(&mut self.catalog) {
            Ok(replay) => {
                self.say("Undo done.")?;
                if replay.suppressed > 0 {
                    self.error(format!("{} step(s) could not be replayed.", replay.suppressed))?;
                }
            }
            Err(e) => self.error(e)?,
        }
        Ok(Flow::Continue)
    }

    fn redo(&mut self) -> io::Result<Flow> {
        match self.history.redo(&mut self.catalog) {
            Ok(replay) => {
                self.say("Redo done.")?;
                if replay.suppressed > 0 {
                    self.error(format!("{} step(s) could not be replayed.", replay.suppressed))?;
                }
            }
            Err(e) => self.error(e)?,
        }
        Ok(Flow::Continue)
    }

    // === Clients ===

    fn clients(&mut self) -> io::Result<Flow> {
        let text = self.menus.clients.render(1);
        let choice = self.show_menu(text, 1)?;

        match self.menus.clients.match_input(&choice) {
            Some(EntityAction::Add) => {
                let id = self.ask("Enter client id: ")?;
                let name = self.ask("Enter client name: ")?;
                match self.catalog.add_client(&id, &name) {
                    Ok(()) => self.history.add_client_handler(&id, &name),
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::Remove) => {
                let id = self.ask("Enter client id: ")?;
                match self.catalog.remove_client(&id) {
                    Ok((client, rentals)) => {
                        debug!(client = %client.id, cascaded = rentals.len(), "client removed");
                        self.history.remove_client_handler(&client, &rentals);
                    }
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::Update) => {
                let id = self.ask("Enter client id: ")?;
                let new_name = self.ask("Enter new client name: ")?;
                match self.catalog.update_client(&id, &id, &new_name) {
                    Ok(old) => self.history.update_client_handler(&old, &id, &new_name),
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::List) => match self.catalog.list_clients().map(<[_]>::to_vec) {
                Ok(clients) => self.print_all(&clients)?,
                Err(e) => self.error(e)?,
            },
            Some(EntityAction::Search) => return self.search_clients(),
            Some(EntityAction::Back) => {}
            None => return self.invalid_command(),
        }
        Ok(Flow::Continue)
    }

    fn search_clients(&mut self) -> io::Result<Flow> {
        let text = self.menus.search_clients.render(2);
        let choice = self.show_menu(text, 2)?;

        let field = match self.menus.search_clients.match_input(&choice) {
            Some(SearchAction::Field(field)) => field,
            Some(SearchAction::Back) => return Ok(Flow::Continue),
            None => return self.invalid_command(),
        };

        let term = self.ask("\t\t\t> search for: ")?;
        let found = self
            .catalog
            .search_clients(field, &term)
            .map(|found| found.into_iter().cloned().collect::<Vec<_>>());
        match found {
            Ok(found) if found.is_empty() => self.say("Nothing was found.")?,
            Ok(found) => self.print_all(&found)?,
            Err(e) => self.error(e)?,
        }
        Ok(Flow::Continue)
    }

    // === Movies ===

    fn movies(&mut self) -> io::Result<Flow> {
        let text = self.menus.movies.render(1);
        let choice = self.show_menu(text, 1)?;

        match self.menus.movies.match_input(&choice) {
            Some(EntityAction::Add) => {
                let id = self.ask("Enter movie id: ")?;
                let title = self.ask("Enter movie title: ")?;
                let description = self.ask("Enter movie description: ")?;
                let genre = self.ask("Enter movie genre: ")?;
                match self.catalog.add_movie(&id, &title, &description, &genre) {
                    Ok(()) => self.history.add_movie_handler(&id, &title, &description, &genre),
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::Remove) => {
                let id = self.ask("Enter movie id: ")?;
                match self.catalog.remove_movie(&id) {
                    Ok((movie, rentals)) => {
                        debug!(movie = %movie.id, cascaded = rentals.len(), "movie removed");
                        self.history.remove_movie_handler(&movie, &rentals);
                    }
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::Update) => {
                let id = self.ask("Enter movie id: ")?;
                let title = self.ask("Enter new movie title: ")?;
                let description = self.ask("Enter new movie description: ")?;
                let genre = self.ask("Enter new movie genre: ")?;
                match self.catalog.update_movie(&id, &id, &title, &description, &genre) {
                    Ok(old) => {
                        let updated = Movie::new(id, title, description, genre);
                        self.history.update_movie_handler(&old, &updated);
                    }
                    Err(e) => self.error(e)?,
                }
            }
            Some(EntityAction::List) => match self.catalog.list_movies().map(<[_]>::to_vec) {
                Ok(movies) => self.print_all(&movies)?,
                Err(e) => self.error(e)?,
            },
            Some(EntityAction::Search) => return self.search_movies(),
            Some(EntityAction::Back) => {}
            None => return self.invalid_command(),
        }
        Ok(Flow::Continue)
    }

    fn search_movies(&mut self) -> io::Result<Flow> {
        let text = self.menus.search_movies.render(2);
        let choice = self.show_menu(text, 2)?;

        let field = match self.menus.search_movies.match_input(&choice) {
            Some(SearchAction::Field(field)) => field,
            Some(SearchAction::Back) => return Ok(Flow::Continue),
            None => return self.invalid_command(),
        };

        let term = self.ask("\t\t\t> search for: ")?;
        let found = self
            .catalog
            .search_movies(field, &term)
            .map(|found| found.into_iter().cloned().collect::<Vec<_>>());
        match found {
            Ok(found) if found.is_empty() => self.say("Nothing was found.")?,
            Ok(found) => self.print_all(&found)?,
            Err(e) => self.error(e)?,
        }
        Ok(Flow::Continue)
    }

    // === Rentals ===

    fn rentals(&mut self) -> io::Result<Flow> {
        let text = self.menus.rentals.render(1);
        let choice = self.show_menu(text, 1)?;

        match self.menus.rentals.match_input(&choice) {
            Some(RentalAction::Rent) => self.rent()?,
            Some(RentalAction::Return) => {
                let id = self.ask("Enter rental id of the entry for which the return will be made: ")?;
                match self.catalog.return_movie(&id) {
                    Ok(()) => self.history.return_movie_handler(&id),
                    Err(e) => self.error(e)?,
                }
            }
            Some(RentalAction::List) => match self.catalog.list_rentals().map(<[_]>::to_vec) {
                Ok(rentals) => self.print_all(&rentals)?,
                Err(e) => self.error(e)?,
            },
            Some(RentalAction::Back) => {}
            None => return self.invalid_command(),
        }
        Ok(Flow::Continue)
    }

    fn rent(&mut self) -> io::Result<()> {
        let id = self.ask("Enter rental id: ")?;
        let movie_id = self.ask("Enter movie id: ")?;
        let client_id = self.ask("Enter client id: ")?;
        let rented = self.ask("Enter rented date of the form: dd.mm.yyyy: ")?;
        let due = self.ask("Enter due date of the form: dd.mm.yyyy: ")?;
        let returned = self.ask(
            "If the return date is not available, type \"N.A.\" or leave empty, else\n\
             Enter returned date of the form: dd.mm.yyyy: ",
        )?;

        let rental = match Rental::parse(&id, &movie_id, &client_id, &rented, &due, &returned) {
            Ok(rental) => rental,
            Err(e) => return self.error(CatalogError::from(e)),
        };

        match self.catalog.add_rental(rental.clone()) {
            Ok(()) => self.history.add_rental_handler(&rental),
            Err(e) => self.error(e)?,
        }
        Ok(())
    }

    // === Statistics ===

    fn print_statistics<T: Display>(&mut self, stats: &[Statistic<T>], criteria: &str) -> io::Result<()> {
        if stats.is_empty() {
            return self.say("No statistics to display.");
        }
        for stat in stats {
            writeln!(self.output, "{}: {}", criteria, stat.days)?;
            writeln!(self.output, "{}", stat.item)?;
        }
        Ok(())
    }

    fn statistics(&mut self) -> io::Result<Flow> {
        let text = self.menus.statistics.render(1);
        let choice = self.show_menu(text, 1)?;
        let today = date::today();

        match self.menus.statistics.match_input(&choice) {
            Some(StatisticsAction::MostRentedMovies) => {
                let stats = self.catalog.movie_statistics(today).map(owned);
                match stats {
                    Ok(stats) => self.print_statistics(&stats, "- the number of days rented")?,
                    Err(e) => self.error(e)?,
                }
            }
            Some(StatisticsAction::MostActiveClients) => {
                let stats = self.catalog.client_statistics(today).map(owned);
                match stats {
                    Ok(stats) => {
                        self.print_statistics(&stats, "- the number of movie rental days of the client")?
                    }
                    Err(e) => self.error(e)?,
                }
            }
            Some(StatisticsAction::LateRentals) => {
                let stats = self.catalog.late_rentals(today).map(owned);
                match stats {
                    Ok(stats) => self.print_statistics(
                        &stats,
                        "- the number of days of delay for the currently rented movie",
                    )?,
                    Err(e) => self.error(e)?,
                }
            }
            Some(StatisticsAction::Back) => {}
            None => return self.invalid_command(),
        }
        Ok(Flow::Continue)
    }
}

/// Detach report lines from the catalog borrow so they can be printed
fn owned<T: Clone>(stats: Vec<Statistic<&T>>) -> Vec<Statistic<T>> {
    stats
        .into_iter()
        .map(|s| Statistic { days: s.days, item: s.item.clone() })
        .collect()
}
