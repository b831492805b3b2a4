use std::collections::HashMap;

use crate::service::{ClientField, MovieField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Clients,
    Movies,
    Rentals,
    Statistics,
    Undo,
    Redo,
    Exit,
}

/// Entries shared by the client and movie sub-menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Add,
    Remove,
    Update,
    List,
    Search,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalAction {
    Rent,
    Return,
    List,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsAction {
    MostRentedMovies,
    MostActiveClients,
    LateRentals,
    Back,
}

/// Field picker used by the search sub-menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction<F> {
    Field(F),
    Back,
}

/// Maps typed keys to actions and renders the menu text
pub struct MenuTable<A> {
    entries: Vec<(&'static str, &'static str)>,
    actions: HashMap<&'static str, A>,
}

impl<A: Copy> MenuTable<A> {
    pub fn new(items: Vec<(&'static str, &'static str, A)>) -> Self {
        let entries = items.iter().map(|(key, label, _)| (*key, *label)).collect();
        let actions = items.into_iter().map(|(key, _, action)| (key, action)).collect();
        Self { entries, actions }
    }

    /// Keys are matched case-insensitively after trimming
    pub fn match_input(&self, input: &str) -> Option<A> {
        self.actions.get(input.trim().to_lowercase().as_str()).copied()
    }

    pub fn render(&self, indent: usize) -> String {
        let pad = "\t".repeat(indent);
        let mut text = String::new();
        for (key, label) in &self.entries {
            text.push_str(&format!("{}{}. {}\n", pad, key.to_uppercase(), label));
        }
        text
    }
}

pub struct Menus {
    pub main: MenuTable<MainAction>,
    pub clients: MenuTable<EntityAction>,
    pub movies: MenuTable<EntityAction>,
    pub rentals: MenuTable<RentalAction>,
    pub statistics: MenuTable<StatisticsAction>,
    pub search_clients: MenuTable<SearchAction<ClientField>>,
    pub search_movies: MenuTable<SearchAction<MovieField>>,
}

impl Default for Menus {
    fn default() -> Self {
        Self {
            main: MenuTable::new(vec![
                ("1", "manage clients", MainAction::Clients),
                ("2", "manage movies", MainAction::Movies),
                ("3", "manage rentals", MainAction::Rentals),
                ("4", "display statistics", MainAction::Statistics),
                ("5", "undo", MainAction::Undo),
                ("6", "redo", MainAction::Redo),
                ("x", "exit", MainAction::Exit),
            ]),
            clients: MenuTable::new(vec![
                ("1", "add a client", EntityAction::Add),
                ("2", "remove a client", EntityAction::Remove),
                ("3", "update a client", EntityAction::Update),
                ("4", "list all clients", EntityAction::List),
                ("5", "search for a client", EntityAction::Search),
                ("b", "back to main menu", EntityAction::Back),
            ]),
            movies: MenuTable::new(vec![
                ("1", "add a movie", EntityAction::Add),
                ("2", "remove a movie", EntityAction::Remove),
                ("3", "update a movie", EntityAction::Update),
                ("4", "list all movies", EntityAction::List),
                ("5", "search for a movie", EntityAction::Search),
                ("b", "back to main menu", EntityAction::Back),
            ]),
            rentals: MenuTable::new(vec![
                ("1", "rent movie / add new rental", RentalAction::Rent),
                ("2", "return a movie", RentalAction::Return),
                ("3", "list all rentals", RentalAction::List),
                ("b", "back to main menu", RentalAction::Back),
            ]),
            statistics: MenuTable::new(vec![
                ("1", "most rented movies", StatisticsAction::MostRentedMovies),
                ("2", "most active clients", StatisticsAction::MostActiveClients),
                ("3", "late rentals of currently rented movies", StatisticsAction::LateRentals),
                ("b", "back to main menu", StatisticsAction::Back),
            ]),
            search_clients: MenuTable::new(vec![
                ("1", "search by client id", SearchAction::Field(ClientField::Id)),
                ("2", "search by name", SearchAction::Field(ClientField::Name)),
                ("b", "back to main menu", SearchAction::Back),
            ]),
            search_movies: MenuTable::new(vec![
                ("1", "search by movie id", SearchAction::Field(MovieField::Id)),
                ("2", "search by title", SearchAction::Field(MovieField::Title)),
                ("3", "search by description", SearchAction::Field(MovieField::Description)),
                ("4", "search by genre", SearchAction::Field(MovieField::Genre)),
                ("b", "back to main menu", SearchAction::Back),
            ]),
        }
    }
}
