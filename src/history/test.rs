use super::*;

use crate::domain::{Client, Movie, Rental};
use crate::repository::{Repository, Storage};
use crate::service::Catalog;

fn rental(id: &str, movie_id: &str, client_id: &str) -> Rental {
    Rental::parse(id, movie_id, client_id, "10.10.2010", "11.10.2010", "N.A.").unwrap()
}

fn clients(catalog: &Catalog) -> Vec<Client> {
    catalog.clients().iter().cloned().collect()
}

fn movies(catalog: &Catalog) -> Vec<Movie> {
    catalog.movies().iter().cloned().collect()
}

fn rentals(catalog: &Catalog) -> Vec<Rental> {
    catalog.rentals().iter().cloned().collect()
}

/// Snapshot of everything the catalog reports
fn snapshot(catalog: &Catalog) -> (Vec<Client>, Vec<Movie>, Vec<Rental>) {
    (clients(catalog), movies(catalog), rentals(catalog))
}

/// Client "1", movie "2" and rental "9", each recorded in history
fn seeded() -> (Catalog, UndoRedo) {
    let mut catalog = Catalog::in_memory();
    let mut history = UndoRedo::new();

    catalog.add_client("1", "bob").unwrap();
    history.add_client_handler("1", "bob");

    catalog.add_movie("2", "t", "d", "g").unwrap();
    history.add_movie_handler("2", "t", "d", "g");

    let r = rental("9", "2", "1");
    catalog.add_rental(r.clone()).unwrap();
    history.add_rental_handler(&r);

    (catalog, history)
}

// === HistoryStore ===

#[test]
fn test_store_starts_empty() {
    let store = HistoryStore::new();
    assert!(store.is_undo_empty());
    assert!(store.is_redo_empty());
    assert_eq!(store.undo_operations(), None);
    assert_eq!(store.redo_converses(), None);
}

#[test]
fn test_store_top_accessors() {
    let mut store = HistoryStore::new();
    let first = HistoryEntry::new(
        vec![Command::RemoveClient { id: "1".to_string() }],
        vec![Command::AddClient(Client::new("1", "bob"))],
    );
    let second = HistoryEntry::new(
        vec![Command::RemoveMovie { id: "2".to_string() }],
        vec![Command::AddMovie(Movie::new("2", "t", "d", "g"))],
    );
    store.push_undo(first.clone());
    store.push_undo(second.clone());

    assert_eq!(store.undo_len(), 2);
    assert_eq!(store.undo_operations(), Some(second.operations.as_slice()));
    assert_eq!(store.undo_converses(), Some(second.converses.as_slice()));

    assert_eq!(store.remove_undo(), Some(second));
    assert_eq!(store.remove_undo(), Some(first));
    assert_eq!(store.remove_undo(), None);
}

#[test]
fn test_store_clear_redo_leaves_undo() {
    let mut store = HistoryStore::new();
    store.push_undo(HistoryEntry::default());
    store.push_redo(HistoryEntry::default());
    store.push_redo(HistoryEntry::default());

    store.clear_redo();
    assert!(store.is_redo_empty());
    assert_eq!(store.undo_len(), 1);
}

#[test]
fn test_entry_swapped() {
    let ops = vec![Command::UnReturnMovie { id: "9".to_string() }];
    let convs = vec![Command::ReturnMovie { id: "9".to_string() }];
    let swapped = HistoryEntry::new(ops.clone(), convs.clone()).swapped();

    assert_eq!(swapped.operations, convs);
    assert_eq!(swapped.converses, ops);
}

// === Empty history ===

#[test]
fn test_undo_redo_on_empty_history() {
    let mut catalog = Catalog::in_memory();
    let mut history = UndoRedo::new();

    assert!(matches!(history.undo(&mut catalog), Err(HistoryError::NothingToUndo)));
    assert!(matches!(history.redo(&mut catalog), Err(HistoryError::NothingToRedo)));
    assert!(history.store().is_undo_empty());
    assert!(history.store().is_redo_empty());
}

#[test]
fn test_failed_redo_does_not_touch_undo_stack() {
    let (mut catalog, mut history) = seeded();

    assert!(matches!(history.redo(&mut catalog), Err(HistoryError::NothingToRedo)));
    assert_eq!(history.store().undo_len(), 3);
    assert!(history.store().is_redo_empty());
}

#[test]
fn test_error_messages() {
    assert_eq!(HistoryError::NothingToUndo.to_string(), "There is nothing to undo!");
    assert_eq!(HistoryError::NothingToRedo.to_string(), "There is nothing to redo!");
}

// === Handlers ===

#[test]
fn test_add_client_undo_redo() {
    let mut catalog = Catalog::in_memory();
    let mut history = UndoRedo::new();

    catalog.add_client("1", "bob").unwrap();
    history.add_client_handler("1", "bob");

    history.undo(&mut catalog).unwrap();
    assert_eq!(catalog.clients().find_by_id("1").unwrap(), None);

    history.redo(&mut catalog).unwrap();
    assert_eq!(catalog.clients().find_by_id("1").unwrap(), Some(&Client::new("1", "bob")));

    assert!(history.undo(&mut catalog).is_ok());
    assert!(matches!(history.undo(&mut catalog), Err(HistoryError::NothingToUndo)));
}

#[test]
fn test_remove_client_restores_cascaded_rentals() {
    let (mut catalog, mut history) = seeded();

    let (removed_client, removed_rentals) = catalog.remove_client("1").unwrap();
    history.remove_client_handler(&removed_client, &removed_rentals);
    assert!(catalog.clients().is_empty());
    assert!(catalog.rentals().is_empty());

    let replay = history.undo(&mut catalog).unwrap();
    assert_eq!(replay, Replay { applied: 2, suppressed: 0 });
    assert_eq!(clients(&catalog), vec![Client::new("1", "bob")]);
    assert_eq!(rentals(&catalog), vec![rental("9", "2", "1")]);

    history.redo(&mut catalog).unwrap();
    assert!(catalog.clients().is_empty());
    assert!(catalog.rentals().is_empty());
}

#[test]
fn test_remove_client_entry_layout() {
    let (mut catalog, mut history) = seeded();

    let (removed_client, removed_rentals) = catalog.remove_client("1").unwrap();
    history.remove_client_handler(&removed_client, &removed_rentals);

    let store = history.store();
    assert_eq!(
        store.undo_operations().unwrap(),
        &[
            Command::AddClient(Client::new("1", "bob")),
            Command::AddRental(rental("9", "2", "1")),
        ]
    );
    assert_eq!(
        store.undo_converses().unwrap(),
        &[Command::RemoveClient { id: "1".to_string() }]
    );
}

#[test]
fn test_remove_movie_restores_cascaded_rentals() {
    let (mut catalog, mut history) = seeded();
    let before = snapshot(&catalog);

    let (removed_movie, removed_rentals) = catalog.remove_movie("2").unwrap();
    history.remove_movie_handler(&removed_movie, &removed_rentals);
    assert!(catalog.movies().is_empty());
    assert!(catalog.rentals().is_empty());

    history.undo(&mut catalog).unwrap();
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_update_client_undo_redo() {
    let (mut catalog, mut history) = seeded();

    let old = catalog.update_client("1", "1", "robert").unwrap();
    history.update_client_handler(&old, "1", "robert");

    history.undo(&mut catalog).unwrap();
    assert_eq!(catalog.clients().find_by_id("1").unwrap().unwrap().name, "bob");

    history.redo(&mut catalog).unwrap();
    assert_eq!(catalog.clients().find_by_id("1").unwrap().unwrap().name, "robert");
}

#[test]
fn test_update_client_with_new_id() {
    let mut catalog = Catalog::in_memory();
    let mut history = UndoRedo::new();
    catalog.add_client("1", "bob").unwrap();
    history.add_client_handler("1", "bob");

    let old = catalog.update_client("1", "7", "bobby").unwrap();
    history.update_client_handler(&old, "7", "bobby");

    history.undo(&mut catalog).unwrap();
    assert_eq!(clients(&catalog), vec![Client::new("1", "bob")]);

    history.redo(&mut catalog).unwrap();
    assert_eq!(clients(&catalog), vec![Client::new("7", "bobby")]);
}

#[test]
fn test_update_movie_undo_redo() {
    let (mut catalog, mut history) = seeded();

    let old = catalog.update_movie("2", "2", "new title", "new plot", "drama").unwrap();
    let updated = Movie::new("2", "new title", "new plot", "drama");
    history.update_movie_handler(&old, &updated);

    history.undo(&mut catalog).unwrap();
    assert_eq!(movies(&catalog), vec![Movie::new("2", "t", "d", "g")]);

    history.redo(&mut catalog).unwrap();
    assert_eq!(movies(&catalog), vec![updated]);
}

#[test]
fn test_return_movie_undo_redo() {
    let (mut catalog, mut history) = seeded();

    catalog.return_movie("9").unwrap();
    history.return_movie_handler("9");
    assert!(catalog.rentals().find_by_id("9").unwrap().unwrap().is_returned());

    history.undo(&mut catalog).unwrap();
    assert!(!catalog.rentals().find_by_id("9").unwrap().unwrap().is_returned());

    history.redo(&mut catalog).unwrap();
    assert!(catalog.rentals().find_by_id("9").unwrap().unwrap().is_returned());
}

// === Stack discipline ===

#[test]
fn test_undo_moves_swapped_entry_to_redo() {
    let (mut catalog, mut history) = seeded();
    let ops = history.store().undo_operations().unwrap().to_vec();
    let convs = history.store().undo_converses().unwrap().to_vec();

    history.undo(&mut catalog).unwrap();

    assert_eq!(history.store().undo_len(), 2);
    assert_eq!(history.store().redo_len(), 1);
    assert_eq!(history.store().redo_operations().unwrap(), convs.as_slice());
    assert_eq!(history.store().redo_converses().unwrap(), ops.as_slice());
}

#[test]
fn test_new_mutation_clears_redo() {
    let (mut catalog, mut history) = seeded();
    history.undo(&mut catalog).unwrap();
    history.undo(&mut catalog).unwrap();
    assert_eq!(history.store().redo_len(), 2);

    catalog.add_client("3", "alice").unwrap();
    history.add_client_handler("3", "alice");

    assert!(history.store().is_redo_empty());
    assert!(matches!(history.redo(&mut catalog), Err(HistoryError::NothingToRedo)));
}

#[test]
fn test_every_handler_clears_redo() {
    let client = Client::new("1", "bob");
    let movie = Movie::new("2", "t", "d", "g");
    let r = rental("9", "2", "1");
    let handlers: Vec<Box<dyn Fn(&mut UndoRedo) + '_>> = vec![
        Box::new(|h: &mut UndoRedo| h.add_client_handler("5", "x")),
        Box::new(|h: &mut UndoRedo| h.remove_client_handler(&client, &[r.clone()])),
        Box::new(|h: &mut UndoRedo| h.update_client_handler(&client, "1", "robert")),
        Box::new(|h: &mut UndoRedo| h.add_movie_handler("6", "t", "d", "g")),
        Box::new(|h: &mut UndoRedo| h.remove_movie_handler(&movie, &[r.clone()])),
        Box::new(|h: &mut UndoRedo| h.update_movie_handler(&movie, &Movie::new("2", "t2", "d", "g"))),
        Box::new(|h: &mut UndoRedo| h.add_rental_handler(&r)),
        Box::new(|h: &mut UndoRedo| h.return_movie_handler("9")),
    ];

    for handler in &handlers {
        let (mut catalog, mut history) = seeded();
        history.undo(&mut catalog).unwrap();
        assert!(!history.store().is_redo_empty());

        handler(&mut history);
        assert!(history.store().is_redo_empty());
    }
}

#[test]
fn test_undo_all_then_redo_all_restores_state() {
    let (mut catalog, mut history) = seeded();

    let (client, client_rentals) = catalog.remove_client("1").unwrap();
    history.remove_client_handler(&client, &client_rentals);

    catalog.add_client("4", "carol").unwrap();
    history.add_client_handler("4", "carol");

    let r = rental("10", "2", "4");
    catalog.add_rental(r.clone()).unwrap();
    history.add_rental_handler(&r);

    catalog.return_movie("10").unwrap();
    history.return_movie_handler("10");

    let after = snapshot(&catalog);
    let n = history.store().undo_len();
    assert_eq!(n, 7);

    for _ in 0..n {
        history.undo(&mut catalog).unwrap();
    }
    assert_eq!(snapshot(&catalog), (Vec::new(), Vec::new(), Vec::new()));
    assert!(matches!(history.undo(&mut catalog), Err(HistoryError::NothingToUndo)));

    for _ in 0..n {
        history.redo(&mut catalog).unwrap();
    }
    assert_eq!(snapshot(&catalog), after);
    assert!(history.store().is_redo_empty());
}

#[test]
fn test_undo_redo_round_trip_is_noop() {
    let (mut catalog, mut history) = seeded();
    let before = snapshot(&catalog);

    history.undo(&mut catalog).unwrap();
    history.redo(&mut catalog).unwrap();

    assert_eq!(snapshot(&catalog), before);
    assert_eq!(history.store().undo_len(), 3);
}

// === Best-effort replay ===

#[test]
fn test_rejected_command_is_suppressed() {
    let (mut catalog, mut history) = seeded();

    // Removed behind the history's back, so the recorded undo has nothing to remove
    catalog.remove_rental("9").unwrap();

    let replay = history.undo(&mut catalog).unwrap();
    assert_eq!(replay, Replay { applied: 0, suppressed: 1 });
    assert_eq!(history.store().redo_len(), 1);

    // Redo re-adds the rental just fine
    let replay = history.redo(&mut catalog).unwrap();
    assert_eq!(replay, Replay { applied: 1, suppressed: 0 });
    assert!(catalog.rentals().contains("9"));
}

#[test]
fn test_partial_group_still_runs_remaining_commands() {
    let mut catalog = Catalog::in_memory();
    let mut history = UndoRedo::new();
    catalog.add_client("1", "bob").unwrap();
    catalog.add_movie("2", "t", "d", "g").unwrap();
    catalog.add_rental(rental("9", "2", "1")).unwrap();

    let (client, removed) = catalog.remove_client("1").unwrap();
    history.remove_client_handler(&client, &removed);

    // Client comes back some other way before the undo runs
    catalog.add_client("1", "bob").unwrap();

    let replay = history.undo(&mut catalog).unwrap();
    assert_eq!(replay, Replay { applied: 1, suppressed: 1 });
    assert!(catalog.rentals().contains("9"));
}

#[test]
fn test_storage_failure_keeps_entry_on_its_stack() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();

    let clients = Repository::open(Storage::Text(sub.join("clients.csv"))).unwrap();
    let mut catalog = Catalog::new(clients, Repository::in_memory(), Repository::in_memory());
    let mut history = UndoRedo::new();

    catalog.add_client("1", "bob").unwrap();
    history.add_client_handler("1", "bob");

    std::fs::remove_dir_all(&sub).unwrap();

    let result = history.undo(&mut catalog);
    assert!(matches!(result, Err(HistoryError::Storage(_))));
    assert_eq!(history.store().undo_len(), 1);
    assert!(history.store().is_redo_empty());
}
