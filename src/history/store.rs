use super::command::Command;

/// One undoable user action. `operations` reverses what `converses` does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    pub operations: Vec<Command>,
    pub converses: Vec<Command>,
}

impl HistoryEntry {
    pub fn new(operations: Vec<Command>, converses: Vec<Command>) -> Self {
        Self { operations, converses }
    }

    /// The same entry seen from the opposite stack
    pub fn swapped(self) -> Self {
        Self {
            operations: self.converses,
            converses: self.operations,
        }
    }
}

/// Undo and redo stacks, most recent entry last
#[derive(Debug, Default)]
pub struct HistoryStore {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
    }

    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo_stack.push(entry);
    }

    pub fn remove_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    pub fn remove_redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop()
    }

    #[allow(dead_code)]
    pub fn is_undo_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    #[allow(dead_code)]
    pub fn is_redo_empty(&self) -> bool {
        self.redo_stack.is_empty()
    }

    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    #[allow(dead_code)]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[allow(dead_code)]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Operations of the entry the next undo would replay
    #[allow(dead_code)]
    pub fn undo_operations(&self) -> Option<&[Command]> {
        self.undo_stack.last().map(|e| e.operations.as_slice())
    }

    #[allow(dead_code)]
    pub fn undo_converses(&self) -> Option<&[Command]> {
        self.undo_stack.last().map(|e| e.converses.as_slice())
    }

    /// Operations of the entry the next redo would replay
    #[allow(dead_code)]
    pub fn redo_operations(&self) -> Option<&[Command]> {
        self.redo_stack.last().map(|e| e.operations.as_slice())
    }

    #[allow(dead_code)]
    pub fn redo_converses(&self) -> Option<&[Command]> {
        self.redo_stack.last().map(|e| e.converses.as_slice())
    }
}
