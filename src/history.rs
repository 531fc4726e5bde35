/// Undo stack of move-list snapshots.
///
/// `push` after an `undo` discards the snapshots ahead of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Vec<usize>>,
    cursor: usize,
}

impl History {
    pub fn new(initial: &[usize]) -> Self {
        Self {
            snapshots: vec![initial.to_vec()],
            cursor: 0,
        }
    }

    pub fn push(&mut self, moves: &[usize]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(moves.to_vec());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot and returns it, `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&[usize]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn current(&self) -> &[usize] {
        &self.snapshots[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(&[])
    }
}
