//! Call-frame journal.
//!
//! Every mutating ledger call opens a frame. Each write records an undo entry
//! first; a failed call replays its frame's entries backwards, restores the
//! token ledger snapshot taken when the frame opened and truncates the event
//! log. Frames nest, so a delegate re-entering the ledger gets its own frame
//! inside the outer call's frame.

use tenure_types::{AccountId, CertificateId, Disposal};

use crate::certificate::CertificateEntry;

/// The inverse of one write.
#[derive(Clone, Debug)]
pub(crate) enum Undo {
    /// Put back the previous entry (or remove the id when there was none).
    Certificate {
        id: CertificateId,
        prev: Option<CertificateEntry>,
    },
    Disposal {
        id: CertificateId,
        prev: Option<Disposal>,
    },
    Operator {
        owner: AccountId,
        operator: AccountId,
        prev: bool,
    },
    Counter { prev: u64 },
    IndexAdded {
        account: AccountId,
        id: CertificateId,
    },
    IndexRemoved {
        account: AccountId,
        id: CertificateId,
        pos: usize,
    },
}

pub(crate) struct Frame<S> {
    undo_start: usize,
    events_len: usize,
    token: S,
}

/// Undo log plus the stack of open frames.
pub(crate) struct Journal<S> {
    entries: Vec<Undo>,
    frames: Vec<Frame<S>>,
}

impl<S> Journal<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn open(&mut self, events_len: usize, token: S) {
        self.frames.push(Frame {
            undo_start: self.entries.len(),
            events_len,
            token,
        });
    }

    /// Record an undo entry. Writes outside any frame are not journaled.
    pub fn record(&mut self, undo: Undo) {
        if !self.frames.is_empty() {
            self.entries.push(undo);
        }
    }

    /// Close the innermost frame successfully. Its entries fold into the
    /// parent frame; closing the outermost frame discards them. Returns the
    /// event-log length at which the outermost frame opened, if this was it.
    pub fn commit(&mut self) -> Option<usize> {
        let frame = self.frames.pop()?;
        if self.frames.is_empty() {
            self.entries.clear();
            Some(frame.events_len)
        } else {
            None
        }
    }

    /// Close the innermost frame as failed, handing back what to undo: its
    /// entries newest first, the event-log length to truncate to and the
    /// token snapshot to restore.
    pub fn revert(&mut self) -> Option<(Vec<Undo>, usize, S)> {
        let frame = self.frames.pop()?;
        let mut undo = self.entries.split_off(frame.undo_start);
        undo.reverse();
        Some((undo, frame.events_len, frame.token))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_frame_nothing_is_recorded() {
        let mut j: Journal<()> = Journal::new();
        j.record(Undo::Counter { prev: 1 });
        j.open(0, ());
        let (undo, _, _) = j.revert().unwrap();
        assert!(undo.is_empty());
    }

    #[test]
    fn revert_returns_entries_newest_first() {
        let mut j: Journal<u8> = Journal::new();
        j.open(4, 7);
        j.record(Undo::Counter { prev: 1 });
        j.record(Undo::Counter { prev: 2 });
        let (undo, events_len, token) = j.revert().unwrap();
        assert!(matches!(undo[0], Undo::Counter { prev: 2 }));
        assert!(matches!(undo[1], Undo::Counter { prev: 1 }));
        assert_eq!(events_len, 4);
        assert_eq!(token, 7);
        assert_eq!(j.depth(), 0);
    }

    #[test]
    fn nested_commit_folds_into_parent() {
        let mut j: Journal<()> = Journal::new();
        j.open(0, ());
        j.record(Undo::Counter { prev: 1 });
        j.open(1, ());
        j.record(Undo::Counter { prev: 2 });
        assert_eq!(j.commit(), None);
        let (undo, _, _) = j.revert().unwrap();
        assert_eq!(undo.len(), 2);
    }

    #[test]
    fn nested_revert_leaves_parent_entries() {
        let mut j: Journal<()> = Journal::new();
        j.open(0, ());
        j.record(Undo::Counter { prev: 1 });
        j.open(1, ());
        j.record(Undo::Counter { prev: 2 });
        let (inner, _, _) = j.revert().unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(j.depth(), 1);
        assert_eq!(j.commit(), Some(0));
    }
}
