//! Position fingerprints and transposition table
//!
//! A fingerprint is a 64-bit FNV-1a digest of the full FEN text, so two states with the same
//! placement, side to move, castling rights and counters share a fingerprint.
//!
//! The table caches `(value, move)` pairs per fingerprint and comes in two flavours:
//! - [`TableMode::Lossy`] keeps a fixed slot array indexed by `fingerprint % slots`; a store
//!   into an occupied slot overwrites it, and a lookup verifies the stored key
//! - [`TableMode::Exact`] keeps every entry in a hash map

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::GameState;
use crate::constants::DEFAULT_TT_SLOTS;
use crate::types::Move;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic digest of a game state's FEN.
pub fn fingerprint(state: &GameState) -> u64 {
    fingerprint_fen(&state.fen())
}

pub fn fingerprint_fen(fen: &str) -> u64 {
    fen.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Cached search result for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtEntry {
    /// Mean result from White's point of view (0.0 to 1.0)
    pub value: f64,
    /// Move that reached the position
    pub mv: Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableMode {
    Lossy { slots: usize },
    Exact,
}

impl Default for TableMode {
    fn default() -> Self {
        TableMode::Lossy {
            slots: DEFAULT_TT_SLOTS,
        }
    }
}

#[derive(Debug, Clone)]
enum Storage {
    Lossy(Vec<Option<(u64, TtEntry)>>),
    Exact(HashMap<u64, TtEntry>),
}

/// Lookup statistics, reported in search summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    storage: Storage,
    stats: TableStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(TableMode::default())
    }
}

impl TranspositionTable {
    /// A lossy table with zero slots is given one slot.
    pub fn new(mode: TableMode) -> TranspositionTable {
        let storage = match mode {
            TableMode::Lossy { slots } => Storage::Lossy(vec![None; slots.max(1)]),
            TableMode::Exact => Storage::Exact(HashMap::new()),
        };
        TranspositionTable {
            storage,
            stats: TableStats::default(),
        }
    }

    pub fn lookup(&mut self, fp: u64) -> Option<TtEntry> {
        let found = match &self.storage {
            Storage::Lossy(slots) => match slots[slot_index(fp, slots.len())] {
                Some((key, entry)) if key == fp => Some(entry),
                _ => None,
            },
            Storage::Exact(map) => map.get(&fp).copied(),
        };
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    pub fn store(&mut self, fp: u64, value: f64, mv: Move) {
        let entry = TtEntry { value, mv };
        match &mut self.storage {
            Storage::Lossy(slots) => {
                let index = slot_index(fp, slots.len());
                if matches!(slots[index], Some((key, _)) if key != fp) {
                    trace!("[TT] slot {} overwritten", index);
                }
                slots[index] = Some((fp, entry));
            }
            Storage::Exact(map) => {
                map.insert(fp, entry);
            }
        }
        self.stats.stores += 1;
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Lossy(slots) => slots.iter().filter(|s| s.is_some()).count(),
            Storage::Exact(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Lossy(slots) => slots.iter_mut().for_each(|s| *s = None),
            Storage::Exact(map) => map.clear(),
        }
        self.stats = TableStats::default();
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }
}

#[inline]
fn slot_index(fp: u64, slots: usize) -> usize {
    (fp % slots as u64) as usize
}
