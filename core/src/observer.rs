// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move observers
//!
//! Observers are callbacks run after every accepted move. Each one owns a
//! private [`Notes`] map, handed to it on every call, where analysis code can
//! keep state between moves. Notification order is unspecified.

use crate::board::Board;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Private scratch space of one observer
pub type Notes = BTreeMap<String, serde_json::Value>;

/// Callback invoked after an accepted move
pub type ObserverFn = Box<dyn FnMut(&ObserverKey, &Board, &mut Notes)>;

/// Key identifying a registered observer on one board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverKey(String);

impl ObserverKey {
    /// The key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObserverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Odometer producing `a0001`, `a0002`, ... `a000z`, `a0010`, ...
///
/// Each place rolls over `0-9` then `a-z`.
#[derive(Debug, Clone)]
struct KeySequence {
    last: Vec<u8>,
}

impl Default for KeySequence {
    fn default() -> Self {
        Self {
            last: b"a0000".to_vec(),
        }
    }
}

impl KeySequence {
    fn next_key(&mut self) -> ObserverKey {
        for place in self.last.iter_mut().rev() {
            match *place {
                b'9' => {
                    *place = b'a';
                    break;
                }
                b'z' => *place = b'0',
                _ => {
                    *place += 1;
                    break;
                }
            }
        }
        // Every place rolled over: widen the key.
        if self.last.iter().all(|&place| place == b'0') {
            self.last.insert(0, b'1');
        }
        ObserverKey(String::from_utf8_lossy(&self.last).into_owned())
    }
}

pub(crate) struct Observer {
    callback: ObserverFn,
    notes: Notes,
}

/// Callbacks and notes registered on a board
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    keys: KeySequence,
    observers: HashMap<ObserverKey, Observer>,
}

impl ObserverRegistry {
    pub(crate) fn register(&mut self, callback: ObserverFn) -> ObserverKey {
        let key = self.keys.next_key();
        self.observers.insert(
            key.clone(),
            Observer {
                callback,
                notes: Notes::new(),
            },
        );
        key
    }

    pub(crate) fn unregister(&mut self, key: &ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    pub(crate) fn notes(&self, key: &ObserverKey) -> Option<&Notes> {
        self.observers.get(key).map(|observer| &observer.notes)
    }

    pub(crate) fn notes_mut(&mut self, key: &ObserverKey) -> Option<&mut Notes> {
        self.observers.get_mut(key).map(|observer| &mut observer.notes)
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Run every callback against `board`.
    pub(crate) fn notify(&mut self, board: &Board) {
        for (key, observer) in self.observers.iter_mut() {
            (observer.callback)(key, board, &mut observer.notes);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("keys", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sequence_starts_after_a0000() {
        let mut keys = KeySequence::default();
        assert_eq!(keys.next_key().as_str(), "a0001");
        assert_eq!(keys.next_key().as_str(), "a0002");
    }

    #[test]
    fn test_key_sequence_rolls_over() {
        let mut keys = KeySequence {
            last: b"a0009".to_vec(),
        };
        assert_eq!(keys.next_key().as_str(), "a000a");

        let mut keys = KeySequence {
            last: b"a00zz".to_vec(),
        };
        assert_eq!(keys.next_key().as_str(), "a0100");

        let mut keys = KeySequence {
            last: b"zzzzz".to_vec(),
        };
        assert_eq!(keys.next_key().as_str(), "100000");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys = KeySequence::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5000 {
            assert!(seen.insert(keys.next_key()));
        }
    }
}
