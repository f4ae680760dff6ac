//! # World State
//!
//! Persistent storage of destination handlers, keyed by (contract address,
//! key). Execution never writes to it directly: every call runs in an
//! `Overlay` whose changes reach the parent layer only on `commit`.
//!
//! ```text
//! WorldState
//!   └── Overlay (batch, atomic mode)
//!         └── Overlay (call)  -> ContractStorage scoped to the callee
//! ```

use std::collections::BTreeMap;

type SlotKey = (Vec<u8>, Vec<u8>);

/// A readable and writable storage layer.
pub trait StateLayer {
    /// Current value of a slot.
    fn read(&self, contract: &[u8], key: &[u8]) -> Option<Vec<u8>>;

    /// Set (`Some`) or clear (`None`) a slot.
    fn write(&mut self, contract: &[u8], key: &[u8], value: Option<Vec<u8>>);
}

/// Committed state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldState {
    slots: BTreeMap<SlotKey, Vec<u8>>,
}

impl WorldState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StateLayer for WorldState {
    fn read(&self, contract: &[u8], key: &[u8]) -> Option<Vec<u8>> {
        self.slots.get(&(contract.to_vec(), key.to_vec())).cloned()
    }

    fn write(&mut self, contract: &[u8], key: &[u8], value: Option<Vec<u8>>) {
        let slot = (contract.to_vec(), key.to_vec());
        match value {
            Some(v) => {
                self.slots.insert(slot, v);
            }
            None => {
                self.slots.remove(&slot);
            }
        }
    }
}

/// Discardable change-set over a parent layer.
///
/// Dropping an overlay without calling `commit` discards its changes.
pub struct Overlay<'a> {
    parent: &'a mut dyn StateLayer,
    changes: BTreeMap<SlotKey, Option<Vec<u8>>>,
}

impl<'a> Overlay<'a> {
    /// Open an overlay on `parent`.
    pub fn new(parent: &'a mut dyn StateLayer) -> Self {
        Self {
            parent,
            changes: BTreeMap::new(),
        }
    }

    /// Number of pending slot changes.
    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    /// Apply pending changes to the parent.
    pub fn commit(self) {
        let Overlay { parent, changes } = self;
        for ((contract, key), value) in changes {
            parent.write(&contract, &key, value);
        }
    }
}

impl StateLayer for Overlay<'_> {
    fn read(&self, contract: &[u8], key: &[u8]) -> Option<Vec<u8>> {
        match self.changes.get(&(contract.to_vec(), key.to_vec())) {
            Some(pending) => pending.clone(),
            None => self.parent.read(contract, key),
        }
    }

    fn write(&mut self, contract: &[u8], key: &[u8], value: Option<Vec<u8>>) {
        self.changes.insert((contract.to_vec(), key.to_vec()), value);
    }
}

/// Storage view confined to one contract's namespace.
pub struct ContractStorage<'a> {
    contract: &'a [u8],
    layer: &'a mut dyn StateLayer,
}

impl<'a> ContractStorage<'a> {
    /// View of `contract`'s slots in `layer`.
    pub fn new(contract: &'a [u8], layer: &'a mut dyn StateLayer) -> Self {
        Self { contract, layer }
    }

    /// Address owning this namespace.
    pub fn contract(&self) -> &[u8] {
        self.contract
    }

    /// Read a slot.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.layer.read(self.contract, key)
    }

    /// Write a slot.
    pub fn set(&mut self, key: &[u8], value: impl Into<Vec<u8>>) {
        self.layer.write(self.contract, key, Some(value.into()));
    }

    /// Clear a slot.
    pub fn remove(&mut self, key: &[u8]) {
        self.layer.write(self.contract, key, None);
    }
}
