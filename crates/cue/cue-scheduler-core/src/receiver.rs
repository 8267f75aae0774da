//! Name-keyed listener registry.
//!
//! Listeners register under a cue name and receive every cue with that name.
//! Fan-out runs newest-registered-first. Cues with an empty name are never
//! delivered, and a name with no listeners is a silent no-op.

use std::fmt;

use hashbrown::HashMap;
use log::trace;

use crate::definition::CueDefinition;
use crate::dispatch::CueDispatcher;
use crate::ids::{IdAllocator, ListenerId};

type Listener = Box<dyn FnMut(&CueDefinition)>;

struct ListenerSlot {
    id: ListenerId,
    callback: Listener,
}

#[derive(Default)]
pub struct CueReceiver {
    ids: IdAllocator,
    listeners: HashMap<String, Vec<ListenerSlot>>,
}

impl CueReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `name`. Keep the returned id to remove it later.
    pub fn add_listener<F>(&mut self, name: impl Into<String>, callback: F) -> ListenerId
    where
        F: FnMut(&CueDefinition) + 'static,
    {
        let id = self.ids.alloc_listener();
        self.listeners
            .entry(name.into())
            .or_default()
            .push(ListenerSlot {
                id,
                callback: Box::new(callback),
            });
        id
    }

    /// Returns false when no listener with `id` is registered under `name`.
    pub fn remove_listener(&mut self, name: &str, id: ListenerId) -> bool {
        let Some(slots) = self.listeners.get_mut(name) else {
            return false;
        };
        let Some(pos) = slots.iter().position(|s| s.id == id) else {
            return false;
        };
        slots.remove(pos);
        if slots.is_empty() {
            self.listeners.remove(name);
        }
        true
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl CueDispatcher for CueReceiver {
    fn dispatch(&mut self, cue: &CueDefinition) {
        if cue.name().is_empty() {
            return;
        }
        let Some(slots) = self.listeners.get_mut(cue.name()) else {
            trace!("cue '{}' has no listeners", cue.name());
            return;
        };
        for slot in slots.iter_mut().rev() {
            (slot.callback)(cue);
        }
    }
}

impl fmt::Debug for CueReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, slots) in &self.listeners {
            map.entry(name, &slots.len());
        }
        map.finish()
    }
}
