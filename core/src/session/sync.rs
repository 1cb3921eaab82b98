//! Keeps the list cache and the managed collection from drifting apart.
//!
//! Every successful mutation (create, metadata edit, delete, item add, item remove) is
//! followed by a full reload of the list from the store. The cached list is never patched
//! locally. Item mutations additionally swap the managed collection for the record the store
//! returned, so the manage view shows the stored state without leaving it. Failed mutations
//! change neither.

use crate::model::Collection;

use super::{Command, Generations, Navigation, Request, Slot};

/// A full list reload. Supersedes any reload still in flight.
pub(super) fn reload_list(generations: &mut Generations) -> Command {
    Command {
        ticket: generations.bump(Slot::List),
        request: Request::ListCollections,
    }
}

/// The managed collection is left alone: a record returned by a mutation is at least as
/// new as the same record in a list fetched around the same time.
pub(super) fn apply_list(cache: &mut Vec<Collection>, collections: Vec<Collection>) {
    *cache = collections;
}

/// Returns whether the manage view picked up the record.
pub(super) fn apply_persisted(navigation: &mut Navigation, collection: Collection) -> bool {
    navigation.replace_current(collection)
}
