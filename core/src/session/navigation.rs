use crate::model::{Collection, Item};

/// Local handle for an item of the managed collection. Assigned when the collection is
/// loaded into the manage view, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedCollection {
    collection: Collection,
    keys: Vec<ItemKey>,
}

impl ManagedCollection {
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn items(&self) -> &[Item] {
        &self.collection.items
    }

    pub fn entries(&self) -> impl Iterator<Item = (ItemKey, &Item)> {
        self.keys.iter().copied().zip(self.collection.items.iter())
    }

    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.keys.get(index).copied()
    }

    pub fn position_of(&self, key: ItemKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    /// The full item sequence with `item` appended, ready to persist.
    pub fn items_appended(&self, item: Item) -> Vec<Item> {
        let mut items = self.collection.items.clone();
        items.push(item);
        items
    }

    /// The full item sequence without the item behind `key`, ready to persist.
    pub fn items_without(&self, key: ItemKey) -> Option<Vec<Item>> {
        let position = self.position_of(key)?;
        let mut items = self.collection.items.clone();
        items.remove(position);
        Some(items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    List,
    Manage(ManagedCollection),
}

/// Two states: the collection list, and managing the items of one collection.
/// Being in `Manage` always means a current collection exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    view: View,
    next_key: u64,
}

impl Navigation {
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn current(&self) -> Option<&ManagedCollection> {
        match &self.view {
            View::List => None,
            View::Manage(managed) => Some(managed),
        }
    }

    pub fn is_managing(&self) -> bool {
        matches!(self.view, View::Manage(_))
    }

    pub(super) fn manage(&mut self, collection: Collection) {
        let managed = self.managed(collection);
        self.view = View::Manage(managed);
    }

    pub(super) fn back(&mut self) -> Option<Collection> {
        match std::mem::take(&mut self.view) {
            View::List => None,
            View::Manage(managed) => Some(managed.collection),
        }
    }

    /// Swaps in a newer record of the managed collection. Returns false and does nothing if
    /// a different collection (or none) is being managed.
    pub(super) fn replace_current(&mut self, collection: Collection) -> bool {
        let is_current = self
            .current()
            .is_some_and(|managed| managed.collection.id == collection.id);
        if is_current {
            let managed = self.managed(collection);
            self.view = View::Manage(managed);
        }
        is_current
    }

    fn managed(&mut self, collection: Collection) -> ManagedCollection {
        let keys = collection.items.iter().map(|_| self.fresh_key()).collect();
        ManagedCollection { collection, keys }
    }

    fn fresh_key(&mut self) -> ItemKey {
        let key = ItemKey(self.next_key);
        // wraps only after 2^64 keys in one session
        self.next_key = self.next_key.wrapping_add(1);
        key
    }
}
