/// Independent pieces of session state an asynchronous request can write back into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    List,
    CollectionForm,
    ItemForm,
    Picker,
    Manage,
}

const SLOT_COUNT: usize = 5;

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::List => 0,
            Slot::CollectionForm => 1,
            Slot::ItemForm => 2,
            Slot::Picker => 3,
            Slot::Manage => 4,
        }
    }
}

/// Attached to every request. The result is only applied if the slot's generation has not
/// moved on since the request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generations([u64; SLOT_COUNT]);

impl Generations {
    pub fn current(&self, slot: Slot) -> Ticket {
        Ticket {
            slot,
            generation: self.0[slot.index()],
        }
    }

    /// Invalidates every outstanding ticket for `slot`.
    pub fn bump(&mut self, slot: Slot) -> Ticket {
        self.0[slot.index()] += 1;
        self.current(slot)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0[ticket.slot.index()] == ticket.generation
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bump_invalidates_only_its_slot() {
        let mut generations = Generations::default();
        let list = generations.current(Slot::List);
        let picker = generations.current(Slot::Picker);
        generations.bump(Slot::Picker);
        assert!(generations.is_current(list));
        assert!(!generations.is_current(picker));
        assert!(generations.is_current(generations.current(Slot::Picker)));
    }
}
