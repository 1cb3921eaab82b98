use crate::{
    adapter::{MemoryAssets, MemoryStore},
    model::{ActorContext, Category, Collection, CollectionId, CollectionMetadata, Item, Role},
    session::{run_commands, run_intent, Adapters, Intent, Session},
};

pub struct Fixture {
    pub session: Session,
    pub adapters: Adapters,
    pub store: MemoryStore,
    pub assets: MemoryAssets,
}

impl Fixture {
    pub async fn new(actor: ActorContext) -> Fixture {
        Fixture::with_store(actor, MemoryStore::new()).await
    }

    pub async fn admin() -> Fixture {
        Fixture::new(admin_actor()).await
    }

    /// Session started against `store`, with the initial list load done.
    pub async fn with_store(actor: ActorContext, store: MemoryStore) -> Fixture {
        let assets = MemoryAssets::with_assets(["https://cdn/a.jpg", "https://cdn/b.jpg"]);
        let adapters = Adapters::in_memory(store.clone(), assets.clone());
        let mut session = Session::new(actor);
        let commands = session.start();
        run_commands(&mut session, &adapters, commands).await;
        Fixture {
            session,
            adapters,
            store,
            assets,
        }
    }

    pub async fn run(&mut self, intent: Intent) {
        let result = run_intent(&mut self.session, &self.adapters, intent.clone()).await;
        assert!(result.is_ok(), "intent {:?} failed: {:?}", intent, result);
    }

    pub async fn run_all(&mut self, intents: impl IntoIterator<Item = Intent>) {
        for intent in intents {
            self.run(intent).await;
        }
    }

    pub fn cached(&self, id: &CollectionId) -> &Collection {
        self.session
            .collections()
            .iter()
            .find(|collection| &collection.id == id)
            .expect("collection in list cache")
    }

    pub fn current_items(&self) -> Vec<Item> {
        self.session
            .current_collection()
            .expect("managing a collection")
            .items()
            .to_vec()
    }

    pub fn current_id(&self) -> CollectionId {
        self.session
            .current_collection()
            .expect("managing a collection")
            .collection()
            .id
            .clone()
    }
}

pub fn admin_actor() -> ActorContext {
    ActorContext::unrestricted(Role::Admin).unwrap()
}

pub fn metadata(title: &str, category: Category) -> CollectionMetadata {
    CollectionMetadata {
        title: title.to_owned(),
        category,
        description: None,
        cover_image: None,
        department: None,
    }
}

/// Seeds `store` directly, bypassing any session.
pub async fn seed(store: &MemoryStore, title: &str, items: Vec<Item>) -> Collection {
    use crate::adapter::CollectionStore;
    use crate::model::CollectionPatch;

    let created = store
        .create(metadata(title, Category::Events))
        .await
        .expect("memory store create");
    if items.is_empty() {
        return created;
    }
    store
        .update(&created.id, CollectionPatch::Items { items })
        .await
        .expect("memory store update")
}
