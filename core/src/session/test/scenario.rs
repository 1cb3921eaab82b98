use claims::{assert_none, assert_ok};
use pretty_assertions::assert_eq;

use super::util::{admin_actor, seed, Fixture};
use crate::{
    adapter::{MemoryAssets, MemoryStore, StoreCall},
    model::{ActorContext, Category, Department, Item, ItemKind},
    session::{
        Adapters, CollectionField, Intent, ItemField, PickerTarget, Session, SessionError,
        SessionHandle, View,
    },
};

#[tokio::test]
async fn graduation_gallery() {
    let mut fixture = Fixture::admin().await;
    fixture
        .run_all([
            Intent::OpenCreate,
            Intent::SetCollectionField(CollectionField::Title("Graduation 2024".to_owned())),
            Intent::SetCollectionField(CollectionField::Category(Category::Events)),
            Intent::SubmitCollection,
        ])
        .await;
    let created = fixture.session.collections()[0].clone();
    assert_eq!(created.title, "Graduation 2024");
    assert!(created.items.is_empty());

    fixture
        .run_all([
            Intent::Manage(created.id.clone()),
            Intent::OpenAddItem,
            Intent::SetItemField(ItemField::Source(Some("https://x/1.jpg".to_owned()))),
            Intent::SubmitItem,
            Intent::OpenAddItem,
            Intent::SelectItemKind(ItemKind::Video),
            Intent::SetItemField(ItemField::VideoUrl("https://y/2".to_owned())),
            Intent::SubmitItem,
        ])
        .await;
    assert_eq!(
        fixture.current_items(),
        vec![Item::image("https://x/1.jpg"), Item::video("https://y/2")]
    );

    fixture
        .run_all([Intent::RequestRemoveItem(0), Intent::Confirm])
        .await;
    assert_eq!(fixture.current_items(), vec![Item::video("https://y/2")]);

    fixture.run(Intent::Back).await;
    assert_eq!(
        fixture.cached(&created.id).items,
        vec![Item::video("https://y/2")]
    );
}

#[tokio::test]
async fn delete_leaves_assets_alone() {
    let store = MemoryStore::new();
    let collection = seed(
        &store,
        "Old photos",
        vec![Item::image("https://cdn/a.jpg"), Item::image("https://cdn/b.jpg")],
    )
    .await;
    let mut fixture = Fixture::with_store(admin_actor(), store).await;
    fixture
        .run_all([Intent::RequestDelete(collection.id.clone()), Intent::Confirm])
        .await;

    assert!(fixture.session.collections().is_empty());
    assert!(fixture.store.snapshot().await.is_empty());
    assert!(fixture.assets.uploads().await.is_empty());
    // seeding took the first two calls
    let calls = fixture.store.calls().await;
    assert_eq!(
        calls[2..].to_vec(),
        vec![
            StoreCall::List,
            StoreCall::Delete(collection.id),
            StoreCall::List,
        ]
    );
    // the library still lists the assets the deleted collection pointed at
    fixture.run(Intent::OpenCreate).await;
    fixture
        .run(Intent::OpenPicker(PickerTarget::CoverImage))
        .await;
    assert_eq!(fixture.session.picker().map(|p| p.assets().len()), Some(2));
}

#[tokio::test]
async fn department_admin_sees_locked_department_throughout() {
    let mut fixture = Fixture::new(ActorContext::department_admin("CSE")).await;
    fixture
        .run_all([
            Intent::OpenCreate,
            Intent::SetCollectionField(CollectionField::Title("Symposium".to_owned())),
            Intent::SubmitCollection,
        ])
        .await;
    let created = fixture.session.collections()[0].clone();
    assert_eq!(created.department, Some(Department::from("CSE")));

    fixture.run(Intent::OpenEdit(created.id.clone())).await;
    assert_eq!(
        fixture
            .session
            .dispatch(Intent::SetCollectionField(CollectionField::Department(None))),
        Err(SessionError::ReadOnlyField(Department::from("CSE")))
    );
}

#[tokio::test]
async fn handle_runs_requests_in_background() {
    let store = MemoryStore::new();
    let adapters = Adapters::in_memory(store.clone(), MemoryAssets::new());
    let handle = SessionHandle::new(Session::new(admin_actor()), adapters);
    let snapshot = assert_ok!(handle.settled().await);
    assert!(!snapshot.session.is_list_loading());

    for intent in [
        Intent::OpenCreate,
        Intent::SetCollectionField(CollectionField::Title("Graduation 2024".to_owned())),
        Intent::SubmitCollection,
    ] {
        assert_ok!(assert_ok!(handle.dispatch(intent).await));
    }
    let snapshot = assert_ok!(handle.settled().await);
    assert_none!(snapshot.session.collection_form());
    assert_eq!(snapshot.session.collections().len(), 1);
    let id = snapshot.session.collections()[0].id.clone();

    for intent in [
        Intent::Manage(id),
        Intent::OpenAddItem,
        Intent::SelectItemKind(ItemKind::Video),
        Intent::SetItemField(ItemField::VideoUrl("https://y/2".to_owned())),
        Intent::SubmitItem,
    ] {
        assert_ok!(assert_ok!(handle.dispatch(intent).await));
    }
    let snapshot = assert_ok!(handle.settled().await);
    assert_eq!(snapshot.in_flight, 0);
    match snapshot.session.view() {
        View::Manage(managed) => {
            assert_eq!(managed.items(), &[Item::video("https://y/2")])
        }
        View::List => panic!("expected manage view"),
    }

    let rejected = assert_ok!(handle.dispatch(Intent::OpenCreate).await);
    assert_eq!(rejected, Err(SessionError::NotInList));
    assert_ok!(handle.shutdown());
    assert_eq!(store.snapshot().await[0].items, vec![Item::video("https://y/2")]);
}
