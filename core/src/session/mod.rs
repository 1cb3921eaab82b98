//! Operator session: the list and manage views, the two editors and the asset picker.
//!
//! `Session` is plain state. `dispatch` turns an operator `Intent` into zero or more
//! `Command`s to run against the collaborators, `complete` applies their `Outcome`s and may
//! ask for follow-up commands (the list reload after a mutation). Running commands is the
//! job of the `driver` module.

mod asset_field;
mod collection_editor;
mod command;
mod driver;
mod error;
mod item_editor;
mod navigation;
mod picker;
mod sync;
mod ticket;

#[cfg(test)]
mod test;

pub use asset_field::AssetField;
pub use collection_editor::{open_create, open_edit, CollectionField, CollectionForm, FormMode};
pub use command::{Command, Outcome, Request};
pub use driver::{run_commands, run_intent, Adapters, SessionHandle, Snapshot};
pub use error::{SessionError, ValidationError};
pub use item_editor::{ItemField, ItemForm, ItemMutation};
pub use navigation::{ItemKey, ManagedCollection, Navigation, View};
pub use picker::{Picker, PickerState, PickerTarget};
pub use ticket::{Generations, Slot, Ticket};

use tracing::{debug, info, warn};

use crate::{
    adapter::UploadFile,
    model::{ActorContext, Collection, CollectionId, ItemKind},
};

/// Everything the operator can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Reload,
    OpenCreate,
    OpenEdit(CollectionId),
    SetCollectionField(CollectionField),
    SubmitCollection,
    CancelCollectionForm,
    RequestDelete(CollectionId),
    Manage(CollectionId),
    Back,
    OpenAddItem,
    SelectItemKind(ItemKind),
    SetItemField(ItemField),
    SubmitItem,
    CancelItemForm,
    RequestRemoveItem(usize),
    Confirm,
    Decline,
    OpenPicker(PickerTarget),
    SelectAsset(String),
    ClosePicker,
    Upload {
        target: PickerTarget,
        file: UploadFile,
    },
}

/// A destructive action waiting for the operator to confirm or decline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteCollection(CollectionId),
    RemoveItem { key: ItemKey, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    actor: ActorContext,
    generations: Generations,
    collections: Vec<Collection>,
    list_loading: bool,
    navigation: Navigation,
    collection_form: Option<CollectionForm>,
    item_form: Option<ItemForm>,
    picker: Option<Picker>,
    confirmation: Option<Confirmation>,
    item_mutation_in_flight: bool,
    notice: Option<String>,
}

impl Session {
    pub fn new(actor: ActorContext) -> Session {
        Session {
            actor,
            generations: Generations::default(),
            collections: Vec::default(),
            list_loading: false,
            navigation: Navigation::default(),
            collection_form: None,
            item_form: None,
            picker: None,
            confirmation: None,
            item_mutation_in_flight: false,
            notice: None,
        }
    }

    /// Commands to run when the session starts: the initial list load.
    pub fn start(&mut self) -> Vec<Command> {
        vec![self.reload()]
    }

    pub fn actor(&self) -> &ActorContext {
        &self.actor
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn is_list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn view(&self) -> &View {
        self.navigation.view()
    }

    pub fn current_collection(&self) -> Option<&ManagedCollection> {
        self.navigation.current()
    }

    pub fn collection_form(&self) -> Option<&CollectionForm> {
        self.collection_form.as_ref()
    }

    pub fn item_form(&self) -> Option<&ItemForm> {
        self.item_form.as_ref()
    }

    pub fn picker(&self) -> Option<&Picker> {
        self.picker.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_item_mutation_in_flight(&self) -> bool {
        self.item_mutation_in_flight
    }

    /// Last collaborator failure, shown verbatim to the operator. Cleared by the next intent.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<Command>, SessionError> {
        if self.confirmation.is_some() && !matches!(intent, Intent::Confirm | Intent::Decline) {
            return Err(SessionError::ConfirmationPending);
        }
        self.notice = None;
        match intent {
            Intent::Reload => Ok(vec![self.reload()]),
            Intent::OpenCreate => {
                self.require_list()?;
                let form = open_create(&self.actor);
                self.open_collection_form(form);
                Ok(vec![])
            }
            Intent::OpenEdit(id) => {
                self.require_list()?;
                let form = open_edit(&self.actor, self.cached(&id)?);
                self.open_collection_form(form);
                Ok(vec![])
            }
            Intent::SetCollectionField(field) => {
                let form = self
                    .collection_form
                    .as_mut()
                    .ok_or(SessionError::NoCollectionForm)?;
                form.set(field)?;
                Ok(vec![])
            }
            Intent::SubmitCollection => self.submit_collection(),
            Intent::CancelCollectionForm => {
                if self.collection_form.is_none() {
                    return Err(SessionError::NoCollectionForm);
                }
                self.close_collection_form();
                Ok(vec![])
            }
            Intent::RequestDelete(id) => {
                self.require_list()?;
                self.cached(&id)?;
                self.confirmation = Some(Confirmation::DeleteCollection(id));
                Ok(vec![])
            }
            Intent::Manage(id) => {
                self.require_list()?;
                let collection = self.cached(&id)?.clone();
                self.close_collection_form();
                self.generations.bump(Slot::Manage);
                self.navigation.manage(collection);
                info!(%id, "managing collection");
                Ok(vec![])
            }
            Intent::Back => {
                self.require_managing()?;
                self.close_item_form();
                self.generations.bump(Slot::Manage);
                self.navigation.back();
                Ok(vec![])
            }
            Intent::OpenAddItem => {
                self.require_managing()?;
                self.close_item_form();
                self.generations.bump(Slot::ItemForm);
                self.item_form = Some(ItemForm::open_add());
                Ok(vec![])
            }
            Intent::SelectItemKind(kind) => {
                self.item_form_mut()?.select_kind(kind);
                Ok(vec![])
            }
            Intent::SetItemField(field) => {
                self.item_form_mut()?.set(field);
                Ok(vec![])
            }
            Intent::SubmitItem => self.submit_item(),
            Intent::CancelItemForm => {
                if self.item_form.is_none() {
                    return Err(SessionError::NoItemForm);
                }
                self.close_item_form();
                Ok(vec![])
            }
            Intent::RequestRemoveItem(index) => {
                let managed = self.navigation.current().ok_or(SessionError::NotManaging)?;
                if self.item_mutation_in_flight {
                    return Err(SessionError::MutationInFlight);
                }
                let key = managed
                    .key_at(index)
                    .ok_or(SessionError::ItemOutOfRange {
                        index,
                        len: managed.items().len(),
                    })?;
                self.confirmation = Some(Confirmation::RemoveItem { key, index });
                Ok(vec![])
            }
            Intent::Confirm => self.confirm(),
            Intent::Decline => {
                let declined = self
                    .confirmation
                    .take()
                    .ok_or(SessionError::NothingToConfirm)?;
                debug!(?declined, "confirmation declined");
                Ok(vec![])
            }
            Intent::OpenPicker(target) => {
                if self.asset_field_mut(target).is_none() {
                    return Err(SessionError::NoFieldForTarget(target));
                }
                let ticket = self.generations.bump(Slot::Picker);
                self.picker = Some(Picker::open(target));
                Ok(vec![Command {
                    ticket,
                    request: Request::ListAssets,
                }])
            }
            Intent::SelectAsset(address) => {
                let target = self
                    .picker
                    .as_ref()
                    .map(Picker::target)
                    .ok_or(SessionError::PickerClosed)?;
                let field = self
                    .asset_field_mut(target)
                    .ok_or(SessionError::NoFieldForTarget(target))?;
                field.set_value(address);
                self.close_picker();
                Ok(vec![])
            }
            Intent::ClosePicker => {
                self.close_picker();
                Ok(vec![])
            }
            Intent::Upload { target, file } => {
                if self.asset_field_mut(target).is_none() {
                    return Err(SessionError::NoFieldForTarget(target));
                }
                Ok(vec![Command {
                    ticket: self.generations.current(target.form_slot()),
                    request: Request::Upload { target, file },
                }])
            }
        }
    }

    /// Applies the outcome of a command issued under `ticket`. Outcomes for state that has
    /// moved on are dropped, except that store mutations still trigger a list reload.
    #[tracing::instrument(skip(self, outcome), level = "debug")]
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Vec<Command> {
        let is_current = self.generations.is_current(ticket);
        match outcome {
            Outcome::Collections(result) => {
                if !is_current {
                    debug!("dropping superseded list result");
                    return vec![];
                }
                self.list_loading = false;
                match result {
                    Ok(collections) => sync::apply_list(&mut self.collections, collections),
                    Err(err) => self.notice = Some(err.to_string()),
                }
                vec![]
            }
            Outcome::CollectionSaved(result) => match result {
                Ok(collection) => {
                    info!(id = %collection.id, "saved collection");
                    if is_current {
                        self.close_collection_form();
                    } else {
                        debug!("collection form changed while saving");
                    }
                    vec![self.reload()]
                }
                Err(err) => {
                    if let (true, Some(form)) = (is_current, self.collection_form.as_mut()) {
                        form.set_submitting(false);
                    }
                    self.notice = Some(err.to_string());
                    vec![]
                }
            },
            Outcome::CollectionDeleted { id, result } => match result {
                Ok(()) => {
                    info!(%id, "deleted collection");
                    vec![self.reload()]
                }
                Err(err) => {
                    self.notice = Some(err.to_string());
                    vec![]
                }
            },
            // Only one item mutation exists at a time, so its result is the newest record of
            // that collection even if the manage view was left and re-entered meanwhile.
            Outcome::ItemsPersisted { mutation, result } => {
                self.item_mutation_in_flight = false;
                let form_ticket = match mutation {
                    ItemMutation::Add { form_generation } => Some(Ticket {
                        slot: Slot::ItemForm,
                        generation: form_generation,
                    }),
                    ItemMutation::Remove => None,
                };
                let form_is_current =
                    form_ticket.is_some_and(|form_ticket| self.generations.is_current(form_ticket));
                match result {
                    Ok(collection) => {
                        info!(id = %collection.id, items = collection.items.len(), ?mutation, "persisted items");
                        if sync::apply_persisted(&mut self.navigation, collection) {
                            if form_is_current {
                                self.close_item_form();
                            }
                        } else {
                            debug!("collection no longer managed, list reload only");
                        }
                        vec![self.reload()]
                    }
                    Err(err) => {
                        if let (true, Some(form)) = (form_is_current, self.item_form.as_mut()) {
                            form.set_submitting(false);
                        }
                        self.notice = Some(err.to_string());
                        vec![]
                    }
                }
            }
            Outcome::Assets(result) => {
                let Some(picker) = self.picker.as_mut().filter(|_| is_current) else {
                    debug!("dropping asset list for a closed picker");
                    return vec![];
                };
                let assets = result.unwrap_or_else(|err| {
                    warn!(%err, "could not list library assets, showing none");
                    Vec::default()
                });
                picker.set_assets(assets);
                vec![]
            }
            Outcome::Uploaded { target, result } => match result {
                Ok(uploaded) => {
                    info!(address = %uploaded.address, %target, "uploaded asset");
                    match self.asset_field_mut(target).filter(|_| is_current) {
                        Some(field) => field.set_value(uploaded.address),
                        None => debug!("form closed while uploading, dropping address"),
                    }
                    vec![]
                }
                Err(err) => {
                    self.notice = Some(err.to_string());
                    vec![]
                }
            },
        }
    }

    fn reload(&mut self) -> Command {
        self.list_loading = true;
        sync::reload_list(&mut self.generations)
    }

    fn cached(&self, id: &CollectionId) -> Result<&Collection, SessionError> {
        self.collections
            .iter()
            .find(|collection| &collection.id == id)
            .ok_or_else(|| SessionError::UnknownCollection(id.clone()))
    }

    fn require_list(&self) -> Result<(), SessionError> {
        match self.navigation.view() {
            View::List => Ok(()),
            View::Manage(_) => Err(SessionError::NotInList),
        }
    }

    fn require_managing(&self) -> Result<&ManagedCollection, SessionError> {
        self.navigation.current().ok_or(SessionError::NotManaging)
    }

    fn item_form_mut(&mut self) -> Result<&mut ItemForm, SessionError> {
        self.item_form.as_mut().ok_or(SessionError::NoItemForm)
    }

    /// The form field a picker or upload for `target` writes to, if its form is open.
    fn asset_field_mut(&mut self, target: PickerTarget) -> Option<&mut AssetField> {
        match target {
            PickerTarget::CoverImage => self.collection_form.as_mut().map(CollectionForm::cover_mut),
            PickerTarget::ItemSource => self.item_form.as_mut().map(ItemForm::source_mut),
        }
    }

    fn open_collection_form(&mut self, form: CollectionForm) {
        self.close_collection_form();
        self.generations.bump(Slot::CollectionForm);
        self.collection_form = Some(form);
    }

    fn close_collection_form(&mut self) {
        if self.collection_form.take().is_some() {
            self.generations.bump(Slot::CollectionForm);
            self.close_picker_for(PickerTarget::CoverImage);
        }
    }

    fn close_item_form(&mut self) {
        if self.item_form.take().is_some() {
            self.generations.bump(Slot::ItemForm);
            self.close_picker_for(PickerTarget::ItemSource);
        }
    }

    fn close_picker(&mut self) {
        if self.picker.take().is_some() {
            self.generations.bump(Slot::Picker);
        }
    }

    fn close_picker_for(&mut self, target: PickerTarget) {
        if self.picker.as_ref().map(Picker::target) == Some(target) {
            self.close_picker();
        }
    }

    fn submit_collection(&mut self) -> Result<Vec<Command>, SessionError> {
        let form = self
            .collection_form
            .as_mut()
            .ok_or(SessionError::NoCollectionForm)?;
        if form.is_submitting() {
            return Err(SessionError::SubmitInFlight);
        }
        let request = form.request(&self.actor)?;
        form.set_submitting(true);
        Ok(vec![Command {
            ticket: self.generations.current(Slot::CollectionForm),
            request,
        }])
    }

    fn submit_item(&mut self) -> Result<Vec<Command>, SessionError> {
        let managed = self.require_managing()?;
        let form = self.item_form.as_ref().ok_or(SessionError::NoItemForm)?;
        if form.is_submitting() {
            return Err(SessionError::SubmitInFlight);
        }
        if self.item_mutation_in_flight {
            return Err(SessionError::MutationInFlight);
        }
        let item = form.to_item()?;
        let request = Request::PersistItems {
            id: managed.collection().id.clone(),
            items: managed.items_appended(item),
            mutation: ItemMutation::Add {
                form_generation: self.generations.current(Slot::ItemForm).generation,
            },
        };
        self.item_mutation_in_flight = true;
        self.item_form_mut()?.set_submitting(true);
        Ok(vec![Command {
            ticket: self.generations.current(Slot::Manage),
            request,
        }])
    }

    fn confirm(&mut self) -> Result<Vec<Command>, SessionError> {
        // a rejected confirm keeps the confirmation pending
        let confirmation = self
            .confirmation
            .clone()
            .ok_or(SessionError::NothingToConfirm)?;
        match confirmation {
            Confirmation::DeleteCollection(id) => {
                self.confirmation = None;
                Ok(vec![Command {
                    ticket: self.generations.current(Slot::List),
                    request: Request::DeleteCollection(id),
                }])
            }
            Confirmation::RemoveItem { key, .. } => {
                if self.item_mutation_in_flight {
                    return Err(SessionError::MutationInFlight);
                }
                let managed = self.require_managing()?;
                let items = managed.items_without(key).ok_or(SessionError::ItemGone)?;
                let request = Request::PersistItems {
                    id: managed.collection().id.clone(),
                    items,
                    mutation: ItemMutation::Remove,
                };
                self.confirmation = None;
                self.item_mutation_in_flight = true;
                Ok(vec![Command {
                    ticket: self.generations.current(Slot::Manage),
                    request,
                }])
            }
        }
    }
}
