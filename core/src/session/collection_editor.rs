use crate::model::{
    ActorContext, Category, Collection, CollectionId, CollectionMetadata, CollectionPatch,
    Department,
};

use super::{AssetField, Request, SessionError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CollectionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionField {
    Title(String),
    Category(Category),
    Description(String),
    Department(Option<Department>),
    Cover(Option<String>),
}

/// Working copy of a collection's metadata while it is created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionForm {
    mode: FormMode,
    title: String,
    category: Category,
    description: String,
    department: Option<Department>,
    department_locked: bool,
    cover: AssetField,
    submitting: bool,
}

pub fn open_create(actor: &ActorContext) -> CollectionForm {
    CollectionForm {
        mode: FormMode::Create,
        title: String::new(),
        category: Category::default(),
        description: String::new(),
        department: actor.restricted_department().cloned(),
        department_locked: actor.restricted_department().is_some(),
        cover: AssetField::default(),
        submitting: false,
    }
}

pub fn open_edit(actor: &ActorContext, collection: &Collection) -> CollectionForm {
    CollectionForm {
        mode: FormMode::Edit(collection.id.clone()),
        title: collection.title.clone(),
        category: collection.category,
        description: collection.description.clone().unwrap_or_default(),
        department: actor.scope_department(collection.department.clone()),
        department_locked: actor.restricted_department().is_some(),
        cover: AssetField::new(collection.cover_image.clone()),
        submitting: false,
    }
}

impl CollectionForm {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    pub fn department_locked(&self) -> bool {
        self.department_locked
    }

    pub fn cover(&self) -> &AssetField {
        &self.cover
    }

    pub(super) fn cover_mut(&mut self) -> &mut AssetField {
        &mut self.cover
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(super) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn set(&mut self, field: CollectionField) -> Result<(), SessionError> {
        match field {
            CollectionField::Title(title) => self.title = title,
            CollectionField::Category(category) => self.category = category,
            CollectionField::Description(description) => self.description = description,
            CollectionField::Department(department) => {
                if self.department_locked {
                    let locked = self.department.clone().unwrap_or_default();
                    return Err(SessionError::ReadOnlyField(locked));
                }
                self.department = department.filter(|department| !department.0.is_empty());
            }
            CollectionField::Cover(Some(address)) => self.cover.set_value(address),
            CollectionField::Cover(None) => self.cover.clear(),
        }
        Ok(())
    }

    /// The metadata to persist. A restricted actor's department always wins over whatever
    /// the form holds.
    pub fn metadata(&self, actor: &ActorContext) -> Result<CollectionMetadata, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = self.description.trim();
        Ok(CollectionMetadata {
            title: title.to_owned(),
            category: self.category,
            description: (!description.is_empty()).then(|| description.to_owned()),
            cover_image: self.cover.value().map(str::to_owned),
            department: actor.scope_department(self.department.clone()),
        })
    }

    pub(super) fn request(&self, actor: &ActorContext) -> Result<Request, ValidationError> {
        let metadata = self.metadata(actor)?;
        Ok(match &self.mode {
            FormMode::Create => Request::CreateCollection(metadata),
            FormMode::Edit(id) => Request::UpdateCollection {
                id: id.clone(),
                patch: CollectionPatch::Metadata(metadata),
            },
        })
    }
}

#[cfg(test)]
mod test {
    use claims::{assert_err, assert_ok};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Item, Role};

    fn collection() -> Collection {
        Collection {
            id: CollectionId::from("c1"),
            title: "Sports day".to_owned(),
            category: Category::Sports,
            description: Some("Annual meet".to_owned()),
            cover_image: Some("https://x/cover.jpg".to_owned()),
            department: Some(Department::from("ECE")),
            items: vec![Item::image("https://x/1.jpg")],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn open_create_for_unrestricted_actor_is_common_and_editable() {
        let actor = ActorContext::unrestricted(Role::SuperAdmin).unwrap();
        let mut form = open_create(&actor);
        assert_eq!(form.department(), None);
        assert!(!form.department_locked());
        assert_ok!(form.set(CollectionField::Department(Some(Department::from("ME")))));
        assert_eq!(form.department(), Some(&Department::from("ME")));
    }

    #[test]
    fn open_create_for_department_admin_is_locked() {
        let actor = ActorContext::department_admin("CSE");
        let mut form = open_create(&actor);
        assert_eq!(form.department(), Some(&Department::from("CSE")));
        assert!(form.department_locked());
        assert_eq!(
            form.set(CollectionField::Department(Some(Department::from("ECE")))),
            Err(SessionError::ReadOnlyField(Department::from("CSE")))
        );
        assert_eq!(form.department(), Some(&Department::from("CSE")));
    }

    #[test]
    fn open_edit_prefills_from_collection() {
        let actor = ActorContext::unrestricted(Role::Admin).unwrap();
        let form = open_edit(&actor, &collection());
        assert_eq!(form.mode(), &FormMode::Edit(CollectionId::from("c1")));
        assert_eq!(form.title(), "Sports day");
        assert_eq!(form.category(), Category::Sports);
        assert_eq!(form.description(), "Annual meet");
        assert_eq!(form.cover().value(), Some("https://x/cover.jpg"));
        assert_eq!(form.department(), Some(&Department::from("ECE")));
    }

    #[test]
    fn edit_request_carries_metadata_only() {
        let actor = ActorContext::unrestricted(Role::Admin).unwrap();
        let mut form = open_edit(&actor, &collection());
        form.set(CollectionField::Title("  Sports day 2024 ".to_owned()))
            .unwrap();
        form.set(CollectionField::Description(String::new())).unwrap();
        let request = assert_ok!(form.request(&actor));
        assert_eq!(
            request,
            Request::UpdateCollection {
                id: CollectionId::from("c1"),
                patch: CollectionPatch::Metadata(CollectionMetadata {
                    title: "Sports day 2024".to_owned(),
                    category: Category::Sports,
                    description: None,
                    cover_image: Some("https://x/cover.jpg".to_owned()),
                    department: Some(Department::from("ECE")),
                }),
            }
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let actor = ActorContext::department_admin("CSE");
        let mut form = open_create(&actor);
        form.set(CollectionField::Title("   ".to_owned())).unwrap();
        assert_eq!(
            assert_err!(form.metadata(&actor)),
            ValidationError::EmptyTitle
        );
    }
}
