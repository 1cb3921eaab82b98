use std::fmt;

use curator_core::{
    model::{Category, Collection, Item},
    session::{
        CollectionForm, Confirmation, FormMode, ItemForm, Picker, PickerState, PickerTarget,
        Session, View,
    },
};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// Text rendering of everything the operator currently sees.
pub struct Screen<'a>(pub &'a Session);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        match session.view() {
            View::List => list(f, session)?,
            View::Manage(managed) => {
                let collection = managed.collection();
                writeln!(
                    f,
                    "Managing {} \"{}\" ({})",
                    collection.id, collection.title, collection.category
                )?;
                if managed.items().is_empty() {
                    writeln!(f, "  no items yet")?;
                }
                for (index, item) in managed.items().iter().enumerate() {
                    writeln!(f, "  [{}] {}", index, item_line(item))?;
                }
            }
        }
        if let Some(form) = session.collection_form() {
            collection_form(f, form)?;
        }
        if let Some(form) = session.item_form() {
            item_form(f, form)?;
        }
        if let Some(picker) = session.picker() {
            picker_lines(f, picker)?;
        }
        match session.confirmation() {
            Some(Confirmation::DeleteCollection(id)) => {
                writeln!(f, "Delete collection {}? [yes/no]", id)?
            }
            Some(Confirmation::RemoveItem { index, .. }) => {
                writeln!(f, "Remove item [{}]? [yes/no]", index)?
            }
            None => {}
        }
        if let Some(notice) = session.notice() {
            writeln!(f, "! {}", notice)?;
        }
        Ok(())
    }
}

fn list(f: &mut fmt::Formatter<'_>, session: &Session) -> fmt::Result {
    let loading = if session.is_list_loading() {
        " (loading)"
    } else {
        ""
    };
    let actor = session.actor();
    match actor.restricted_department() {
        Some(department) => writeln!(f, "Signed in as {} of {}", actor.role(), department)?,
        None => writeln!(f, "Signed in as {}", actor.role())?,
    }
    writeln!(f, "Collections ({}){}", session.collections().len(), loading)?;
    for collection in session.collections() {
        writeln!(f, "  {}", collection_line(collection))?;
    }
    Ok(())
}

fn collection_line(collection: &Collection) -> String {
    let mut parts = vec![
        collection.id.to_string(),
        format!("\"{}\"", collection.title),
        collection.category.to_string(),
        format!("{} items", collection.items.len()),
    ];
    if let Some(department) = &collection.department {
        parts.push(format!("dept {}", department));
    }
    parts.into_iter().join("  ")
}

fn item_line(item: &Item) -> String {
    let mut line = format!("{} {}", item.kind(), item.address());
    if let Some(caption) = &item.caption {
        line.push_str(&format!("  \"{}\"", caption));
    }
    line
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.is_empty()).unwrap_or("-")
}

fn collection_form(f: &mut fmt::Formatter<'_>, form: &CollectionForm) -> fmt::Result {
    match form.mode() {
        FormMode::Create => writeln!(f, "New collection")?,
        FormMode::Edit(id) => writeln!(f, "Edit collection {}", id)?,
    }
    writeln!(f, "  title:       {}", or_dash(Some(form.title())))?;
    writeln!(
        f,
        "  category:    {}  ({})",
        form.category(),
        Category::iter().join(", ")
    )?;
    writeln!(f, "  description: {}", or_dash(Some(form.description())))?;
    let department = form.department().map(|department| department.0.as_str());
    if form.department_locked() {
        writeln!(f, "  department:  {} (fixed)", or_dash(department))?;
    } else {
        writeln!(f, "  department:  {}", or_dash(department))?;
    }
    writeln!(f, "  cover:       {}", or_dash(form.cover().value()))?;
    if form.is_submitting() {
        writeln!(f, "  saving...")?;
    }
    Ok(())
}

fn item_form(f: &mut fmt::Formatter<'_>, form: &ItemForm) -> fmt::Result {
    writeln!(f, "New {} item", form.kind())?;
    writeln!(f, "  source:  {}", or_dash(form.source().value()))?;
    writeln!(f, "  video:   {}", or_dash(Some(form.video_url())))?;
    writeln!(f, "  caption: {}", or_dash(Some(form.caption())))?;
    if form.is_submitting() {
        writeln!(f, "  saving...")?;
    }
    Ok(())
}

fn picker_lines(f: &mut fmt::Formatter<'_>, picker: &Picker) -> fmt::Result {
    let target = match picker.target() {
        PickerTarget::CoverImage => "cover image",
        PickerTarget::ItemSource => "item source",
    };
    writeln!(f, "Pick {} (choose <n>, close)", target)?;
    match picker.state() {
        PickerState::Loading => writeln!(f, "  loading...")?,
        PickerState::Ready(assets) if assets.is_empty() => writeln!(f, "  no assets")?,
        PickerState::Ready(assets) => {
            for (n, asset) in (1..).zip(assets) {
                writeln!(f, "  {}. {}", n, asset.address)?;
            }
        }
    }
    Ok(())
}
