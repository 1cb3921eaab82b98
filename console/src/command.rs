use std::str::FromStr;

use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use curator_core::{
    adapter::UploadFile,
    model::{Category, CollectionId, Department, ItemKind},
    session::{CollectionField, Intent, ItemField, PickerTarget, Snapshot},
};
use eyre::{Context, Result};

/// A parsed input line. Most lines map straight to an `Intent`, the rest need the current
/// snapshot or the filesystem first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Intent(Intent),
    /// 1-based position in the open picker
    Choose(usize),
    Upload {
        target: PickerTarget,
        path: PathBuf,
    },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("invalid value '{value}' for {what}")]
    InvalidValue { what: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no picker is open")]
    NoPicker,
    #[error("pick a number between 1 and {len}")]
    OutOfRange { len: usize },
}

pub const HELP: &str = "\
collections: new | edit <id> | delete <id> | manage <id> | reload
forms:       set <field> <value> | save | cancel
             fields: title category description department cover (collection)
                     source video caption (item)
items:       add | kind image|video | remove <index> | back
confirm:     yes | no
assets:      pick cover|item | choose <n> | close | upload cover|item <file>
other:       help | quit";

/// Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "new" => to_command(Intent::OpenCreate),
        "edit" => to_command(Intent::OpenEdit(collection_id("edit", rest)?)),
        "delete" => to_command(Intent::RequestDelete(collection_id("delete", rest)?)),
        "manage" => to_command(Intent::Manage(collection_id("manage", rest)?)),
        "set" => to_command(parse_set(rest)?),
        "save" => to_command(Intent::SubmitCollection),
        "cancel" => to_command(Intent::CancelCollectionForm),
        "back" => to_command(Intent::Back),
        "add" => to_command(Intent::OpenAddItem),
        "kind" => {
            let kind = parse_value::<ItemKind>("kind", "item kind", rest)?;
            to_command(Intent::SelectItemKind(kind))
        }
        "remove" => {
            let index = parse_value::<usize>("remove", "item index", rest)?;
            to_command(Intent::RequestRemoveItem(index))
        }
        "yes" | "y" => to_command(Intent::Confirm),
        "no" | "n" => to_command(Intent::Decline),
        "pick" => to_command(Intent::OpenPicker(parse_target("pick", rest)?)),
        "choose" => {
            let n = parse_value::<usize>("choose", "asset number", rest)?;
            Ok(Some(ConsoleCommand::Choose(n)))
        }
        "close" => to_command(Intent::ClosePicker),
        "upload" => {
            let (target, path) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::MissingArgument("upload"))?;
            Ok(Some(ConsoleCommand::Upload {
                target: parse_target("upload", target)?,
                path: PathBuf::from(path.trim()),
            }))
        }
        "reload" => to_command(Intent::Reload),
        "help" | "?" => Ok(Some(ConsoleCommand::Help)),
        "quit" | "exit" => Ok(Some(ConsoleCommand::Quit)),
        other => Err(ParseError::UnknownCommand(other.to_owned())),
    }
}

fn to_command(intent: Intent) -> Result<Option<ConsoleCommand>, ParseError> {
    Ok(Some(ConsoleCommand::Intent(intent)))
}

fn collection_id(command: &'static str, arg: &str) -> Result<CollectionId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    Ok(CollectionId::from(arg))
}

fn parse_value<T: FromStr>(
    command: &'static str,
    what: &'static str,
    arg: &str,
) -> Result<T, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    arg.parse().map_err(|_| ParseError::InvalidValue {
        what,
        value: arg.to_owned(),
    })
}

fn parse_target(command: &'static str, arg: &str) -> Result<PickerTarget, ParseError> {
    match arg {
        "" => Err(ParseError::MissingArgument(command)),
        "cover" => Ok(PickerTarget::CoverImage),
        "item" => Ok(PickerTarget::ItemSource),
        other => other.parse().map_err(|_| ParseError::InvalidValue {
            what: "picker target",
            value: other.to_owned(),
        }),
    }
}

/// `set <field> [value]`. Leaving out the value clears optional fields.
fn parse_set(rest: &str) -> Result<Intent, ParseError> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    let optional = |value: &str| (!value.is_empty()).then(|| value.to_owned());
    let intent = match field {
        "" => return Err(ParseError::MissingArgument("set")),
        "title" => Intent::SetCollectionField(CollectionField::Title(value.to_owned())),
        "category" => {
            let category = parse_value::<Category>("set category", "category", value)?;
            Intent::SetCollectionField(CollectionField::Category(category))
        }
        "description" => {
            Intent::SetCollectionField(CollectionField::Description(value.to_owned()))
        }
        "department" => Intent::SetCollectionField(CollectionField::Department(
            optional(value).map(Department::from),
        )),
        "cover" => Intent::SetCollectionField(CollectionField::Cover(optional(value))),
        "source" | "src" => Intent::SetItemField(ItemField::Source(optional(value))),
        "video" => Intent::SetItemField(ItemField::VideoUrl(value.to_owned())),
        "caption" => Intent::SetItemField(ItemField::Caption(value.to_owned())),
        other => return Err(ParseError::UnknownField(other.to_owned())),
    };
    Ok(intent)
}

/// Picks the asset behind `choose <n>` from the open picker.
pub fn resolve_choice(n: usize, snapshot: &Snapshot) -> Result<Intent, ResolveError> {
    let picker = snapshot.session.picker().ok_or(ResolveError::NoPicker)?;
    let assets = picker.assets();
    n.checked_sub(1)
        .and_then(|index| assets.get(index))
        .map(|asset| Intent::SelectAsset(asset.address.clone()))
        .ok_or(ResolveError::OutOfRange { len: assets.len() })
}

pub async fn read_upload(target: PickerTarget, path: &Path) -> Result<Intent> {
    let bytes = tokio::fs::read(path)
        .await
        .wrap_err_with(|| format!("Error reading {}", path))?;
    let file_name = path.file_name().unwrap_or(path.as_str()).to_owned();
    Ok(Intent::Upload {
        target,
        file: UploadFile { file_name, bytes },
    })
}
