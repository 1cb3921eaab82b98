mod actor_context;
mod collection;
mod id_types;
mod item;
mod library_asset;
pub use actor_context::*;
pub use collection::*;
pub use id_types::*;
pub use item::*;
pub use library_asset::*;
