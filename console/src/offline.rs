use curator_core::{
    adapter::{MemoryAssets, MemoryStore},
    session::Adapters,
};

/// Library contents available when running without a backend.
pub const ASSETS: [&str; 3] = [
    "memory://assets/campus-gate.jpg",
    "memory://assets/auditorium.jpg",
    "memory://assets/sports-ground.jpg",
];

pub fn adapters() -> Adapters {
    Adapters::in_memory(MemoryStore::new(), MemoryAssets::with_assets(ASSETS))
}
