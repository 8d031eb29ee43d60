use stockroom_core::InventoryStore;

/// Owner of one inventory for the lifetime of a run.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub store: InventoryStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
