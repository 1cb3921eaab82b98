/// A form slot holding an asset address. Filled either by picking from the library or by a
/// direct upload, both go through `set_value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AssetField {
    value: Option<String>,
}

impl AssetField {
    pub fn new(value: Option<String>) -> AssetField {
        let mut field = AssetField::default();
        if let Some(value) = value {
            field.set_value(value);
        }
        field
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Blank addresses clear the field.
    pub fn set_value(&mut self, address: impl Into<String>) {
        let address = address.into();
        let address = address.trim();
        self.value = (!address.is_empty()).then(|| address.to_owned());
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
