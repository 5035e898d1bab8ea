//! The shared phonetic-class inventory.
//!
//! Word models refer to phones by inventory index. [`PhoneInventory`] owns
//! the ordered name table (loaded once at startup from the acoustic model's
//! label list) and translates phone-name spellings into the indices a
//! [`WordHmm`](crate::WordHmm) is built from.

use vireo_core::{Result, VireoError};

/// An ordered, read-only table of phone names; position is inventory index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhoneInventory {
    names: Vec<String>,
}

impl PhoneInventory {
    /// Build an inventory from an ordered list of phone names.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::InvalidInput`] if the list is empty and
    /// [`VireoError::Parse`] if a name appears twice (lookup would be
    /// ambiguous).
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(VireoError::InvalidInput(
                "phone inventory must not be empty".into(),
            ));
        }
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(VireoError::Parse(format!("duplicate phone name {name:?}")));
            }
        }
        Ok(Self { names })
    }

    /// Inventory size L.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the inventory is empty (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name at an inventory index, if in range.
    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// Look up one phone name.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::Parse`] for a name not in the inventory.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| VireoError::Parse(format!("unknown phone {name:?}")))
    }

    /// Translate a phone-name sequence into the state-label index list a
    /// word model is constructed from.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::Parse`] on the first unknown name.
    pub fn indices(&self, phones: &[&str]) -> Result<Vec<usize>> {
        phones.iter().map(|p| self.index_of(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> PhoneInventory {
        PhoneInventory::new(["sil", "f", "iy", "p", "r", "aa", "cl", "k"]).unwrap()
    }

    #[test]
    fn index_lookup_round_trips() {
        let inv = inventory();
        assert_eq!(inv.len(), 8);
        assert_eq!(inv.index_of("sil").unwrap(), 0);
        assert_eq!(inv.index_of("k").unwrap(), 7);
        assert_eq!(inv.name(2), Some("iy"));
        assert_eq!(inv.name(8), None);
    }

    #[test]
    fn indices_builds_state_labels() {
        let inv = inventory();
        // The word "fee": silence, f, iy, silence.
        let labels = inv.indices(&["sil", "f", "iy", "sil"]).unwrap();
        assert_eq!(labels, vec![0, 1, 2, 0]);
    }

    #[test]
    fn unknown_phone_is_a_parse_error() {
        let inv = inventory();
        assert!(matches!(
            inv.index_of("zh").unwrap_err(),
            VireoError::Parse(_)
        ));
        assert!(inv.indices(&["sil", "zh"]).is_err());
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(matches!(
            PhoneInventory::new(["sil", "f", "sil"]).unwrap_err(),
            VireoError::Parse(_)
        ));
        assert!(matches!(
            PhoneInventory::new(Vec::<String>::new()).unwrap_err(),
            VireoError::InvalidInput(_)
        ));
    }
}
