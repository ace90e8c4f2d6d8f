use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use itemhub_core::{Entity, RecordId};

use crate::serializer::{Attributes, FieldSpec, Serializer};

/// Item identifier (store-assigned, see [`RecordId`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub RecordId);

impl ItemId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ItemId {
    type Err = itemhub_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Declared wire fields of an [`Item`].
///
/// `name` is a short required label; `description` is free text that may be
/// omitted or left blank.
pub fn item_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::char("name", 100),
        FieldSpec::text("description").allow_blank().default(json!("")),
    ]
}

/// The single resource exposed by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    attributes: Attributes,
}

impl Item {
    pub fn new(id: ItemId, attributes: Attributes) -> Self {
        Self { id, attributes }
    }

    pub fn serializer() -> Serializer {
        Serializer::new(item_fields())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn to_representation(&self, serializer: &Serializer) -> Value {
        serializer.to_representation(self.id.0, &self.attributes)
    }
}

impl Entity for Item {
    type Id = ItemId;

    const MODEL_NAME: &'static str = "item";
    const COLLECTION: &'static str = "items";

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationMode;

    fn item_id(n: u64) -> ItemId {
        ItemId::new(RecordId::new(n).unwrap())
    }

    #[test]
    fn declared_fields_accept_name_only_payload() {
        let attrs = Item::serializer()
            .validate(&json!({"name": "Widget"}), ValidationMode::Create)
            .unwrap();
        let item = Item::new(item_id(1), attrs);

        assert_eq!(
            item.to_representation(&Item::serializer()),
            json!({"id": 1, "name": "Widget", "description": ""})
        );
    }

    #[test]
    fn name_is_capped_at_one_hundred_characters() {
        let errors = Item::serializer()
            .validate(&json!({"name": "x".repeat(101)}), ValidationMode::Create)
            .unwrap_err();
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn entity_identity_comes_from_the_store_id() {
        let attrs = Item::serializer()
            .validate(&json!({"name": "Widget", "description": "blue"}), ValidationMode::Create)
            .unwrap();
        let item = Item::new(item_id(3), attrs);

        assert_eq!(item.id(), item_id(3));
        assert_eq!(item.attributes()["description"], "blue");
        assert_eq!(<Item as Entity>::COLLECTION, "items");
    }

    #[test]
    fn item_id_parses_from_path_segment() {
        assert_eq!("12".parse::<ItemId>().unwrap(), item_id(12));
        assert!("twelve".parse::<ItemId>().is_err());
    }
}
