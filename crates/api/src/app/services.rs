//! Service wiring: record store + serializer behind the Item viewset, and the
//! registry the API root and admin index are built from.

use std::sync::Arc;

use serde_json::Value;

use itemhub_core::{DomainError, DomainResult, Entity};
use itemhub_infra::{InMemoryRecordStore, RecordStore};
use itemhub_items::{Attributes, Item, ItemId, Serializer, ValidationMode};

/// A CRUD resource that can be listed in the API root and the admin index.
pub trait RegisteredResource: Send + Sync {
    fn model_name(&self) -> &'static str;
    /// Route segment under `/api/`.
    fn collection(&self) -> &'static str;
    fn count(&self) -> usize;
}

/// Generic create/list/retrieve/update/destroy over every stored Item.
pub struct ItemViewSet {
    store: Arc<dyn RecordStore<Attributes>>,
    serializer: Serializer,
}

impl ItemViewSet {
    pub fn new(store: Arc<dyn RecordStore<Attributes>>) -> Self {
        Self {
            store,
            serializer: Item::serializer(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRecordStore::<Attributes>::new()))
    }

    fn represent(&self, id: ItemId, attributes: Attributes) -> Value {
        Item::new(id, attributes).to_representation(&self.serializer)
    }

    /// All items, ascending by id.
    pub fn list(&self) -> Vec<Value> {
        self.store
            .list()
            .into_iter()
            .map(|(id, attrs)| self.represent(ItemId::new(id), attrs))
            .collect()
    }

    pub fn create(&self, payload: &Value) -> DomainResult<Value> {
        let attrs = self.serializer.validate(payload, ValidationMode::Create)?;
        let id = ItemId::new(self.store.insert(attrs.clone()));
        tracing::info!(item_id = %id, "item created");
        Ok(self.represent(id, attrs))
    }

    pub fn retrieve(&self, id: ItemId) -> DomainResult<Value> {
        let attrs = self.store.get(id.0).ok_or(DomainError::NotFound)?;
        Ok(self.represent(id, attrs))
    }

    /// Full (`partial = false`) or partial update.
    ///
    /// A missing id wins over an invalid payload.
    pub fn update(&self, id: ItemId, payload: &Value, partial: bool) -> DomainResult<Value> {
        if self.store.get(id.0).is_none() {
            return Err(DomainError::NotFound);
        }

        let mode = if partial { ValidationMode::Partial } else { ValidationMode::Replace };
        let mut changes = Some(self.serializer.validate(payload, mode)?);

        let updated = self
            .store
            .modify(id.0, &mut |attrs| {
                if let Some(changes) = changes.take() {
                    attrs.extend(changes);
                }
            })
            .ok_or(DomainError::NotFound)?;

        tracing::info!(item_id = %id, partial, "item updated");
        Ok(self.represent(id, updated))
    }

    pub fn destroy(&self, id: ItemId) -> DomainResult<()> {
        self.store.remove(id.0).ok_or(DomainError::NotFound)?;
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }
}

impl RegisteredResource for ItemViewSet {
    fn model_name(&self) -> &'static str {
        Item::MODEL_NAME
    }

    fn collection(&self) -> &'static str {
        Item::COLLECTION
    }

    fn count(&self) -> usize {
        self.store.count()
    }
}

/// Everything the HTTP handlers need, shared behind an `Arc`.
pub struct AppServices {
    items: Arc<ItemViewSet>,
    registry: Vec<Arc<dyn RegisteredResource>>,
}

impl AppServices {
    pub fn new(items: ItemViewSet) -> Self {
        let items = Arc::new(items);
        let registry: Vec<Arc<dyn RegisteredResource>> = vec![items.clone()];
        Self { items, registry }
    }

    pub fn items(&self) -> &ItemViewSet {
        &self.items
    }

    /// Registered resources in registration order.
    pub fn registry(&self) -> &[Arc<dyn RegisteredResource>] {
        &self.registry
    }
}

/// In-memory wiring (dev/test).
pub fn build_services() -> AppServices {
    AppServices::new(ItemViewSet::in_memory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemhub_core::RecordId;
    use serde_json::json;

    fn id(n: u64) -> ItemId {
        ItemId::new(RecordId::new(n).unwrap())
    }

    #[test]
    fn create_then_retrieve() {
        let items = ItemViewSet::in_memory();
        let created = items.create(&json!({"name": "Widget"})).unwrap();
        assert_eq!(created, json!({"id": 1, "name": "Widget", "description": ""}));
        assert_eq!(items.retrieve(id(1)).unwrap(), created);
    }

    #[test]
    fn invalid_create_stores_nothing() {
        let items = ItemViewSet::in_memory();
        let err = items.create(&json!({"description": "orphan"})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(items.count(), 0);
    }

    #[test]
    fn put_resets_omitted_optional_fields_and_patch_keeps_them() {
        let items = ItemViewSet::in_memory();
        items.create(&json!({"name": "Widget", "description": "blue"})).unwrap();

        let patched = items.update(id(1), &json!({"name": "Gadget"}), true).unwrap();
        assert_eq!(patched["description"], "blue");

        let put = items.update(id(1), &json!({"name": "Gizmo"}), false).unwrap();
        assert_eq!(put, json!({"id": 1, "name": "Gizmo", "description": ""}));
    }

    #[test]
    fn update_missing_is_not_found_even_with_bad_payload() {
        let items = ItemViewSet::in_memory();
        let err = items.update(id(9), &json!({"name": ""}), false).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn destroy_then_retrieve_is_not_found() {
        let items = ItemViewSet::in_memory();
        items.create(&json!({"name": "Widget"})).unwrap();
        items.destroy(id(1)).unwrap();
        assert_eq!(items.retrieve(id(1)).unwrap_err(), DomainError::NotFound);
        assert_eq!(items.destroy(id(1)).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn registry_lists_items_with_live_count() {
        let services = build_services();
        services.items().create(&json!({"name": "a"})).unwrap();
        services.items().create(&json!({"name": "b"})).unwrap();

        let entry = &services.registry()[0];
        assert_eq!(entry.collection(), "items");
        assert_eq!(entry.model_name(), "item");
        assert_eq!(entry.count(), 2);
    }
}
