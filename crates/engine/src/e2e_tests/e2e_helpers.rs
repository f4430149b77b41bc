//! Shared fixtures for end-to-end tests.

use std::sync::Arc;

use serde_json::{json, Value};
use sheetmark_domain::{ActorId, ActorSnapshot};
use sheetmark_shared::{HostActorDocument, ResponseResult, SheetRequest};

use crate::api::handle_request;
use crate::app::App;
use crate::infrastructure::app_settings::FavoritesConfig;
use crate::infrastructure::memory_store::InMemoryItemStore;
use crate::infrastructure::settings::StaticConfiguration;

pub const ACTOR_ID: &str = "actor-vex";

/// A level 5 wizard with a mix of favorited and plain items.
pub fn wizard_document() -> Value {
    json!({
        "_id": ACTOR_ID,
        "name": "Vex",
        "system": {
            "spells": {
                "spell1": { "value": 3, "max": 4 },
                "spell3": { "value": 2, "max": 2 },
                "pact": { "value": 0, "max": 0 }
            },
            "attributes": { "attunement": { "value": 0, "max": 3 } }
        },
        "items": [
            { "_id": "wizard", "name": "Wizard", "type": "class",
              "flags": { "favtab": { "isFavorite": true } } },
            { "_id": "staff", "name": "Quarterstaff", "type": "weapon",
              "flags": { "favtab": { "isFavorite": true, "sort": 100000 } },
              "system": { "equipped": true } },
            { "_id": "potion", "name": "Potion of Healing", "type": "consumable",
              "flags": { "favtab": { "isFavorite": true, "sort": 200000 } },
              "system": { "quantity": 3 } },
            { "_id": "cloak", "name": "Cloak of Protection", "type": "equipment",
              "flags": { "favtab": { "isFavorite": true, "sort": 300000 } },
              "system": { "attunement": 1, "properties": ["mgc"] } },
            { "_id": "rope", "name": "Hempen Rope", "type": "loot" },
            { "_id": "ritualist", "name": "Ritual Caster", "type": "feat",
              "flags": { "favtab": { "isFavorite": true } } },
            { "_id": "fire-bolt", "name": "Fire Bolt", "type": "spell",
              "flags": { "favtab": { "isFavorite": true } },
              "system": { "level": 0, "components": { "vocal": true, "somatic": true } } },
            { "_id": "shield", "name": "Shield", "type": "spell",
              "flags": { "favtab": { "isFavorite": true } },
              "system": { "level": 1, "preparation": { "mode": "always", "prepared": false } } },
            { "_id": "magic-missile", "name": "Magic Missile", "type": "spell",
              "flags": { "favtab": { "isFavorite": true } },
              "system": { "level": 1, "preparation": { "mode": "prepared", "prepared": true } } },
            { "_id": "misty-step", "name": "Misty Step", "type": "spell",
              "flags": { "favtab": { "isFavorite": true } },
              "system": { "level": 2, "preparation": { "mode": "innate" } } }
        ]
    })
}

pub fn actor_id() -> ActorId {
    ActorId::new(ACTOR_ID).expect("fixture id is valid")
}

pub fn snapshot(document: Value, editable: bool) -> ActorSnapshot {
    let document: HostActorDocument =
        serde_json::from_value(document).expect("fixture document parses");
    document
        .into_snapshot(editable, "favtab")
        .expect("fixture document converts")
}

/// App over an in-memory store seeded with one actor.
pub struct TestSheet {
    pub app: App,
    pub store: Arc<InMemoryItemStore>,
}

impl TestSheet {
    pub fn new(actor: ActorSnapshot) -> Self {
        let store = Arc::new(InMemoryItemStore::new());
        store.insert_actor(actor);
        let config = Arc::new(StaticConfiguration(FavoritesConfig::default()));
        let app = App::new(store.clone(), config);
        Self { app, store }
    }

    pub async fn request(&self, request: SheetRequest) -> ResponseResult {
        handle_request(&self.app, request).await
    }

    /// Success payload of a request, panicking on errors.
    pub async fn data(&self, request: SheetRequest) -> Value {
        match self.request(request).await {
            ResponseResult::Success { data } => data.unwrap_or(Value::Null),
            other => panic!("request failed: {:?}", other),
        }
    }

    pub async fn view(&self) -> Value {
        self.data(SheetRequest::GetFavorites {
            actor_id: ACTOR_ID.into(),
        })
        .await
    }
}

/// Names in one rendered list, in display order.
pub fn names(entries: &Value) -> Vec<String> {
    entries
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn drop_data(item_id: &str, kind: &str, system: Value) -> String {
    json!({ "actorId": ACTOR_ID, "_id": item_id, "type": kind, "system": system }).to_string()
}
