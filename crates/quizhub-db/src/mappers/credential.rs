//! Credential entity <-> model mapper

use serde_json::{Map, Value};

use quizhub_core::entities::Credential;

use crate::models::CredentialModel;

impl From<CredentialModel> for Credential {
    fn from(model: CredentialModel) -> Self {
        let attributes = match model.attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Credential {
            id: model.id,
            platform: model.platform,
            username: model.username,
            attributes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
