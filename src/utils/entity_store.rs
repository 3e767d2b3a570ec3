// collabsync-service/src/utils/entity_store.rs
//
// Uniform document store over the three entity collections. One JSON document
// per entity under {storage root}/{collection}/{id}.json.
//
// Collection-valued fields are only ever mutated through `union_append` and
// `move_between_sets`, both of which run the read-modify-write under a
// per-document lock, so concurrent appends to the same document commute and
// never lose updates. Identity fields are create-once: `create_doc` refuses
// to overwrite an existing document.
use crate::models::ServiceError;
use lazy_static::lazy_static;
use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const USERS: &str = "users";
pub const WORKSPACES: &str = "workspaces";
pub const VIDEOS: &str = "videos";

// Global per-document lock registry
lazy_static! {
    static ref DOC_LOCKS: Mutex<HashMap<String, Arc<Mutex<()>>>> = Mutex::new(HashMap::new());
}

// Storage root, overridable for deployments that mount a data volume
pub fn storage_root() -> String {
    env::var("COLLABSYNC_STORAGE").unwrap_or_else(|_| "./storage".to_string())
}

fn doc_path(collection: &str, id: &str) -> String {
    format!("{}/{}/{}.json", storage_root(), collection, id)
}

// Create the collection directories at startup
pub fn ensure_collections() -> std::io::Result<()> {
    for collection in [USERS, WORKSPACES, VIDEOS] {
        fs::create_dir_all(format!("{}/{}", storage_root(), collection))?;
    }
    Ok(())
}

// Fetch the lock guarding a single document. No await may happen while the
// returned lock is held; every critical section below is fully synchronous.
fn doc_lock(collection: &str, id: &str) -> Result<Arc<Mutex<()>>, ServiceError> {
    let mut locks = DOC_LOCKS.lock().map_err(|e| {
        error!("❌ Document lock registry poisoned: {:?}", e);
        ServiceError::Internal
    })?;

    Ok(locks
        .entry(format!("{}/{}", collection, id))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone())
}

fn read_doc(collection: &str, id: &str) -> Result<Option<Value>, ServiceError> {
    let path_str = doc_path(collection, id);
    let path = Path::new(&path_str);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("❌ Failed to read {} document {}: {:?}", collection, id, e);
        ServiceError::Internal
    })?;

    let doc = serde_json::from_str(&content).map_err(|e| {
        error!("❌ Failed to parse {} document {}: {:?}", collection, id, e);
        ServiceError::Internal
    })?;

    Ok(Some(doc))
}

fn write_doc(collection: &str, id: &str, doc: &Value) -> Result<(), ServiceError> {
    let content = serde_json::to_string_pretty(doc).map_err(|e| {
        error!("❌ Failed to serialize {} document {}: {:?}", collection, id, e);
        ServiceError::Internal
    })?;

    fs::write(doc_path(collection, id), content).map_err(|e| {
        error!("❌ Failed to write {} document {}: {:?}", collection, id, e);
        ServiceError::Internal
    })
}

// Create a new document. Generates a v4 id when none is supplied; an existing
// id is refused rather than overwritten.
pub async fn create_doc<T: Serialize>(
    collection: &str,
    id: Option<&str>,
    doc: &T,
) -> Result<String, ServiceError> {
    let id = id
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let lock = doc_lock(collection, &id)?;
    let _guard = lock.lock().map_err(|_| ServiceError::Internal)?;

    if Path::new(&doc_path(collection, &id)).exists() {
        return Err(ServiceError::Validation(format!(
            "{} document {} already exists",
            collection, id
        )));
    }

    fs::create_dir_all(format!("{}/{}", storage_root(), collection))
        .map_err(|_| ServiceError::Internal)?;

    let value = serde_json::to_value(doc).map_err(|e| {
        error!("❌ Failed to serialize new {} document: {:?}", collection, e);
        ServiceError::Internal
    })?;
    write_doc(collection, &id, &value)?;

    Ok(id)
}

// Fetch a document by id, deserialized into the entity type
pub async fn fetch_doc<T: DeserializeOwned>(
    collection: &str,
    id: &str,
) -> Result<Option<T>, ServiceError> {
    match read_doc(collection, id)? {
        Some(value) => {
            let doc = serde_json::from_value(value).map_err(|e| {
                error!("❌ Malformed {} document {}: {:?}", collection, id, e);
                ServiceError::Internal
            })?;
            Ok(Some(doc))
        }
        None => Ok(None),
    }
}

// Atomic, idempotent, commutative append of a value into an array field.
// Appending an id that is already present is a no-op.
pub async fn union_append(
    collection: &str,
    id: &str,
    field: &str,
    value: &str,
) -> Result<(), ServiceError> {
    let lock = doc_lock(collection, id)?;
    let _guard = lock.lock().map_err(|_| ServiceError::Internal)?;

    let mut doc = read_doc(collection, id)?
        .ok_or_else(|| ServiceError::NotFound(format!("{} document {}", collection, id)))?;

    let entries = array_field(&mut doc, collection, id, field)?;
    if !entries.iter().any(|v| v.as_str() == Some(value)) {
        entries.push(Value::String(value.to_string()));
    }

    write_doc(collection, id, &doc)
}

// Atomic remove+union across two array fields of the same document
pub async fn move_between_sets(
    collection: &str,
    id: &str,
    from_field: &str,
    to_field: &str,
    value: &str,
) -> Result<(), ServiceError> {
    let lock = doc_lock(collection, id)?;
    let _guard = lock.lock().map_err(|_| ServiceError::Internal)?;

    let mut doc = read_doc(collection, id)?
        .ok_or_else(|| ServiceError::NotFound(format!("{} document {}", collection, id)))?;

    let from = array_field(&mut doc, collection, id, from_field)?;
    from.retain(|v| v.as_str() != Some(value));

    let to = array_field(&mut doc, collection, id, to_field)?;
    if !to.iter().any(|v| v.as_str() == Some(value)) {
        to.push(Value::String(value.to_string()));
    }

    write_doc(collection, id, &doc)
}

// Overwrite scalar fields under the document lock. All fields land in a
// single write, so a reader never observes some of the updates without the
// others.
pub async fn update_fields(
    collection: &str,
    id: &str,
    updates: Vec<(&str, Value)>,
) -> Result<(), ServiceError> {
    let lock = doc_lock(collection, id)?;
    let _guard = lock.lock().map_err(|_| ServiceError::Internal)?;

    let mut doc = read_doc(collection, id)?
        .ok_or_else(|| ServiceError::NotFound(format!("{} document {}", collection, id)))?;

    match doc.as_object_mut() {
        Some(map) => {
            for (field, value) in updates {
                map.insert(field.to_string(), value);
            }
        }
        None => {
            error!("❌ {} document {} is not a JSON object", collection, id);
            return Err(ServiceError::Internal);
        }
    }

    write_doc(collection, id, &doc)
}

fn array_field<'a>(
    doc: &'a mut Value,
    collection: &str,
    id: &str,
    field: &str,
) -> Result<&'a mut Vec<Value>, ServiceError> {
    let map = doc.as_object_mut().ok_or_else(|| {
        error!("❌ {} document {} is not a JSON object", collection, id);
        ServiceError::Internal
    })?;

    map.entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| {
            error!(
                "❌ Field {} of {} document {} is not an array",
                field, collection, id
            );
            ServiceError::Internal
        })
}
