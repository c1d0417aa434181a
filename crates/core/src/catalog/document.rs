//! Catalog documents: the `{"data": {"products": [...]}}` envelope.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CatalogError, CatalogRecord};

/// A parsed catalog document.
///
/// The original JSON is kept alongside the coerced records so the document
/// can be written back without losing fields the engine does not model
/// (images, slugs, pricing metadata...). `products[i]` is always the source
/// of `records[i]`.
#[derive(Debug, Clone)]
pub struct CatalogDocument {
    envelope: Value,
    products: Vec<Value>,
    records: Vec<CatalogRecord>,
}

impl CatalogDocument {
    /// Build a document from already-constructed records.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let products = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
            .collect();
        Self {
            envelope: Value::Object(Map::new()),
            products,
            records,
        }
    }

    /// Parse a document from a JSON value.
    ///
    /// A value without a `data.products` array yields an empty document.
    /// Product entries that are not objects are skipped.
    pub fn from_value(mut root: Value) -> Self {
        if !root.is_object() {
            root = Value::Object(Map::new());
        }

        let raw_products = match data_object_mut(&mut root).remove("products") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                warn!("Catalog data.products is not an array ({}), ignoring", type_name(&other));
                Vec::new()
            }
            None => {
                debug!("Catalog document has no data.products, treating as empty");
                Vec::new()
            }
        };

        let mut products = Vec::with_capacity(raw_products.len());
        let mut records = Vec::with_capacity(raw_products.len());
        for (index, product) in raw_products.into_iter().enumerate() {
            if !product.is_object() {
                warn!("Skipping catalog entry {} ({})", index, type_name(&product));
                continue;
            }
            match serde_json::from_value::<CatalogRecord>(product.clone()) {
                Ok(record) => {
                    records.push(record);
                    products.push(product);
                }
                Err(e) => warn!("Skipping catalog entry {}: {}", index, e),
            }
        }

        Self {
            envelope: root,
            products,
            records,
        }
    }

    /// The coerced records, in source order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Consume the document, keeping only the records.
    pub fn into_records(self) -> Vec<CatalogRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `data.info.total` value reported by the source, if any.
    pub fn reported_total(&self) -> Option<u64> {
        self.envelope
            .pointer("/data/info/total")
            .and_then(Value::as_u64)
    }

    /// Keep only the records matching `keep`, and rewrite the reported
    /// total to the new length.
    pub fn retain(&mut self, mut keep: impl FnMut(&CatalogRecord) -> bool) {
        let mask: Vec<bool> = self.records.iter().map(&mut keep).collect();

        let mut flags = mask.iter();
        self.records.retain(|_| *flags.next().unwrap_or(&false));
        let mut flags = mask.iter();
        self.products.retain(|_| *flags.next().unwrap_or(&false));

        let total = self.records.len() as u64;
        let data = data_object_mut(&mut self.envelope);
        match data.get_mut("info") {
            Some(Value::Object(info)) => {
                info.insert("total".to_string(), Value::from(total));
            }
            _ => {
                let mut info = Map::new();
                info.insert("total".to_string(), Value::from(total));
                data.insert("info".to_string(), Value::Object(info));
            }
        }
    }

    /// Reassemble the full JSON document.
    pub fn to_value(&self) -> Value {
        let mut root = self.envelope.clone();
        data_object_mut(&mut root).insert(
            "products".to_string(),
            Value::Array(self.products.clone()),
        );
        root
    }
}

/// Parse a catalog document from a JSON string.
pub fn parse_catalog(json: &str) -> Result<CatalogDocument, CatalogError> {
    let root: Value = serde_json::from_str(json)?;
    Ok(CatalogDocument::from_value(root))
}

/// Load a catalog document from disk.
pub fn load_catalog(path: &Path) -> Result<CatalogDocument, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let document = parse_catalog(&contents)?;
    debug!("Loaded {} products from {:?}", document.len(), path);
    Ok(document)
}

/// Write a catalog document to disk as pretty-printed JSON.
///
/// Parent directories are created as needed.
pub fn save_catalog(path: &Path, document: &CatalogDocument) -> Result<(), CatalogError> {
    let io_err = |e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(&document.to_value())?;
    fs::write(path, json).map_err(io_err)?;
    debug!("Saved {} products to {:?}", document.len(), path);
    Ok(())
}

/// Get `root.data` as an object, replacing it if it is something else.
fn data_object_mut(root: &mut Value) -> &mut Map<String, Value> {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let Value::Object(map) = root else {
        unreachable!("root was just made an object")
    };
    let data = map
        .entry("data")
        .or_insert_with(|| Value::Object(Map::new()));
    if !data.is_object() {
        *data = Value::Object(Map::new());
    }
    match data {
        Value::Object(data) => data,
        _ => unreachable!("data was just made an object"),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
