use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::key::{ProductKey, ProductRefShape, CART_PRODUCTS_FIELD};

/// Render a BSON value as JSON: ObjectIds as hex strings, everything else as
/// relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> serde_json::Value {
    match value {
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        Bson::Document(doc) => serde_json::Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(bson_to_json).collect())
        }
        other => other.into_relaxed_extjson(),
    }
}

/// A product from the `productos` collection, kept verbatim.
///
/// The collection has no schema: field types vary between documents and
/// extra fields are common, so nothing is decoded beyond what is asked for.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object, example = json!({
    "_id": "65a1f0c2b4d3e8a9f7c61234",
    "nombre": "iPhone 15 Pro",
    "marca": "Apple",
    "categoria": "Celulares",
    "precio": 999.99,
    "stock": 20,
    "descripcion": "Smartphone premium con cámara avanzada y chip A17 Pro",
    "sku": "APPLE-IP15P-001",
    "activo": true
}))]
pub struct Product(pub Document);

impl Product {
    pub fn get(&self, field: &str) -> Option<&Bson> {
        self.0.get(field)
    }

    /// `nombre`, when it is a string
    pub fn name(&self) -> Option<&str> {
        match self.get("nombre") {
            Some(Bson::String(name)) => Some(name),
            _ => None,
        }
    }
}

impl From<Document> for Product {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bson_to_json(Bson::Document(self.0.clone())).serialize(serializer)
    }
}

/// Product to insert; the store assigns `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub sku: String,
    #[serde(rename = "activo")]
    pub active: bool,
}

/// A cart record from the `carrito` collection, kept verbatim.
///
/// Carts are not normalized: `productos` may hold bare ids, embedded
/// `{_id}` objects, embedded `{productoId}` objects, or a single scalar.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object, example = json!({"_id": "65a1f0c2b4d3e8a9f7c6aaaa", "productos": ["65a1f0c2b4d3e8a9f7c61234"]}))]
pub struct CartEntry(pub Document);

impl CartEntry {
    pub fn id(&self) -> Option<&Bson> {
        self.0.get("_id")
    }

    /// Every product reference in `productos`, tagged with its shape.
    pub fn product_refs(&self) -> Vec<(ProductRefShape, &Bson)> {
        let elements: Vec<&Bson> = match self.0.get(CART_PRODUCTS_FIELD) {
            Some(Bson::Array(items)) => items.iter().collect(),
            Some(value) => vec![value],
            None => Vec::new(),
        };

        elements
            .into_iter()
            .flat_map(|element| {
                ProductRefShape::ALL
                    .iter()
                    .filter_map(move |shape| shape.locate(element).map(|id| (*shape, id)))
            })
            .collect()
    }

    /// Whether any reference in this cart points at `key`.
    pub fn references(&self, key: &ProductKey) -> bool {
        self.product_refs()
            .into_iter()
            .any(|(_, value)| key.matches(value))
    }
}

impl From<Document> for CartEntry {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

impl Serialize for CartEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bson_to_json(Bson::Document(self.0.clone())).serialize(serializer)
    }
}

/// Products and carts fetched together
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogSnapshot {
    pub productos: Vec<Product>,
    pub carrito: Vec<CartEntry>,
}

/// Result of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteOutcome {
    pub deleted: bool,
    /// Whether a cart still referenced the product when it was removed
    pub linked: bool,
}
