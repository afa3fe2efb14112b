//! Product identifier parsing and the cart reference shapes.
//!
//! A product id arrives as a string but may be stored either as an ObjectId
//! or as that same string. [`ProductKey`] carries every form the raw id can
//! take, and [`ProductRefShape`] lists the ways a cart can point at a product.
//! Every store predicate in the crate is generated from these two types.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

/// A product identifier parsed once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductKey {
    raw: String,
    object_id: Option<ObjectId>,
}

impl ProductKey {
    /// Keep the raw string and, when it is a 24-char hex string, its ObjectId form.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let object_id = ObjectId::parse_str(&raw).ok();
        Self { raw, object_id }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }

    /// Values a stored reference may hold: the string form, then the ObjectId form.
    pub fn match_values(&self) -> Vec<Bson> {
        let mut values = vec![Bson::String(self.raw.clone())];
        if let Some(oid) = self.object_id {
            values.push(Bson::ObjectId(oid));
        }
        values
    }

    /// Whether `value` is one of this key's forms.
    pub fn matches(&self, value: &Bson) -> bool {
        match value {
            Bson::String(s) => *s == self.raw,
            Bson::ObjectId(oid) => self.object_id == Some(*oid),
            _ => false,
        }
    }

    /// `{$or: [{_id: <form>}, ...]}` over every form of the key.
    pub fn id_filter(&self) -> Document {
        let branches: Vec<Document> = self
            .match_values()
            .into_iter()
            .map(|value| doc! { "_id": value })
            .collect();
        doc! { "$or": branches }
    }

    /// `{$or: [...]}` matching carts that reference this product under any shape.
    pub fn link_filter(&self) -> Document {
        let values = self.match_values();
        let branches: Vec<Document> = ProductRefShape::ALL
            .iter()
            .flat_map(|shape| {
                values.iter().map(move |value| {
                    let mut branch = Document::new();
                    branch.insert(shape.field_path(), value.clone());
                    branch
                })
            })
            .collect();
        doc! { "$or": branches }
    }
}

/// The ways a cart's `productos` field can reference a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductRefShape {
    /// The identifier itself, as the field value or a list element.
    BareId,
    /// An embedded object carrying the product's `_id`.
    EmbeddedId,
    /// An embedded object carrying `productoId`.
    EmbeddedProductId,
}

/// Field of a cart entry holding its product references.
pub const CART_PRODUCTS_FIELD: &str = "productos";

impl ProductRefShape {
    pub const ALL: [ProductRefShape; 3] = [Self::BareId, Self::EmbeddedId, Self::EmbeddedProductId];

    /// Dotted path queried in the cart collection.
    pub fn field_path(&self) -> &'static str {
        match self {
            Self::BareId => "productos",
            Self::EmbeddedId => "productos._id",
            Self::EmbeddedProductId => "productos.productoId",
        }
    }

    /// The identifier this shape finds in a single `productos` element, if any.
    pub fn locate<'a>(&self, element: &'a Bson) -> Option<&'a Bson> {
        match (self, element) {
            (Self::BareId, Bson::Document(_)) => None,
            (Self::BareId, value) => Some(value),
            (Self::EmbeddedId, Bson::Document(d)) => d.get("_id"),
            (Self::EmbeddedProductId, Bson::Document(d)) => d.get("productoId"),
            _ => None,
        }
    }
}
