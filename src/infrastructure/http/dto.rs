//! Request schemas and the validating extractor
//!
//! Every schema reads a JSON object field by field and collects all problems
//! before failing, so one response lists every bad field.

use std::str::FromStr;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::error::{ApiError, FieldErrors};
use crate::domain::catalog::NewItem;
use crate::domain::user::Credentials;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NULL_FIELD: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_NUMBER: &str = "Not a valid number.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";

/// Key used for errors about the body as a whole
const SCHEMA_KEY: &str = "_schema";

/// A typed request payload built from a JSON object
pub trait Schema: Sized {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors>;
}

// ============================================================================
// Field reader
// ============================================================================

/// Walks one JSON object, converting fields and recording failures
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    /// Start reading; any key outside `known` is reported as unknown
    fn new(object: &'a Map<String, Value>, known: &[&str]) -> Self {
        let mut errors = FieldErrors::new();
        for key in object.keys() {
            if !known.contains(&key.as_str()) {
                errors.insert(key.clone(), vec![UNKNOWN_FIELD.to_string()]);
            }
        }
        Self { object, errors }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Present and non-null value, or a recorded error
    fn present(&mut self, field: &str) -> Option<&'a Value> {
        let object = self.object;
        match object.get(field) {
            None => {
                self.fail(field, MISSING_FIELD);
                None
            }
            Some(Value::Null) => {
                self.fail(field, NULL_FIELD);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.fail(field, NOT_A_STRING);
                None
            }
        }
    }

    fn decimal(&mut self, field: &str) -> Option<Decimal> {
        let value = self.present(field)?;
        let parsed = match value {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };
        if parsed.is_none() {
            self.fail(field, NOT_A_NUMBER);
        }
        parsed
    }

    fn integer(&mut self, field: &str) -> Option<i64> {
        let value = self.present(field)?;
        self.integer_value(field, value)
    }

    /// Absent and null both read as `None`
    fn optional_integer(&mut self, field: &str) -> Option<i64> {
        let object = self.object;
        match object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.integer_value(field, value),
        }
    }

    fn integer_value(&mut self, field: &str, value: &Value) -> Option<i64> {
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.fail(field, NOT_AN_INTEGER);
        }
        parsed
    }

    /// Hand back the built payload if no field failed
    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// ============================================================================
// Schemas
// ============================================================================

/// POST /store
#[derive(Debug, Clone)]
pub struct StoreSchema {
    pub name: String,
}

impl Schema for StoreSchema {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(object, &["name"]);
        let name = reader.string("name");
        reader.finish(|| Some(Self { name: name? }))
    }
}

/// POST /item
#[derive(Debug, Clone)]
pub struct ItemSchema {
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
}

impl Schema for ItemSchema {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(object, &["name", "price", "store_id"]);
        let name = reader.string("name");
        let price = reader.decimal("price");
        let store_id = reader.integer("store_id");
        reader.finish(|| {
            Some(Self {
                name: name?,
                price: price?,
                store_id: store_id?,
            })
        })
    }
}

impl From<ItemSchema> for NewItem {
    fn from(schema: ItemSchema) -> Self {
        NewItem {
            name: schema.name,
            price: schema.price,
            store_id: schema.store_id,
        }
    }
}

/// PUT /item/{id}. `store_id` only matters when the item does not exist yet.
#[derive(Debug, Clone)]
pub struct ItemUpdateSchema {
    pub name: String,
    pub price: Decimal,
    pub store_id: Option<i64>,
}

impl Schema for ItemUpdateSchema {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(object, &["name", "price", "store_id"]);
        let name = reader.string("name");
        let price = reader.decimal("price");
        let store_id = reader.optional_integer("store_id");
        reader.finish(|| {
            Some(Self {
                name: name?,
                price: price?,
                store_id,
            })
        })
    }
}

/// POST /store/{id}/tag
#[derive(Debug, Clone)]
pub struct TagSchema {
    pub name: String,
}

impl Schema for TagSchema {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(object, &["name"]);
        let name = reader.string("name");
        reader.finish(|| Some(Self { name: name? }))
    }
}

/// POST /register and POST /login
pub struct UserSchema {
    pub username: String,
    pub password: String,
}

impl Schema for UserSchema {
    fn from_json(object: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(object, &["username", "password"]);
        let username = reader.string("username");
        let password = reader.string("password");
        reader.finish(|| {
            Some(Self {
                username: username?,
                password: password?,
            })
        })
    }
}

impl From<UserSchema> for Credentials {
    fn from(schema: UserSchema) -> Self {
        Credentials {
            username: schema.username,
            password: schema.password,
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Body extractor that runs a [`Schema`] before the handler sees anything.
///
/// An empty body reads as `{}` so that every required field is reported.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let payload: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|_| ApiError::field(SCHEMA_KEY, "Invalid JSON body."))?
        };

        let Value::Object(object) = payload else {
            return Err(ApiError::field(SCHEMA_KEY, "Invalid input type."));
        };

        T::from_json(&object).map(ValidatedJson).map_err(ApiError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_item_schema_accepts_valid_payload() {
        let item = ItemSchema::from_json(&object(json!({
            "name": "Chair",
            "price": 15.99,
            "store_id": 1
        })))
        .unwrap();

        assert_eq!(item.name, "Chair");
        assert_eq!(item.price, Decimal::from_str("15.99").unwrap());
        assert_eq!(item.store_id, 1);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let item = ItemSchema::from_json(&object(json!({
            "name": "Chair",
            "price": "10.50",
            "store_id": "3"
        })))
        .unwrap();

        assert_eq!(item.price, Decimal::from_str("10.50").unwrap());
        assert_eq!(item.store_id, 3);
    }

    #[test]
    fn test_all_field_errors_are_collected() {
        let errors = ItemSchema::from_json(&object(json!({
            "name": 12,
            "price": "cheap",
            "id": 5
        })))
        .unwrap_err();

        assert_eq!(errors["name"], vec![NOT_A_STRING]);
        assert_eq!(errors["price"], vec![NOT_A_NUMBER]);
        assert_eq!(errors["store_id"], vec![MISSING_FIELD]);
        assert_eq!(errors["id"], vec![UNKNOWN_FIELD]);
    }

    #[test]
    fn test_integer_rules() {
        let errors = ItemSchema::from_json(&object(json!({
            "name": "Chair",
            "price": 1,
            "store_id": 1.5
        })))
        .unwrap_err();
        assert_eq!(errors["store_id"], vec![NOT_AN_INTEGER]);

        let errors = ItemSchema::from_json(&object(json!({
            "name": "Chair",
            "price": true,
            "store_id": false
        })))
        .unwrap_err();
        assert_eq!(errors["price"], vec![NOT_A_NUMBER]);
        assert_eq!(errors["store_id"], vec![NOT_AN_INTEGER]);
    }

    #[test]
    fn test_update_schema_store_is_optional() {
        let update = ItemUpdateSchema::from_json(&object(json!({
            "name": "Chair",
            "price": 2
        })))
        .unwrap();
        assert_eq!(update.store_id, None);

        let errors = ItemUpdateSchema::from_json(&object(json!({
            "id": 1,
            "name": "Chair",
            "price": 2
        })))
        .unwrap_err();
        assert_eq!(errors["id"], vec![UNKNOWN_FIELD]);
    }

    #[test]
    fn test_null_required_field() {
        let errors = StoreSchema::from_json(&object(json!({"name": null}))).unwrap_err();
        assert_eq!(errors["name"], vec![NULL_FIELD]);
    }

    #[test]
    fn test_user_schema() {
        let errors = UserSchema::from_json(&object(json!({"username": "alice"})))
            .err()
            .unwrap();
        assert_eq!(errors["password"], vec![MISSING_FIELD]);
        assert!(!errors.contains_key("username"));
    }

    #[test]
    fn test_scientific_price() {
        let item = ItemSchema::from_json(&object(json!({
            "name": "Yacht",
            "price": 1e6,
            "store_id": 1
        })))
        .unwrap();
        assert_eq!(item.price, Decimal::from(1_000_000));
    }
}
