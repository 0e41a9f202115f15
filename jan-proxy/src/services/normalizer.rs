//! Upstream payload normalization
//!
//! The spec-forms API has shipped several response shapes over time: a bare
//! object or a one-element array, product fields under different names
//! (`name` / `product_name` / `title`, ...), and specs as an object, a list
//! of `keys` strings, or loose top-level fields.
//!
//! Field synonyms live in [`FIELD_RULES`] and spec sources in
//! [`SPEC_STRATEGIES`]. Both are walked in order; first match wins.

use crate::models::CanonicalProduct;
use serde_json::{Map, Value};

/// Canonical product text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Name,
    ManufacturerName,
    ModelName,
}

/// Ordered upstream field names feeding one canonical field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: CanonicalField,
    pub candidates: &'static [&'static str],
}

/// Synonym table. Specific names precede generic ones
/// (`manufacturer_name` before `manufacturer`).
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: CanonicalField::Name,
        candidates: &["name", "product_name", "productName", "title"],
    },
    FieldRule {
        field: CanonicalField::ManufacturerName,
        candidates: &["manufacturer_name", "manufacturer", "maker", "company", "brand"],
    },
    FieldRule {
        field: CanonicalField::ModelName,
        candidates: &["model_name", "model", "modelName", "model_number"],
    },
];

/// Alternate containers for spec data, scanned in order
pub const SPEC_FALLBACK_FIELDS: &[&str] = &["specifications", "spec_data", "attributes", "details"];

/// Fields never turned into loose spec entries
const LOOSE_EXCLUDED_FIELDS: &[&str] = &["name", "manufacturer", "model", "keys"];

/// Key prefix for entries built from the `keys` list
const KEY_ITEM_PREFIX: &str = "項目";

/// Key used when a fallback field holds plain text
const DETAIL_KEY: &str = "詳細";

/// Sources of spec data, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecStrategy {
    /// `specs` is an object: used verbatim
    SpecsObject,
    /// `keys` is an array of strings: numbered entries
    KeysList,
    /// First of [`SPEC_FALLBACK_FIELDS`] holding an object or text
    FallbackFields,
    /// Remaining top-level text fields
    LooseFields,
}

pub const SPEC_STRATEGIES: [SpecStrategy; 4] = [
    SpecStrategy::SpecsObject,
    SpecStrategy::KeysList,
    SpecStrategy::FallbackFields,
    SpecStrategy::LooseFields,
];

/// Result of applying one [`SpecStrategy`]
#[derive(Debug, Clone, PartialEq)]
enum SpecOutcome {
    /// Strategy does not apply, try the next one
    NotApplicable,
    /// Strategy applies; its answer is final even when empty
    Resolved(Option<Map<String, Value>>),
}

impl SpecStrategy {
    fn apply(self, target: &Map<String, Value>) -> SpecOutcome {
        match self {
            SpecStrategy::SpecsObject => match target.get("specs") {
                Some(Value::Object(specs)) => SpecOutcome::Resolved(Some(specs.clone())),
                _ => SpecOutcome::NotApplicable,
            },
            SpecStrategy::KeysList => match target.get("keys") {
                Some(Value::Array(keys)) => {
                    let specs: Map<String, Value> = keys
                        .iter()
                        .enumerate()
                        .filter_map(|(i, item)| {
                            non_blank(item).map(|text| {
                                (format!("{}{}", KEY_ITEM_PREFIX, i + 1), Value::from(text))
                            })
                        })
                        .collect();
                    SpecOutcome::Resolved(non_empty(specs))
                }
                _ => SpecOutcome::NotApplicable,
            },
            SpecStrategy::FallbackFields => {
                for field in SPEC_FALLBACK_FIELDS {
                    match target.get(*field) {
                        Some(Value::Object(obj)) => return SpecOutcome::Resolved(Some(obj.clone())),
                        Some(value) => {
                            if let Some(text) = non_blank(value) {
                                let mut specs = Map::new();
                                specs.insert(DETAIL_KEY.to_string(), Value::from(text));
                                return SpecOutcome::Resolved(Some(specs));
                            }
                        }
                        None => {}
                    }
                }
                SpecOutcome::NotApplicable
            }
            SpecStrategy::LooseFields => {
                let specs: Map<String, Value> = target
                    .iter()
                    .filter(|(key, _)| !LOOSE_EXCLUDED_FIELDS.contains(&key.as_str()))
                    .filter_map(|(key, value)| {
                        non_blank(value).map(|text| (key.clone(), Value::from(text)))
                    })
                    .collect();
                SpecOutcome::Resolved(non_empty(specs))
            }
        }
    }
}

/// Trimmed text of a non-blank string value
fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty(map: Map<String, Value>) -> Option<Map<String, Value>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// First element of a non-empty array, otherwise the payload itself
pub fn unwrap_target(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) if !items.is_empty() => &items[0],
        other => other,
    }
}

/// Whether an upstream payload looks like real product data
///
/// Deliberately permissive: any one of a non-empty `keys` list, a populated
/// name/manufacturer/model synonym, or more than two fields is enough.
pub fn has_usable_data(raw: &Value) -> bool {
    let target = match unwrap_target(raw) {
        Value::Null => return false,
        Value::Object(obj) => obj,
        _ => return false,
    };

    let has_keys = matches!(target.get("keys"), Some(Value::Array(keys)) if !keys.is_empty());

    let has_identity = FIELD_RULES
        .iter()
        .flat_map(|rule| rule.candidates.iter())
        .any(|name| target.get(*name).and_then(non_blank).is_some());

    has_keys || has_identity || target.len() > 2
}

/// First candidate field holding non-blank text, trimmed
pub fn extract_value(target: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find_map(|name| target.get(*name).and_then(non_blank))
        .map(str::to_string)
}

/// Spec map from the first applicable [`SpecStrategy`]
pub fn extract_specs(target: &Value) -> Option<Map<String, Value>> {
    let obj = target.as_object()?;

    SPEC_STRATEGIES
        .iter()
        .find_map(|strategy| match strategy.apply(obj) {
            SpecOutcome::NotApplicable => None,
            SpecOutcome::Resolved(specs) => Some(specs),
        })
        .flatten()
}

/// Map an upstream product object onto [`CanonicalProduct`]
pub fn transform_api_data(target: &Value) -> CanonicalProduct {
    let mut product = CanonicalProduct::default();

    for rule in FIELD_RULES {
        let value = extract_value(target, rule.candidates);
        match rule.field {
            CanonicalField::Name => product.name = value,
            CanonicalField::ManufacturerName => product.manufacturer_name = value,
            CanonicalField::ModelName => product.model_name = value,
        }
    }

    product.specs = extract_specs(target);
    product
}
