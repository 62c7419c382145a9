//! Accessor functions that turn caller records into item fields
//!
//! Accessors must be deterministic and free of side effects: they run once
//! per record on every normalization pass, and a record may be normalized
//! many times over the life of a control.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

type TextFn<R> = Box<dyn Fn(&R) -> Option<String>>;
type MetaFn<R> = Box<dyn Fn(&R) -> Value>;

/// Records whose fields can be read by name
///
/// Implemented for the common "bag of fields" record shapes so that the
/// default accessors can read the conventional `id` and `label` fields.
pub trait FieldAccess {
    /// Read a field as a string, `None` if absent or null
    fn field(&self, name: &str) -> Option<String>;
}

impl FieldAccess for Value {
    fn field(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl FieldAccess for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The four accessors applied to every raw record
pub struct Accessors<R> {
    get_id: TextFn<R>,
    get_label: TextFn<R>,
    get_subtitle: TextFn<R>,
    get_meta: MetaFn<R>,
}

impl<R: 'static> Accessors<R> {
    /// Create accessors from id and label functions
    ///
    /// Subtitle defaults to empty and meta to an empty JSON object.
    #[must_use]
    pub fn new(
        get_id: impl Fn(&R) -> Option<String> + 'static,
        get_label: impl Fn(&R) -> Option<String> + 'static,
    ) -> Self {
        Self {
            get_id: Box::new(get_id),
            get_label: Box::new(get_label),
            get_subtitle: Box::new(|_| None),
            get_meta: Box::new(|_| Value::Object(Map::new())),
        }
    }

    /// Set the subtitle accessor
    #[must_use]
    pub fn with_subtitle(mut self, get_subtitle: impl Fn(&R) -> Option<String> + 'static) -> Self {
        self.get_subtitle = Box::new(get_subtitle);
        self
    }

    /// Set the meta accessor
    #[must_use]
    pub fn with_meta(mut self, get_meta: impl Fn(&R) -> Value + 'static) -> Self {
        self.get_meta = Box::new(get_meta);
        self
    }
}

impl<R: FieldAccess + 'static> Accessors<R> {
    /// Accessors reading the given id and label fields by name
    #[must_use]
    pub fn fields(id_field: impl Into<String>, label_field: impl Into<String>) -> Self {
        let id_field = id_field.into();
        let label_field = label_field.into();
        Self::new(
            move |record: &R| record.field(&id_field),
            move |record: &R| record.field(&label_field),
        )
    }

    /// Read the subtitle from the named field
    #[must_use]
    pub fn with_subtitle_field(self, subtitle_field: impl Into<String>) -> Self {
        let subtitle_field = subtitle_field.into();
        self.with_subtitle(move |record: &R| record.field(&subtitle_field))
    }
}

impl<R> Accessors<R> {
    /// Apply the id accessor
    pub fn id(&self, record: &R) -> Option<String> {
        (self.get_id)(record)
    }

    /// Apply the label accessor
    pub fn label(&self, record: &R) -> Option<String> {
        (self.get_label)(record)
    }

    /// Apply the subtitle accessor
    pub fn subtitle(&self, record: &R) -> Option<String> {
        (self.get_subtitle)(record)
    }

    /// Apply the meta accessor
    pub fn meta(&self, record: &R) -> Value {
        (self.get_meta)(record)
    }
}

impl<R: FieldAccess + 'static> Default for Accessors<R> {
    fn default() -> Self {
        Self::fields("id", "label")
    }
}

impl<R> fmt::Debug for Accessors<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_access() {
        let record = json!({"id": 7, "label": "Seven", "note": null, "flag": true});
        assert_eq!(record.field("id"), Some("7".to_string()));
        assert_eq!(record.field("label"), Some("Seven".to_string()));
        assert_eq!(record.field("note"), None);
        assert_eq!(record.field("missing"), None);
        assert_eq!(record.field("flag"), Some("true".to_string()));
    }

    #[test]
    fn test_default_accessors() {
        let accessors = Accessors::<Value>::default();
        let record = json!({"id": "A", "label": "Alpha", "subtitle": "ignored"});

        assert_eq!(accessors.id(&record), Some("A".to_string()));
        assert_eq!(accessors.label(&record), Some("Alpha".to_string()));
        assert_eq!(accessors.subtitle(&record), None);
        assert_eq!(accessors.meta(&record), json!({}));
    }

    #[test]
    fn test_custom_fields() {
        let accessors = Accessors::<HashMap<String, String>>::fields("code", "name")
            .with_subtitle_field("branch");
        let record: HashMap<String, String> = [
            ("code".to_string(), "ACC-1".to_string()),
            ("name".to_string(), "Checking".to_string()),
            ("branch".to_string(), "Downtown".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(accessors.id(&record), Some("ACC-1".to_string()));
        assert_eq!(accessors.label(&record), Some("Checking".to_string()));
        assert_eq!(accessors.subtitle(&record), Some("Downtown".to_string()));
    }

    #[test]
    fn test_closure_accessors() {
        let accessors = Accessors::new(
            |n: &u32| Some(format!("n{n}")),
            |n: &u32| Some(n.to_string()),
        )
        .with_meta(|n: &u32| json!({ "even": n % 2 == 0 }));

        assert_eq!(accessors.id(&4), Some("n4".to_string()));
        assert_eq!(accessors.meta(&4), json!({"even": true}));
    }
}
