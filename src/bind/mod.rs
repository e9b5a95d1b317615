//! Binding lookup results into annotated destination fields.

mod descriptor;
pub(crate) mod registrar;

use tracing::{debug, trace};

use crate::Error;

pub use descriptor::{FieldBuilder, FieldDescriptor, Fields, SKIP_KEY};

/// A destination record with a static descriptor table.
///
/// Implement it with `#[derive(Bind)]` or by hand through [`Fields`].
pub trait Bind: Sized {
    /// Registers every field, in declaration order.
    fn register(fields: &mut Fields<Self>);
}

/// Populates every eligible field of `dest` from `lookup`.
///
/// `lookup` is called exactly once per field that has a key and must return
/// an empty string for unknown keys. For each field, in declaration order:
///
/// 1. empty text on a required field fails with [`Error::MissingRequired`];
/// 2. empty text on an optional field is replaced by its default, if any;
/// 3. the text is coerced to the field's type and written.
///
/// Fields of [`FieldKind::Other`](crate::FieldKind::Other) are looked up and
/// checked for presence but never written.
///
/// The first error aborts the bind. Fields written before it keep their new
/// values; use [`bind_atomic`] when that is not acceptable.
pub fn bind<D, F>(dest: &mut D, mut lookup: F) -> Result<(), Error>
where
    D: Bind,
    F: FnMut(&str) -> String,
{
    let fields = Fields::<D>::of();

    for field in fields.iter() {
        let descriptor = &field.descriptor;
        let key = descriptor.key();
        if descriptor.is_skipped() {
            trace!(field = descriptor.name(), "field has no key, skipping");
            continue;
        }

        let mut raw = lookup(key);
        if raw.is_empty() {
            if descriptor.is_required() {
                return Err(Error::MissingRequired(key.to_string()));
            }
            if let Some(default) = descriptor.default() {
                debug!(key, default, "using default value");
                raw = default.to_string();
            }
        }

        match &field.assign {
            Some(assign) => assign(dest, &raw).map_err(|source| Error::Field {
                key: key.to_string(),
                source,
            })?,
            None => debug!(key, kind = %descriptor.kind(), "unsupported field kind, leaving untouched"),
        }
    }

    Ok(())
}

/// Like [`bind`], but `dest` is only modified if every field binds.
pub fn bind_atomic<D, F>(dest: &mut D, lookup: F) -> Result<(), Error>
where
    D: Bind + Clone,
    F: FnMut(&str) -> String,
{
    let mut staged = dest.clone();
    bind(&mut staged, lookup)?;
    *dest = staged;
    Ok(())
}

/// Binds a `D::default()` and returns it.
pub fn load<D, F>(lookup: F) -> Result<D, Error>
where
    D: Bind + Default,
    F: FnMut(&str) -> String,
{
    let mut dest = D::default();
    bind(&mut dest, lookup)?;
    Ok(dest)
}

/// Returns the descriptor table of `D` without binding anything.
pub fn describe<D: Bind>() -> Vec<FieldDescriptor> {
    Fields::<D>::of().descriptors().cloned().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::value::{CoerceError, FieldKind, FieldValue, ScalarKind};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Nested {
        depth: u8,
    }

    impl FieldValue for Nested {
        const KIND: FieldKind = FieldKind::Other("Nested");
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct App {
        env: String,
        port: i32,
        tags: Vec<String>,
        limits: HashMap<String, u32>,
        debug: bool,
        nested: Nested,
        internal: String,
    }

    impl Bind for App {
        fn register(fields: &mut Fields<Self>) {
            fields
                .field("env", |a: &mut Self| &mut a.env)
                .key("app_env")
                .required(true);
            fields
                .field("port", |a: &mut Self| &mut a.port)
                .key("app_port")
                .default("8080");
            fields.field("tags", |a: &mut Self| &mut a.tags).key("app_tags");
            fields
                .field("limits", |a: &mut Self| &mut a.limits)
                .key("app_limits")
                .default("conn=10");
            fields.field("debug", |a: &mut Self| &mut a.debug).key("app_debug");
            fields.field("nested", |a: &mut Self| &mut a.nested).key("app_nested");
            fields.field("internal", |a: &mut Self| &mut a.internal).key("-");
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> String {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().unwrap_or_default()
    }

    #[test]
    fn test_bind_all_kinds() {
        let mut app = App::default();
        bind(
            &mut app,
            lookup_from(&[
                ("app_env", "prod"),
                ("app_port", "9000"),
                ("app_tags", "a,b"),
                ("app_limits", "conn=5,rps=100"),
                ("app_debug", "enable"),
            ]),
        )
        .unwrap();

        assert_eq!(app.env, "prod");
        assert_eq!(app.port, 9000);
        assert_eq!(app.tags, vec!["a", "b"]);
        assert_eq!(app.limits, HashMap::from([("conn".into(), 5), ("rps".into(), 100)]));
        assert!(app.debug);
    }

    #[test]
    fn test_defaults_and_empty_values() {
        let mut app = App::default();
        bind(&mut app, lookup_from(&[("app_env", "dev")])).unwrap();

        assert_eq!(app.port, 8080);
        assert_eq!(app.tags, vec![String::new()]);
        assert_eq!(app.limits, HashMap::from([("conn".into(), 10)]));
        assert!(!app.debug);
    }

    #[test]
    fn test_missing_required_fails_before_later_fields() {
        let mut app = App {
            port: 1,
            ..App::default()
        };
        let err = bind(&mut app, lookup_from(&[("app_port", "9000")])).unwrap_err();

        assert_eq!(err, Error::MissingRequired("app_env".into()));
        assert_eq!(err.key(), "app_env");
        assert_eq!(app.port, 1);
    }

    #[test]
    fn test_coercion_failure_keeps_earlier_writes() {
        let mut app = App::default();
        let err = bind(
            &mut app,
            lookup_from(&[("app_env", "prod"), ("app_port", "eighty"), ("app_tags", "x")]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::Field {
                key: "app_port".into(),
                source: CoerceError::Invalid {
                    kind: ScalarKind::Int32,
                    literal: "eighty".into()
                }
            }
        );
        assert_eq!(app.env, "prod");
        assert!(app.tags.is_empty());
    }

    #[test]
    fn test_malformed_mapping_entry() {
        let mut app = App::default();
        let err = bind(
            &mut app,
            lookup_from(&[("app_env", "prod"), ("app_limits", "conn")]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::Field {
                key: "app_limits".into(),
                source: CoerceError::MalformedEntry("conn".into())
            }
        );
    }

    #[test]
    fn test_skipped_and_unsupported_fields_untouched() {
        let mut app = App {
            nested: Nested { depth: 3 },
            internal: "keep".into(),
            ..App::default()
        };
        bind(
            &mut app,
            lookup_from(&[
                ("app_env", "prod"),
                ("app_nested", "depth=9"),
                ("-", "overwritten"),
            ]),
        )
        .unwrap();

        assert_eq!(app.nested, Nested { depth: 3 });
        assert_eq!(app.internal, "keep");
    }

    #[test]
    fn test_lookup_called_once_per_keyed_field() {
        let mut calls = Vec::new();
        let mut app = App::default();
        bind(&mut app, |key: &str| {
            calls.push(key.to_string());
            if key == "app_env" {
                "x".to_string()
            } else {
                String::new()
            }
        })
        .unwrap();

        assert_eq!(
            calls,
            ["app_env", "app_port", "app_tags", "app_limits", "app_debug", "app_nested"]
        );
    }

    #[test]
    fn test_bind_atomic_leaves_dest_on_error() {
        let mut app = App::default();
        let result = bind_atomic(
            &mut app,
            lookup_from(&[("app_env", "prod"), ("app_port", "eighty")]),
        );

        assert!(result.is_err());
        assert_eq!(app, App::default());

        bind_atomic(&mut app, lookup_from(&[("app_env", "prod")])).unwrap();
        assert_eq!(app.env, "prod");
    }

    #[test]
    fn test_load() {
        let app: App = load(lookup_from(&[("app_env", "stage"), ("app_port", "-1")])).unwrap();
        assert_eq!(app.env, "stage");
        assert_eq!(app.port, -1);

        assert!(load::<App, _>(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_describe() {
        let descriptors = describe::<App>();
        assert_eq!(descriptors.len(), 7);
        assert_eq!(descriptors[5].kind(), FieldKind::Other("Nested"));
        assert!(descriptors[6].is_skipped());
    }
}
