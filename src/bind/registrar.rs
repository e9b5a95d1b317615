//! Kind selection for derived field registrations.
//!
//! The derive cannot tell whether a field's type implements [`FieldValue`],
//! so it calls `(&Registrar::<D, T>::new()).register_field(..)` with both
//! traits below in scope. Method resolution picks [`RegisterValue`] when
//! `T: FieldValue` and falls back to [`RegisterOther`] through the extra
//! autoref otherwise. Only concrete field types resolve to the value path;
//! fields typed by a generic parameter always register as `Other`.

use std::marker::PhantomData;

use super::{FieldBuilder, Fields};
use crate::value::FieldValue;

pub struct Registrar<D, T>(PhantomData<fn(&mut D) -> &mut T>);

impl<D, T> Registrar<D, T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D, T> Default for Registrar<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers a field binding writes, with its real kind.
pub trait RegisterValue<D, T> {
    fn register_field<'a>(
        &self,
        fields: &'a mut Fields<D>,
        name: &'static str,
        type_name: &'static str,
        access: fn(&mut D) -> &mut T,
    ) -> FieldBuilder<'a>;
}

impl<D: 'static, T: FieldValue + 'static> RegisterValue<D, T> for Registrar<D, T> {
    fn register_field<'a>(
        &self,
        fields: &'a mut Fields<D>,
        name: &'static str,
        _type_name: &'static str,
        access: fn(&mut D) -> &mut T,
    ) -> FieldBuilder<'a> {
        fields.field(name, access)
    }
}

/// Registers a field of any other type as [`FieldKind::Other`](crate::FieldKind::Other).
pub trait RegisterOther<D, T> {
    fn register_field<'a>(
        &self,
        fields: &'a mut Fields<D>,
        name: &'static str,
        type_name: &'static str,
        access: fn(&mut D) -> &mut T,
    ) -> FieldBuilder<'a>;
}

impl<D, T> RegisterOther<D, T> for &Registrar<D, T> {
    fn register_field<'a>(
        &self,
        fields: &'a mut Fields<D>,
        name: &'static str,
        type_name: &'static str,
        _access: fn(&mut D) -> &mut T,
    ) -> FieldBuilder<'a> {
        fields.skip(name, type_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::value::{FieldKind, ScalarKind};
    use crate::{bind, describe, Bind, Error};

    #[derive(Debug, Default)]
    struct Paths {
        root: Option<String>,
        cache: PathBuf,
        depth: u8,
    }

    impl Bind for Paths {
        fn register(fields: &mut Fields<Self>) {
            (&Registrar::<Self, Option<String>>::new())
                .register_field(fields, "root", "Option<String>", |p: &mut Self| &mut p.root)
                .key("root")
                .required(true);
            (&Registrar::<Self, PathBuf>::new())
                .register_field(fields, "cache", "PathBuf", |p: &mut Self| &mut p.cache)
                .key("cache");
            (&Registrar::<Self, u8>::new())
                .register_field(fields, "depth", "u8", |p: &mut Self| &mut p.depth)
                .key("depth");
        }
    }

    #[test]
    fn test_kind_follows_field_type() {
        let kinds: Vec<_> = describe::<Paths>().iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            [
                FieldKind::Other("Option<String>"),
                FieldKind::Other("PathBuf"),
                FieldKind::Scalar(ScalarKind::Uint8),
            ]
        );
    }

    #[test]
    fn test_other_fields_looked_up_but_not_written() {
        let mut paths = Paths {
            cache: PathBuf::from("/tmp"),
            ..Paths::default()
        };
        let mut calls = Vec::new();
        bind(&mut paths, |key: &str| {
            calls.push(key.to_string());
            match key {
                "depth" => "3".to_string(),
                _ => "set".to_string(),
            }
        })
        .unwrap();

        assert_eq!(calls, ["root", "cache", "depth"]);
        assert_eq!(paths.root, None);
        assert_eq!(paths.cache, PathBuf::from("/tmp"));
        assert_eq!(paths.depth, 3);
    }

    #[test]
    fn test_other_fields_still_required() {
        let err = bind(&mut Paths::default(), |_: &str| String::new()).unwrap_err();
        assert_eq!(err, Error::MissingRequired("root".into()));
    }
}
