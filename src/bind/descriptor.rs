//! Per-field metadata and the typed table that carries it.

use serde::Serialize;

use crate::value::{CoerceError, FieldKind, FieldValue};

/// Key marking a field that must not be bound.
pub const SKIP_KEY: &str = "-";

/// Declarative metadata for one destination field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    name: &'static str,
    key: &'static str,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desc: Option<&'static str>,
    kind: FieldKind,
}

impl FieldDescriptor {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key: "",
            required: false,
            default: None,
            desc: None,
            kind,
        }
    }

    /// The field's name in the destination type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&'static str> {
        self.default
    }

    /// Human-readable description. Never read by binding.
    pub fn desc(&self) -> Option<&'static str> {
        self.desc
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// True when the key is empty or `-`.
    pub fn is_skipped(&self) -> bool {
        self.key.is_empty() || self.key == SKIP_KEY
    }
}

pub(crate) type Assign<D> = Box<dyn Fn(&mut D, &str) -> Result<(), CoerceError>>;

pub(crate) struct Field<D> {
    pub(crate) descriptor: FieldDescriptor,
    /// `None` for kinds binding does not write.
    pub(crate) assign: Option<Assign<D>>,
}

/// The descriptor table of a destination type `D`, in declaration order.
///
/// Built by [`Bind::register`](crate::Bind::register), usually generated by
/// `#[derive(Bind)]`:
///
/// ```
/// use tagconf::{Bind, Fields};
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Bind for Server {
///     fn register(fields: &mut Fields<Self>) {
///         fields
///             .field("host", |s: &mut Self| &mut s.host)
///             .key("SERVER_HOST")
///             .required(true);
///         fields
///             .field("port", |s: &mut Self| &mut s.port)
///             .key("SERVER_PORT")
///             .default("8080")
///             .desc("Listening port");
///     }
/// }
/// ```
pub struct Fields<D> {
    entries: Vec<Field<D>>,
}

impl<D: crate::Bind> Fields<D> {
    /// Builds a fresh table for `D`.
    pub fn of() -> Self {
        let mut fields = Self {
            entries: Vec::new(),
        };
        D::register(&mut fields);
        fields
    }
}

impl<D> Fields<D> {
    /// Registers a field reached through `access`.
    ///
    /// The field starts with an empty key, so it is skipped until
    /// [`FieldBuilder::key`] is called.
    pub fn field<T>(
        &mut self,
        name: &'static str,
        access: fn(&mut D) -> &mut T,
    ) -> FieldBuilder<'_>
    where
        D: 'static,
        T: FieldValue + 'static,
    {
        let assign: Option<Assign<D>> = match T::KIND {
            FieldKind::Other(_) => None,
            _ => Some(Box::new(move |dest: &mut D, raw: &str| {
                *access(dest) = T::from_text(raw)?;
                Ok(())
            })),
        };
        self.push(FieldDescriptor::new(name, T::KIND), assign)
    }

    /// Registers a field of a type binding does not write.
    ///
    /// With a key the field is still looked up and `required` still applies;
    /// only the write is skipped.
    pub fn skip(&mut self, name: &'static str, type_name: &'static str) -> FieldBuilder<'_> {
        self.push(FieldDescriptor::new(name, FieldKind::Other(type_name)), None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.iter().map(|field| &field.descriptor)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Field<D>> {
        self.entries.iter()
    }

    fn push(
        &mut self,
        descriptor: FieldDescriptor,
        assign: Option<Assign<D>>,
    ) -> FieldBuilder<'_> {
        self.entries.push(Field { descriptor, assign });
        let last = self.entries.len() - 1;
        FieldBuilder {
            descriptor: &mut self.entries[last].descriptor,
        }
    }
}

/// Sets metadata on a freshly registered field.
pub struct FieldBuilder<'a> {
    descriptor: &'a mut FieldDescriptor,
}

impl FieldBuilder<'_> {
    /// The lookup key. Empty or `-` skips the field.
    pub fn key(self, key: &'static str) -> Self {
        self.descriptor.key = key;
        self
    }

    pub fn required(self, required: bool) -> Self {
        self.descriptor.required = required;
        self
    }

    /// Required iff `tag` is exactly `"true"`.
    pub fn required_tag(self, tag: &str) -> Self {
        self.required(tag == "true")
    }

    /// Fallback text when the lookup returns empty. Empty means no default.
    pub fn default(self, default: &'static str) -> Self {
        self.descriptor.default = (!default.is_empty()).then_some(default);
        self
    }

    pub fn desc(self, desc: &'static str) -> Self {
        self.descriptor.desc = Some(desc);
        self
    }
}
