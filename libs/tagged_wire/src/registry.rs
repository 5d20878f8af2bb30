use std::any::{TypeId, type_name};
use std::fmt;

use indexmap::IndexMap;

use crate::error::Result;
use crate::payload::{DynPayload, Payload};
use crate::reader::BinaryReader;

type DecodeFn = fn(&mut BinaryReader<'_>) -> Result<Box<dyn DynPayload>>;

/// A registered payload type.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    tag: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    decode: DecodeFn,
}

impl RegistryEntry {
    fn of<T: Payload>() -> Self {
        fn decode<T: Payload>(r: &mut BinaryReader<'_>) -> Result<Box<dyn DynPayload>> {
            let value: Box<dyn DynPayload> = Box::new(T::read_payload(r)?);
            Ok(value)
        }

        Self {
            tag: T::TYPE_TAG,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            decode: decode::<T>,
        }
    }

    /// Gets the type tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Gets the [`TypeId`] of the registered type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Gets the Rust name of the registered type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decodes a payload of the registered type.
    ///
    /// # Errors
    ///
    /// Returns any error of the type's [`Payload::read_payload`].
    pub fn decode(&self, r: &mut BinaryReader<'_>) -> Result<Box<dyn DynPayload>> {
        (self.decode)(r)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("tag", &self.tag)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Maps type tags to the types that decode them.
///
/// The registry is immutable once built. To share one across the process,
/// declare it with [`type_registry!`](crate::type_registry).
///
/// # Examples
///
/// ```
/// use tagged_wire::{BinaryReader, BinaryWriter, Payload, TypeRegistry};
///
/// #[derive(Debug)]
/// struct Empty;
///
/// impl Payload for Empty {
///     const TYPE_TAG: &'static str = "empty";
///
///     fn write_payload(&self, _: &mut BinaryWriter) -> tagged_wire::Result<()> {
///         Ok(())
///     }
///
///     fn read_payload(_: &mut BinaryReader<'_>) -> tagged_wire::Result<Self> {
///         Ok(Empty)
///     }
/// }
///
/// let registry = TypeRegistry::builder().register::<Empty>().build();
/// assert!(registry.contains("empty"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: IndexMap<&'static str, RegistryEntry>,
}

impl TypeRegistry {
    /// Starts building a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Gets the entry registered under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }

    /// Whether a type is registered under `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

/// Builder for a [`TypeRegistry`].
#[derive(Debug, Default)]
#[must_use]
pub struct TypeRegistryBuilder {
    entries: IndexMap<&'static str, RegistryEntry>,
}

impl TypeRegistryBuilder {
    /// Registers `T` under its [`Payload::TYPE_TAG`].
    ///
    /// # Panics
    ///
    /// Panics if the tag is already registered.
    pub fn register<T: Payload>(mut self) -> Self {
        let entry = RegistryEntry::of::<T>();
        if let Some(prev) = self.entries.insert(entry.tag, entry) {
            panic!(
                "type tag {:?} is registered for both `{}` and `{}`",
                entry.tag, prev.type_name, entry.type_name
            );
        }

        log::trace!("Registered `{}` as {:?}.", entry.type_name, entry.tag);
        self
    }

    /// Finishes the registry.
    pub fn build(self) -> TypeRegistry {
        log::debug!("Built type registry with {} types.", self.entries.len());
        TypeRegistry {
            entries: self.entries,
        }
    }
}

/// Declares a process-wide [`TypeRegistry`] holding the listed types.
///
/// The registry is built on first access.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Note(String);
///
/// tagged_wire::serde_payload!(Note = "note");
///
/// tagged_wire::type_registry! {
///     static REGISTRY = [Note];
/// }
///
/// assert!(REGISTRY.contains("note"));
/// ```
#[macro_export]
macro_rules! type_registry {
    ($(#[$attr:meta])* $vis:vis static $NAME:ident = [$($Ty:ty),* $(,)?];) => {
        $(#[$attr])*
        $vis static $NAME: ::std::sync::LazyLock<$crate::TypeRegistry> =
            ::std::sync::LazyLock::new(|| {
                $crate::TypeRegistry::builder()
                    $(.register::<$Ty>())*
                    .build()
            });
    };
}
