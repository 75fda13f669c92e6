use rustc_hash::FxHashMap;
use ui_text::ResourceId;

/// A resource id declared with [`string_resources!`](crate::string_resources).
#[derive(Debug)]
pub struct ResourceDecl {
    pub id: ResourceId,
    /// The constant name the id was declared under.
    pub name: &'static str,
    /// The Fluent message key the id refers to.
    pub key: &'static str,
}

inventory::collect!(ResourceDecl);

/// Declares resource id constants and registers them for [`ResourceKeys::discovered`].
///
/// ```rust,ignore
/// ui_text_fluent::string_resources! {
///     pub SETTINGS_TITLE = 1 => "settings-title";
///     pub(crate) ITEMS_COUNT = 42 => "items-count";
/// }
/// ```
#[macro_export]
macro_rules! string_resources {
    ($($(#[$meta:meta])* $vis:vis $name:ident = $id:literal => $key:literal;)*) => {
        $(
            $(#[$meta])*
            $vis const $name: $crate::__ui_text::ResourceId = $crate::__ui_text::ResourceId($id);

            $crate::__inventory::submit! {
                $crate::ResourceDecl {
                    id: $crate::__ui_text::ResourceId($id),
                    name: stringify!($name),
                    key: $key,
                }
            }
        )*
    };
}

/// Maps resource ids to Fluent message keys.
#[derive(Clone, Debug, Default)]
pub struct ResourceKeys {
    keys: FxHashMap<ResourceId, String>,
}

impl ResourceKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every id declared with `string_resources!` in the linked binary.
    ///
    /// When the same id is declared twice the first declaration wins.
    pub fn discovered() -> Self {
        let mut keys = Self::new();
        for decl in inventory::iter::<ResourceDecl>() {
            match keys.get(decl.id) {
                Some(existing) if existing != decl.key => {
                    tracing::warn!(
                        "Resource id {} ({}) already maps to '{}', ignoring '{}'",
                        decl.id,
                        decl.name,
                        existing,
                        decl.key
                    );
                },
                Some(_) => {},
                None => {
                    keys.insert(decl.id, decl.key);
                },
            }
        }
        keys
    }

    /// Registers `key` for `id`, returning the key it replaces.
    pub fn insert(&mut self, id: ResourceId, key: impl Into<String>) -> Option<String> {
        self.keys.insert(id, key.into())
    }

    pub fn get(&self, id: ResourceId) -> Option<&str> {
        self.keys.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &str)> {
        self.keys.iter().map(|(id, key)| (*id, key.as_str()))
    }
}

impl<K: Into<String>> FromIterator<(ResourceId, K)> for ResourceKeys {
    fn from_iter<I: IntoIterator<Item = (ResourceId, K)>>(iter: I) -> Self {
        let mut keys = Self::new();
        keys.extend(iter);
        keys
    }
}

impl<K: Into<String>> Extend<(ResourceId, K)> for ResourceKeys {
    fn extend<I: IntoIterator<Item = (ResourceId, K)>>(&mut self, iter: I) {
        for (id, key) in iter {
            self.insert(id, key);
        }
    }
}
