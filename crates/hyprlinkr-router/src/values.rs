//! Route value storage.
//!
//! Route values are the `name → value` pairs that flow out of inbound
//! matching and into outbound template expansion. They use a small-vector
//! so the common case (1-4 values) never touches the heap, and they keep
//! insertion order so that values left over after expansion become a
//! deterministic query string.

use smallvec::SmallVec;

/// Maximum number of values stored inline (stack allocated).
const INLINE_VALUES: usize = 4;

/// An ordered map of route value names to string values.
///
/// Names are unique and compared ASCII case-insensitively; inserting a name
/// that is already present replaces its value in place, keeping the
/// original position.
///
/// # Example
///
/// ```rust
/// use hyprlinkr_router::RouteValues;
///
/// let mut values = RouteValues::new();
/// values.insert("controller", "foo");
/// values.insert("id", "42");
///
/// assert_eq!(values.get("Controller"), Some("foo"));
/// assert_eq!(values.get("id"), Some("42"));
/// assert_eq!(values.get("unknown"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteValues {
    inner: SmallVec<[(String, String); INLINE_VALUES]>,
}

impl RouteValues {
    /// Creates an empty set of route values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Inserts a value, returning the previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.inner[index].1, value)),
            None => {
                self.inner.push((name, value));
                None
            }
        }
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.inner[index].1.as_str())
    }

    /// Returns true if a value named `name` is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes the value for `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|index| self.inner.remove(index).1)
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.inner
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Two sets are equal when they hold the same pairs, regardless of order.
impl PartialEq for RouteValues {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl Eq for RouteValues {}

impl<'a> IntoIterator for &'a RouteValues {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RouteValues {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
