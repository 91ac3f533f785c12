//! Ordered substitution groups for template insertion

use std::collections::BTreeMap;

use gridplate_core::CellValue;

/// Ordered `group key → values` collection.
///
/// Each group produces one copy of the template block, in insertion order;
/// its values fill that copy's `${}` markers front to back. Pushing an
/// existing key replaces its values in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutions {
    groups: Vec<(String, Vec<CellValue>)>,
}

impl Substitutions {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unnamed rows, keyed `"0"`, `"1"`, ...
    pub fn from_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| (i.to_string(), row.into_iter().map(Into::into).collect()))
            .collect()
    }

    /// Append a group, or replace the values of an existing key
    pub fn push<K: Into<String>>(&mut self, key: K, values: Vec<CellValue>) {
        let key = key.into();
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.groups.push((key, values)),
        }
    }

    /// Values of a group
    pub fn get(&self, key: &str) -> Option<&[CellValue]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over groups in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for Substitutions
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut subs = Substitutions::new();
        for (key, values) in iter {
            subs.push(key, values.into_iter().map(Into::into).collect());
        }
        subs
    }
}

impl<K, V> From<BTreeMap<K, Vec<V>>> for Substitutions
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from(map: BTreeMap<K, Vec<V>>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insertion_order_is_kept() {
        let subs: Substitutions = vec![("b", vec!["2"]), ("a", vec!["1"])].into_iter().collect();

        let keys: Vec<_> = subs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_push_replaces_in_place() {
        let mut subs = Substitutions::new();
        subs.push("x", vec![CellValue::from(1)]);
        subs.push("y", vec![CellValue::from(2)]);
        subs.push("x", vec![CellValue::from(3)]);

        assert_eq!(subs.len(), 2);
        assert_eq!(subs.get("x"), Some(&[CellValue::Number(3.0)][..]));
        assert_eq!(subs.iter().next().map(|(k, _)| k), Some("x"));
    }

    #[test]
    fn test_btree_map_uses_key_order() {
        let mut map = BTreeMap::new();
        map.insert("z", vec!["last"]);
        map.insert("a", vec!["first"]);

        let subs = Substitutions::from(map);
        let keys: Vec<_> = subs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "z"]);
    }

    #[test]
    fn test_from_rows() {
        let subs = Substitutions::from_rows(vec![vec!["1"], vec!["2"], vec!["3"]]);

        assert_eq!(subs.len(), 3);
        assert_eq!(subs.get("2"), Some(&[CellValue::from("3")][..]));
    }
}
