use std::collections::HashMap;
use std::rc::Rc;

/// Fully resolved configuration value.
///
/// Array elements are shared, so referencing a constant never copies its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    Text(String),
    Array(Rc<[Value]>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Self::Array(items.into())
    }
}

/// Constants visible at the current point of resolution, each with the
/// array nesting depth of its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTable {
    constants: HashMap<String, (Value, usize)>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any earlier definition.
    pub fn define(&mut self, name: impl Into<String>, value: Value, depth: usize) {
        self.constants.insert(name.into(), (value, depth));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.constants.get(name).map(|(value, _)| value)
    }

    /// Value and nesting depth of `name`.
    pub fn lookup(&self, name: &str) -> Option<(&Value, usize)> {
        self.constants.get(name).map(|(value, depth)| (value, *depth))
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

/// Ordered key/value entries of a resolved source file.
///
/// Behaves like an insertion-ordered map: inserting a key that is already
/// present replaces its value but keeps the entry where it was first placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_preserves_insertion_order() {
        let mut doc = Document::new();
        doc.insert("B", Value::Number(1));
        doc.insert("A", Value::Number(2));
        doc.insert("item_0", Value::Text("x".to_string()));

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["B", "A", "item_0"]);
    }

    #[test]
    fn test_document_collision_overwrites_in_place() {
        let mut doc = Document::new();
        doc.insert("item_0", Value::Number(1));
        doc.insert("A", Value::Number(2));
        doc.insert("item_0", Value::Number(3));

        let entries: Vec<_> = doc.iter().collect();
        assert_eq!(
            entries,
            vec![("item_0", &Value::Number(3)), ("A", &Value::Number(2))]
        );
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_constant_table_last_write_wins() {
        let mut table = ConstantTable::new();
        assert!(table.is_empty());
        table.define("A", Value::Number(1), 0);
        table.define("A", Value::array(vec![Value::Number(2)]), 1);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some(&Value::array(vec![Value::Number(2)])));
        assert_eq!(table.lookup("A").map(|(_, depth)| depth), Some(1));
        assert_eq!(table.get("B"), None);
    }
}
