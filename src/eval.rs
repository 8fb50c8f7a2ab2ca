use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use smol_str::SmolStr;

use crate::ast::{Document, Node, TopItem};
use crate::{Error, Result};

/// Reserved key collecting top-level arrays when the document merges.
const ARRAYS_KEY: &str = "arrays";

/// Evaluates a parsed document into its final JSON value.
pub fn eval_document(document: &Document) -> Result<Value> {
    let mut evaluator = Evaluator::default();
    evaluator.eval(document)
}

/// Walks the parse tree bottom-up. The constant table lives here and is
/// discarded with the evaluator, so parse calls stay independent.
#[derive(Default)]
struct Evaluator {
    consts: HashMap<SmolStr, Value>,
}

impl Evaluator {
    fn eval(&mut self, document: &Document) -> Result<Value> {
        let mut results = Vec::new();
        for item in &document.items {
            match item {
                TopItem::ConstDecl { name, value } => {
                    let value = self.eval_node(value)?;
                    self.consts.insert(name.clone(), value);
                }
                TopItem::Value(node) => results.push(self.eval_node(node)?),
            }
        }
        Ok(merge_top_level(results))
    }

    fn eval_node(&mut self, node: &Node) -> Result<Value> {
        match node {
            // The lexer only emits finite numbers.
            Node::Number(value) => Ok(Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            Node::String(value) => Ok(Value::String(value.clone())),
            Node::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_node(item)?);
                }
                Ok(Value::Array(values))
            }
            Node::Dict(pairs) => {
                let mut map = Map::with_capacity(pairs.len());
                for (key, value) in pairs {
                    map.insert(key.to_string(), self.eval_node(value)?);
                }
                Ok(Value::Object(map))
            }
            Node::ConstRef { name, location } => self
                .consts
                .get(name)
                .cloned()
                .ok_or_else(|| Error::undefined_constant(name, *location)),
        }
    }
}

/// Reconciles the evaluated top-level values (declarations already dropped)
/// into the single document result:
///
/// - no values: an empty object
/// - exactly one value: that dictionary or array, unwrapped
/// - two or more: one object holding every dictionary's keys (later
///   dictionaries win on collision) and, when at least one array is present,
///   the arrays in source order under the reserved key `"arrays"`
///
/// Consumers rely on the single-value case staying unwrapped; do not fold it
/// into the merge branch.
fn merge_top_level(mut results: Vec<Value>) -> Value {
    match results.len() {
        0 => Value::Object(Map::new()),
        1 => results.remove(0),
        _ => {
            let mut merged = Map::new();
            let mut arrays = Vec::new();
            for value in results {
                match value {
                    Value::Object(map) => merged.extend(map),
                    Value::Array(items) => arrays.push(Value::Array(items)),
                    // The grammar only admits dictionaries and arrays at
                    // the top level.
                    _ => {}
                }
            }
            if !arrays.is_empty() {
                merged.insert(ARRAYS_KEY.to_string(), Value::Array(arrays));
            }
            Value::Object(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_values_yield_an_empty_object() {
        assert_eq!(merge_top_level(vec![]), json!({}));
    }

    #[test]
    fn a_single_value_is_returned_unwrapped() {
        assert_eq!(merge_top_level(vec![json!([1.5])]), json!([1.5]));
        assert_eq!(merge_top_level(vec![json!({"a": 1.5})]), json!({"a": 1.5}));
    }

    #[test]
    fn later_dictionaries_override_earlier_keys() {
        let merged = merge_top_level(vec![
            json!({"a": 1.5, "b": 2.5}),
            json!({"b": 9.5, "c": 3.5}),
        ]);
        assert_eq!(merged, json!({"a": 1.5, "b": 9.5, "c": 3.5}));
    }

    #[test]
    fn arrays_collect_under_the_reserved_key() {
        let merged = merge_top_level(vec![
            json!({"a": 1.5}),
            json!([1.5, 2.5]),
            json!(["x"]),
        ]);
        assert_eq!(
            merged,
            json!({"a": 1.5, "arrays": [[1.5, 2.5], ["x"]]})
        );
    }

    #[test]
    fn the_reserved_key_is_absent_without_arrays() {
        let merged = merge_top_level(vec![json!({"a": 1.5}), json!({"b": 2.5})]);
        assert_eq!(merged, json!({"a": 1.5, "b": 2.5}));
    }
}
