use smol_str::SmolStr;

use crate::Location;

/// One parse-tree node, tagged with its grammar production.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    String(String),
    /// `{` value ("." value)* `}`; item order is significant.
    Array(Vec<Node>),
    /// `[` NAME ":" value ("," ...)* `]`; pairs kept in source order,
    /// duplicate keys resolved later (last write wins).
    Dict(Vec<(SmolStr, Node)>),
    /// `$` NAME `$`; resolved against the constant table during evaluation.
    ConstRef { name: SmolStr, location: Location },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopItem {
    /// `var` NAME value; contributes nothing to the document result.
    ConstDecl { name: SmolStr, value: Node },
    Value(Node),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub items: Vec<TopItem>,
}
