//! The `<value>` list pattern.
//!
//! Status pages wrap every field in one or more `<value>` children:
//! ```xml
//! <Power><value>ON</value></Power>
//! <MasterVolume><value>-40.0</value></MasterVolume>
//! ```

use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};

/// A field element holding a list of `<value>` children.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct ValueList {
    /// Text content of each `<value>` child, in document order
    #[serde(rename = "value", default)]
    pub value: Vec<String>,
}

impl ValueList {
    /// First `<value>` of this field, if any
    pub fn first(&self) -> Option<&str> {
        self.value.first().map(String::as_str)
    }
}

/// First `<value>` of the first occurrence of a field.
///
/// Fails with [`ParseError::MissingRequiredElement`] naming `field` when the
/// element or its value is absent.
pub fn first_value<'a>(lists: &'a [ValueList], field: &str) -> ParseResult<&'a str> {
    lists
        .first()
        .and_then(ValueList::first)
        .ok_or_else(|| ParseError::MissingRequiredElement(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml_decode::parse;

    #[derive(Debug, Deserialize)]
    struct Root {
        #[serde(rename = "Power", default)]
        power: Vec<ValueList>,
    }

    #[test]
    fn test_value_list_deserialize() {
        let root: Root = parse("<item><Power><value>ON</value></Power></item>").unwrap();
        assert_eq!(first_value(&root.power, "Power").unwrap(), "ON");
    }

    #[test]
    fn test_value_list_multiple_values() {
        let root: Root =
            parse("<item><Power><value>ON</value><value>STANDBY</value></Power></item>").unwrap();
        assert_eq!(root.power[0].value, vec!["ON", "STANDBY"]);
        assert_eq!(root.power[0].first(), Some("ON"));
    }

    #[test]
    fn test_missing_field() {
        let root: Root = parse("<item></item>").unwrap();
        match first_value(&root.power, "Power") {
            Err(ParseError::MissingRequiredElement(field)) => assert_eq!(field, "Power"),
            other => panic!("Expected MissingRequiredElement, got {:?}", other),
        }
    }

    #[test]
    fn test_field_without_value() {
        let root: Root = parse("<item><Power></Power></item>").unwrap();
        assert!(first_value(&root.power, "Power").is_err());
    }
}
