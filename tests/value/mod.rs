// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::Result;
use flatkeys::*;

#[test]
fn non_string_key() -> Result<()> {
    let mut obj = Value::new_object();

    obj.as_object_mut()?.insert(Value::Null, Value::Null);
    obj.as_object_mut()?.insert(Value::Bool(false), Value::Null);
    obj.as_object_mut()?
        .insert(Value::from(std::f64::consts::PI), Value::Null);
    obj.as_object_mut()?.insert(
        Value::from(vec![
            Value::Bool(true),
            Value::Null,
            Value::from(std::f64::consts::PI),
        ]),
        Value::Null,
    );

    let json = serde_json::to_string_pretty(&obj)?;

    let expected = r#"{
  "null": null,
  "false": null,
  "3.141592653589793": null,
  "[true,null,3.141592653589793]": null
}"#;

    assert_eq!(json, expected);

    Ok(())
}

#[test]
fn serialize_number() -> Result<()> {
    // Check that integer values are serialized without fractional part
    assert_eq!(serde_json::to_string_pretty(&Value::from(1.0))?, "1.0");
    assert_eq!(serde_json::to_string_pretty(&Value::from(1u64))?, "1");

    // Ensure that fractional parts are also serialized.
    assert_eq!(serde_json::to_string_pretty(&Value::from(1.1))?, "1.1");
    assert_eq!(serde_json::to_string_pretty(&Value::from(-1.1))?, "-1.1");

    Ok(())
}

#[test]
fn serialize_string() -> Result<()> {
    assert_eq!(
        Value::String("Hello, World\n".into()).to_json_str()?,
        "\"Hello, World\\n\""
    );
    Ok(())
}

#[test]
fn constructors() -> Result<()> {
    assert_eq!(Value::new_object(), Value::from_json_str("{}")?);
    assert!(Value::new_array().as_array()?.is_empty());
    Ok(())
}

#[test]
fn value_as_index() -> Result<()> {
    let idx = Value::from(2u64);

    let mut item = Value::new_array();
    item.as_array_mut()?.push(Value::from(3u64));
    item.as_array_mut()?.push(Value::from(4u64));
    item.as_array_mut()?.push(Value::from(5u64));

    // Check case of item present.
    assert_eq!(&Value::from_json_str("[1, 2, [3, 4, 5]]")?[&idx], &item);

    // Check case of item not present.
    let idx = Value::from(5u64);
    assert_eq!(
        &Value::from_json_str("[1, 2, [3, 4, 5]]")?[&idx],
        &Value::Undefined
    );

    // Check case of non indexable item.
    assert_eq!(&Value::Undefined[&idx], &Value::Undefined);
    assert_eq!(&Value::Null[&idx], &Value::Undefined);
    assert_eq!(&Value::Bool(true)[&idx], &Value::Undefined);
    assert_eq!(&Value::String("Hello".into())[&idx], &Value::Undefined);

    Ok(())
}

#[test]
fn string_as_index() -> Result<()> {
    let obj = Value::from_json_str(r#"{ "a" : 5, "b" : 6 }"#)?;
    assert_eq!(&obj["a"], &Value::from(5u64));
    assert_eq!(&obj[&"b".to_owned()], &Value::from(6u64));
    Ok(())
}

#[test]
fn mixed_numbers_compare_equal() {
    assert_eq!(Value::from(2u64), Value::from(2i64));
    assert!(Value::from(-1i64) < Value::from(0u64));
}

#[cfg(feature = "yaml")]
#[test]
fn from_yaml() -> Result<()> {
    let v = Value::from_yaml_str("db:\n  hosts:\n    - a\n    - b\n")?;
    assert_eq!(&v["db"]["hosts"][1], &Value::String("b".into()));
    Ok(())
}
