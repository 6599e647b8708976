// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod flatten;
mod number;
mod path;
mod storage;
mod value;

pub use flatten::{
    flatten_map, flatten_value, FlatMap, EMPTY_ARRAY_MARKER, EMPTY_OBJECT_MARKER, NIL_MARKER,
};
pub use number::Number;
pub use path::{join_path, split_path, PathError, Segment};
pub use storage::{LeafRecord, Storage, StoreError};
pub use value::Value;
