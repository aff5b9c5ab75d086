//! Tiny ONNX models for tests
//!
//! Both graphs take `features: float[1, 11]` and pick one column with a
//! one-hot `MatMul`, so a test can tell which slot of the row the model read.
//! The protobuf is written by hand; only the fields ONNX Runtime needs.

use crate::logic::features::FEATURE_COUNT;

const IR_VERSION: i64 = 7;
const OPSET: i64 = 13;

// TensorProto.DataType
const FLOAT: i64 = 1;
const INT64: i64 = 7;

// AttributeProto.AttributeType
const ATTR_INT: i64 = 2;

/// Output `score: float[1, 1]` = value of `column`
pub fn score_model(column: usize) -> Vec<u8> {
    let nodes = [node("MatMul", &["features", "pick"], &["score"], &[])];
    model(&nodes, column, value_info("score", FLOAT, &[1, 1]))
}

/// Output `label: int64[1, 1]` = value of `column`, cast to integer
pub fn label_model(column: usize) -> Vec<u8> {
    let nodes = [
        node("MatMul", &["features", "pick"], &["picked"], &[]),
        node("Cast", &["picked"], &["label"], &[int_attr("to", INT64)]),
    ];
    model(&nodes, column, value_info("label", INT64, &[1, 1]))
}

fn model(nodes: &[Vec<u8>], column: usize, output: Vec<u8>) -> Vec<u8> {
    let mut graph = Vec::new();
    for n in nodes {
        bytes_field(&mut graph, 1, n);
    }
    str_field(&mut graph, 2, "fixture");
    bytes_field(&mut graph, 5, &one_hot("pick", column));
    bytes_field(&mut graph, 11, &value_info("features", FLOAT, &[1, FEATURE_COUNT as i64]));
    bytes_field(&mut graph, 12, &output);

    let mut opset = Vec::new();
    str_field(&mut opset, 1, "");
    int_field(&mut opset, 2, OPSET);

    let mut model = Vec::new();
    int_field(&mut model, 1, IR_VERSION);
    str_field(&mut model, 2, "phishguard-tests");
    bytes_field(&mut model, 7, &graph);
    bytes_field(&mut model, 8, &opset);
    model
}

fn node(op_type: &str, inputs: &[&str], outputs: &[&str], attributes: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    for input in inputs {
        str_field(&mut buf, 1, input);
    }
    for output in outputs {
        str_field(&mut buf, 2, output);
    }
    str_field(&mut buf, 4, op_type);
    for attribute in attributes {
        bytes_field(&mut buf, 5, attribute);
    }
    buf
}

fn int_attr(name: &str, value: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    str_field(&mut buf, 1, name);
    int_field(&mut buf, 3, value);
    int_field(&mut buf, 20, ATTR_INT);
    buf
}

/// float[11, 1] initializer, 1.0 at `column`
fn one_hot(name: &str, column: usize) -> Vec<u8> {
    let mut raw = Vec::with_capacity(FEATURE_COUNT * 4);
    for i in 0..FEATURE_COUNT {
        let weight: f32 = if i == column { 1.0 } else { 0.0 };
        raw.extend_from_slice(&weight.to_le_bytes());
    }

    let mut buf = Vec::new();
    int_field(&mut buf, 1, FEATURE_COUNT as i64);
    int_field(&mut buf, 1, 1);
    int_field(&mut buf, 2, FLOAT);
    str_field(&mut buf, 8, name);
    bytes_field(&mut buf, 9, &raw);
    buf
}

fn value_info(name: &str, elem_type: i64, dims: &[i64]) -> Vec<u8> {
    let mut shape = Vec::new();
    for &d in dims {
        let mut dim = Vec::new();
        int_field(&mut dim, 1, d);
        bytes_field(&mut shape, 1, &dim);
    }

    let mut tensor_type = Vec::new();
    int_field(&mut tensor_type, 1, elem_type);
    bytes_field(&mut tensor_type, 2, &shape);

    let mut type_proto = Vec::new();
    bytes_field(&mut type_proto, 1, &tensor_type);

    let mut buf = Vec::new();
    str_field(&mut buf, 1, name);
    bytes_field(&mut buf, 2, &type_proto);
    buf
}

// ============================================================================
// PROTOBUF WIRE FORMAT
// ============================================================================

fn varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn int_field(buf: &mut Vec<u8>, field: u64, value: i64) {
    varint(buf, field << 3);
    varint(buf, value as u64);
}

fn bytes_field(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
    varint(buf, (field << 3) | 2);
    varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

fn str_field(buf: &mut Vec<u8>, field: u64, value: &str) {
    bytes_field(buf, field, value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let mut buf = Vec::new();
        varint(&mut buf, 300);
        assert_eq!(buf, vec![0xac, 0x02]);
    }

    #[test]
    fn test_models_differ_by_column() {
        assert_ne!(score_model(3), score_model(6));
        assert_ne!(score_model(3), label_model(3));
    }
}
