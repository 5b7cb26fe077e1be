use std::{
    env::temp_dir,
    fs::{self, read_to_string},
    path::PathBuf,
};

use csv2json_stream::{ConvertError, ConverterBuilder, convert_csv_to_json};
use rand::distr::{Alphanumeric, SampleString};
use serde_json::{Value, json};

fn temp_paths() -> (PathBuf, PathBuf) {
    let _ = env_logger::builder().is_test(true).try_init();
    let name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    let input = temp_dir().join(format!("{}.csv", name));
    let output = temp_dir().join(format!("{}.json", name));
    (input, output)
}

#[test]
fn converts_csv_file_to_pretty_json_array() {
    let (input, output) = temp_paths();
    fs::write(&input, "name,age\nAlice,30\nBob,25").expect("Failed to write CSV file");

    let summary = convert_csv_to_json(&input, &output).expect("Conversion should succeed");
    assert_eq!(summary.record_count, 2);

    let content = read_to_string(&output).expect("Should have been able to read the JSON file");
    let expected = "[\n{\n  \"name\": \"Alice\",\n  \"age\": 30\n},\n{\n  \"name\": \"Bob\",\n  \"age\": 25\n}\n]";
    assert_eq!(content, expected);

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn output_parses_as_json_with_coerced_values() {
    let (input, output) = temp_paths();
    let csv_content = "id,name,price,available,note\n\
        P001,Wireless Headphones,79.99,true,\"Noise-cancelling, 20hr battery\"\n\
        P002,USB-C Cable,12.99,false,plain";
    fs::write(&input, csv_content).expect("Failed to write CSV file");

    convert_csv_to_json(&input, &output).expect("Conversion should succeed");

    let parsed: Value =
        serde_json::from_str(&read_to_string(&output).unwrap()).expect("Output should be JSON");
    assert_eq!(
        parsed,
        json!([
            {
                "id": "P001",
                "name": "Wireless Headphones",
                "price": 79.99,
                "available": true,
                "note": "Noise-cancelling, 20hr battery"
            },
            {
                "id": "P002",
                "name": "USB-C Cable",
                "price": 12.99,
                "available": false,
                "note": "plain"
            }
        ])
    );

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn record_count_matches_non_header_non_blank_lines() {
    let (input, output) = temp_paths();
    fs::write(&input, "name,age\n\nAlice,30\n   \nBob,25\n\n").expect("Failed to write CSV file");

    let summary = convert_csv_to_json(&input, &output).expect("Conversion should succeed");
    assert_eq!(summary.record_count, 2);

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn short_rows_omit_missing_keys() {
    let (input, output) = temp_paths();
    fs::write(&input, "name,age\nAlice").expect("Failed to write CSV file");

    convert_csv_to_json(&input, &output).expect("Conversion should succeed");

    let parsed: Value = serde_json::from_str(&read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed, json!([{"name": "Alice"}]));
    assert!(parsed[0].get("age").is_none());

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn empty_input_produces_empty_array() {
    let (input, output) = temp_paths();
    fs::write(&input, "").expect("Failed to write CSV file");

    let summary = convert_csv_to_json(&input, &output).expect("Conversion should succeed");
    assert_eq!(summary.record_count, 0);

    let content = read_to_string(&output).unwrap();
    assert_eq!(content, "[\n\n]");

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn chunk_boundaries_do_not_change_the_output() {
    let (input, output) = temp_paths();
    let tiny_output = temp_dir().join(format!(
        "{}.json",
        Alphanumeric.sample_string(&mut rand::rng(), 16)
    ));
    fs::write(&input, "name,age\nAlice,30\nBob,25").expect("Failed to write CSV file");

    convert_csv_to_json(&input, &output).expect("Conversion should succeed");

    // A 3-byte read capacity splits even the header line across chunks.
    ConverterBuilder::new()
        .capacity(3)
        .build()
        .convert(&input, &tiny_output)
        .expect("Conversion should succeed");

    assert_eq!(
        read_to_string(&output).unwrap(),
        read_to_string(&tiny_output).unwrap()
    );

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
    fs::remove_file(&tiny_output).ok();
}

#[test]
fn converts_with_custom_delimiter() {
    let (input, output) = temp_paths();
    fs::write(&input, "name;age\nAlice;30").expect("Failed to write CSV file");

    ConverterBuilder::new()
        .delimiter(';')
        .build()
        .convert(&input, &output)
        .expect("Conversion should succeed");

    let parsed: Value = serde_json::from_str(&read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed, json!([{"name": "Alice", "age": 30}]));

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}

#[test]
fn rejects_empty_paths_before_any_io() {
    let result = convert_csv_to_json("", "out.json");
    assert!(matches!(result, Err(ConvertError::InvalidPath("CSV"))));

    let result = convert_csv_to_json("in.csv", "");
    assert!(matches!(result, Err(ConvertError::InvalidPath("JSON"))));
}

#[test]
fn rejects_wrong_extensions_without_touching_output() {
    let (input, output) = temp_paths();
    fs::write(&input, "name\nAlice").expect("Failed to write CSV file");

    let wrong_input = input.with_extension("txt");
    let result = convert_csv_to_json(&wrong_input, &output);
    assert!(matches!(
        result,
        Err(ConvertError::InvalidExtension { expected: ".csv", .. })
    ));
    assert!(!output.exists());

    let wrong_output = output.with_extension("txt");
    let result = convert_csv_to_json(&input, &wrong_output);
    assert!(matches!(
        result,
        Err(ConvertError::InvalidExtension { expected: ".json", .. })
    ));
    assert!(!wrong_output.exists());

    fs::remove_file(&input).ok();
}

#[test]
fn missing_input_is_detected_before_output_creation() {
    let (input, output) = temp_paths();

    let result = convert_csv_to_json(&input, &output);
    assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    assert!(!output.exists());
}

#[test]
fn stream_error_leaves_truncated_output_without_closing_bracket() {
    let (input, output) = temp_paths();
    // One good record followed by a line that is not valid UTF-8.
    let mut bytes = b"name,age\nAlice,30\n".to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFE, b'\n']);
    fs::write(&input, bytes).expect("Failed to write CSV file");

    let result = convert_csv_to_json(&input, &output);
    assert!(matches!(result, Err(ConvertError::Encoding(_))));

    let content = read_to_string(&output).expect("Truncated output should still exist");
    assert!(content.starts_with("[\n"));
    assert!(content.contains("\"name\": \"Alice\""));
    assert!(!content.contains(']'));

    fs::remove_file(&input).ok();
    fs::remove_file(&output).ok();
}
