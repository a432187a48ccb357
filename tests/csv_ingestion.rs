use zip_csv_ingest::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader, write_csv_to_path};
use zip_csv_ingest::ingestion::CsvOptions;
use zip_csv_ingest::types::{DataType, Field, Schema, Value};

fn people_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ])
}

fn reader(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes())
}

#[test]
fn ingest_csv_from_path_happy_path() {
    let ds = ingest_csv_from_path("tests/fixtures/people.csv", &CsvOptions::default()).unwrap();

    assert_eq!(ds.schema, people_schema());
    assert_eq!(ds.row_count(), 2);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
}

#[test]
fn columns_keep_header_order() {
    let mut rdr = reader("name,id,active,score\nAda,1,true,98.5\n");

    let ds = ingest_csv_from_reader(&mut rdr, &CsvOptions::default()).unwrap();
    assert_eq!(ds.column_names(), vec!["name", "id", "active", "score"]);
    assert_eq!(ds.rows[0][0], Value::Utf8("Ada".to_string()));
    assert_eq!(ds.rows[0][1], Value::Int64(1));
}

#[test]
fn unparseable_value_demotes_column_to_text() {
    let mut rdr = reader("id,score\nnot_an_int,98.5\n2,inf\n");

    let ds = ingest_csv_from_reader(&mut rdr, &CsvOptions::default()).unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Utf8);
    assert_eq!(ds.rows[1], vec![Value::Utf8("2".to_string()), Value::Utf8("inf".to_string())]);
}

#[test]
fn default_null_tokens_are_missing_values() {
    let mut rdr = reader("a,b,c\n1,NaN,x\nN/A,2.5,NULL\n3,#N/A,<NA>\n");

    let ds = ingest_csv_from_reader(&mut rdr, &CsvOptions::default()).unwrap();
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(types, vec![DataType::Int64, DataType::Float64, DataType::Utf8]);
    assert_eq!(ds.rows[1], vec![Value::Null, Value::Float64(2.5), Value::Null]);
    assert_eq!(ds.rows[2], vec![Value::Int64(3), Value::Null, Value::Null]);
}

#[test]
fn cleared_null_tokens_keep_markers_as_text() {
    let options = CsvOptions {
        null_values: Vec::new(),
        ..Default::default()
    };
    let mut rdr = reader("a\n1\nNA\n\"\"\n");

    let ds = ingest_csv_from_reader(&mut rdr, &options).unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(ds.rows[1][0], Value::Utf8("NA".to_string()));
    assert!(ds.rows[2][0].is_null());
}

#[test]
fn inference_falls_back_per_column() {
    let mut rdr = reader("i,f,b,s,empty\n1,1,true,x,\n2,2.5,FALSE,3,\n,,,,\n");
    let ds = ingest_csv_from_reader(&mut rdr, &CsvOptions::default()).unwrap();

    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Int64, DataType::Float64, DataType::Bool, DataType::Utf8, DataType::Utf8]
    );
    assert_eq!(
        ds.rows[1],
        vec![
            Value::Int64(2),
            Value::Float64(2.5),
            Value::Bool(false),
            Value::Utf8("3".to_string()),
            Value::Null,
        ]
    );
    assert!(ds.rows[2].iter().all(Value::is_null));
}

#[test]
fn null_tokens_and_trim_are_configurable() {
    let options = CsvOptions {
        null_values: vec!["missing".to_string()],
        trim: true,
        ..Default::default()
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader("id , name\n 1 , Ada \nmissing,missing\n".as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &options).unwrap();
    assert_eq!(ds.column_names(), vec!["id", "name"]);
    assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Utf8("Ada".to_string())]);
    assert_eq!(ds.rows[1], vec![Value::Null, Value::Null]);
}

#[test]
fn semicolon_delimiter_from_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("semi.csv");
    std::fs::write(&path, "a;b\n1;x\n").unwrap();

    let options = CsvOptions {
        delimiter: b';',
        ..Default::default()
    };
    let ds = ingest_csv_from_path(&path, &options).unwrap();
    assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Utf8("x".to_string())]);
}

#[test]
fn write_then_read_preserves_values() {
    let original = ingest_csv_from_path("tests/fixtures/people.csv", &CsvOptions::default()).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("copy.csv");
    write_csv_to_path(&original, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,name,score,active\n"));

    let reread = ingest_csv_from_path(&path, &CsvOptions::default()).unwrap();
    assert_eq!(reread, original);
}
