use super::*;

#[test]
fn test_format_table_aligns_columns() {
    let columns = cols(&["RegionID", "Region"]);
    let rows = vec![
        vec![Value::Integer(1), Value::Text("NA".into())],
        vec![Value::Integer(2), Value::Text("Europe".into())],
    ];

    assert_eq!(
        format_table(&columns, &rows),
        "RegionID | Region\n\
         -----------------\n\
         1        | NA    \n\
         2        | Europe"
    );
}

#[test]
fn test_format_table_widens_to_longest_cell() {
    let columns = cols(&["ID", "Name"]);
    let rows = vec![vec![Value::Integer(12345), Value::Text("Pokémon".into())]];

    let out = format_table(&columns, &rows);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID    | Name   ");
    assert_eq!(lines[1], "-".repeat(15));
    assert_eq!(lines[2], "12345 | Pokémon");
}

#[test]
fn test_format_table_without_rows() {
    let out = format_table(&cols(&["Marketplace"]), &[]);
    assert_eq!(out, "Marketplace\n-----------");
}

#[test]
fn test_format_table_renders_null_real_and_blob() {
    let columns = cols(&["A", "B", "C"]);
    let rows = vec![vec![
        Value::Null,
        Value::Real(2.5),
        Value::Blob(vec![0xAB, 0x01]),
    ]];

    let out = format_table(&columns, &rows);
    assert_eq!(out.lines().nth(2), Some("null | 2.5 | 0xAB01"));
}
