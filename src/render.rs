//! Text output for each command, one entry per line.

use crate::{ctx::DatabaseInfo, query::QueryOutput, record::Value, schema::Column};

/// Separator between values of a row.
const SEPARATOR: &str = "|";

pub fn info(info: &DatabaseInfo) -> Vec<String> {
    vec![
        format!("database page size: {}", info.page_size),
        format!("number of tables: {}", info.table_count),
    ]
}

/// All names on a single line.
pub fn names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    vec![names.into_iter().collect::<Vec<_>>().join(" ")]
}

pub fn query_output(output: &QueryOutput) -> Vec<String> {
    match output {
        QueryOutput::Count(count) => vec![count.to_string()],
        QueryOutput::Rows { columns, rows } => rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| value_text(column, value))
                    .collect::<Vec<_>>()
                    .join(SEPARATOR)
            })
            .collect(),
    }
}

/// Text of a single value. Integers stored in a column with integer affinity are rendered in
/// decimal, everything else is treated as UTF-8.
pub fn value_text(column: &Column, value: &Value) -> String {
    let stored = value.bytes.as_slice();

    if column.has_integer_affinity() && value.is_integer() && (1..=8).contains(&stored.len()) {
        let sign = if stored[0] & 0x80 == 0 { 0x00 } else { 0xff };
        let mut bytes = [sign; 8];
        bytes[8 - stored.len()..].copy_from_slice(stored);

        return i64::from_be_bytes(bytes).to_string();
    }

    String::from_utf8_lossy(stored).into_owned()
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn info_lines() {
        assert_eq!(
            info(&DatabaseInfo {
                page_size: 512,
                table_count: 3
            }),
            ["database page size: 512", "number of tables: 3"]
        );
    }

    #[rstest]
    #[case::many(&["apples", "oranges"], "apples oranges")]
    #[case::one(&["apples"], "apples")]
    #[case::none(&[], "")]
    fn name_list(#[case] list: &[&str], #[case] expected: &str) {
        assert_eq!(names(list.iter().copied()), [expected]);
    }

    #[test]
    fn count() {
        assert_eq!(query_output(&QueryOutput::Count(42)), ["42"]);
    }

    #[test]
    fn rows() {
        let output = QueryOutput::Rows {
            columns: vec![
                Column::new("id", "integer", true),
                Column::new("name", "text", false),
            ],
            rows: vec![
                vec![Value::text("1"), Value::text("fuji")],
                vec![Value::text("2"), Value::text("")],
            ],
        };

        assert_eq!(query_output(&output), ["1|fuji", "2|"]);
    }

    fn integer(serial_type: u64, bytes: &[u8]) -> Value {
        Value {
            serial_type,
            bytes: bytes.to_vec(),
        }
    }

    #[rstest]
    #[case::text("text", Value::text("Fuji"), "Fuji")]
    #[case::empty_text("text", Value::text(""), "")]
    #[case::null_text("text", Value::default(), "")]
    #[case::int8("integer", integer(1, &[0x2a]), "42")]
    #[case::negative("INT", integer(2, &[0xff, 0xfe]), "-2")]
    #[case::int32("bigint", integer(4, &[0x00, 0x01, 0x00, 0x00]), "65536")]
    #[case::null_integer("integer", Value::default(), "")]
    #[case::short_text_in_integer("int", Value::text("abc"), "abc")]
    #[case::text_in_integer("integer", Value::text("not a number"), "not a number")]
    #[case::integer_in_text("text", integer(1, &[0x41]), "A")]
    fn value_text_case(#[case] declared_type: &str, #[case] value: Value, #[case] expected: &str) {
        let column = Column::new("c", declared_type, false);

        assert_eq!(value_text(&column, &value), expected);
    }

    #[test]
    fn rowid_alias_is_text() {
        let column = Column::new("id", "integer", true);

        assert_eq!(value_text(&column, &Value::text("12")), "12");
    }
}
