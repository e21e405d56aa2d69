// tests/csv_parse.rs
//
// CSV reader/writer behavior on export-shaped text.
//
use listing_watch::csv::{parse_rows, rows_to_string};

fn v(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn quoted_separator_stays_in_field() {
    let rows = parse_rows("a,\"b,c\",d\n1,2,3", ',');
    assert_eq!(rows, vec![v(&["a", "b,c", "d"]), v(&["1", "2", "3"])]);
}

#[test]
fn doubled_quote_is_literal() {
    let rows = parse_rows("x,\"say \"\"hi\"\"\"", ',');
    assert_eq!(rows, vec![v(&["x", "say \"hi\""])]);
}

#[test]
fn crlf_line_endings() {
    let rows = parse_rows("a,b\r\nc,d\r\n", ',');
    assert_eq!(rows, vec![v(&["a", "b"]), v(&["c", "d"])]);
}

#[test]
fn single_field_and_blank_lines_are_dropped() {
    // Title line and blank lines above the header are common in exports
    let rows = parse_rows("Search results\n\na,b\n\n1,2\n", ',');
    assert_eq!(rows, vec![v(&["a", "b"]), v(&["1", "2"])]);
}

#[test]
fn newline_inside_quotes_is_kept() {
    let rows = parse_rows("a,\"line1\nline2\"\nc,d", ',');
    assert_eq!(rows, vec![v(&["a", "line1\nline2"]), v(&["c", "d"])]);
}

#[test]
fn carriage_return_inside_quotes_is_kept() {
    let rows = parse_rows("a,\"x\ry\"", ',');
    assert_eq!(rows, vec![v(&["a", "x\ry"])]);
}

#[test]
fn unterminated_quote_flushes_trailing_field() {
    let rows = parse_rows("a,\"open", ',');
    assert_eq!(rows, vec![v(&["a", "open"])]);
}

#[test]
fn empty_input_yields_no_rows() {
    assert!(parse_rows("", ',').is_empty());
    assert!(parse_rows("\n\n", ',').is_empty());
}

#[test]
fn writer_quotes_only_when_needed() {
    let rows = vec![v(&["a,b", "c\"d", "plain"])];
    let text = rows_to_string(&rows, ',');
    assert_eq!(text, "\"a,b\",\"c\"\"d\",plain\n");
    assert_eq!(parse_rows(&text, ','), rows);
}
