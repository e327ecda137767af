use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{ProductRecord, NUMERIC_FIELDS};

// ---------------------------------------------------------------------------
// Parse result
// ---------------------------------------------------------------------------

/// Records parsed from one CSV document, plus how many rows were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<ProductRecord>,
    /// Data rows whose field count did not match the header row.
    pub skipped_rows: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse listing CSV text.
///
/// The first line is the header row. Every following non-blank line is one
/// row and must have exactly as many fields as the header, otherwise it is
/// dropped and counted in [`ParseReport::skipped_rows`]. Cells map to record
/// fields by header name; unknown headers are ignored and missing ones leave
/// the field at its default. The columns in [`NUMERIC_FIELDS`] are coerced
/// with [`coerce_number`].
pub fn parse_products(text: &str) -> Result<ParseReport, csv::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    let headers = match lines.next() {
        Some(first) => split_line(first)?,
        None => return Ok(ParseReport::default()),
    };

    let mut report = ParseReport::default();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_line(line)?;
        if row.len() != headers.len() {
            report.skipped_rows += 1;
            continue;
        }
        report.records.push(build_record(&headers, &row));
    }

    if report.skipped_rows > 0 {
        log::warn!(
            "Skipped {} row(s) whose field count did not match the {} header columns",
            report.skipped_rows,
            headers.len()
        );
    }

    Ok(report)
}

/// Split one physical line into cleaned cells.
///
/// Quoted fields may contain commas. A line with an unterminated quote is
/// split on every comma instead, so the quote never spills into later lines.
fn split_line(line: &str) -> Result<Vec<String>, csv::Error> {
    if line.matches('"').count() % 2 == 1 {
        return Ok(line.split(',').map(clean_cell).collect());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(clean_cell).collect())
}

fn build_record(headers: &[String], row: &[String]) -> ProductRecord {
    let mut rec = ProductRecord::default();
    for (header, value) in headers.iter().zip(row) {
        if NUMERIC_FIELDS.contains(&header.as_str()) {
            rec.set_number(header, coerce_number(value));
        } else {
            rec.set_text(header, value);
        }
    }
    rec
}

/// Drop every double quote and the surrounding whitespace.
fn clean_cell(s: &str) -> String {
    s.replace('"', "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Lenient float parsing: read the longest numeric prefix of `s`
/// (`"12.5 kg"` → 12.5, `".5"` → 0.5). Anything unparseable or non-finite
/// becomes `0.0`.
pub fn coerce_number(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "keyword,product_id,product_name,brand,price,mrp,pin_code,date,source";

    #[test]
    fn parses_every_well_formed_row() {
        let text = format!(
            "{HEADER}\n\
             milk,101,Toned Milk,Amul,27,28,560001,2024-06-01,zepto\n\
             milk,102,Gold Milk,Amul,34,35,560002,2024-06-01,blinkit\n\
             bread,103,Brown Bread,Modern,45,50,400001,2024-06-02,instamart\n"
        );
        let report = parse_products(&text).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.skipped_rows, 0);

        let first = &report.records[0];
        assert_eq!(first.product_name, "Toned Milk");
        assert_eq!(first.product_id, 101.0);
        assert_eq!(first.price, 27.0);
        assert_eq!(first.source, "zepto");
    }

    #[test]
    fn drops_rows_with_wrong_field_count() {
        let text = format!(
            "{HEADER}\n\
             milk,101,Toned Milk,Amul,27,28,560001,2024-06-01,zepto\n\
             milk,102,Gold Milk,Amul,34\n\
             milk,103,Slim Milk,Amul,20,22,560001,2024-06-01,zepto,extra\n"
        );
        let report = parse_products(&text).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped_rows, 2);
        assert_eq!(report.records[0].product_id, 101.0);
    }

    #[test]
    fn strips_quotes_and_whitespace_and_accepts_crlf() {
        let text = " \"brand\" , \"price\" ,source\r\n\
                    \"Amul\" ,  \"27\" , zepto \r\n\
                    \r\n\
                    \"Mother Dairy\",30,blinkit\r\n";
        let report = parse_products(text).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].brand, "Amul");
        assert_eq!(report.records[0].price, 27.0);
        assert_eq!(report.records[0].source, "zepto");
        assert_eq!(report.records[1].brand, "Mother Dairy");
    }

    #[test]
    fn quoted_commas_stay_inside_the_field() {
        let text = "product_name,brand\n\"Milk, Toned 500ml\",Amul\n";
        let report = parse_products(text).unwrap();

        assert_eq!(report.skipped_rows, 0);
        assert_eq!(report.records[0].product_name, "Milk, Toned 500ml");
    }

    #[test]
    fn unterminated_quote_stays_on_its_line() {
        let text = "product_name,brand,price\n\
                    \"12 inch Pizza,Dominos,199\n\
                    Garlic Bread,Dominos,99\n\
                    Choco Lava Cake,Dominos,109\n\
                    Paneer Wrap,Wow,149\n";
        let report = parse_products(text).unwrap();

        assert_eq!(report.skipped_rows, 0);
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.records[0].product_name, "12 inch Pizza");
        assert_eq!(report.records[0].price, 199.0);
        assert_eq!(report.records[3].brand, "Wow");
    }

    #[test]
    fn unterminated_quote_with_wrong_field_count_drops_only_that_line() {
        let text = "product_name,brand\n\
                    \"Pizza, large,Dominos\n\
                    Garlic Bread,Dominos\n";
        let report = parse_products(text).unwrap();

        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].product_name, "Garlic Bread");
    }

    #[test]
    fn inner_quotes_are_removed() {
        let text = "product_name,brand\nAmul \"Gold\" Milk,Amul\n\"Say \"\"Cheese\"\"\",Britannia\n";
        let report = parse_products(text).unwrap();

        assert_eq!(report.records[0].product_name, "Amul Gold Milk");
        assert_eq!(report.records[1].product_name, "Say Cheese");
    }

    #[test]
    fn unknown_headers_are_ignored_and_missing_fields_default() {
        let text = "brand,warehouse\nAmul,north\n";
        let report = parse_products(text).unwrap();

        let rec = &report.records[0];
        assert_eq!(rec.brand, "Amul");
        assert_eq!(rec.price, 0.0);
        assert!(rec.city.is_empty());
    }

    #[test]
    fn unparseable_numbers_become_zero() {
        let text = "price,mrp,position,inventory\nN/A,,12.5 kg,-3\n";
        let rec = &parse_products(text).unwrap().records[0];

        assert_eq!(rec.price, 0.0);
        assert_eq!(rec.mrp, 0.0);
        assert_eq!(rec.position, 12.5);
        assert_eq!(rec.inventory, -3.0);
    }

    #[test]
    fn empty_input_yields_no_records() {
        let report = parse_products("").unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.skipped_rows, 0);

        let header_only = parse_products(HEADER).unwrap();
        assert!(header_only.records.is_empty());
    }

    #[test]
    fn coerce_number_reads_numeric_prefix() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number("  3.75"), 3.75);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("1e3x"), 1000.0);
        assert_eq!(coerce_number("7e"), 7.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("1e999"), 0.0);
    }
}
