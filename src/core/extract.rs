use crate::domain::model::BankRecord;
use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Node, Selector};

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::parse(format!("invalid selector {}: {:?}", css, e)))
}

/// Parses the ranking table: the first `<tbody>` of the page, one record per
/// row whose second cell holds at least two links.
pub fn parse_bank_table(html: &str) -> Result<Vec<BankRecord>> {
    let document = Html::parse_document(html);
    let tbody_sel = selector("tbody")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let link_sel = selector("a")?;

    let tbody = document
        .select(&tbody_sel)
        .next()
        .ok_or_else(|| EtlError::parse("no <tbody> element found in page"))?;

    let mut records = Vec::new();
    for (row_idx, row) in tbody.select(&row_sel).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();

        // 標題列沒有 <td>
        if cells.is_empty() {
            continue;
        }

        let Some(anchor) = cells.get(1).and_then(|cell| cell.select(&link_sel).nth(1)) else {
            tracing::debug!("Skipping row {}: no bank name link", row_idx);
            continue;
        };
        let name: String = anchor.text().collect();

        let cap_cell = cells.get(2).ok_or_else(|| {
            EtlError::parse(format!("row {} ({}) has no market cap cell", row_idx, name))
        })?;
        let market_cap_usd = parse_market_cap(&first_content(cap_cell)).map_err(|e| {
            EtlError::parse(format!("row {} ({}): {}", row_idx, name, e))
        })?;

        records.push(BankRecord {
            name,
            market_cap_usd,
        });
    }

    Ok(records)
}

/// Text of the cell's first child node; a leading element contributes all of its text.
fn first_content(cell: &ElementRef) -> String {
    match cell.first_child() {
        Some(child) => match child.value() {
            Node::Text(text) => text.to_string(),
            Node::Element(_) => ElementRef::wrap(child)
                .map(|el| el.text().collect())
                .unwrap_or_default(),
            _ => String::new(),
        },
        None => String::new(),
    }
}

/// 去除換行後解析為浮點數，不接受千分位
pub fn parse_market_cap(raw: &str) -> std::result::Result<f64, String> {
    let cleaned: String = raw.split('\n').collect();
    let cleaned = cleaned.trim();
    cleaned
        .parse::<f64>()
        .map_err(|e| format!("cannot parse market cap {:?}: {}", cleaned, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: u32, name: &str, cap: &str) -> String {
        format!(
            r#"<tr><td>{rank}</td><td><span class="flagicon"><a href="/wiki/Country" title="Country"><img src="flag.png"></a></span> <a href="/wiki/{name}" title="{name}">{name}</a></td><td>{cap}
</td></tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="wikitable"><tbody>
<tr><th>Rank</th><th>Bank name</th><th>Market cap (US$ billion)</th></tr>
{}
</tbody></table>
<table><tbody><tr><td>1</td><td><a>x</a><a>Other Table</a></td><td>1.0</td></tr></tbody></table>
</body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_parse_rows_in_order() {
        let html = page(&[
            row(1, "JPMorgan Chase", "432.92"),
            row(2, "Bank of America", "231.52"),
            row(3, "Industrial and Commercial Bank of China", "194.56"),
        ]);

        let records = parse_bank_table(&html).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "JPMorgan Chase");
        assert_eq!(records[0].market_cap_usd, 432.92);
        assert_eq!(records[1].name, "Bank of America");
        assert_eq!(records[1].market_cap_usd, 231.52);
        assert_eq!(records[2].name, "Industrial and Commercial Bank of China");
        assert_eq!(records[2].market_cap_usd, 194.56);
    }

    #[test]
    fn test_row_without_second_link_is_skipped() {
        let no_flag = r#"<tr><td>2</td><td><a href="/wiki/Lonely">Lonely Bank</a></td><td>99.1</td></tr>"#;
        let html = page(&[
            row(1, "JPMorgan Chase", "432.92"),
            no_flag.to_string(),
            row(3, "HSBC", "160.68"),
        ]);

        let records = parse_bank_table(&html).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "JPMorgan Chase");
        assert_eq!(records[1].name, "HSBC");
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let html = page(&[row(1, "HSBC", "160.68"), row(2, "HSBC", "160.68")]);

        let records = parse_bank_table(&html).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_malformed_number_fails_whole_extraction() {
        let html = page(&[
            row(1, "JPMorgan Chase", "432.92"),
            row(2, "Bank of America", "1,231.52"),
        ]);

        let err = parse_bank_table(&html).unwrap_err();
        assert!(matches!(err, EtlError::ParseError { .. }));
        assert!(err.to_string().contains("Bank of America"));
    }

    #[test]
    fn test_missing_tbody_fails() {
        let err = parse_bank_table("<html><body><p>No table here</p></body></html>").unwrap_err();
        assert!(matches!(err, EtlError::ParseError { .. }));
    }

    #[test]
    fn test_header_only_table_yields_nothing() {
        let records = parse_bank_table(&page(&[])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_market_cap_strips_newlines() {
        assert_eq!(parse_market_cap("432.92\n").unwrap(), 432.92);
        assert_eq!(parse_market_cap("\n37.\n5\n").unwrap(), 37.5);
        assert!(parse_market_cap("1,000.5").is_err());
        assert!(parse_market_cap("").is_err());
    }
}
