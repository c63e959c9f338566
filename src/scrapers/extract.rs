use crate::error::ScrapeError;
use crate::models::{FieldMap, ListingIdentifier, ListingRecord};
use crate::scrapers::types::SiteLayout;
use scraper::{Html, Selector};
use tracing::debug;

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("bad selector {css:?}: {e}")))
}

/// Read one listing's fields out of its detail report.
///
/// Values come back in field map order. An element whose text is empty
/// yields `placeholder`; a missing container or element fails the listing.
pub fn extract_record(
    id: &ListingIdentifier,
    html: &str,
    layout: &SiteLayout,
    field_map: &FieldMap,
    placeholder: &str,
) -> Result<ListingRecord, ScrapeError> {
    let document = Html::parse_document(html);
    let container_selector = selector(&format!(r#"div[id="{}"]"#, layout.container_id))?;

    let container = document.select(&container_selector).next().ok_or_else(|| {
        ScrapeError::Parse(format!(
            "listing {id}: no container #{}",
            layout.container_id
        ))
    })?;

    let mut values = Vec::with_capacity(field_map.len());
    for locator in field_map.iter() {
        let field_selector = selector(&format!(
            r#"div[{}="{}"]"#,
            layout.field_attribute, locator.index
        ))?;

        let element = container.select(&field_selector).next().ok_or_else(|| {
            ScrapeError::Parse(format!(
                "listing {id}: no element for {} ({}={})",
                locator.name, layout.field_attribute, locator.index
            ))
        })?;

        let text: String = element.text().collect();
        if text.is_empty() {
            debug!("Listing {}: {} is empty", id, locator.name);
            values.push(placeholder.to_string());
        } else {
            values.push(text);
        }
    }

    Ok(ListingRecord {
        id: id.clone(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldLocator;

    fn report(fields: &[(u32, &str)]) -> String {
        let mut html = String::from(r#"<html><body><div id="divHtmlReport">"#);
        for (index, text) in fields {
            html.push_str(&format!(r#"<div tabindex="{index}">{text}</div>"#));
        }
        html.push_str("</div></body></html>");
        html
    }

    fn two_fields() -> FieldMap {
        FieldMap::new(vec![
            FieldLocator::new("Address", 159),
            FieldLocator::new("SalePrice", 163),
        ])
    }

    #[test]
    fn reads_fields_in_map_order() {
        let html = report(&[(163, "$1,250,000"), (159, "123 Main St")]);
        let record = extract_record(
            &ListingIdentifier::new("1"),
            &html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap();

        assert_eq!(record.values, vec!["123 Main St", "$1,250,000"]);
    }

    #[test]
    fn empty_text_becomes_placeholder() {
        let html = report(&[(159, ""), (163, "$900")]);
        let record = extract_record(
            &ListingIdentifier::new("1"),
            &html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap();

        assert_eq!(record.values, vec!["N/A", "$900"]);
    }

    #[test]
    fn nested_text_is_concatenated() {
        let html = report(&[(159, "<span>12</span> <b>Elm</b>"), (163, "1")]);
        let record = extract_record(
            &ListingIdentifier::new("1"),
            &html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap();

        assert_eq!(record.values[0], "12 Elm");
    }

    #[test]
    fn first_matching_element_wins() {
        let html = report(&[(159, "first"), (159, "second"), (163, "1")]);
        let record = extract_record(
            &ListingIdentifier::new("1"),
            &html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap();

        assert_eq!(record.values[0], "first");
    }

    #[test]
    fn missing_container_is_a_parse_error() {
        let html = r#"<html><body><div tabindex="159">x</div></body></html>"#;
        let err = extract_record(
            &ListingIdentifier::new("1"),
            html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap_err();

        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let html = report(&[(159, "only address")]);
        let err = extract_record(
            &ListingIdentifier::new("1"),
            &html,
            &SiteLayout::default(),
            &two_fields(),
            "N/A",
        )
        .unwrap_err();

        assert!(err.to_string().contains("SalePrice"));
    }
}
