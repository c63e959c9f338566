use crate::error::ScrapeError;
use crate::models::ListingIdentifier;
use crate::scrapers::types::SiteLayout;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("bad selector {css:?}: {e}")))
}

/// Pull listing identifiers out of the index frame document.
///
/// Rows are taken from `layout.row_start` in steps of `layout.row_stride`;
/// each selected row yields exactly one identifier, in row order.
pub fn listing_ids(
    frame_html: &str,
    layout: &SiteLayout,
) -> Result<Vec<ListingIdentifier>, ScrapeError> {
    let document = Html::parse_document(frame_html);
    let row_selector = selector("body tr")?;
    let cell_selector = selector("td")?;
    let link_selector = selector("a")?;

    let rows: Vec<ElementRef> = document.select(&row_selector).collect();
    info!("Found {} table rows in listing frame", rows.len());

    let mut ids = Vec::new();
    let mut row_label = layout.row_label_start;

    for (row_idx, row) in rows
        .iter()
        .enumerate()
        .skip(layout.row_start)
        .step_by(layout.row_stride.max(1))
    {
        let cell = row
            .select(&cell_selector)
            .next()
            .ok_or_else(|| ScrapeError::Structure(format!("row {row_idx} has no cells")))?;
        let link = cell.select(&link_selector).next().ok_or_else(|| {
            ScrapeError::Structure(format!("row {row_idx} has no link in its first cell"))
        })?;
        let onclick = link.value().attr("onclick").ok_or_else(|| {
            ScrapeError::Structure(format!("row {row_idx} link has no onclick handler"))
        })?;

        let id = strip_identifier(onclick, layout.onclick_prefix_len, row_label)?;
        debug!("Row {} -> listing {}", row_idx, id);

        ids.push(id);
        row_label += layout.row_label_step;
    }

    Ok(ids)
}

/// Turn an onclick handler such as `loadReport('262','Row3'); return false;`
/// into the bare identifier: drop `prefix_len` chars, then the row suffix.
pub fn strip_identifier(
    onclick: &str,
    prefix_len: usize,
    row_label: u32,
) -> Result<ListingIdentifier, ScrapeError> {
    // A handler of exactly `prefix_len` chars leaves an empty identifier
    let start = onclick
        .char_indices()
        .nth(prefix_len)
        .map(|(at, _)| at)
        .or_else(|| (onclick.chars().count() == prefix_len).then_some(onclick.len()))
        .ok_or_else(|| {
            ScrapeError::Structure(format!(
                "onclick handler {onclick:?} is shorter than {prefix_len} characters"
            ))
        })?;
    let rest = &onclick[start..];

    let suffix = format!("','Row{row_label}'); return false;");
    Ok(ListingIdentifier::new(rest.replace(&suffix, "")))
}
