//! Scan pagination
//!
//! DynamoDB returns a `LastEvaluatedKey` with every page that is not the
//! last one; the next request passes it back as `ExclusiveStartKey`. An
//! absent or empty key ends the scan.

use super::convert::item_to_record;
use crate::error::Result;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use dynamo_frames_tabular::RecordBatch;
use std::collections::HashMap;
use std::future::Future;

/// A DynamoDB item, and the shape of a pagination key
pub(crate) type Item = HashMap<String, SdkAttributeValue>;

/// One page of Scan output
#[derive(Debug, Clone, Default)]
pub(crate) struct ScanPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

/// Start key for the page after `page`, or `None` when the scan is done
pub(crate) fn next_start_key(page: &ScanPage) -> Option<Item> {
    page.last_evaluated_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .cloned()
}

/// Fetch pages until the table is exhausted or `max_pages` pages were read.
///
/// `fetch` receives the start key for each request (`None` for the first).
/// Items are converted and appended in page order.
pub(crate) async fn collect_pages<F, Fut>(
    table_name: &str,
    max_pages: Option<usize>,
    mut fetch: F,
) -> Result<RecordBatch>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<ScanPage>>,
{
    let mut records = RecordBatch::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(start_key.take()).await?;
        pages += 1;

        records.extend(page.items.iter().map(item_to_record));

        tracing::trace!(
            table = table_name,
            page = pages,
            items = page.items.len(),
            "scanned page"
        );

        if max_pages.is_some_and(|max| pages >= max) {
            tracing::debug!(table = table_name, pages, "scan page limit reached");
            break;
        }

        match next_start_key(&page) {
            Some(key) => start_key = Some(key),
            None => break,
        }
    }

    tracing::debug!(table = table_name, pages, records = records.len(), "scan complete");
    Ok(records)
}
