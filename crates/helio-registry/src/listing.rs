use scraper::{Html, Selector};
use url::Url;

use helio_store::HttpClient;

use crate::RegistryResult;

/// Fetch one HTML directory-listing page and return its anchor hrefs.
///
/// No pagination, no recursion, no retry; a connection or HTTP failure
/// surfaces to the caller of the lookup chain.
pub fn list_links(client: &HttpClient, url: &Url) -> RegistryResult<Vec<String>> {
    let page = client.get_text(url)?;
    let document = Html::parse_document(&page);
    let anchor = Selector::parse("a").expect("anchor selector");
    let hrefs = document
        .select(&anchor)
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_string)
        .collect();
    Ok(hrefs)
}
