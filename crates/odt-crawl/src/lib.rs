//! Open-data portal crawling: CSV link discovery and dataset naming.
//!
//! One fetch per page, no retries. Link extraction is a pure function
//! over the page HTML so it stays testable without a network.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors that can occur while crawling a portal page.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The portal URL itself does not parse.
    #[error("invalid portal url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request failed before a response arrived.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with an error status.
    #[error("failed to fetch {url}: status code {status}")]
    Status { url: String, status: u16 },
}

/// Result type for crawling operations.
pub type Result<T> = std::result::Result<T, CrawlError>;

/// A CSV resource discovered on a portal page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLink {
    pub url: String,
    pub name: String,
}

/// Fetches a portal page (single attempt) and extracts its CSV links.
pub fn discover_csv_links(page_url: &str) -> Result<Vec<DatasetLink>> {
    let base = Url::parse(page_url).map_err(|source| CrawlError::InvalidUrl {
        url: page_url.to_string(),
        source,
    })?;
    let response = reqwest::blocking::get(page_url).map_err(|source| CrawlError::Fetch {
        url: page_url.to_string(),
        source,
    })?;
    let status = response.status().as_u16();
    if status >= 400 {
        return Err(CrawlError::Status {
            url: page_url.to_string(),
            status,
        });
    }
    let body = response.text().map_err(|source| CrawlError::Fetch {
        url: page_url.to_string(),
        source,
    })?;
    let links = extract_csv_links(&body, &base);
    debug!(url = page_url, count = links.len(), "portal page crawled");
    Ok(links)
}

/// Extracts same-host `.csv` anchors from an HTML page.
///
/// Hrefs are scrubbed of control characters and stray markup before
/// resolution; only `http(s)` links on the page's host whose lowercased
/// path ends in `.csv` survive.
pub fn extract_csv_links(html: &str, base: &Url) -> Vec<DatasetLink> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap();
    let markup = Regex::new("<.*?>").unwrap();
    let base_host = base.host_str().map(str::to_ascii_lowercase);

    let mut links = Vec::new();
    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = scrub_href(href, &markup);
        let Ok(resolved) = base.join(&href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        if resolved.host_str().map(str::to_ascii_lowercase) != base_host {
            continue;
        }
        if !resolved.path().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        let name = dataset_name(element, &resolved);
        links.push(DatasetLink {
            url: resolved.to_string(),
            name,
        });
    }
    links
}

fn scrub_href(href: &str, markup: &Regex) -> String {
    let visible: String = href.chars().filter(|c| *c >= ' ').collect();
    markup.replace_all(&visible, "").trim().to_string()
}

/// Derives a display name: the anchor's parent element text when it has
/// any, otherwise a dotted name built from the URL.
fn dataset_name(anchor: ElementRef<'_>, url: &Url) -> String {
    if let Some(parent) = anchor.parent().and_then(ElementRef::wrap) {
        let text: String = parent
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if !text.is_empty() {
            return text;
        }
    }
    url_derived_name(url)
}

/// Dotted fallback name: reversed host labels, then path segments, with
/// a trailing `.csv` stripped (`stats.example.org/a/pop.csv` →
/// `org.example.stats.a.pop`).
pub fn url_derived_name(url: &Url) -> String {
    let mut labels: Vec<&str> = url.host_str().unwrap_or_default().split('.').collect();
    labels.reverse();
    let mut segments: Vec<String> = url
        .path_segments()
        .map(|parts| parts.map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(last) = segments.last_mut() {
        if let Some(stem) = last.strip_suffix(".csv") {
            *last = stem.to_string();
        }
    }
    let mut name = labels.join(".");
    name.push('.');
    name.push_str(&segments.join("."));
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://data.example.org/portal/index.html").unwrap()
    }

    #[test]
    fn test_extracts_same_host_csv_links() {
        let html = r#"
            <html><body>
              <div>Population by ward<a href="/files/population.csv">CSV</a></div>
              <div><a href="https://data.example.org/files/parks.CSV">parks</a></div>
              <div><a href="https://other.example.net/files/crime.csv">offsite</a></div>
              <div><a href="/files/report.pdf">not csv</a></div>
              <div><a href="ftp://data.example.org/files/x.csv">wrong scheme</a></div>
            </body></html>
        "#;
        let links = extract_csv_links(html, &base());

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://data.example.org/files/population.csv");
        assert_eq!(links[1].url, "https://data.example.org/files/parks.CSV");
    }

    #[test]
    fn test_name_from_parent_text() {
        let html = r#"<div>Population by ward (2024)<a href="/pop.csv">CSV</a></div>"#;
        let links = extract_csv_links(html, &base());
        assert_eq!(links[0].name, "Population by ward (2024)CSV");
    }

    #[test]
    fn test_name_falls_back_to_url() {
        // Anchor directly under <body>, whose only text is whitespace.
        let html = "<body> <a href=\"/files/pop.csv\"></a> </body>";
        let links = extract_csv_links(html, &base());
        assert_eq!(links[0].name, "org.example.data.files.pop");
    }

    #[test]
    fn test_relative_links_resolve_against_page() {
        let html = r#"<a href="tables/pop.csv">x</a>"#;
        let links = extract_csv_links(html, &base());
        assert_eq!(
            links[0].url,
            "https://data.example.org/portal/tables/pop.csv"
        );
    }

    #[test]
    fn test_hrefs_are_scrubbed() {
        let html = "<a href=\"  /files/pop\n.csv  \">x</a>";
        let links = extract_csv_links(html, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://data.example.org/files/pop.csv");
    }

    #[test]
    fn test_url_derived_name() {
        let url = Url::parse("https://stats.example.org/a/b/pop.csv").unwrap();
        assert_eq!(url_derived_name(&url), "org.example.stats.a.b.pop");
    }
}
