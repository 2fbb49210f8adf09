//! Titan Fittings product page scraper.
//!
//! This module scrapes individual product pages from
//! [Titan Fittings](https://www.titanfittings.com), extracting the product
//! title and the primary product image URL.
//!
//! # Image handling
//!
//! The storefront is a Next.js application, so product images are usually
//! served through the `/_next/image` resizing proxy with the real image URL
//! percent-encoded in the `url=` query parameter. Image resolution walks a
//! fallback chain: decode `src`, then the first `srcset` candidate, then a
//! lazy-loaded `data-src` pointing at the image API host.

use crate::models::{NO_IMAGE, ProductInfo};
use crate::scrapers::ScrapeError;
use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Base origin of the storefront. Also the prefix an input cell must carry
/// to be treated as a candidate product URL.
pub const BASE_URL: &str = "https://www.titanfittings.com/";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Title selectors in priority order. The first one that matches any
/// element wins; a bare `h1` anywhere in the document is the last resort.
static TITLE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "h1.product-name",
        "h1.product-title",
        "h1.product-detail__title",
        "h1.productView-title",
        r#"h1[itemprop="name"]"#,
        "h1.title",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static ANY_H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());

static PROXY_IMG: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"img[src*="/_next/image"]"#).unwrap());

static LAZY_IMG: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"img[data-src*="api.titanfittings.com"]"#).unwrap());

/// Build the HTTP client used for all product page fetches.
///
/// The header set emulates a common desktop browser; the storefront serves
/// a stripped-down page to clients it does not recognize. Timeout is fixed
/// at 10 seconds and there are no retries.
pub fn build_client() -> Result<reqwest::Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(REFERER, HeaderValue::from_static(BASE_URL));

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Scrape one product page: fetch the markup, then extract the fields.
///
/// # Returns
///
/// A [`ProductInfo`] on success, or a [`ScrapeError`] if the fetch failed
/// or no product title could be found. A missing image is not an error;
/// the `image_url` field carries the [`NO_IMAGE`] sentinel instead.
#[instrument(level = "info", skip(client))]
pub async fn scrape_product(
    client: &reqwest::Client,
    url: &str,
) -> Result<ProductInfo, ScrapeError> {
    let body = fetch_page(client, url).await?;
    let info = extract_product(&body, url)?;
    info!(title = %info.title, image_url = %info.image_url, "Scraped product info");
    Ok(info)
}

/// Fetch the raw markup of a product page. One attempt, 10 s timeout,
/// non-2xx statuses are failures.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status(status));
    }
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched product page");
    Ok(body)
}

/// Extract the product title and primary image URL from page markup.
///
/// Title resolution walks [`TITLE_SELECTORS`] in order and falls back to
/// the first `h1` in the document; with no title the extraction fails.
/// Image resolution is best-effort and independent of the title.
pub fn extract_product(html: &str, url: &str) -> Result<ProductInfo, ScrapeError> {
    let document = Html::parse_document(html);

    let title = TITLE_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .or_else(|| document.select(&ANY_H1).next())
        .map(element_text)
        .ok_or(ScrapeError::MissingTitle)?;

    let image_url = resolve_image_url(&document).unwrap_or_else(|| NO_IMAGE.to_string());

    Ok(ProductInfo {
        title,
        image_url,
        product_url: url.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Walk the image fallback chain. Returns `None` when no rule matches.
fn resolve_image_url(document: &Html) -> Option<String> {
    // Statically valid, parse cannot fail.
    let base = Url::parse(BASE_URL).ok()?;

    if let Some(img) = document.select(&PROXY_IMG).next() {
        // Method 1: decode the nested url= parameter from src.
        if let Some(found) = img
            .value()
            .attr("src")
            .and_then(|src| decode_proxied_url(src, &base))
        {
            return Some(found);
        }

        // Method 2: first srcset candidate, descriptor stripped.
        if let Some(found) = img
            .value()
            .attr("srcset")
            .and_then(first_srcset_candidate)
            .and_then(|candidate| decode_proxied_url(&candidate, &base))
        {
            return Some(found);
        }
    }

    // Method 3: lazy-loaded image pointing at the image API host.
    if let Some(img) = document.select(&LAZY_IMG).next() {
        if let Some(data_src) = img.value().attr("data-src") {
            return Some(absolutize(data_src, &base));
        }
    }

    None
}

/// Pull the percent-decoded `url` query parameter out of an image-proxy
/// URL. Relative proxy paths are resolved against the base origin first.
fn decode_proxied_url(src: &str, base: &Url) -> Option<String> {
    let parsed = Url::parse(src).or_else(|_| base.join(src)).ok()?;
    let inner = parsed
        .query_pairs()
        .find_map(|(key, value)| (key == "url").then(|| value.into_owned()))?;
    Some(absolutize(&inner, base))
}

/// Take the URL part of the first candidate in a srcset list, dropping the
/// width/density descriptor.
fn first_srcset_candidate(srcset: &str) -> Option<String> {
    let first = srcset.split(',').next()?.trim();
    first.split_whitespace().next().map(str::to_string)
}

/// Join root-relative URLs to the base origin; pass everything else through.
fn absolutize(url: &str, base: &Url) -> String {
    if url.starts_with('/') {
        base.join(url)
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| url.to_string())
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.titanfittings.com/p/example-part";

    fn extract(html: &str) -> Result<ProductInfo, ScrapeError> {
        extract_product(html, PAGE_URL)
    }

    #[test]
    fn specific_title_selector_beats_generic_h1() {
        let html = r#"
            <html><body>
                <h1>Generic Heading</h1>
                <h1 class="product-name">  Titan 2" Camlock Coupler  </h1>
            </body></html>
        "#;
        let info = extract(html).unwrap();
        assert_eq!(info.title, r#"Titan 2" Camlock Coupler"#);
    }

    #[test]
    fn itemprop_selector_matches() {
        let html = r#"<h1 itemprop="name">Stainless Reducer</h1>"#;
        let info = extract(html).unwrap();
        assert_eq!(info.title, "Stainless Reducer");
    }

    #[test]
    fn falls_back_to_first_h1() {
        let html = "<div><h2>Nope</h2><h1>Plain Heading</h1><h1>Second</h1></div>";
        let info = extract(html).unwrap();
        assert_eq!(info.title, "Plain Heading");
    }

    #[test]
    fn no_h1_anywhere_fails_extraction() {
        let html = "<html><body><h2>Only a subheading</h2></body></html>";
        let err = extract(html).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingTitle));
    }

    #[test]
    fn decodes_proxied_src_with_relative_inner_url() {
        let html = r#"
            <h1 class="product-name">Part</h1>
            <img src="/_next/image?url=%2Fmedia%2Fparts%2Fcoupler.jpg&w=640&q=75">
        "#;
        let info = extract(html).unwrap();
        assert_eq!(
            info.image_url,
            "https://www.titanfittings.com/media/parts/coupler.jpg"
        );
    }

    #[test]
    fn decodes_proxied_src_with_absolute_inner_url() {
        let html = r#"
            <h1 class="product-name">Part</h1>
            <img src="https://www.titanfittings.com/_next/image?url=https%3A%2F%2Fapi.titanfittings.com%2Fimg%2F1.png&w=828">
        "#;
        let info = extract(html).unwrap();
        assert_eq!(info.image_url, "https://api.titanfittings.com/img/1.png");
    }

    #[test]
    fn falls_back_to_first_srcset_candidate() {
        let html = r#"
            <h1 class="product-name">Part</h1>
            <img src="/_next/image?w=640"
                 srcset="/_next/image?url=%2Fmedia%2Fa.jpg&w=384 384w, /_next/image?url=%2Fmedia%2Fa.jpg&w=768 768w">
        "#;
        let info = extract(html).unwrap();
        assert_eq!(info.image_url, "https://www.titanfittings.com/media/a.jpg");
    }

    #[test]
    fn falls_back_to_lazy_loaded_data_src() {
        let html = r#"
            <h1 class="product-name">Part</h1>
            <img class="hero" data-src="https://api.titanfittings.com/img/hero.png">
        "#;
        let info = extract(html).unwrap();
        assert_eq!(info.image_url, "https://api.titanfittings.com/img/hero.png");
    }

    #[test]
    fn missing_image_yields_sentinel_not_error() {
        let html = r#"<h1 class="product-title">Imageless Part</h1><p>No pictures.</p>"#;
        let info = extract(html).unwrap();
        assert_eq!(info.image_url, NO_IMAGE);
        assert_eq!(info.title, "Imageless Part");
    }

    #[test]
    fn product_url_is_carried_through() {
        let html = "<h1>Part</h1>";
        let info = extract(html).unwrap();
        assert_eq!(info.product_url, PAGE_URL);
    }

    #[test]
    fn srcset_descriptor_is_stripped() {
        assert_eq!(
            first_srcset_candidate("/_next/image?url=%2Fa.jpg&w=384 384w, /b.jpg 768w"),
            Some("/_next/image?url=%2Fa.jpg&w=384".to_string())
        );
        assert_eq!(first_srcset_candidate(""), None);
    }

    #[test]
    fn absolutize_joins_only_root_relative() {
        let base = Url::parse(BASE_URL).unwrap();
        assert_eq!(
            absolutize("/media/x.jpg", &base),
            "https://www.titanfittings.com/media/x.jpg"
        );
        assert_eq!(
            absolutize("https://elsewhere.example/x.jpg", &base),
            "https://elsewhere.example/x.jpg"
        );
    }
}
