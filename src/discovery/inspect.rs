//! Resolution of links that point at a page wrapping the media.
//!
//! `.gifv` and redgifs links lead to an HTML page; the media itself is
//! announced in the page's Open Graph meta tags.

use std::collections::HashMap;

use scraper::{Html, Selector};
use url::Url;

use crate::download::fetcher::Fetcher;
use crate::error::{Error, Result};
use crate::media::{CandidateLink, UNKNOWN_TITLE};

/// Author used when neither the candidate nor the page names one.
pub const UNKNOWN_PAGE_USER: &str = "UNKNOWN_USER";

/// Meta properties checked for the media URL, in order of preference.
const MEDIA_PROPERTIES: &[&str] = &["og:video", "og:image:url"];

/// Media found behind an inspectable link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub url: String,
    pub title: String,
    pub user: String,
}

/// Fetch the page behind `link` and extract the media it announces.
///
/// `Ok(None)` means the page carried no media meta tag.
pub async fn resolve_inspectable(
    fetcher: &dyn Fetcher,
    link: &CandidateLink,
) -> Result<Option<ResolvedMedia>> {
    let page = fetcher.fetch(&link.url).await?;
    let html = String::from_utf8_lossy(&page);
    parse_page(&html, link)
}

/// Extract media, title and author from page HTML.
pub fn parse_page(html: &str, link: &CandidateLink) -> Result<Option<ResolvedMedia>> {
    let document = Html::parse_document(html);
    let properties = meta_properties(&document)?;

    let media = match MEDIA_PROPERTIES
        .iter()
        .find_map(|property| properties.get(*property))
    {
        Some(media) => media,
        None => return Ok(None),
    };

    // Relative media URLs resolve against the page.
    let url = Url::parse(&link.url)?.join(media)?.to_string();

    let title = match link.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => page_title(&document)?.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
    };

    let user = match link
        .user
        .as_deref()
        .map(|u| u.trim_start_matches("u/"))
        .filter(|u| !u.is_empty())
    {
        Some(user) => user.to_string(),
        None => user_from_title(&title).unwrap_or_else(|| UNKNOWN_PAGE_USER.to_string()),
    };

    Ok(Some(ResolvedMedia { url, title, user }))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{}: {:?}", css, e)))
}

/// Map of `<meta property=... content=...>` pairs. First occurrence wins.
fn meta_properties(document: &Html) -> Result<HashMap<String, String>> {
    let meta = selector("meta[property][content]")?;

    let mut properties = HashMap::new();
    for element in document.select(&meta) {
        let element = element.value();
        if let (Some(property), Some(content)) = (element.attr("property"), element.attr("content"))
        {
            properties
                .entry(property.to_lowercase())
                .or_insert_with(|| content.trim().to_string());
        }
    }

    Ok(properties)
}

/// Text of the page's `<title>` element.
fn page_title(document: &Html) -> Result<Option<String>> {
    let title = selector("title")?;
    Ok(document
        .select(&title)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty()))
}

/// Author from titles shaped like `"Some clip by someone | Site"`.
fn user_from_title(title: &str) -> Option<String> {
    let after_by = title.split("by ").nth(1)?;
    let user = after_by.split(" |").next().unwrap_or("").trim();
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}
