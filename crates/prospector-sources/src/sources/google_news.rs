//! Google News RSS collector, used when no NewsAPI key is configured.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use prospector_core::AggregatedSignal;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;

use super::MAX_RESULTS_PER_SOURCE;
use crate::error::SourceError;

/// Fetches recent Google News items for `{company_name} trucking logistics`.
///
/// # Errors
///
/// Returns [`SourceError::Http`] on network failure,
/// [`SourceError::UnexpectedStatus`] on a non-2xx response, or
/// [`SourceError::Xml`] on malformed RSS.
pub(crate) async fn fetch_google_news_rss(
    client: &Client,
    base_url: &str,
    company_name: &str,
) -> Result<Vec<AggregatedSignal>, SourceError> {
    let query = format!("{company_name} trucking logistics");
    let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
    let url = format!(
        "{}/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en",
        base_url.trim_end_matches('/')
    );

    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            source_name: "google_news_rss",
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let mut signals = parse_rss_feed(&body)?;
    signals.truncate(MAX_RESULTS_PER_SOURCE);
    Ok(signals)
}

/// Parse an RSS feed XML body into signals, one per `<item>` with a title.
///
/// # Errors
///
/// Returns [`SourceError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_feed(xml: &str) -> Result<Vec<AggregatedSignal>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut signals = Vec::new();
    let mut current_title = String::new();
    let mut current_link = String::new();
    let mut current_description = String::new();
    let mut in_item = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    current_title.clear();
                    current_link.clear();
                    current_description.clear();
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if !current_title.trim().is_empty() {
                        signals.push(AggregatedSignal {
                            title: current_title.trim().to_string(),
                            snippet: current_description.clone(),
                            source_url: (!current_link.is_empty())
                                .then(|| current_link.clone()),
                        });
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                    );
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Xml(e)),
            _ => {}
        }
    }

    Ok(signals)
}

fn assign_field(
    tag: &str,
    text: String,
    title: &mut String,
    link: &mut String,
    description: &mut String,
) {
    match tag {
        "title" => *title = text,
        "link" => *link = text,
        "description" => *description = strip_html(&text),
        _ => {}
    }
}

/// Strip HTML tags from a string, returning plain text.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Google News</title>
    <item>
      <title>Werner expands dedicated fleet</title>
      <link>https://example.com/werner-1</link>
      <description><![CDATA[<a href="x">Werner</a> adds 500 tractors]]></description>
    </item>
    <item>
      <title>Freight market outlook</title>
      <link>https://example.com/market</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_in_feed_order() {
        let signals = parse_rss_feed(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].title, "Werner expands dedicated fleet");
        assert_eq!(signals[0].snippet, "Werner adds 500 tractors");
        assert_eq!(
            signals[0].source_url.as_deref(),
            Some("https://example.com/werner-1")
        );
        assert_eq!(signals[1].snippet, "");
    }

    #[test]
    fn channel_title_is_not_an_item() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Feed</title></channel></rss>"#;
        let signals = parse_rss_feed(xml).expect("should parse empty RSS");
        assert!(signals.is_empty());
    }

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(strip_html("<b>Bold</b> text "), "Bold text");
    }
}
