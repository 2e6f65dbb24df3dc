//! Twitter v1.1 user timeline.

use html_escape::decode_html_entities;
use serde::Deserialize;

use crate::app::{FeedbricksError, Result};
use crate::domain::{Item, NetworkKind};
use crate::network::{parse_timestamp, percent_encode, NetworkAdapter, ParseOptions, PrepareFn};

const PREPARE: &[(&str, PrepareFn)] = &[("username", percent_encode)];

pub fn adapter() -> NetworkAdapter {
    NetworkAdapter {
        kind: NetworkKind::Twitter,
        url_template: "{{protocol}}//api.twitter.com/1.1/statuses/user_timeline.json?include_entities=true&include_rts=true&screen_name={{username}}&count={{max_items}}",
        defaults: &[("protocol", "https:"), ("max_items", "20")],
        required: &["username"],
        prepare: PREPARE,
        parse,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Tweet {
    id_str: Option<String>,
    text: Option<String>,
    full_text: Option<String>,
    created_at: Option<String>,
    user: Option<User>,
    entities: Option<Entities>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct User {
    name: Option<String>,
    screen_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Entities {
    media: Option<Vec<Media>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Media {
    media_url_https: Option<String>,
    media_url: Option<String>,
}

fn parse(body: &[u8], options: &ParseOptions) -> Result<Vec<Item>> {
    // Error payloads are objects, not arrays, and fail here.
    let timeline: Vec<Tweet> = serde_json::from_slice(body)
        .map_err(|e| FeedbricksError::malformed(NetworkKind::Twitter.as_str(), e))?;

    let items = timeline
        .into_iter()
        .map(|tweet| {
            let mut item = Item::new(NetworkKind::Twitter);

            let text = tweet.full_text.or(tweet.text).unwrap_or_default();
            item.body = options.body(&decode_html_entities(&text));

            let (name, screen_name) = tweet
                .user
                .map(|u| (u.name, u.screen_name))
                .unwrap_or_default();
            item.link = match (&screen_name, &tweet.id_str) {
                (Some(user), Some(id)) => {
                    Some(format!("https://twitter.com/{}/status/{}", user, id))
                }
                _ => None,
            };
            item.author = name.or(screen_name).unwrap_or_default();

            item.image = tweet
                .entities
                .and_then(|e| e.media?.into_iter().next())
                .and_then(|m| m.media_url_https.or(m.media_url));

            options.stamp(&mut item, tweet.created_at.as_deref().and_then(parse_timestamp));
            item
        })
        .filter(Item::is_displayable)
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TIMELINE_SAMPLE: &str = r#"[
  {
    "id_str": "1001",
    "text": "Rust 1.80 is out &amp; it has LazyLock",
    "created_at": "Thu Jul 25 14:00:00 +0000 2024",
    "user": { "name": "Rust Language", "screen_name": "rustlang" },
    "entities": {
      "media": [ { "media_url_https": "https://pbs.twimg.com/media/a.jpg" } ]
    }
  },
  {
    "id_str": "1002",
    "text": "no user block here"
  },
  {
    "id_str": "1003",
    "text": ""
  }
]"#;

    #[test]
    fn test_parse_timeline() {
        let items = parse(TIMELINE_SAMPLE.as_bytes(), &ParseOptions::default()).unwrap();

        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.source, "Twitter");
        assert_eq!(first.title, "");
        assert_eq!(first.body, "Rust 1.80 is out & it has LazyLock");
        assert_eq!(first.author, "Rust Language");
        assert_eq!(
            first.link.as_deref(),
            Some("https://twitter.com/rustlang/status/1001")
        );
        assert_eq!(
            first.image.as_deref(),
            Some("https://pbs.twimg.com/media/a.jpg")
        );
        assert_eq!(
            first.rank_key,
            Some(Utc.with_ymd_and_hms(2024, 7, 25, 14, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_user_is_tolerated() {
        let items = parse(TIMELINE_SAMPLE.as_bytes(), &ParseOptions::default()).unwrap();

        let second = &items[1];
        assert_eq!(second.author, "");
        assert_eq!(second.link, None);
        assert_eq!(second.image, None);
        assert_eq!(second.rank_key, None);
    }

    #[test]
    fn test_null_media_is_tolerated() {
        let body = br#"[{"id_str": "7", "text": "plain", "entities": {"media": null}}]"#;
        let items = parse(body, &ParseOptions::default()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "plain");
        assert_eq!(items[0].image, None);
    }

    #[test]
    fn test_error_object_is_malformed() {
        let body = br#"{"errors":[{"code":89,"message":"Invalid or expired token."}]}"#;
        assert!(parse(body, &ParseOptions::default()).is_err());
    }
}
