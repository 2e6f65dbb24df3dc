//! Facebook Graph API page posts.

use serde::Deserialize;

use crate::app::{FeedbricksError, Result};
use crate::domain::{Item, NetworkKind};
use crate::network::{parse_timestamp, percent_encode, NetworkAdapter, ParseOptions, PrepareFn};

const PREPARE: &[(&str, PrepareFn)] = &[("page", percent_encode), ("access_token", percent_encode)];

pub fn adapter() -> NetworkAdapter {
    NetworkAdapter {
        kind: NetworkKind::Facebook,
        url_template: "{{protocol}}//graph.facebook.com/{{page}}/posts?limit={{max_items}}&access_token={{access_token}}",
        defaults: &[("protocol", "https:"), ("max_items", "20"), ("page", "me")],
        required: &["access_token"],
        prepare: PREPARE,
        parse,
    }
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    data: Vec<Post>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Post {
    message: Option<String>,
    description: Option<String>,
    link: Option<String>,
    from: Option<Author>,
    created_time: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Author {
    name: Option<String>,
}

fn parse(body: &[u8], options: &ParseOptions) -> Result<Vec<Item>> {
    let response: PostsResponse = serde_json::from_slice(body)
        .map_err(|e| FeedbricksError::malformed(NetworkKind::Facebook.as_str(), e))?;

    let items = response
        .data
        .into_iter()
        .map(|post| {
            let mut item = Item::new(NetworkKind::Facebook);
            item.title = options.title(post.description.as_deref().unwrap_or_default());
            item.body = options.body(post.message.as_deref().unwrap_or_default());
            item.link = post.link;
            item.author = post.from.and_then(|a| a.name).unwrap_or_default();
            item.image = post.picture;
            options.stamp(&mut item, post.created_time.as_deref().and_then(parse_timestamp));
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

    const POSTS_SAMPLE: &str = r#"{
  "data": [
    {
      "id": "1_2",
      "message": "We are hiring! Come work with us on the new campus.",
      "description": "Careers page",
      "link": "https://example.com/careers",
      "from": { "name": "Example U", "id": "1" },
      "created_time": "2024-01-15T09:30:00+0000",
      "picture": "https://example.com/p.jpg"
    },
    {
      "id": "1_3",
      "message": "No author or picture on this one",
      "created_time": "not a date"
    },
    { "id": "1_4" }
  ],
  "paging": {}
}"#;

    #[test]
    fn test_parse_posts() {
        let items = parse(POSTS_SAMPLE.as_bytes(), &ParseOptions::default()).unwrap();

        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.network, NetworkKind::Facebook);
        assert_eq!(first.source, "Facebook");
        assert_eq!(first.title, "Careers page");
        assert_eq!(first.author, "Example U");
        assert_eq!(first.link.as_deref(), Some("https://example.com/careers"));
        assert_eq!(first.image.as_deref(), Some("https://example.com/p.jpg"));
        assert_eq!(
            first.rank_key,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let items = parse(POSTS_SAMPLE.as_bytes(), &ParseOptions::default()).unwrap();

        let second = &items[1];
        assert_eq!(second.title, "");
        assert_eq!(second.author, "");
        assert_eq!(second.image, None);
        assert_eq!(second.rank_key, None);
        assert_eq!(second.date, "");
    }

    #[test]
    fn test_body_is_truncated() {
        let options = ParseOptions {
            max_body_length: 10,
            ..ParseOptions::default()
        };
        let items = parse(POSTS_SAMPLE.as_bytes(), &options).unwrap();
        assert_eq!(items[0].body, "We are…");
    }

    #[test]
    fn test_error_payload_is_malformed() {
        let body = br#"{"error": {"message": "Invalid OAuth access token.", "code": 190}}"#;
        assert!(matches!(
            parse(body, &ParseOptions::default()),
            Err(FeedbricksError::MalformedResponse { .. })
        ));
    }
}
