//! Wire types for the news API.
//!
//! Decoding is lenient: unknown fields are ignored, and missing or `null`
//! text and collections default to empty. Ids arrive as strings or numbers
//! depending on the endpoint, so they are normalised to `String` on the way in.

use serde::{Deserialize, Deserializer};

/// A named grouping of articles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// One entry of an image's variant list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageVariant {
    #[serde(default)]
    pub url: Option<String>,
}

/// Image attached to an article summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleImage {
    #[serde(default)]
    pub url: Option<String>,
    /// A `null` entry decodes as a variant without a URL, keeping indices stable.
    #[serde(default, deserialize_with = "seq_nulls_as_default")]
    pub srcset: Vec<ImageVariant>,
}

/// Lightweight article record shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleSummary {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default)]
    pub image: Option<ArticleImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DetailImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Full article record, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleDetail {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "seq_nulls_as_default")]
    pub images: Vec<DetailImage>,
    #[serde(default, deserialize_with = "seq_nulls_as_default")]
    pub content: Vec<String>,
}

// Envelopes: each endpoint wraps its payload in a single named field.

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesEnvelope {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    pub article: ArticleDetail,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` sequence is empty; `null` elements become `T::default()`.
fn seq_nulls_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_numeric_id_normalised() {
        let cat: Category = serde_json::from_str(r#"{"id": 7, "title": "World"}"#).unwrap();
        assert_eq!(cat.id, "7");
        assert_eq!(cat.title, "World");
    }

    #[test]
    fn test_summary_without_image() {
        let article: ArticleSummary =
            serde_json::from_str(r#"{"id": "a1", "title": "T", "time": "2h ago"}"#).unwrap();
        assert!(article.image.is_none());
        assert_eq!(article.time, "2h ago");
    }

    #[test]
    fn test_summary_ignores_unknown_fields() {
        let article: ArticleSummary = serde_json::from_str(
            r#"{"id": "a1", "title": "T", "time": "", "author": "x", "image": {"alt": "y"}}"#,
        )
        .unwrap();
        let image = article.image.unwrap();
        assert!(image.url.is_none());
        assert!(image.srcset.is_empty());
    }

    #[test]
    fn test_detail_defaults_missing_collections() {
        let detail: ArticleDetail = serde_json::from_str(r#"{"id": "1", "title": "T"}"#).unwrap();
        assert!(detail.images.is_empty());
        assert!(detail.content.is_empty());
    }

    #[test]
    fn test_summary_nulls_decode_as_empty() {
        let article: ArticleSummary = serde_json::from_str(
            r#"{"id": 3, "title": null, "time": null,
                "image": {"url": "https://img.example.com/a.jpg", "srcset": null}}"#,
        )
        .unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.time, "");
        assert!(article.image.unwrap().srcset.is_empty());
    }

    #[test]
    fn test_null_srcset_entry_keeps_positions() {
        let image: ArticleImage = serde_json::from_str(
            r#"{"srcset": [null, {"url": "https://img.example.com/1.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(image.srcset.len(), 2);
        assert_eq!(image.srcset[0], ImageVariant::default());
        assert_eq!(image.srcset[1].url.as_deref(), Some("https://img.example.com/1.jpg"));
    }

    #[test]
    fn test_detail_null_paragraph_is_empty() {
        let detail: ArticleDetail =
            serde_json::from_str(r#"{"id": "1", "title": "T", "images": null, "content": ["a", null]}"#)
                .unwrap();
        assert!(detail.images.is_empty());
        assert_eq!(detail.content, vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let result: Result<Category, _> = serde_json::from_str(r#"{"title": "No id"}"#);
        assert!(result.is_err());
    }
}
