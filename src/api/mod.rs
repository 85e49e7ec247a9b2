//! Client for the remote news API.
//!
//! Three read-only endpoints are consumed:
//!
//! - `GET /api/categories` → `{ categories: [...] }`
//! - `GET /api/categories/{id}` → `{ articles: [...] }`
//! - `GET /api/news/{id}` → `{ article: {...} }`
//!
//! The API is an external collaborator; nothing here assumes a version.

mod client;
mod types;

pub use client::{ApiError, NewsClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use types::{ArticleDetail, ArticleImage, ArticleSummary, Category, DetailImage, ImageVariant};
