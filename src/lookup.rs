//! Bibliographic lookup
//!
//! Consumes an external catalog service: given an ISBN, it returns zero
//! or one bibliographic record. Purely informational; no invariant in the
//! client depends on it. The default endpoint follows the Open Library
//! `/isbn/{isbn}.json` path convention.

use std::time::Duration;

use serde::Deserialize;

use crate::config::LookupConfig;
use crate::error::ApiResult;
use crate::models::CreateBook;

/// Record as served by the lookup collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct BibliographicRecord {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AuthorEntry>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorEntry {
    #[serde(default)]
    pub name: Option<String>,
}

impl BibliographicRecord {
    /// Prefill a create-book request from the record
    pub fn to_create_book(&self, isbn: &str) -> CreateBook {
        CreateBook {
            title: self.title.clone(),
            author: self.authors.iter().find_map(|a| a.name.clone()),
            isbn: Some(isbn.to_string()),
            publisher: self.publishers.first().cloned(),
            release_year: self.publish_date.as_deref().and_then(extract_year),
            copies: None,
        }
    }
}

/// First run of four consecutive digits in a free-form date string
fn extract_year(date: &str) -> Option<i32> {
    let digits: Vec<char> = date.chars().collect();
    digits
        .windows(4)
        .find(|w| {
            w.iter().all(|c| c.is_ascii_digit())
        })
        .and_then(|w| w.iter().collect::<String>().parse().ok())
}

#[derive(Clone)]
pub struct CatalogLookup {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogLookup {
    pub fn new(config: &LookupConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Zero or one record for the identifier
    pub async fn by_isbn(&self, isbn: &str) -> ApiResult<Option<BibliographicRecord>> {
        let url = format!("{}/isbn/{}.json", self.base_url, isbn.trim());
        tracing::debug!(%url, "bibliographic lookup");

        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("March 1972"), Some(1972));
        assert_eq!(extract_year("1999"), Some(1999));
        assert_eq!(extract_year("circa MCMXII"), None);
    }

    #[test]
    fn test_prefill_create_book() {
        let record = BibliographicRecord {
            title: "La Peste".to_string(),
            authors: vec![AuthorEntry {
                name: Some("Albert Camus".to_string()),
            }],
            publishers: vec!["Gallimard".to_string()],
            publish_date: Some("June 1947".to_string()),
        };
        let book = record.to_create_book("9782070360024");
        assert_eq!(book.title, "La Peste");
        assert_eq!(book.author.as_deref(), Some("Albert Camus"));
        assert_eq!(book.publisher.as_deref(), Some("Gallimard"));
        assert_eq!(book.release_year, Some(1947));
        assert_eq!(book.isbn.as_deref(), Some("9782070360024"));
    }
}
