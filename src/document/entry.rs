//! The catalog entry model.

use serde::{Deserialize, Serialize};

/// One creative work in the catalog.
///
/// Every field is plain text; missing values are empty strings. Only the
/// description is searchable, the rest is stored for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// External document number, unique within a corpus
    pub doc_no: String,
    /// Title without any price suffix
    pub title: String,
    /// Author or studio
    pub author: String,
    /// Price as listed, e.g. `"$3.99-50%"`; empty when free or unknown
    pub price: String,
    /// Store page
    pub url: String,
    /// Full, unprocessed description text
    pub description: String,
}

impl CatalogEntry {
    /// Create an entry with the given document number and no other data.
    pub fn new<S: Into<String>>(doc_no: S) -> Self {
        CatalogEntry {
            doc_no: doc_no.into(),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set the author.
    pub fn with_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = author.into();
        self
    }

    /// Set the price.
    pub fn with_price<S: Into<String>>(mut self, price: S) -> Self {
        self.price = price.into();
        self
    }

    /// Set the URL.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    /// Set the description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Split a raw title at its first `$` into `(title, price)`.
    ///
    /// ```
    /// use curio::document::CatalogEntry;
    ///
    /// assert_eq!(
    ///     CatalogEntry::split_title_price("Minit $9.99-50%"),
    ///     ("Minit".to_string(), "$9.99-50%".to_string())
    /// );
    /// assert_eq!(
    ///     CatalogEntry::split_title_price(" Celeste "),
    ///     ("Celeste".to_string(), String::new())
    /// );
    /// ```
    pub fn split_title_price(raw: &str) -> (String, String) {
        match raw.find('$') {
            Some(idx) => (raw[..idx].trim().to_string(), raw[idx..].trim().to_string()),
            None => (raw.trim().to_string(), String::new()),
        }
    }
}
