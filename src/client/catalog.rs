//! Catalog types and the cancellable page fetcher.
//!
//! # Responsibilities
//! - Deserialize the backend's paginated product envelope
//! - Map raw products to display-ready books (localized title,
//!   resolved image URL, parsed price)
//! - Fetch pages with supersede-on-refresh cancellation so a stale
//!   response never overwrites a newer one
//!
//! # Design Decisions
//! - Title resolution falls back through en → ru → zh-hans → zh-hant
//!   before giving up with "Untitled"; the backend localizes
//!   inconsistently across categories.
//! - A cancelled fetch leaves the view state untouched; cancellation
//!   is not an error.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::client::api::{ApiClient, ClientError};
use crate::prefs::{Currency, Locale};

/// Image path served when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-book.jpg";

/// Paginated envelope returned by the backend's list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A purchasable variant of a parent product (format, binding).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Raw product record as the backend serializes it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub title_ru: Option<String>,
    #[serde(default)]
    pub title_zh_hans: Option<String>,
    #[serde(default)]
    pub title_zh_hant: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub is_bestseller: Option<bool>,
    #[serde(default)]
    pub is_shipping_required: Option<bool>,
    #[serde(default)]
    pub is_parent: Option<bool>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub epub_url: Option<String>,
    #[serde(default)]
    pub purchased: Option<bool>,
}

/// Display-ready book derived from a raw [`Product`].
#[derive(Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub cover_image: String,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub in_stock: bool,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub requires_shipping: bool,
    pub is_parent: bool,
    pub parent_id: Option<i64>,
    pub variants: Vec<Variant>,
    pub download_url: Option<String>,
    pub epub_url: Option<String>,
    pub purchased: bool,
}

/// Resolve the display title for a locale.
///
/// Tries the requested locale's field first, then falls back through
/// the other languages, then the unlocalized `title`, and finally
/// "Untitled".
pub fn product_title(product: &Product, locale: Locale) -> String {
    let localized = match locale {
        Locale::En => product.title_en.as_deref(),
        Locale::Ru => product.title_ru.as_deref(),
        Locale::ZhHans => product.title_zh_hans.as_deref(),
        Locale::ZhHant => product.title_zh_hant.as_deref(),
    };

    localized
        .filter(|t| !t.is_empty())
        .or_else(|| product.title_en.as_deref().filter(|t| !t.is_empty()))
        .or_else(|| product.title_ru.as_deref().filter(|t| !t.is_empty()))
        .or_else(|| product.title_zh_hans.as_deref().filter(|t| !t.is_empty()))
        .or_else(|| product.title_zh_hant.as_deref().filter(|t| !t.is_empty()))
        .or_else(|| product.title.as_deref().filter(|t| !t.is_empty()))
        .unwrap_or("Untitled")
        .to_string()
}

/// Resolve a product image against the media base.
///
/// Absolute URLs pass through; relative paths are joined onto
/// `media_base`; a missing image yields the placeholder.
pub fn full_image_url(media_base: &str, image: Option<&str>) -> String {
    match image {
        None | Some("") => PLACEHOLDER_IMAGE.to_string(),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_string(),
        Some(path) => format!(
            "{}/{}",
            media_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
    }
}

/// Parse a variant's price string, defaulting to 0.0 on garbage.
pub fn variant_price(variant: &Variant) -> f64 {
    variant
        .price
        .as_deref()
        .and_then(|p| p.parse().ok())
        .unwrap_or(0.0)
}

/// Whether the product is a free ebook hosted on our own media server.
///
/// Detection is by URL substring; self-hosted downloads are the free
/// library, anything else is a paid external fulfilment link.
pub fn is_free_ebook(product: &Product) -> bool {
    let hosted = |url: &Option<String>| {
        url.as_deref()
            .map(|u| u.contains("orthodoxbookshop"))
            .unwrap_or(false)
    };
    hosted(&product.download_url) || hosted(&product.epub_url)
}

/// Map a raw product to a display-ready book for a locale.
pub fn to_book(product: &Product, locale: Locale, media_base: &str) -> Book {
    Book {
        id: product.id,
        title: product_title(product, locale),
        author: product.author.clone().unwrap_or_default(),
        price: product
            .price
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0.0),
        cover_image: full_image_url(media_base, product.image_url.as_deref()),
        category: product.category.clone(),
        publisher: product.publisher.clone(),
        description: product.description.clone(),
        in_stock: product.is_available.unwrap_or(true),
        is_new: product.is_new.unwrap_or(false),
        is_bestseller: product.is_bestseller.unwrap_or(false),
        requires_shipping: product.is_shipping_required.unwrap_or(true),
        is_parent: product.is_parent.unwrap_or(false),
        parent_id: product.parent_id,
        variants: product.variants.clone().unwrap_or_default(),
        download_url: product.download_url.clone(),
        epub_url: product.epub_url.clone(),
        purchased: product.purchased.unwrap_or(false),
    }
}

/// Identity of one catalog page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogKey {
    pub page: u32,
    pub category: Option<String>,
    pub locale: Locale,
    pub currency: Currency,
}

impl Default for CatalogKey {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
            locale: Locale::En,
            currency: Currency::Usd,
        }
    }
}

/// A fetched and mapped catalog page.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub books: Vec<Book>,
    pub total: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Observable state of the catalog view.
#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Loaded(CatalogPage),
    Failed { message: String },
}

/// Catalog page holder with supersede-on-refresh semantics.
///
/// Each `refresh` cancels the previous in-flight fetch; a response
/// whose token was cancelled is discarded without touching state, so
/// the view always reflects the most recent request.
pub struct CatalogView {
    api: Arc<ApiClient>,
    media_base: String,
    state: ArcSwap<CatalogState>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl CatalogView {
    /// Create a view over the given client and media base.
    pub fn new(api: Arc<ApiClient>, media_base: impl Into<String>) -> Self {
        Self {
            api,
            media_base: media_base.into(),
            state: ArcSwap::new(Arc::new(CatalogState::Loading)),
            inflight: Mutex::new(None),
        }
    }

    /// Current view state.
    pub fn state(&self) -> Arc<CatalogState> {
        self.state.load_full()
    }

    /// Cancel the in-flight fetch, if any.
    pub fn cancel(&self) {
        let slot = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = slot.as_ref() {
            token.cancel();
        }
    }

    /// Fetch the page identified by `key`, superseding any fetch
    /// still in flight.
    pub async fn refresh(&self, key: CatalogKey) {
        let token = CancellationToken::new();
        {
            let mut slot = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
        }

        self.state.store(Arc::new(CatalogState::Loading));

        let result = self.api.products(&key, &token).await;

        // A superseded fetch must not apply its result.
        if token.is_cancelled() {
            return;
        }

        match result {
            Ok(page) => {
                let books = page
                    .results
                    .iter()
                    .map(|p| to_book(p, key.locale, &self.media_base))
                    .collect();
                self.state.store(Arc::new(CatalogState::Loaded(CatalogPage {
                    books,
                    total: page.count,
                    has_next: page.next.is_some(),
                    has_previous: page.previous.is_some(),
                })));
            }
            Err(ClientError::Cancelled) => {}
            Err(e) => {
                tracing::error!(error = %e, page = key.page, "catalog fetch failed");
                self.state.store(Arc::new(CatalogState::Failed {
                    message: e.to_string(),
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_titles(
        en: Option<&str>,
        ru: Option<&str>,
        hans: Option<&str>,
        hant: Option<&str>,
    ) -> Product {
        Product {
            id: 1,
            title_en: en.map(String::from),
            title_ru: ru.map(String::from),
            title_zh_hans: hans.map(String::from),
            title_zh_hant: hant.map(String::from),
            ..Product::default()
        }
    }

    #[test]
    fn title_prefers_requested_locale() {
        let p = product_with_titles(Some("Ladder"), Some("Лествица"), None, None);
        assert_eq!(product_title(&p, Locale::Ru), "Лествица");
        assert_eq!(product_title(&p, Locale::En), "Ladder");
    }

    #[test]
    fn title_falls_back_through_languages() {
        let p = product_with_titles(None, None, None, Some("天梯"));
        assert_eq!(product_title(&p, Locale::En), "天梯");
    }

    #[test]
    fn empty_title_fields_are_skipped() {
        let p = product_with_titles(Some(""), Some("Лествица"), None, None);
        assert_eq!(product_title(&p, Locale::En), "Лествица");
    }

    #[test]
    fn missing_titles_yield_untitled() {
        let p = product_with_titles(None, None, None, None);
        assert_eq!(product_title(&p, Locale::En), "Untitled");
    }

    #[test]
    fn image_url_resolution() {
        let base = "https://media.example.com/media";
        assert_eq!(
            full_image_url(base, Some("https://cdn.example.com/a.jpg")),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            full_image_url(base, Some("/covers/a.jpg")),
            "https://media.example.com/media/covers/a.jpg"
        );
        assert_eq!(full_image_url(base, None), PLACEHOLDER_IMAGE);
        assert_eq!(full_image_url(base, Some("")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn variant_price_parses_or_zeroes() {
        let v = Variant {
            price: Some("12.50".into()),
            ..Variant::default()
        };
        assert_eq!(variant_price(&v), 12.5);

        let bad = Variant {
            price: Some("n/a".into()),
            ..Variant::default()
        };
        assert_eq!(variant_price(&bad), 0.0);
        assert_eq!(variant_price(&Variant::default()), 0.0);
    }

    #[test]
    fn free_ebook_detection_checks_both_urls() {
        let hosted = Product {
            id: 2,
            epub_url: Some("https://orthodoxbookshop.asia/media/books/ladder.epub".into()),
            ..Product::default()
        };
        assert!(is_free_ebook(&hosted));

        let external = Product {
            id: 3,
            download_url: Some("https://payhip.example.com/ladder".into()),
            ..Product::default()
        };
        assert!(!is_free_ebook(&external));
        assert!(!is_free_ebook(&Product::default()));
    }

    #[test]
    fn to_book_maps_defaults() {
        let p = Product {
            id: 4,
            title_en: Some("On Prayer".into()),
            price: Some("18.00".into()),
            ..Product::default()
        };
        let book = to_book(&p, Locale::En, "https://media.example.com");
        assert_eq!(book.title, "On Prayer");
        assert_eq!(book.price, 18.0);
        assert!(book.in_stock);
        assert!(book.requires_shipping);
        assert_eq!(book.cover_image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn paginated_envelope_deserializes() {
        let raw = serde_json::json!({
            "count": 42,
            "next": "https://example.com/api/products/?page=2",
            "previous": null,
            "results": [{ "id": 1, "title_en": "Ladder" }]
        });
        let page: Paginated<Product> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.count, 42);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
    }
}
