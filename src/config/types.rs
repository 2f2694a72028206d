use serde::Deserialize;

/// Main configuration structure for quotemill
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub render: RenderConfig,
}

/// Quote store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Optional ceiling on quote text length, enforced both before insert
    /// and by database triggers. Absent means no ceiling.
    #[serde(rename = "max-quote-length")]
    pub max_quote_length: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: "quotes.db".to_string(),
            max_quote_length: None,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched in a single crawl
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Polite delay between page fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            request_delay_ms: 1000,
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name the crawler identifies itself with
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version string sent alongside the name
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// Optional URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "quotemill".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `name/version` or, when a contact URL is configured,
    /// `name/version (+contact-url)`.
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.client_name, self.client_version)
        } else {
            format!(
                "{}/{} (+{})",
                self.client_name, self.client_version, self.contact_url
            )
        }
    }
}

/// Image composition configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Path to the background template image
    #[serde(rename = "background-path")]
    pub background_path: String,

    /// Directory rendered images are written to
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Path to the TTF font used for all text
    #[serde(rename = "font-path")]
    pub font_path: String,

    /// Font size for the quote body
    #[serde(rename = "quote-size")]
    pub quote_size: f32,

    /// Font size for the author line
    #[serde(rename = "author-size")]
    pub author_size: f32,

    /// Font size for the date line
    #[serde(rename = "date-size")]
    pub date_size: f32,

    /// Column width (characters) the quote is wrapped at
    #[serde(rename = "wrap-width")]
    pub wrap_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_path: "quote_template_background.jpg".to_string(),
            output_dir: "outputs".to_string(),
            font_path: "fonts/NotoSans-VariableFont.ttf".to_string(),
            quote_size: 45.0,
            author_size: 45.0,
            date_size: 35.0,
            wrap_width: 30,
        }
    }
}
