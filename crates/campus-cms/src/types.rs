//! Core data types for CMS content and the error taxonomy.
//!
//! Every custom-field group (`acf` in the CMS payload) is modelled as an
//! explicit struct whose fields are all defaulted. Decoding is lenient: the
//! CMS emits `false` for an empty custom field and `[]` for an empty field
//! group, and either of those collapses to the field's default instead of
//! rejecting the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode `T` from whatever JSON the CMS sent, falling back to `T::default()`
/// when the value has the wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Free text that the CMS may also send as a bare number.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rating = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(rating
        .and_then(|r| u8::try_from(r).ok())
        .unwrap_or(DEFAULT_RATING))
}

fn default_rating() -> u8 {
    DEFAULT_RATING
}

/// Rating assumed for a testimonial that does not carry one.
pub const DEFAULT_RATING: u8 = 5;

/// Render-ready text wrapper (`{"rendered": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default, deserialize_with = "lenient")]
    pub rendered: String,
}

impl Rendered {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            rendered: text.into(),
        }
    }
}

/// An image stored in a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub alt: String,
}

/// Featured-media record expanded by `_embed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, deserialize_with = "lenient")]
    pub source_url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub alt_text: String,
}

/// Taxonomy term expanded by `_embed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default, deserialize_with = "lenient")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
}

/// Related resources embedded in a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(
        rename = "wp:featuredmedia",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub featured_media: Vec<Media>,
    #[serde(
        rename = "wp:term",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub terms: Vec<Vec<Term>>,
}

impl Embedded {
    /// URL of the first embedded featured media, if it has one.
    pub fn featured_url(&self) -> Option<&str> {
        self.featured_media
            .first()
            .map(|m| m.source_url.as_str())
            .filter(|url| !url.trim().is_empty())
    }
}

// ── Programs ────────────────────────────────────────────────────

/// Custom fields attached to a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFields {
    #[serde(default, deserialize_with = "lenient")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient")]
    pub credential: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    /// Campus identifiers (lower-cased city names) offering the program.
    #[serde(default, deserialize_with = "lenient")]
    pub campus: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub program_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub career_outcomes: Vec<String>,
}

/// An academic program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub acf: ProgramFields,
    #[serde(
        rename = "_embedded",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<Embedded>,
}

impl Program {
    /// Short description for cards and page headers.
    ///
    /// Uses the description field when set, otherwise the first `max_chars`
    /// characters of the plain-text body followed by `...`.
    pub fn summary(&self, max_chars: usize) -> String {
        if !self.acf.description.trim().is_empty() {
            return self.acf.description.clone();
        }
        let text = crate::text::strip_html(&self.content.rendered);
        let mut summary: String = text.chars().take(max_chars).collect();
        summary.push_str("...");
        summary
    }

    /// Alt text for the program image, falling back to the title.
    pub fn image_alt(&self) -> &str {
        self.acf
            .program_image
            .as_ref()
            .map(|img| img.alt.as_str())
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.title.rendered)
    }
}

// ── Campuses ────────────────────────────────────────────────────

/// Custom fields attached to a campus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusFields {
    #[serde(default, deserialize_with = "lenient")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient")]
    pub city: String,
    /// Display counter such as `"2,500+"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub student_count: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub program_count: String,
}

/// A campus location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub acf: CampusFields,
}

impl Campus {
    /// Key used for campus filters and the contact form: the lower-cased city.
    pub fn city_key(&self) -> String {
        self.acf.city.to_lowercase()
    }

    pub fn student_count_value(&self) -> u64 {
        count_value(&self.acf.student_count)
    }

    pub fn program_count_value(&self) -> u64 {
        count_value(&self.acf.program_count)
    }
}

/// Parse a free-text display counter by keeping only its digits.
///
/// `"2,500+"` → 2500; text without digits → 0.
pub fn count_value(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Sum of student counters across campuses.
pub fn total_students(campuses: &[Campus]) -> u64 {
    campuses
        .iter()
        .map(Campus::student_count_value)
        .fold(0u64, u64::saturating_add)
}

// ── Testimonials ────────────────────────────────────────────────

/// Custom fields attached to a testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialFields {
    #[serde(default, deserialize_with = "lenient")]
    pub student_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub program: String,
    #[serde(default, deserialize_with = "lenient")]
    pub quote: String,
    #[serde(default = "default_rating", deserialize_with = "lenient_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "lenient")]
    pub student_photo: Option<ImageRef>,
}

impl Default for TestimonialFields {
    fn default() -> Self {
        Self {
            student_name: String::new(),
            program: String::new(),
            quote: String::new(),
            rating: DEFAULT_RATING,
            student_photo: None,
        }
    }
}

/// A student testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub acf: TestimonialFields,
}

// ── Posts and pages ─────────────────────────────────────────────

/// A news or event post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub excerpt: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient")]
    pub featured_media: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Vec<u64>,
    #[serde(
        rename = "_embedded",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<Embedded>,
}

impl Post {
    /// Names of the embedded taxonomy terms, in CMS order.
    pub fn term_names(&self) -> Vec<&str> {
        self.embedded
            .iter()
            .flat_map(|e| e.terms.iter().flatten())
            .map(|t| t.name.as_str())
            .collect()
    }
}

/// A question/answer pair on a content page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "lenient")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient")]
    pub answer: String,
}

/// Custom fields attached to a content page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFields {
    #[serde(default, deserialize_with = "lenient")]
    pub faqs: Vec<Faq>,
}

/// A CMS-managed content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Rendered,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub acf: PageFields,
    #[serde(
        rename = "_embedded",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<Embedded>,
}

// ── Search ──────────────────────────────────────────────────────

/// One hit from the CMS search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "lenient")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub url: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub subtype: String,
}

/// Which content types a search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Programs,
    Posts,
    #[default]
    All,
}

impl SearchScope {
    /// Value for the `type` query parameter; `None` searches everything.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            SearchScope::Programs => Some("programs"),
            SearchScope::Posts => Some("posts"),
            SearchScope::All => None,
        }
    }
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "programs" => Ok(SearchScope::Programs),
            "posts" => Ok(SearchScope::Posts),
            "all" | "" => Ok(SearchScope::All),
            other => Err(format!("unknown search scope: {other}")),
        }
    }
}

// ── Contact ─────────────────────────────────────────────────────

/// Payload posted to the contact-form endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub campus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub message: String,
}

// ── Errors ──────────────────────────────────────────────────────

/// Why a single CMS request produced no data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("CMS unreachable: {0}")]
    Unreachable(String),

    #[error("CMS returned HTTP {0}")]
    BadStatus(u16),

    #[error("CMS returned a non-JSON response (content type: {})", .0.as_deref().unwrap_or("none"))]
    NotJson(Option<String>),

    #[error("CMS response body could not be parsed: {0}")]
    BadBody(String),
}

/// Errors surfaced by the content layer to its callers.
#[derive(thiserror::Error, Debug)]
pub enum CmsError {
    #[error("Content unavailable: {0}")]
    Unavailable(FetchError),

    #[error("Contact submission failed: {0}")]
    Submission(FetchError),

    #[error("Invalid CMS base URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience result type.
pub type CmsResult<T> = Result<T, CmsError>;
