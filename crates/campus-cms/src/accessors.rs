//! Typed content accessors with per-collection fallback policies.
//!
//! Feed-style reads (testimonials, posts, campuses, featured programs) never
//! fail: an error or an empty result is replaced by the static catalog.
//! Identity lookups (one program, one page) return `Ok(None)` for "not
//! found" and `Err` for "CMS unavailable". Contact submission errors always
//! reach the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::catalog::FallbackCatalog;
use crate::client::{ContentSource, FetchOptions, RemoteClient};
use crate::config::CmsConfig;
use crate::types::{
    Campus, CmsError, CmsResult, ContactSubmission, FetchError, Page, Post, Program,
    SearchResult, SearchScope, Testimonial,
};

/// How many featured programs the home page shows.
pub const FEATURED_LIMIT: usize = 3;

/// Post page size when the caller does not pick one.
pub const DEFAULT_POST_LIMIT: u32 = 10;

/// Largest page size the CMS accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

const PROGRAMS_PATH: &str = "/programs?_embed&per_page=100";
const TESTIMONIALS_PATH: &str = "/testimonials?_embed&per_page=10";
const CAMPUSES_PATH: &str = "/campuses?_embed&per_page=100";
const SITE_OPTIONS_PATH: &str = "/site-options";
const CONTACT_FORM_PATH: &str = "/contact-form";

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Decode a JSON array of records, skipping (and logging) records that do
/// not decode. Anything that is not an array yields no records.
fn decode_list<T: DeserializeOwned>(path: &str, value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping undecodable record from {path}: {e}");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        _ => {
            tracing::warn!("Expected a JSON array from {path}");
            Vec::new()
        }
    }
}

/// Entry point for all content reads and the contact-form write.
#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    catalog: FallbackCatalog,
}

impl ContentService {
    /// Service over `source` using the built-in fallback catalog.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_catalog(source, FallbackCatalog::builtin())
    }

    pub fn with_catalog(source: Arc<dyn ContentSource>, catalog: FallbackCatalog) -> Self {
        Self { source, catalog }
    }

    /// Service backed by a [`RemoteClient`] built from `config`.
    pub fn from_config(config: &CmsConfig) -> CmsResult<Self> {
        let client = RemoteClient::new(&config.base_url, config.timeout)?;
        if config.is_placeholder() {
            tracing::warn!("No CMS base URL configured; serving static fallback content");
        }
        Ok(Self::new(Arc::new(client)))
    }

    pub fn catalog(&self) -> &FallbackCatalog {
        &self.catalog
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let value = self.source.fetch(path, FetchOptions::get()).await?;
        Ok(decode_list(path, value))
    }

    /// Fetch a list, substituting `fallback` on failure or an empty result.
    async fn feed<T>(&self, what: &str, path: &str, fallback: &[T]) -> Vec<T>
    where
        T: DeserializeOwned + Clone,
    {
        match self.fetch_list(path).await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                tracing::debug!("CMS returned no {what}; serving static fallback");
                fallback.to_vec()
            }
            Err(e) => {
                tracing::warn!("Error fetching {what}: {e}; serving static fallback");
                fallback.to_vec()
            }
        }
    }

    /// All programs. Empty when the CMS is unavailable; there is no static
    /// fallback for the full listing.
    pub async fn programs(&self) -> Vec<Program> {
        self.try_programs().await.unwrap_or_default()
    }

    /// All programs, keeping an unreachable CMS apart from an empty one.
    pub async fn try_programs(&self) -> CmsResult<Vec<Program>> {
        self.fetch_list(PROGRAMS_PATH).await.map_err(|e| {
            tracing::warn!("Error fetching programs: {e}");
            CmsError::Unavailable(e)
        })
    }

    /// Look up a single program by slug.
    pub async fn program(&self, slug: &str) -> CmsResult<Option<Program>> {
        let path = format!("/programs?slug={}&_embed", encode(slug));
        match self.fetch_list::<Program>(&path).await {
            Ok(programs) => Ok(programs.into_iter().find(|p| p.slug == slug)),
            Err(e) => {
                tracing::error!("Error fetching program {slug}: {e}");
                Err(CmsError::Unavailable(e))
            }
        }
    }

    /// Up to [`FEATURED_LIMIT`] programs flagged as featured, or the static
    /// featured set when none are.
    pub async fn featured_programs(&self) -> Vec<Program> {
        let featured: Vec<Program> = self
            .programs()
            .await
            .into_iter()
            .filter(|p| p.acf.featured)
            .take(FEATURED_LIMIT)
            .collect();

        if featured.is_empty() {
            tracing::debug!("No featured programs from the CMS; serving static fallback");
            return self.catalog.featured_programs.clone();
        }
        featured
    }

    pub async fn testimonials(&self) -> Vec<Testimonial> {
        self.feed("testimonials", TESTIMONIALS_PATH, &self.catalog.testimonials)
            .await
    }

    /// Posts, optionally restricted to a category. `limit` is clamped to
    /// `1..=100`.
    pub async fn posts(&self, category: Option<&str>, limit: u32) -> Vec<Post> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let mut path = format!("/posts?_embed&per_page={limit}");
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            path.push_str(&format!("&categories={}", encode(category)));
        }
        self.feed("posts", &path, &self.catalog.posts).await
    }

    pub async fn campuses(&self) -> Vec<Campus> {
        self.feed("campuses", CAMPUSES_PATH, &self.catalog.campuses)
            .await
    }

    /// Look up a CMS page by slug.
    pub async fn page(&self, slug: &str) -> CmsResult<Option<Page>> {
        let path = format!("/pages?slug={}&_embed", encode(slug));
        match self.fetch_list::<Page>(&path).await {
            Ok(pages) => Ok(pages.into_iter().find(|p| p.slug == slug)),
            Err(e) => {
                tracing::error!("Error fetching page {slug}: {e}");
                Err(CmsError::Unavailable(e))
            }
        }
    }

    /// Site-wide settings object. Empty on any failure.
    pub async fn site_options(&self) -> Map<String, Value> {
        match self.source.fetch(SITE_OPTIONS_PATH, FetchOptions::get()).await {
            Ok(Value::Object(options)) => options,
            Ok(_) => {
                tracing::warn!("Site options response is not a JSON object");
                Map::new()
            }
            Err(e) => {
                tracing::warn!("Error fetching site options: {e}");
                Map::new()
            }
        }
    }

    /// Full-text search across CMS content. Empty on any failure.
    pub async fn search(&self, query: &str, scope: SearchScope) -> Vec<SearchResult> {
        let mut path = format!("/search?search={}", encode(query));
        if let Some(kind) = scope.as_query() {
            path.push_str(&format!("&type={kind}"));
        }
        match self.fetch_list(&path).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Error searching content: {e}");
                Vec::new()
            }
        }
    }

    /// Post a contact-form submission and return the CMS acknowledgment.
    ///
    /// A 2xx response without a JSON body is acknowledged with `Null`.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> CmsResult<Value> {
        let body = serde_json::to_value(submission)
            .map_err(|e| CmsError::Submission(FetchError::BadBody(e.to_string())))?;

        match self
            .source
            .fetch(CONTACT_FORM_PATH, FetchOptions::post_json(body))
            .await
        {
            Ok(ack) => {
                tracing::info!("Contact form submitted for campus {}", submission.campus);
                Ok(ack)
            }
            Err(FetchError::NotJson(_)) => {
                tracing::info!("Contact form accepted without a JSON acknowledgment");
                Ok(Value::Null)
            }
            Err(e) => {
                tracing::error!("Error submitting contact form: {e}");
                Err(CmsError::Submission(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Canned responses keyed by path; records every request.
    #[derive(Default)]
    struct StubSource {
        responses: Vec<(String, Result<Value, FetchError>)>,
        requests: Mutex<Vec<(String, FetchOptions)>>,
    }

    impl StubSource {
        fn with(mut self, path: &str, response: Result<Value, FetchError>) -> Self {
            self.responses.push((path.to_string(), response));
            self
        }

        fn paths(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(p, _)| p.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ContentSource for StubSource {
        async fn fetch(&self, path: &str, options: FetchOptions) -> Result<Value, FetchError> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), options));
            self.responses
                .iter()
                .find(|(p, _)| p == path)
                .map(|(_, r)| r.clone())
                .unwrap_or(Err(FetchError::BadStatus(404)))
        }
    }

    fn service(source: StubSource) -> (ContentService, Arc<StubSource>) {
        let source = Arc::new(source);
        (ContentService::new(source.clone()), source)
    }

    fn program_json(id: u64, slug: &str, featured: bool) -> Value {
        json!({
            "id": id,
            "title": { "rendered": slug },
            "slug": slug,
            "acf": { "featured": featured }
        })
    }

    #[tokio::test]
    async fn test_programs_empty_on_failure() {
        let (svc, _) = service(StubSource::default().with(
            PROGRAMS_PATH,
            Err(FetchError::Unreachable("dns".into())),
        ));
        assert!(svc.programs().await.is_empty());
    }

    #[tokio::test]
    async fn test_try_programs_separates_failure_from_empty() {
        let (down, _) = service(StubSource::default().with(
            PROGRAMS_PATH,
            Err(FetchError::BadStatus(502)),
        ));
        assert!(matches!(
            down.try_programs().await,
            Err(CmsError::Unavailable(FetchError::BadStatus(502)))
        ));

        let (empty, _) = service(StubSource::default().with(PROGRAMS_PATH, Ok(json!([]))));
        assert!(empty.try_programs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_program_by_slug_found_and_missing() {
        let (svc, _) = service(
            StubSource::default()
                .with(
                    "/programs?slug=welding&_embed",
                    Ok(json!([program_json(4, "welding", false)])),
                )
                .with(
                    "/programs?slug=nursing&_embed",
                    Ok(json!([program_json(5, "plumbing", false)])),
                ),
        );

        let found = svc.program("welding").await.unwrap().unwrap();
        assert_eq!(found.id, 4);
        assert!(svc.program("nursing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_program_by_slug_propagates_failure() {
        let (svc, _) = service(StubSource::default().with(
            "/programs?slug=welding&_embed",
            Err(FetchError::BadStatus(500)),
        ));
        assert!(matches!(
            svc.program("welding").await,
            Err(CmsError::Unavailable(FetchError::BadStatus(500)))
        ));
    }

    #[tokio::test]
    async fn test_featured_programs_take_three() {
        let programs: Vec<Value> = (1..=5).map(|i| program_json(i, &format!("p{i}"), true)).collect();
        let (svc, _) = service(StubSource::default().with(PROGRAMS_PATH, Ok(json!(programs))));
        let featured = svc.featured_programs().await;
        assert_eq!(featured.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_featured_programs_fall_back_when_none_flagged() {
        let (svc, _) = service(StubSource::default().with(
            PROGRAMS_PATH,
            Ok(json!([program_json(9, "plain", false)])),
        ));
        let featured = svc.featured_programs().await;
        assert_eq!(featured, svc.catalog().featured_programs);
        assert_eq!(featured.len(), 3);
    }

    #[tokio::test]
    async fn test_feeds_fall_back_on_empty_and_failure() {
        let (svc, _) = service(
            StubSource::default()
                .with(TESTIMONIALS_PATH, Ok(json!([])))
                .with(CAMPUSES_PATH, Err(FetchError::NotJson(Some("text/html".into())))),
        );
        assert_eq!(svc.testimonials().await.len(), 3);
        assert_eq!(svc.campuses().await.len(), 4);
        assert_eq!(svc.posts(None, 3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_injected_catalog_is_used() {
        let source = Arc::new(StubSource::default());
        let svc = ContentService::with_catalog(source, FallbackCatalog::default());
        assert!(svc.testimonials().await.is_empty());
        assert!(svc.featured_programs().await.is_empty());
    }

    #[tokio::test]
    async fn test_posts_path_and_limit_clamp() {
        let (svc, source) = service(StubSource::default());
        svc.posts(Some("student life"), 6).await;
        svc.posts(None, 500).await;
        svc.posts(Some(""), 0).await;
        assert_eq!(
            source.paths(),
            vec![
                "/posts?_embed&per_page=6&categories=student+life",
                "/posts?_embed&per_page=100",
                "/posts?_embed&per_page=1",
            ]
        );
    }

    #[tokio::test]
    async fn test_undecodable_records_skipped() {
        let (svc, _) = service(StubSource::default().with(
            CAMPUSES_PATH,
            Ok(json!([{ "title": "no id" }, { "id": 8, "acf": { "city": "Tyler" } }])),
        ));
        let campuses = svc.campuses().await;
        assert_eq!(campuses.len(), 1);
        assert_eq!(campuses[0].city_key(), "tyler");
    }

    #[tokio::test]
    async fn test_site_options_and_search_degrade_to_empty() {
        let (svc, source) = service(StubSource::default());
        assert!(svc.site_options().await.is_empty());
        assert!(svc.search("weld & fab", SearchScope::Programs).await.is_empty());
        assert_eq!(
            source.paths()[1],
            "/search?search=weld+%26+fab&type=programs"
        );
    }

    #[tokio::test]
    async fn test_submit_contact_posts_json() {
        let (svc, source) = service(
            StubSource::default().with(CONTACT_FORM_PATH, Ok(json!({ "status": "ok" }))),
        );
        let submission = ContactSubmission {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "555-0100".into(),
            campus: "waco".into(),
            program: Some("it".into()),
            message: "Hello".into(),
        };
        let ack = svc.submit_contact(&submission).await.unwrap();
        assert_eq!(ack["status"], "ok");

        let requests = source.requests.lock().unwrap();
        let (_, options) = &requests[0];
        assert_eq!(options.method, reqwest::Method::POST);
        assert_eq!(options.body.as_ref().unwrap()["program"], "it");
    }

    #[tokio::test]
    async fn test_submit_contact_failure_propagates() {
        let (svc, _) = service(
            StubSource::default().with(CONTACT_FORM_PATH, Err(FetchError::BadStatus(500))),
        );
        let result = svc.submit_contact(&ContactSubmission::default()).await;
        assert!(matches!(result, Err(CmsError::Submission(FetchError::BadStatus(500)))));
    }

    #[tokio::test]
    async fn test_submit_contact_non_json_ack() {
        let (svc, _) = service(
            StubSource::default().with(CONTACT_FORM_PATH, Err(FetchError::NotJson(None))),
        );
        let ack = svc.submit_contact(&ContactSubmission::default()).await.unwrap();
        assert!(ack.is_null());
    }
}
