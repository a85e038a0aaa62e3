//! Page composition.
//!
//! Each page gathers the content it needs, issuing independent reads
//! concurrently and waiting for all of them. Every feed accessor already
//! absorbs its own failures, so one unavailable collection never blanks the
//! others.

use serde::Serialize;

use campus_cms::{
    default_admissions_faqs, featured_image_url, format_date, strip_html, total_students, Campus,
    CmsResult, ContactFields, ContactForm, ContentService, Faq, ListingState, Post, Program,
    ProgramFilter, ProgramListing, SubmitError, Testimonial,
};

/// Post category shown in the home page news strip.
pub const NEWS_CATEGORY: &str = "news";
pub const NEWS_LIMIT: u32 = 3;

pub const STUDENT_LIFE_CATEGORY: &str = "student-life";
pub const STUDENT_LIFE_LIMIT: u32 = 6;

pub const ADMISSIONS_SLUG: &str = "admissions";

/// Characters of body text used when a program has no description.
pub const SUMMARY_CHARS: usize = 200;

/// Shorter cut used on listing cards.
pub const CARD_SUMMARY_CHARS: usize = 150;

/// Program-of-interest choices on the contact form.
pub const PROGRAM_INTEREST_OPTIONS: [(&str, &str); 5] = [
    ("automotive", "Automotive Technology"),
    ("healthcare", "Healthcare Technology"),
    ("it", "Information Technology"),
    ("trades", "Skilled Trades"),
    ("other", "Other"),
];

/// A program as shown on listing cards.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramCard {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub image_alt: String,
    pub duration: String,
    pub credential: String,
    pub category: String,
    pub campuses: Vec<String>,
}

impl From<&Program> for ProgramCard {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id,
            slug: program.slug.clone(),
            title: program.title.rendered.clone(),
            summary: program.summary(CARD_SUMMARY_CHARS),
            image_url: featured_image_url(program).to_string(),
            image_alt: program.image_alt().to_string(),
            duration: program.acf.duration.clone(),
            credential: program.acf.credential.clone(),
            category: program.acf.category.clone(),
            campuses: program.acf.campus.clone(),
        }
    }
}

/// A post as shown in news and activity strips.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub image_url: String,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.rendered.clone(),
            excerpt: strip_html(&post.excerpt.rendered),
            date: format_date(&post.date),
            image_url: featured_image_url(post).to_string(),
        }
    }
}

/// A `<select>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

fn campus_options(campuses: &[Campus]) -> Vec<SelectOption> {
    campuses
        .iter()
        .map(|c| SelectOption {
            value: c.city_key(),
            label: c.title.rendered.clone(),
        })
        .collect()
}

// ── Home ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub featured_programs: Vec<ProgramCard>,
    pub testimonials: Vec<Testimonial>,
    pub news: Vec<PostCard>,
    pub campuses: Vec<Campus>,
}

pub async fn home(service: &ContentService) -> HomePage {
    let (programs, testimonials, posts, campuses) = tokio::join!(
        service.featured_programs(),
        service.testimonials(),
        service.posts(Some(NEWS_CATEGORY), NEWS_LIMIT),
        service.campuses(),
    );

    HomePage {
        featured_programs: programs.iter().map(ProgramCard::from).collect(),
        testimonials,
        news: posts.iter().map(PostCard::from).collect(),
        campuses,
    }
}

// ── Programs ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProgramsPage {
    pub state: ListingState,
    /// Programs loaded before filtering.
    pub total: usize,
    pub programs: Vec<ProgramCard>,
    pub categories: Vec<String>,
    pub credentials: Vec<String>,
    pub campuses: Vec<SelectOption>,
    pub filter: ProgramFilter,
}

/// An unreachable CMS is reported as [`ListingState::Unavailable`], apart
/// from a CMS that simply has no programs.
pub async fn programs(service: &ContentService, filter: ProgramFilter) -> ProgramsPage {
    let (loaded, campuses) = tokio::join!(service.try_programs(), service.campuses());

    let (programs, reachable) = match loaded {
        Ok(programs) => (programs, true),
        Err(e) => {
            tracing::debug!("Programs listing unavailable: {e}");
            (Vec::new(), false)
        }
    };

    let listing = ProgramListing::new(&programs, &filter);
    ProgramsPage {
        state: if reachable {
            listing.state()
        } else {
            ListingState::Unavailable
        },
        total: listing.total,
        programs: listing.visible.iter().map(|p| ProgramCard::from(*p)).collect(),
        categories: listing.categories,
        credentials: listing.credentials,
        campuses: campus_options(&campuses),
        filter,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramDetail {
    pub summary: String,
    pub image_url: String,
    pub image_alt: String,
    pub body: String,
    pub program: Program,
}

/// `Ok(None)` when no program has this slug; `Err` when the CMS could not
/// be asked.
pub async fn program_detail(
    service: &ContentService,
    slug: &str,
) -> CmsResult<Option<ProgramDetail>> {
    let Some(program) = service.program(slug).await? else {
        tracing::debug!("No program with slug {slug}");
        return Ok(None);
    };

    Ok(Some(ProgramDetail {
        summary: program.summary(SUMMARY_CHARS),
        image_url: featured_image_url(&program).to_string(),
        image_alt: program.image_alt().to_string(),
        body: program.content.rendered.clone(),
        program,
    }))
}

// ── Student life ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct StudentLifePage {
    pub total_students: u64,
    pub campuses: Vec<Campus>,
    pub activities: Vec<PostCard>,
}

pub async fn student_life(service: &ContentService) -> StudentLifePage {
    let (campuses, posts) = tokio::join!(
        service.campuses(),
        service.posts(Some(STUDENT_LIFE_CATEGORY), STUDENT_LIFE_LIMIT),
    );

    StudentLifePage {
        total_students: total_students(&campuses),
        activities: posts.iter().map(PostCard::from).collect(),
        campuses,
    }
}

// ── Admissions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AdmissionsPage {
    /// Whether the CMS supplied the page.
    pub from_cms: bool,
    pub title: String,
    pub content: String,
    pub faqs: Vec<Faq>,
}

/// The admissions page is informational, so a failed lookup degrades to the
/// built-in FAQs instead of an error.
pub async fn admissions(service: &ContentService) -> AdmissionsPage {
    let page = match service.page(ADMISSIONS_SLUG).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Admissions page unavailable, using defaults: {e}");
            None
        }
    };

    match page {
        Some(page) => {
            let faqs = if page.acf.faqs.is_empty() {
                default_admissions_faqs()
            } else {
                page.acf.faqs
            };
            AdmissionsPage {
                from_cms: true,
                title: page.title.rendered,
                content: page.content.rendered,
                faqs,
            }
        }
        None => AdmissionsPage {
            from_cms: false,
            title: "Admissions".to_string(),
            content: String::new(),
            faqs: default_admissions_faqs(),
        },
    }
}

// ── Contact ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    pub campuses: Vec<Campus>,
    pub campus_options: Vec<SelectOption>,
    pub program_options: Vec<SelectOption>,
    pub form: ContactForm,
}

pub async fn contact(service: &ContentService) -> ContactPage {
    let campuses = service.campuses().await;
    ContactPage {
        campus_options: campus_options(&campuses),
        program_options: PROGRAM_INTEREST_OPTIONS
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        campuses,
        form: ContactForm::new(),
    }
}

/// Validate and submit a contact form, returning the form in its final
/// state: cleared on success, unchanged with errors or a failure status
/// otherwise.
pub async fn submit_contact(service: &ContentService, fields: ContactFields) -> ContactForm {
    let mut form = ContactForm::with_fields(fields);
    match form.submit(service).await {
        Ok(status) => tracing::debug!("Contact form finished: {status:?}"),
        Err(SubmitError::Invalid(errors)) => {
            tracing::debug!("Contact form rejected with {} field error(s)", errors.len());
        }
        Err(SubmitError::InFlight) => tracing::warn!("Contact form already submitting"),
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_cms::FallbackCatalog;
    use serde_json::json;

    #[test]
    fn test_post_card_strips_and_formats() {
        let post: Post = serde_json::from_value(json!({
            "id": 9,
            "title": { "rendered": "Spring Career Fair" },
            "excerpt": { "rendered": "<p>Meet <em>employers</em></p>\n" },
            "date": "2024-03-05T09:30:00",
            "slug": "spring-career-fair"
        }))
        .unwrap();

        let card = PostCard::from(&post);
        assert_eq!(card.excerpt, "Meet employers");
        assert_eq!(card.date, "March 5, 2024");
        assert_eq!(card.image_url, campus_cms::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_program_card_summary_is_shorter_than_detail() {
        let program: Program = serde_json::from_value(json!({
            "id": 3,
            "title": { "rendered": "Welding" },
            "content": { "rendered": format!("<p>{}</p>", "a".repeat(300)) },
            "slug": "welding"
        }))
        .unwrap();

        let card = ProgramCard::from(&program);
        assert_eq!(card.summary.chars().count(), CARD_SUMMARY_CHARS + 3);
        assert!(card.summary.ends_with("..."));
        assert_eq!(program.summary(SUMMARY_CHARS).chars().count(), SUMMARY_CHARS + 3);
    }

    #[test]
    fn test_campus_options_use_city_keys() {
        let options = campus_options(&FallbackCatalog::builtin().campuses);
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(|o| o.value == o.value.to_lowercase()));
        assert!(options.iter().all(|o| !o.label.is_empty()));
    }
}
