//! Static fallback catalog served when the CMS yields nothing usable.

use crate::text::PLACEHOLDER_IMAGE;
use crate::types::{
    Campus, CampusFields, Faq, ImageRef, Post, Program, ProgramFields, Rendered, Testimonial,
    TestimonialFields,
};

/// Hand-authored datasets substituted by the feed-style accessors.
///
/// Owned by [`ContentService`](crate::ContentService); tests build their own
/// with whatever contents they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackCatalog {
    pub featured_programs: Vec<Program>,
    pub testimonials: Vec<Testimonial>,
    pub posts: Vec<Post>,
    pub campuses: Vec<Campus>,
}

impl FallbackCatalog {
    /// The built-in datasets: 3 featured programs, 3 testimonials, 3 posts
    /// and 4 campuses.
    pub fn builtin() -> Self {
        Self {
            featured_programs: builtin_featured_programs(),
            testimonials: builtin_testimonials(),
            posts: builtin_posts(),
            campuses: builtin_campuses(),
        }
    }
}

const PHOTO_IMAGE: &str = "/placeholder.svg?height=100&width=100";

#[allow(clippy::too_many_arguments)]
fn featured_program(
    id: u64,
    title: &str,
    content: &str,
    slug: &str,
    duration: &str,
    credential: &str,
    category: &str,
    campus: &[&str],
    description: &str,
) -> Program {
    Program {
        id,
        title: Rendered::new(title),
        content: Rendered::new(content),
        slug: slug.to_string(),
        acf: ProgramFields {
            duration: duration.to_string(),
            credential: credential.to_string(),
            category: category.to_string(),
            campus: campus.iter().map(|c| c.to_string()).collect(),
            featured: true,
            program_image: Some(ImageRef {
                url: PLACEHOLDER_IMAGE.to_string(),
                alt: format!("{title} Program"),
            }),
            description: description.to_string(),
            requirements: Vec::new(),
            career_outcomes: Vec::new(),
        },
        embedded: None,
    }
}

fn builtin_featured_programs() -> Vec<Program> {
    vec![
        featured_program(
            1,
            "Automotive Technology",
            "Comprehensive training in automotive repair, diagnostics, and maintenance.",
            "automotive-technology",
            "18 months",
            "Associate Degree",
            "automotive",
            &["waco", "austin"],
            "Master the latest automotive repair and diagnostic techniques.",
        ),
        featured_program(
            2,
            "Healthcare Technology",
            "Train for essential roles in the growing healthcare industry.",
            "healthcare-technology",
            "12 months",
            "Certificate",
            "healthcare",
            &["houston", "dallas"],
            "Train for essential roles in the growing healthcare industry.",
        ),
        featured_program(
            3,
            "Information Technology",
            "Build skills in cybersecurity, networking, and system administration.",
            "information-technology",
            "24 months",
            "Associate Degree",
            "technology",
            &["waco", "houston"],
            "Build skills in cybersecurity, networking, and system administration.",
        ),
    ]
}

fn testimonial(id: u64, name: &str, program: &str, quote: &str) -> Testimonial {
    Testimonial {
        id,
        title: Rendered::new(format!("{name} Testimonial")),
        acf: TestimonialFields {
            student_name: name.to_string(),
            program: program.to_string(),
            quote: quote.to_string(),
            rating: 5,
            student_photo: Some(ImageRef {
                url: PHOTO_IMAGE.to_string(),
                alt: name.to_string(),
            }),
        },
    }
}

fn builtin_testimonials() -> Vec<Testimonial> {
    vec![
        testimonial(
            1,
            "Sarah Johnson",
            "Healthcare Technology",
            "The hands-on training prepared me perfectly for my role as a medical technician.",
        ),
        testimonial(
            2,
            "Mike Rodriguez",
            "Automotive Technology",
            "I landed my dream job at a top automotive shop right after graduation.",
        ),
        testimonial(
            3,
            "Emily Chen",
            "Information Technology",
            "The cybersecurity program gave me the skills to start my own consulting business.",
        ),
    ]
}

fn post(id: u64, title: &str, body: &str, slug: &str, date: &str) -> Post {
    Post {
        id,
        title: Rendered::new(title),
        content: Rendered::new(body),
        excerpt: Rendered::new(body),
        slug: slug.to_string(),
        date: date.to_string(),
        featured_media: 0,
        categories: Vec::new(),
        tags: Vec::new(),
        embedded: None,
    }
}

fn builtin_posts() -> Vec<Post> {
    vec![
        post(
            1,
            "Fall Semester Registration Open",
            "Register now for fall semester classes. Early registration ends April 30th.",
            "fall-registration-open",
            "2024-03-15T00:00:00",
        ),
        post(
            2,
            "Career Fair 2024",
            "Meet with top employers looking to hire our graduates. All students welcome.",
            "career-fair-2024",
            "2024-04-20T00:00:00",
        ),
        post(
            3,
            "New Cybersecurity Lab Opens",
            "State-of-the-art cybersecurity lab now available for IT students.",
            "new-cybersecurity-lab",
            "2024-03-10T00:00:00",
        ),
    ]
}

fn campus(
    id: u64,
    city: &str,
    address: &str,
    phone: &str,
    student_count: &str,
    program_count: &str,
) -> Campus {
    Campus {
        id,
        title: Rendered::new(format!("{city} Campus")),
        acf: CampusFields {
            address: address.to_string(),
            phone: phone.to_string(),
            email: format!("{}@texastech.edu", city.to_lowercase()),
            city: city.to_string(),
            student_count: student_count.to_string(),
            program_count: program_count.to_string(),
        },
    }
}

fn builtin_campuses() -> Vec<Campus> {
    vec![
        campus(
            1,
            "Waco",
            "3801 Campus Dr, Waco, TX 76705",
            "(254) 867-4890",
            "2,500+",
            "15+",
        ),
        campus(
            2,
            "Austin",
            "1555 E Parmer Ln, Austin, TX 78754",
            "(512) 223-4000",
            "1,800+",
            "12+",
        ),
        campus(
            3,
            "Houston",
            "2222 Bay Area Blvd, Houston, TX 77058",
            "(281) 998-6150",
            "3,200+",
            "18+",
        ),
        campus(
            4,
            "Dallas",
            "9700 Wade Blvd, Frisco, TX 75035",
            "(469) 201-8400",
            "2,100+",
            "14+",
        ),
    ]
}

/// Admissions FAQs shown when the admissions page carries none.
pub fn default_admissions_faqs() -> Vec<Faq> {
    [
        (
            "What are the admission requirements?",
            "Basic requirements include a high school diploma or GED, completed application, and program-specific prerequisites. Some programs may require additional testing or interviews.",
        ),
        (
            "When can I start classes?",
            "We offer multiple start dates throughout the year, typically at the beginning of each semester (Fall, Spring, Summer). Check with your program advisor for specific dates.",
        ),
        (
            "How do I apply for financial aid?",
            "Complete the FAFSA (Free Application for Federal Student Aid) online. Our financial aid office can help you explore grants, loans, scholarships, and work-study opportunities.",
        ),
        (
            "Can I transfer credits from another school?",
            "Yes, we accept transfer credits from accredited institutions. Our admissions team will evaluate your transcripts and determine which credits can be applied to your program.",
        ),
        (
            "Do you offer online programs?",
            "We offer hybrid programs that combine online coursework with hands-on lab experiences. Some theoretical courses are available fully online, but practical training requires on-campus attendance.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}
