//! `campus-cms programs` and `campus-cms program <slug>`.

use anyhow::{bail, Result};
use campus_cms::{ContentService, ListingState, ProgramFilter};

use crate::cli::output;
use crate::pages;

/// List programs passing `filter`.
pub async fn list(service: &ContentService, filter: ProgramFilter) -> Result<()> {
    let page = pages::programs(service, filter).await;

    if output::is_json() {
        output::print_json(&page);
        return Ok(());
    }

    match page.state {
        ListingState::Unavailable => {
            println!("Programs could not be loaded from the CMS. Please try again later.");
            return Ok(());
        }
        ListingState::NothingLoaded => {
            println!("No programs available.");
            return Ok(());
        }
        ListingState::NoMatches => {
            println!("No programs match the current filters ({} loaded).", page.total);
            return Ok(());
        }
        ListingState::Results => {}
    }

    println!("Programs: {} of {}", page.programs.len(), page.total);
    println!();
    for card in &page.programs {
        println!("  {:<32} {}", output::clip(&card.title, 32), card.slug);
        if !card.credential.is_empty() || !card.duration.is_empty() {
            println!("    {} · {}", card.credential, card.duration);
        }
        if !card.campuses.is_empty() {
            println!("    Campuses: {}", card.campuses.join(", "));
        }
    }
    if !page.categories.is_empty() {
        println!();
        println!("Categories:  {}", page.categories.join(", "));
    }
    if !page.credentials.is_empty() {
        println!("Credentials: {}", page.credentials.join(", "));
    }
    Ok(())
}

/// Show one program by slug.
pub async fn show(service: &ContentService, slug: &str) -> Result<()> {
    let Some(detail) = pages::program_detail(service, slug).await? else {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": "not_found",
                "message": format!("No program with slug '{slug}'"),
            }));
            return Ok(());
        }
        bail!("No program with slug '{slug}'");
    };

    if output::is_json() {
        output::print_json(&detail);
        return Ok(());
    }

    let acf = &detail.program.acf;
    println!("{}", detail.program.title.rendered);
    println!("{}", "=".repeat(detail.program.title.rendered.chars().count()));
    println!();
    println!("Credential:  {}", acf.credential);
    println!("Duration:    {}", acf.duration);
    println!("Category:    {}", acf.category);
    println!("Campuses:    {}", acf.campus.join(", "));
    println!("Image:       {}", detail.image_url);
    println!();
    println!("{}", detail.summary);
    if !acf.requirements.is_empty() {
        println!();
        println!("Requirements:");
        for item in &acf.requirements {
            println!("  - {item}");
        }
    }
    if !acf.career_outcomes.is_empty() {
        println!();
        println!("Career outcomes:");
        for item in &acf.career_outcomes {
            println!("  - {item}");
        }
    }
    Ok(())
}
