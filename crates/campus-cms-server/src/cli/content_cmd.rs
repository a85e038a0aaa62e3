//! Read-only content listings: campuses, posts and site search.

use anyhow::Result;
use campus_cms::{total_students, ContentService, SearchScope};

use crate::cli::output;
use crate::pages::PostCard;

/// `campus-cms campuses`
pub async fn campuses(service: &ContentService) -> Result<()> {
    let campuses = service.campuses().await;

    if output::is_json() {
        output::print_json(&campuses);
        return Ok(());
    }

    println!("Campuses: {}", campuses.len());
    println!();
    for campus in &campuses {
        println!("  {:<24} {}", campus.title.rendered, campus.acf.address);
        println!(
            "    {} students · {} programs · {} · {}",
            campus.acf.student_count, campus.acf.program_count, campus.acf.phone, campus.acf.email
        );
    }
    println!();
    println!("Total students: {}", total_students(&campuses));
    Ok(())
}

/// `campus-cms posts [--category <slug>] [--limit <n>]`
pub async fn posts(service: &ContentService, category: Option<&str>, limit: u32) -> Result<()> {
    let posts = service.posts(category, limit).await;
    let cards: Vec<PostCard> = posts.iter().map(PostCard::from).collect();

    if output::is_json() {
        output::print_json(&cards);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No posts.");
        return Ok(());
    }
    for card in &cards {
        println!("  {:<20} {}", card.date, card.title);
        if !card.excerpt.is_empty() {
            println!("    {}", output::clip(&card.excerpt, 96));
        }
    }
    Ok(())
}

/// `campus-cms search <query> [--scope programs|posts|all]`
pub async fn search(service: &ContentService, query: &str, scope: SearchScope) -> Result<()> {
    let results = service.search(query, scope).await;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "query": query,
            "count": results.len(),
            "results": results,
        }));
        return Ok(());
    }

    if results.is_empty() {
        println!("No results for '{query}'.");
        return Ok(());
    }
    println!("Results for '{query}': {}", results.len());
    for result in &results {
        let kind = if result.subtype.is_empty() {
            &result.kind
        } else {
            &result.subtype
        };
        println!("  [{kind}] {}", result.title);
        println!("    {}", result.url);
    }
    Ok(())
}
