//! `campus-cms contact`: submit the contact form from the command line.

use anyhow::{bail, Result};
use campus_cms::{ContactFields, ContentService, SubmitStatus};

use crate::cli::output;
use crate::pages;

pub async fn run(service: &ContentService, fields: ContactFields) -> Result<()> {
    let form = pages::submit_contact(service, fields).await;

    if output::is_json() {
        output::print_json(&form);
        if form.status != SubmitStatus::Succeeded {
            bail!("Contact form was not submitted");
        }
        return Ok(());
    }

    if !form.errors.is_empty() {
        for (field, message) in &form.errors {
            eprintln!("  {:<8} {message}", field.as_str());
        }
        bail!("Contact form is incomplete");
    }

    match &form.status {
        SubmitStatus::Succeeded => {
            println!("Thank you for your message. We'll get back to you soon.");
            Ok(())
        }
        SubmitStatus::Failed(message) => bail!("{message}"),
        other => bail!("Unexpected form state: {other:?}"),
    }
}
