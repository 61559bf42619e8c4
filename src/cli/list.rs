use crate::models::{EndpointRecord, EndpointStatus};
use crate::parser::parse_readme;
use crate::store::{EndpointStore, FileStore};
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    let store = FileStore::new(dir);

    println!("{}", "📋 Listing endpoints...".cyan());

    let endpoints = store.list()?;
    if endpoints.is_empty() {
        println!("{}", "No endpoints found. Run 'update-feed new' first.".yellow());
        return Ok(());
    }

    for endpoint in &endpoints {
        print_endpoint(endpoint);
    }
    Ok(())
}

fn status_label(status: EndpointStatus) -> colored::ColoredString {
    match status {
        EndpointStatus::Publish => status.to_string().green(),
        EndpointStatus::Pending => status.to_string().yellow(),
        EndpointStatus::Draft => status.to_string().bright_black(),
        EndpointStatus::Trash => status.to_string().red(),
    }
}

fn print_endpoint(endpoint: &EndpointRecord) {
    let header = parse_readme(&endpoint.body).header;
    let version = header.version();

    println!(
        "\n   • {} [{}] {} {}",
        endpoint.identifier.bold(),
        endpoint.kind,
        status_label(endpoint.status),
        if version.is_empty() { "-".to_string() } else { format!("v{}", version) }
    );

    let test_urls = endpoint.allowed_test_urls();
    if !test_urls.is_empty() {
        println!("     Test URLs: {}", test_urls.join(", "));
    }

    let targets = endpoint.notification_targets();
    if !targets.is_empty() {
        let all: Vec<&str> = targets
            .emails
            .iter()
            .chain(targets.urls.iter())
            .map(String::as_str)
            .collect();
        println!("     Notify: {}", all.join(", "));
    }
}
