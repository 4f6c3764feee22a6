//! Colored console rendering of search results.

use console::style;

use crate::github::types::{Issue, Repository};

fn format_day(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Print a summary line and one block per issue.
pub fn print_issues(issues: &[Issue]) {
    println!(
        "{}",
        style(format!("\nFound {} issues:\n", issues.len())).green()
    );
    for issue in issues {
        let labels = issue
            .labels
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}",
            style(format!("[{}]", issue.repository.name_with_owner)).blue()
        );
        println!("{}", style(format!("Title: {}", issue.title)).yellow());
        println!("{}", style(format!("URL: {}", issue.url)).cyan());
        println!(
            "{}",
            style(format!("Created: {}", format_day(issue.created_at))).dim()
        );
        println!("{}", style(format!("Labels: {labels}")).dim());
        println!(
            "{}",
            style(format!("Comments: {}", issue.comments_count)).dim()
        );
        println!("---");
    }
}

/// Print a summary line and one block per repository.
pub fn print_repos(repos: &[Repository]) {
    println!(
        "{}",
        style(format!("\nFound {} repositories:\n", repos.len())).green()
    );
    for repo in repos {
        let language = repo
            .primary_language
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("Unknown");
        println!("{}", style(format!("[{}]", repo.name_with_owner)).blue());
        println!(
            "{}",
            style(format!(
                "Description: {}",
                repo.description.as_deref().unwrap_or("No description")
            ))
            .yellow()
        );
        println!("{}", style(format!("URL: {}", repo.url)).cyan());
        println!("{}", style(format!("Stars: {}", repo.stargazer_count)).dim());
        println!("{}", style(format!("Forks: {}", repo.fork_count)).dim());
        println!("{}", style(format!("Language: {language}")).dim());
        println!("---");
    }
}

/// Print the post-export confirmation line.
pub fn print_exported(count: usize, kind: &str, path: &std::path::Path) {
    println!(
        "{}",
        style(format!("\nExported {count} {kind} to {}", path.display())).green()
    );
}
