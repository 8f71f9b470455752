//! List command - show review requests across all annotated commits

use clap::Args;
use notemirror_core::{review, Config, GitRepo};

use super::print_request;

/// List review requests on all commits
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show requests targeting this ref
    #[arg(short, long)]
    target: Option<String>,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, repo: &GitRepo, config: &Config) -> anyhow::Result<()> {
        let notes_ref = config.reviews_ref();
        let requests: Vec<_> = review::list_requests(repo, &notes_ref)?
            .into_iter()
            .filter(|entry| {
                self.target
                    .as_deref()
                    .is_none_or(|target| entry.request.target_ref == target)
            })
            .collect();

        if requests.is_empty() {
            println!("No review requests found under {}.", notes_ref);
            return Ok(());
        }

        for entry in &requests {
            print_request(entry.commit, &entry.request);
        }

        Ok(())
    }
}
