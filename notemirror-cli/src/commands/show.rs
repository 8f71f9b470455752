//! Show command - review requests attached to one revision

use clap::Args;
use notemirror_core::{review, Config, GitRepo};

use super::print_request;

/// Show review requests attached to a revision
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Revision to inspect
    #[arg(default_value = "HEAD")]
    revision: String,

    /// Print the stored JSON form instead of the summary
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, repo: &GitRepo, config: &Config) -> anyhow::Result<()> {
        let commit = repo.resolve_commit(&self.revision)?;
        let requests = review::load_requests(repo, &config.reviews_ref(), &self.revision)?;

        if requests.is_empty() {
            println!("No review requests on {}.", self.revision);
            return Ok(());
        }

        for request in &requests {
            if self.json {
                println!("{}", request.encode()?);
            } else {
                print_request(commit, request);
            }
        }

        Ok(())
    }
}
