//! Request command - attach a new review request to a revision

use clap::Args;
use notemirror_core::{review, Config, GitRepo, Request};

/// Attach a new review request to a revision
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Revision to attach the request to
    #[arg(default_value = "HEAD")]
    revision: String,

    /// Ref the change should land on
    #[arg(short, long)]
    target: String,

    /// Ref of the change under review
    #[arg(long)]
    review_ref: Option<String>,

    /// Who is requesting the review (defaults to the configured requester)
    #[arg(long, env = "NOTEMIRROR_REQUESTER")]
    requester: Option<String>,

    /// Reviewer to invite (repeatable, or comma separated)
    #[arg(short, long = "reviewer", value_delimiter = ',')]
    reviewers: Vec<String>,

    /// Description of the change
    #[arg(short = 'm', long)]
    description: Option<String>,
}

impl RequestArgs {
    /// Build the request described by the arguments
    fn build(&self, config: &Config) -> Request {
        let mut request = Request::new(self.target.clone())
            .with_reviewers(self.reviewers.iter().map(|r| r.trim()).filter(|r| !r.is_empty()));

        if let Some(review_ref) = &self.review_ref {
            request = request.with_review_ref(review_ref.clone());
        }
        if let Some(requester) = self.requester.as_ref().or(config.review.requester.as_ref()) {
            request = request.with_requester(requester.clone());
        }
        if let Some(description) = &self.description {
            request = request.with_description(description.clone());
        }

        request
    }

    /// Execute the request command
    pub fn execute(&self, repo: &GitRepo, config: &Config) -> anyhow::Result<()> {
        let request = self.build(config);
        if request.requester.is_empty() {
            tracing::warn!("No requester given; the request will be stored without one");
        }

        let commit = repo.resolve_commit(&self.revision)?;
        review::write_request(repo, &config.reviews_ref(), &self.revision, &request)?;

        println!(
            "Requested review of {} into {} on commit {}",
            if request.review_ref.is_empty() {
                self.revision.as_str()
            } else {
                request.review_ref.as_str()
            },
            request.target_ref,
            commit
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RequestArgs,
    }

    fn parse(args: &[&str]) -> RequestArgs {
        TestCli::parse_from(std::iter::once("request").chain(args.iter().copied())).args
    }

    fn args(target: &str) -> RequestArgs {
        RequestArgs {
            revision: "HEAD".to_string(),
            target: target.to_string(),
            review_ref: None,
            requester: None,
            reviewers: Vec::new(),
            description: None,
        }
    }

    #[test]
    fn test_build_minimal() {
        let request = args("refs/heads/main").build(&Config::default());
        assert_eq!(request, Request::new("refs/heads/main"));
    }

    #[test]
    fn test_parse_defaults_revision_to_head() {
        let parsed = parse(&["--target", "refs/heads/main"]);
        assert_eq!(parsed.revision, "HEAD");
        assert_eq!(parsed.target, "refs/heads/main");
    }

    #[test]
    fn test_build_full() {
        let args = parse(&[
            "abc123",
            "-t",
            "refs/heads/main",
            "--review-ref",
            "refs/heads/feature",
            "--requester",
            "alice",
            "-r",
            "bob, carol",
            "-r",
            "dave",
            "-m",
            "Add feature",
        ]);
        let request = args.build(&Config::default());

        assert_eq!(args.revision, "abc123");
        assert_eq!(
            request,
            Request::new("refs/heads/main")
                .with_review_ref("refs/heads/feature")
                .with_requester("alice")
                .with_reviewers(["bob", "carol", "dave"])
                .with_description("Add feature")
        );
    }

    #[test]
    fn test_build_uses_configured_requester() {
        let mut config = Config::default();
        config.review.requester = Some("configured@example.com".to_string());

        assert_eq!(
            args("refs/heads/main").build(&config).requester,
            "configured@example.com"
        );

        let mut explicit = args("refs/heads/main");
        explicit.requester = Some("flag".to_string());
        assert_eq!(explicit.build(&config).requester, "flag");
    }

    #[test]
    fn test_build_drops_blank_reviewers() {
        let mut blank = args("refs/heads/main");
        blank.reviewers = vec![" bob ".to_string(), "".to_string(), "  ".to_string()];
        assert_eq!(blank.build(&Config::default()).reviewers, vec!["bob"]);
    }
}
