//! Workspace command handler
//!
//! Lists and publishes portfolio posts, training plans and reviews for one
//! coach (`workspace.coach_id` unless `--coach` is given).

use crate::api::{PortfolioPost, Review, TrainingPlan};
use crate::cli::connect;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::workspace::{
    validate_plan, validate_portfolio, validate_review, PlanForm, PortfolioForm, ReviewForm,
};
use clap::{Args, Subcommand};

/// Workspace command arguments
#[derive(Args)]
pub struct WorkspaceArgs {
    /// Coach to act on
    #[arg(long, global = true)]
    pub coach: Option<i64>,

    /// Print raw JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub section: WorkspaceSection,
}

#[derive(Subcommand)]
pub enum WorkspaceSection {
    /// Portfolio posts
    Portfolio {
        #[command(subcommand)]
        action: Option<PortfolioAction>,
    },

    /// Training plans
    Plans {
        #[command(subcommand)]
        action: Option<PlanAction>,
    },

    /// Client reviews
    Reviews {
        #[command(subcommand)]
        action: Option<ReviewAction>,
    },
}

#[derive(Subcommand)]
pub enum PortfolioAction {
    /// List posts
    List,
    /// Publish a post
    Add(AddPostArgs),
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// List plans
    List,
    /// Create a plan
    Add(AddPlanArgs),
}

#[derive(Subcommand)]
pub enum ReviewAction {
    /// List reviews
    List,
    /// Record a review
    Add(AddReviewArgs),
}

#[derive(Args)]
pub struct AddPostArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub media_url: Option<String>,
}

#[derive(Args)]
pub struct AddPlanArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub focus: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    /// Length in weeks (1-52)
    #[arg(long)]
    pub weeks: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct AddReviewArgs {
    #[arg(long)]
    pub client: Option<String>,
    /// Rating from 1 to 5
    #[arg(long)]
    pub rating: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
}

impl From<AddPostArgs> for PortfolioForm {
    fn from(args: AddPostArgs) -> Self {
        PortfolioForm {
            title: args.title,
            description: args.description,
            media_url: args.media_url,
        }
    }
}

impl From<AddPlanArgs> for PlanForm {
    fn from(args: AddPlanArgs) -> Self {
        PlanForm {
            name: args.name,
            focus: args.focus,
            price: args.price,
            duration_weeks: args.weeks,
            description: args.description,
        }
    }
}

impl From<AddReviewArgs> for ReviewForm {
    fn from(args: AddReviewArgs) -> Self {
        ReviewForm {
            client_id: args.client,
            rating: args.rating,
            comment: args.comment,
        }
    }
}

/// Run the workspace command
pub async fn run(args: WorkspaceArgs) -> Result<()> {
    let config = Config::load()?;
    let coach_id = args.coach.unwrap_or(config.workspace.coach_id);
    let client = connect(&config)?;
    let json = args.json;

    match args.section {
        WorkspaceSection::Portfolio { action } => match action {
            None | Some(PortfolioAction::List) => {
                let posts = client.get_portfolio_for_coach(coach_id).await?;
                emit(json, &posts, || render_posts(&posts))
            }
            Some(PortfolioAction::Add(add)) => {
                let payload = validate_portfolio(&add.into(), coach_id).map_err(Error::Validation)?;
                let post = client.create_portfolio_post(&payload).await?;
                emit(json, &post, || format!("Published post #{}: {}\n", post.id, post.title))
            }
        },
        WorkspaceSection::Plans { action } => match action {
            None | Some(PlanAction::List) => {
                let plans = client.get_training_plans_for_coach(coach_id).await?;
                emit(json, &plans, || render_plans(&plans))
            }
            Some(PlanAction::Add(add)) => {
                let payload = validate_plan(&add.into(), coach_id).map_err(Error::Validation)?;
                let plan = client.create_training_plan(&payload).await?;
                emit(json, &plan, || format!("Created plan #{}: {}\n", plan.id, plan.name))
            }
        },
        WorkspaceSection::Reviews { action } => match action {
            None | Some(ReviewAction::List) => {
                let reviews = client.get_reviews_for_coach(coach_id).await?;
                emit(json, &reviews, || render_reviews(&reviews))
            }
            Some(ReviewAction::Add(add)) => {
                let payload = validate_review(&add.into(), coach_id).map_err(Error::Validation)?;
                let review = client.create_review(&payload).await?;
                emit(json, &review, || {
                    format!("Recorded review #{} ({} / 5)\n", review.id, review.rating)
                })
            }
        },
    }
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn render_posts(posts: &[PortfolioPost]) -> String {
    if posts.is_empty() {
        return "No portfolio posts yet.\n".to_string();
    }
    let mut output = String::new();
    for post in posts {
        output.push_str(&format!("#{} {}\n  {}\n", post.id, post.title, post.description));
        if let Some(url) = &post.media_url {
            output.push_str(&format!("  {}\n", url));
        }
    }
    output
}

fn render_plans(plans: &[TrainingPlan]) -> String {
    if plans.is_empty() {
        return "No training plans yet.\n".to_string();
    }
    plans
        .iter()
        .map(|plan| {
            format!(
                "#{} {} - {} - ${:.0} / {} weeks\n",
                plan.id, plan.name, plan.focus, plan.price, plan.duration_weeks
            )
        })
        .collect()
}

fn render_reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews yet.\n".to_string();
    }

    let avg = reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64;
    let mut output = format!("Avg rating {:.1}\n", avg);
    for review in reviews {
        output.push_str(&format!(
            "  {} / 5 from {}: {}\n",
            review.rating, review.client_name, review.comment
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: WorkspaceArgs,
    }

    #[test]
    fn test_parse_add_plan() {
        let cli = TestCli::parse_from([
            "fitspace", "plans", "add", "--name", "Base", "--focus", "Endurance", "--price", "80",
            "--weeks", "6", "--coach", "4",
        ]);
        assert_eq!(cli.args.coach, Some(4));

        let WorkspaceSection::Plans { action: Some(PlanAction::Add(add)) } = cli.args.section else {
            panic!("expected plans add");
        };
        let plan = validate_plan(&add.into(), 4).unwrap();
        assert_eq!(plan.duration_weeks, 6);
        assert_eq!(plan.coach_id, 4);
    }

    #[test]
    fn test_list_is_default_action() {
        let cli = TestCli::parse_from(["fitspace", "reviews"]);
        assert!(matches!(cli.args.section, WorkspaceSection::Reviews { action: None }));
    }

    #[test]
    fn test_render_reviews_average() {
        let reviews = vec![
            Review {
                id: 1,
                coach_id: 1,
                client_name: "Lina".into(),
                rating: 5,
                comment: "Great".into(),
                created_at: None,
            },
            Review {
                id: 2,
                coach_id: 1,
                client_name: "Ali".into(),
                rating: 4,
                comment: "Solid".into(),
                created_at: None,
            },
        ];
        let output = render_reviews(&reviews);

        assert!(output.starts_with("Avg rating 4.5"));
        assert!(output.contains("5 / 5 from Lina: Great"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_posts(&[]), "No portfolio posts yet.\n");
        assert_eq!(render_plans(&[]), "No training plans yet.\n");
    }
}
