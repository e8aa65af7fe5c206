use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

use courserate_core::{
    finalize_on, producer_outcome_event, Attendance, ConversationTranscript, Event, InputMethod,
    InterpreterContext, OpenAiClient, ProducerOutcome, PublishedReview, ReviewDraft, ReviewStore,
    ReviewWorkflow, SubmissionState, Summarizer, TranscriptTurn,
};

/// Courserate: anonymous course reviews with assisted summarization
#[derive(Parser, Debug)]
#[command(name = "courserate")]
#[command(about = "Submit and browse anonymous course reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a review by filling the form directly
    Submit(SubmitArgs),
    /// Submit a review through a guided interview
    Interview(InterviewArgs),
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Course identifier (e.g. 3101)
    #[arg(long)]
    course: Option<String>,

    /// Quality rating, 1.0 to 5.0
    #[arg(long, value_parser = parse_rating)]
    quality: f32,

    /// Difficulty rating, 1.0 to 5.0
    #[arg(long, value_parser = parse_rating)]
    difficulty: f32,

    /// Review text
    #[arg(long)]
    comment: String,

    /// Whether the course was taken for credit
    #[arg(long)]
    for_credit: Option<bool>,

    /// Attendance policy
    #[arg(long, value_parser = ["mandatory", "optional"])]
    attendance: Option<String>,

    /// Whether you would take the course again
    #[arg(long)]
    would_take_again: Option<bool>,

    /// Letter grade received
    #[arg(long)]
    grade: Option<String>,

    /// Whether the textbook was required
    #[arg(long)]
    textbook: Option<bool>,

    /// Tags to attach to the review
    #[arg(long, num_args = 1..)]
    tags: Vec<String>,

    /// Post without the interactive approval prompt
    #[arg(long)]
    yes: bool,

    /// Print the resulting feed as JSON
    #[arg(long)]
    json: bool,

    /// OpenAI API key (if not provided, will use OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Parser, Debug)]
struct InterviewArgs {
    /// Course identifier; asked interactively when omitted
    #[arg(long)]
    course: Option<String>,

    /// Print the resulting feed as JSON
    #[arg(long)]
    json: bool,

    /// OpenAI API key (if not provided, will use OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
}

fn parse_rating(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(1.0..=5.0).contains(&value) {
        return Err(format!("rating must be between 1.0 and 5.0, got {}", value));
    }
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Submit(args) => run_submit(args).await,
        Commands::Interview(args) => run_interview(args).await,
    }
}

async fn run_submit(args: SubmitArgs) -> Result<()> {
    let attendance = args.attendance.as_deref().and_then(Attendance::parse);

    let draft = ReviewDraft {
        course: args.course,
        quality: args.quality,
        difficulty: args.difficulty,
        for_credit: args.for_credit,
        attendance,
        would_take_again: args.would_take_again,
        grade: args.grade,
        textbook: args.textbook,
        comment: args.comment,
        tags: args.tags,
    };

    if draft.comment.trim().is_empty() {
        return Err(anyhow!("--comment must not be empty"));
    }

    let outcome = ProducerOutcome::Completed {
        draft,
        // The direct form has no conversation to summarize
        transcript: ConversationTranscript::new(),
    };

    run_workflow(
        InputMethod::DirectForm,
        outcome,
        build_summarizer(args.api_key),
        args.yes,
        args.json,
    )
    .await
}

async fn run_interview(args: InterviewArgs) -> Result<()> {
    let outcome = run_interview_producer(args.course.clone())?;

    run_workflow(
        InputMethod::Conversational,
        outcome,
        build_summarizer(args.api_key),
        false,
        args.json,
    )
    .await
}

/// The summarization capability is configuration-gated: no key, no backend.
fn build_summarizer(api_key: Option<String>) -> Summarizer {
    let client = match api_key {
        Some(key) => Some(OpenAiClient::new(key)),
        None => OpenAiClient::from_env(),
    };
    match client {
        Some(client) => {
            info!("Summarization enabled via OpenAI");
            Summarizer::new(Some(Arc::new(client)))
        }
        None => {
            info!("No API key configured; summaries fall back to your own words");
            Summarizer::unconfigured()
        }
    }
}

/// Drive one submission end to end: draft intake, summarization, approval,
/// commit, and a final feed print.
async fn run_workflow(
    method: InputMethod,
    outcome: ProducerOutcome,
    summarizer: Summarizer,
    auto_approve: bool,
    json: bool,
) -> Result<()> {
    let store = Arc::new(ReviewStore::new());
    store.seed(sample_reviews()).await;

    let ctx = InterpreterContext {
        summarizer: Arc::new(summarizer),
        store: store.clone(),
    };
    let mut workflow = ReviewWorkflow::new();

    workflow
        .process_event(Event::SubmissionStarted { method }, &ctx)
        .await;

    println!("Generating summary...");
    let state = workflow
        .process_event(producer_outcome_event(outcome), &ctx)
        .await;

    match state {
        SubmissionState::Cancelled { reason } => {
            println!("Submission cancelled: {}.", reason);
            return Ok(());
        }
        SubmissionState::AwaitingApproval { summary, .. } => {
            let origin = if summary.is_generated() {
                "generated summary"
            } else {
                "your own words"
            };
            println!();
            println!("Review summary ({}):", origin);
            println!("  {}", summary.text());
            println!();
        }
        other => return Err(anyhow!("Unexpected workflow state: {}", other.describe())),
    }

    let approved = auto_approve || prompt_approval()?;
    let event = if approved {
        Event::ApprovalGranted
    } else {
        Event::CancelRequested
    };
    let state = workflow.process_event(event, &ctx).await;

    match state {
        SubmissionState::Committed { review_id } => {
            match review_id {
                Some(id) => println!("Posted anonymously as review {}.", id),
                None => println!("Posted anonymously."),
            }
            println!();
            print_feed(&store, json).await?;
        }
        SubmissionState::Cancelled { .. } => {
            println!("Discarded. Nothing was posted.");
        }
        SubmissionState::AwaitingApproval { .. } => {
            // Approval was rejected (empty review text)
            println!("The review text is empty; nothing was posted.");
        }
        other => return Err(anyhow!("Unexpected workflow state: {}", other.describe())),
    }

    Ok(())
}

fn prompt_approval() -> Result<bool> {
    print!("Post anonymously? [y/N] ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read approval answer")?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Ask the interview questions and collect answers into a transcript.
///
/// Ctrl-D (end of input) at any question cancels the whole submission, which
/// the workflow turns into a side-effect-free cancellation.
fn run_interview_producer(course: Option<String>) -> Result<ProducerOutcome> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut transcript = ConversationTranscript::new();

    println!("Answer each question; press Ctrl-D to cancel.");
    println!();

    let course = match course {
        Some(course) => Some(course),
        None => {
            let Some(answer) = ask(&mut lines, &mut transcript, "Which course is this review for?")?
            else {
                return Ok(ProducerOutcome::Cancelled);
            };
            let answer = answer.trim().to_string();
            (!answer.is_empty()).then_some(answer)
        }
    };

    let Some(quality_answer) = ask(
        &mut lines,
        &mut transcript,
        "How would you rate the overall quality, from 1 to 5?",
    )?
    else {
        return Ok(ProducerOutcome::Cancelled);
    };
    let quality = parse_rating_answer(&quality_answer)?;

    let Some(difficulty_answer) = ask(
        &mut lines,
        &mut transcript,
        "How difficult was the course, from 1 to 5?",
    )?
    else {
        return Ok(ProducerOutcome::Cancelled);
    };
    let difficulty = parse_rating_answer(&difficulty_answer)?;

    let Some(experience) = ask(
        &mut lines,
        &mut transcript,
        "Tell me about your experience in the course.",
    )?
    else {
        return Ok(ProducerOutcome::Cancelled);
    };

    let Some(extra) = ask(
        &mut lines,
        &mut transcript,
        "Anything else other students should know? (leave empty to finish)",
    )?
    else {
        return Ok(ProducerOutcome::Cancelled);
    };

    let mut comment = experience.trim().to_string();
    let extra = extra.trim();
    if !extra.is_empty() {
        if !comment.is_empty() {
            comment.push(' ');
        }
        comment.push_str(extra);
    }

    let draft = ReviewDraft {
        course,
        quality,
        difficulty,
        for_credit: None,
        attendance: None,
        would_take_again: None,
        grade: None,
        textbook: None,
        comment,
        tags: vec![],
    };

    Ok(ProducerOutcome::Completed { draft, transcript })
}

/// Print a question, record it as a system turn, and read the answer as a
/// user turn. Returns None on end of input.
fn ask(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    transcript: &mut ConversationTranscript,
    question: &str,
) -> Result<Option<String>> {
    println!("{}", question);
    print!("> ");
    io::stdout().flush().context("Failed to flush stdout")?;

    transcript.push(TranscriptTurn::system(question));

    match lines.next() {
        Some(line) => {
            let line = line.context("Failed to read from stdin")?;
            transcript.push(TranscriptTurn::user(line.clone()));
            Ok(Some(line))
        }
        None => {
            println!();
            Ok(None)
        }
    }
}

/// Pull the first number out of a free-form rating answer ("4", "4 out of 5").
fn parse_rating_answer(answer: &str) -> Result<f32> {
    answer
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_ascii_digit() && c != '.'))
        .find_map(|token| token.parse::<f32>().ok())
        .filter(|value| (1.0..=5.0).contains(value))
        .ok_or_else(|| anyhow!("Could not read a 1-5 rating from '{}'", answer.trim()))
}

async fn print_feed(store: &ReviewStore, json: bool) -> Result<()> {
    let feed = store.list().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&feed).context("Failed to serialize feed")?
        );
        return Ok(());
    }

    println!("Community feed ({} reviews, newest first):", feed.len());
    for review in &feed {
        println!();
        println!(
            "  {}  {}  quality {:.1}  difficulty {:.1}",
            review.course.as_deref().unwrap_or("(course unknown)"),
            review.date,
            review.quality,
            review.difficulty,
        );
        println!("    {}", review.comment);
        if !review.tags.is_empty() {
            println!("    tags: {}", review.tags.join(", "));
        }
    }

    Ok(())
}

/// Demo feed content the community feed starts out with.
fn sample_reviews() -> Vec<PublishedReview> {
    let algorithms = ReviewDraft {
        course: Some("3101".to_string()),
        quality: 5.0,
        difficulty: 5.0,
        for_credit: None,
        attendance: Some(Attendance::Mandatory),
        would_take_again: Some(true),
        grade: Some("D+".to_string()),
        textbook: Some(true),
        comment: "Course destroyed my will to live. Great prof though, material is just hard."
            .to_string(),
        tags: vec![],
    };
    let advanced = ReviewDraft {
        course: Some("EECS4101".to_string()),
        quality: 5.0,
        difficulty: 4.0,
        for_credit: Some(true),
        attendance: Some(Attendance::Mandatory),
        would_take_again: Some(true),
        grade: Some("A".to_string()),
        textbook: Some(true),
        comment: "Very mindful lecturer, concise and clear on the blackboard. Tests are \
                  challenging but fair if you go to class and read the textbook."
            .to_string(),
        tags: vec!["AMAZING LECTURES".to_string(), "TEST HEAVY".to_string()],
    };

    vec![
        finalize_on(
            algorithms,
            NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid sample date"),
        ),
        finalize_on(
            advanced,
            NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid sample date"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("4.5"), Ok(4.5));
        assert_eq!(parse_rating("1"), Ok(1.0));
        assert!(parse_rating("0.5").is_err());
        assert!(parse_rating("6").is_err());
        assert!(parse_rating("great").is_err());
    }

    #[test]
    fn test_parse_rating_answer() {
        assert_eq!(parse_rating_answer("4").unwrap(), 4.0);
        assert_eq!(parse_rating_answer("4 out of 5").unwrap(), 4.0);
        assert_eq!(parse_rating_answer("maybe 3.5?").unwrap(), 3.5);
        assert!(parse_rating_answer("no idea").is_err());
        assert!(parse_rating_answer("10 out of 10").is_err());
    }

    #[test]
    fn test_sample_reviews_are_newest_first() {
        let reviews = sample_reviews();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].date, "Mar 20th, 2025");
        assert_eq!(reviews[1].date, "Mar 14th, 2025");
        assert!(reviews[0].id != reviews[1].id);
    }
}
