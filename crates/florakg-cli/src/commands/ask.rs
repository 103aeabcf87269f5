//! Question answering command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use florakg_core::config::AppConfig;
use florakg_core::QaService;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct AskArgs {
    /// The question; omit to start an interactive session
    pub question: Vec<String>,

    /// Print which path produced the answer
    #[arg(long)]
    pub route: bool,
}

pub async fn execute(args: AskArgs, config: &AppConfig) -> Result<()> {
    let qa = super::load_service(config).await?;

    let result = if args.question.is_empty() {
        interactive(&qa, args.route).await
    } else {
        answer_one(&qa, &args.question.join(" "), args.route).await;
        Ok(())
    };

    qa.close().await;
    result
}

async fn answer_one(qa: &QaService, question: &str, show_route: bool) {
    let answer = qa.answer_with_route(question).await;
    crate::output::print_answer(&answer, show_route);
}

async fn interactive(qa: &QaService, show_route: bool) -> Result<()> {
    println!(
        "{} {}",
        "🌿".green(),
        format!("{} plants loaded. Type a question, or 'exit' to quit.", qa.list_entities().len()).dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }
        answer_one(qa, line, show_route).await;
        println!();
    }
    Ok(())
}
