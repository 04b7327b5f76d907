mod error;
mod export;
mod forms;
mod model;
mod parser;
mod settings;
mod template;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use model::ToastmastersMeeting;
use parser::Extractor;
use settings::Settings;

#[derive(Parser)]
#[command(name = "agenda_scraper", about = "Meeting agenda extractor for easy-Speak pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract agendas and print roles, speakers and dates
    Parse {
        /// Saved agenda pages ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Meeting theme (blank becomes N/A)
        #[arg(short, long, default_value = "")]
        theme: String,
    },
    /// Write the extracted agenda as JSON
    Export {
        file: PathBuf,
        #[arg(short, long, default_value = "agenda.json")]
        out: PathBuf,
        #[arg(short, long, default_value = "")]
        theme: String,
    },
    /// Fill the {{...}} tokens of a text template
    Render {
        file: PathBuf,
        #[arg(long, default_value = "template.md")]
        template: PathBuf,
        #[arg(short, long, default_value = "presentation.md")]
        output: PathBuf,
        #[arg(short, long, default_value = "")]
        theme: String,
    },
    /// Push speaker and evaluator lists to the configured forms
    Forms { file: PathBuf },
    /// Parse, render and update forms in one go
    Run {
        file: PathBuf,
        #[arg(long, default_value = "template.md")]
        template: PathBuf,
        #[arg(short, long, default_value = "presentation.md")]
        output: PathBuf,
        #[arg(short, long, default_value = "")]
        theme: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let extractor = Extractor::new(&settings.layout)?;

    let result = match cli.command {
        Commands::Parse { files, theme } => {
            if let [file] = files.as_slice() {
                let meeting = extract_file(&extractor, file, &theme)?;
                print_summary(&meeting);
            } else {
                let meetings = extract_many(&extractor, &files, &theme)?;
                for (file, meeting) in files.iter().zip(&meetings) {
                    println!("\n=== {} ===", file.display());
                    print_summary(meeting);
                }
            }
            Ok(())
        }
        Commands::Export { file, out, theme } => {
            let meeting = extract_file(&extractor, &file, &theme)?;
            export::write_json(&meeting, &out)?;
            println!("Agenda written to {}", out.display());
            Ok(())
        }
        Commands::Render {
            file,
            template,
            output,
            theme,
        } => {
            let meeting = extract_file(&extractor, &file, &theme)?;
            template::render_file(&template, &output, &meeting)?;
            println!("Presentation written to {}", output.display());
            Ok(())
        }
        Commands::Forms { file } => {
            let meeting = extract_file(&extractor, &file, "")?;
            update_forms(&settings, &meeting).await
        }
        Commands::Run {
            file,
            template,
            output,
            theme,
        } => {
            let meeting = extract_file(&extractor, &file, &theme)?;
            print_summary(&meeting);

            println!("\nGenerating presentation from '{}'...", template.display());
            template::render_file(&template, &output, &meeting)?;
            println!("Presentation written to {}", output.display());

            println!("\nUpdating forms...");
            update_forms(&settings, &meeting).await
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn read_html(path: &Path) -> anyhow::Result<String> {
    let html = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read HTML from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    if html.trim().is_empty() {
        bail!("No HTML content provided in {}", path.display());
    }
    Ok(html)
}

fn extract_file(extractor: &Extractor, path: &Path, theme: &str) -> anyhow::Result<ToastmastersMeeting> {
    let html = read_html(path)?;
    let mut meeting = extractor.extract(&html);
    meeting.set_theme(theme);
    info!(
        "{}: {} agenda rows, {} speakers",
        path.display(),
        meeting.agenda_items.len(),
        meeting.speakers.len()
    );
    Ok(meeting)
}

/// Extract several pages in parallel; output order follows `paths`.
fn extract_many(
    extractor: &Extractor,
    paths: &[PathBuf],
    theme: &str,
) -> anyhow::Result<Vec<ToastmastersMeeting>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pages = paths
        .iter()
        .map(|p| read_html(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let meetings = pages
        .par_iter()
        .map(|html| {
            let mut meeting = extractor.extract(html);
            meeting.set_theme(theme);
            pb.inc(1);
            meeting
        })
        .collect();

    pb.finish_and_clear();
    Ok(meetings)
}

async fn update_forms(settings: &Settings, meeting: &ToastmastersMeeting) -> anyhow::Result<()> {
    let payloads = forms::FormPayloads::from_meeting(meeting);
    let client = forms::client(&settings.forms)?;
    let n = forms::submit(&client, &settings.forms, &payloads)
        .await
        .context("Form update failed")?;
    println!(
        "Updated {} forms ({} speakers, {} evaluators).",
        n,
        payloads.speakers.len(),
        payloads.evaluators.len()
    );
    Ok(())
}

fn print_summary(meeting: &ToastmastersMeeting) {
    let info = &meeting.meeting_info;
    if !info.club_name.is_empty() {
        println!("{} (District {}, Area {})", info.club_name, info.district, info.area);
    }

    println!("\n--- Roles, Presenters, and Time Frames ---");
    for (role, timing) in template::roles(meeting) {
        println!(
            "{}: {} (Min: {}, Max: {})",
            role, timing.presenter, timing.min_time, timing.max_time
        );
    }

    println!("\n--- Speaker Information ---");
    for (i, s) in meeting.speakers.iter().take(3).enumerate() {
        println!(
            "Speaker {}: {}, Project: '{}', Title: '{}', Description: '{}'",
            i + 1,
            s.name,
            s.project,
            s.title,
            s.description
        );
    }

    if !meeting.attending_members.is_empty() {
        println!("\nAttending: {}", meeting.attending_members.join(", "));
    }

    println!("\nMeeting Date: {}", info.meeting_date);
    println!("Next Meeting Date: {}", info.next_meeting_date);
    println!("Word of the Day: {}", info.word_of_the_day);
    println!("Theme: {}", info.meeting_theme);
    if !meeting.next_meeting.is_empty() {
        println!("Next Meeting: {}", meeting.next_meeting);
    }
}
