use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod classifier;
mod error;
mod lesson;
mod mining;
mod models;
mod report;
mod store;

use error::ClassroomError;
use mining::MiningOutcome;
use models::MenuItem;
use store::{FileStore, ReflectionLog};

#[derive(Parser)]
#[command(name = "smartfarm-class")]
#[command(about = "AI ethics and smart farm classroom toolkit", long_about = None)]
struct Cli {
    /// Reflection store shared by every view
    #[arg(long, global = true, env = "CLASSROOM_STORE", default_value = store::DEFAULT_STORE_PATH)]
    store: PathBuf,
    /// trace, debug, info, warn or error (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available views
    Menu,
    /// Watch the ethics video and optionally leave a reflection
    Video {
        #[arg(long, default_value = lesson::DEFAULT_VIDEO_URL)]
        url: String,
        #[arg(long, requires = "comment")]
        author: Option<String>,
        #[arg(long, requires = "author")]
        comment: Option<String>,
    },
    /// Classify a plant photo (jpg, jpeg or png)
    Plant { image: PathBuf },
    /// Append a reflection to the store
    Submit {
        #[arg(long)]
        author: String,
        #[arg(long)]
        comment: String,
    },
    /// Chart the most frequent words across reflections
    Mining {
        #[arg(long, default_value_t = mining::DEFAULT_TOP_K)]
        top: usize,
        /// Also write a markdown report
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List submitted reflections
    Submissions {
        #[arg(long)]
        json: bool,
    },
    /// Export reflections as CSV
    Export {
        #[arg(long, default_value = "reflections.csv")]
        out: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smartfarm_ethics_class={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut store = FileStore::new(cli.store);

    match cli.command {
        Commands::Menu => {
            println!("Views:");
            for item in MenuItem::ALL {
                println!("- {} ({})", item.title(), item.command());
            }
        }
        Commands::Video {
            url,
            author,
            comment,
        } => {
            println!("# {}", MenuItem::EthicsVideo.title());
            println!("영상: {url}");
            println!("{}", lesson::VIDEO_CAPTION);
            if let (Some(author), Some(comment)) = (author, comment) {
                submit_reflection(&mut store, &author, &comment);
            }
            print!("{}", report::render_tips(MenuItem::EthicsVideo));
        }
        Commands::Plant { image } => {
            println!("# {}", MenuItem::PlantAnalysis.title());
            match classifier::check_extension(&image) {
                Ok(()) => {
                    let result = match std::fs::read(&image) {
                        Ok(bytes) => classifier::analyze(&bytes),
                        Err(err) => classifier::error_classification(&ClassroomError::from(err)),
                    };
                    print!("{}", report::render_classification(&result));
                    println!("{}", lesson::PLANT_PROMPT);
                }
                Err(err) => eprintln!("{}", report::banner(&err)),
            }
            print!("{}", report::render_tips(MenuItem::PlantAnalysis));
        }
        Commands::Submit { author, comment } => {
            submit_reflection(&mut store, &author, &comment);
        }
        Commands::Mining { top, out } => {
            println!("# {}", MenuItem::TextMining.title());
            match mining::mine(&store, top) {
                Ok(MiningOutcome::NoStore) => {
                    eprintln!("[오류] {}", report::no_store_message(store.path()))
                }
                Ok(MiningOutcome::Empty) => {
                    eprintln!("[경고] {}", report::empty_store_message(store.path()))
                }
                Ok(MiningOutcome::Ranked(ranked)) => {
                    print!("{}", report::render_chart(&ranked));
                    println!("{}", lesson::MINING_PROMPT);
                    if let Some(out) = out {
                        let reflections = store.read_all()?;
                        let generated_on = chrono::Local::now().date_naive();
                        let markdown =
                            report::build_mining_report(generated_on, &reflections, &ranked);
                        std::fs::write(&out, markdown)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                        println!("Report written to {}.", out.display());
                    }
                }
                Err(err) => eprintln!("{}", report::banner(&err)),
            }
            print!("{}", report::render_tips(MenuItem::TextMining));
        }
        Commands::Submissions { json } => match store.read_all() {
            Ok(reflections) if json => {
                println!("{}", serde_json::to_string_pretty(&reflections)?);
            }
            Ok(reflections) => {
                println!("# {}", MenuItem::ViewSubmissions.title());
                print!("{}", report::render_submissions(&reflections));
                print!("{}", report::render_tips(MenuItem::ViewSubmissions));
            }
            Err(err) => eprintln!("{}", report::banner(&err)),
        },
        Commands::Export { out } => {
            let reflections = store.read_all()?;
            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            report::export_csv(&reflections, file)?;
            println!("Exported {} reflections to {}.", reflections.len(), out.display());
        }
    }

    Ok(())
}

/// Rejections and write failures are reported here and go no further.
fn submit_reflection(log: &mut impl ReflectionLog, author: &str, comment: &str) {
    match store::submit(log, author, comment) {
        Ok(reflection) => println!(
            "생각이 성공적으로 저장되었습니다! ({})",
            reflection.display_author()
        ),
        Err(err) => eprintln!("{}", report::banner(&err)),
    }
}
