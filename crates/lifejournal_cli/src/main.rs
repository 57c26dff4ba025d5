//! Command-line skin over the journal core.
//!
//! # Responsibility
//! - Map subcommands onto session action handlers.
//! - Render the projected view in the reader or dashboard layout.

mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use lifejournal_core::db::open_db;
use lifejournal_core::{
    init_from_config, CommitOutcome, JournalConfig, JournalSession, Layout, ReviewField, ReviewId,
    Section, SqliteReviewStore, SubmitOutcome,
};
use log::info;
use render::OutputMode;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "lifejournal.toml";

#[derive(Parser, Debug)]
#[command(author, version, about = "lifejournal: dated reviews of your life sections")]
struct Cli {
    /// Config file; missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the database path from config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Write rolling logs to this absolute directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available sections.
    Sections,
    /// Show reviews in the reader or dashboard layout.
    List {
        /// Dashboard tab to show; implies `--layout dashboard`.
        #[arg(long)]
        section: Option<Section>,
        #[arg(long)]
        layout: Option<Layout>,
    },
    /// Write a new review under a section.
    Add {
        #[arg(long)]
        section: Section,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Edit the title and/or content of a review.
    Edit {
        id: ReviewId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a review.
    Delete { id: ReviewId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = effective_config(&cli)?;
    init_from_config(&config).context("failed to initialize logging")?;

    let output = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if let Commands::Sections = cli.command {
        println!("{}", render::sections(output));
        return Ok(());
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open journal `{}`", config.db_path.display()))?;
    let mut session = JournalSession::new(SqliteReviewStore::new(conn), config.layout);
    if let Some(err) = session.load_error() {
        bail!("{err}");
    }

    run(&mut session, cli.command, output)
}

fn effective_config(cli: &Cli) -> Result<JournalConfig> {
    let mut config = JournalConfig::load(&cli.config)?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    Ok(config)
}

fn run(
    session: &mut JournalSession<SqliteReviewStore>,
    command: Commands,
    output: OutputMode,
) -> Result<()> {
    match command {
        Commands::Sections => println!("{}", render::sections(output)),
        Commands::List { section, layout } => {
            let layout = match (layout, section) {
                (Some(layout), _) => layout,
                (None, Some(_)) => Layout::Dashboard,
                (None, None) => session.layout(),
            };
            session.set_layout(layout);
            if let Some(section) = section {
                session.select_section(section);
            }
            let view = session.view()?;
            println!("{}", render::view(&view, session.selected_section(), output));
        }
        Commands::Add {
            section,
            title,
            content,
        } => {
            session.composer_choose_section(section);
            session.composer_edit_field(ReviewField::Title, title);
            session.composer_edit_field(ReviewField::Content, content);
            match session.composer_submit() {
                SubmitOutcome::Submitted(id) => {
                    info!("event=cli_add module=cli status=ok review_id={id} section={section}");
                    let review = session
                        .find_review(id)
                        .ok_or_else(|| anyhow!("review {id} was not stored"))?;
                    println!("{}", render::review(review, output));
                }
                SubmitOutcome::Rejected(reason) => bail!("{reason}; nothing was written"),
                SubmitOutcome::NoSectionSelected => bail!("no section selected"),
            }
        }
        Commands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("nothing to edit; pass --title and/or --content");
            }
            if !session.begin_edit(id) {
                bail!("review not found: {id}");
            }
            if let Some(title) = title {
                session.edit_field(id, ReviewField::Title, title);
            }
            if let Some(content) = content {
                session.edit_field(id, ReviewField::Content, content);
            }
            match session.commit_edit(id) {
                CommitOutcome::Committed(_) => {
                    let review = session
                        .find_review(id)
                        .ok_or_else(|| anyhow!("review {id} disappeared after edit"))?;
                    println!("{}", render::review(review, output));
                }
                CommitOutcome::Rejected(reason) => {
                    session.cancel_edit();
                    bail!("{reason}; nothing was written");
                }
                CommitOutcome::NotEditing => bail!("review {id} is not being edited"),
            }
        }
        Commands::Delete { id } => {
            if session.find_review(id).is_none() {
                bail!("review not found: {id}");
            }
            session.delete_review(id);
            if session.find_review(id).is_some() {
                bail!("failed to delete review {id}");
            }
            println!("{}", render::deleted(id, output));
        }
    }
    Ok(())
}
