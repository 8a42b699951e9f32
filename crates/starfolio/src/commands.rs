//! The `list` and `show` subcommands.

use std::io::Write;

use starfolio_posts::{DocumentStore, PostCollection};

use crate::cli::Commands;
use crate::pages::{EMPTY_MESSAGE, card_date, count_line};

pub fn run<S: DocumentStore>(
    command: &Commands,
    posts: &PostCollection<S>,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    match command {
        Commands::List { json } => list(posts, *json, out),
        Commands::Show { slug } => show(posts, slug, out),
    }
}

fn list<S: DocumentStore>(
    posts: &PostCollection<S>,
    json: bool,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let posts = posts.list_posts()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &posts)?;
        writeln!(out)?;
        return Ok(());
    }

    if posts.is_empty() {
        writeln!(out, "{}", EMPTY_MESSAGE)?;
        return Ok(());
    }

    writeln!(out, "{}", count_line(posts.len()))?;
    writeln!(out)?;
    let title_width = posts
        .iter()
        .map(|p| p.metadata.title.chars().count())
        .max()
        .unwrap_or(0);
    for post in &posts {
        let meta = &post.metadata;
        writeln!(
            out,
            "{:<12}  {:<title_width$}  {:<18}  {}",
            card_date(meta.date),
            meta.title,
            post.read_time.to_string(),
            meta.slug,
        )?;
    }
    Ok(())
}

fn show<S: DocumentStore>(
    posts: &PostCollection<S>,
    slug: &str,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let post = posts.get_post(slug)?;
    let meta = &post.metadata;

    writeln!(out, "{}  •  {} read", card_date(meta.date), post.read_time)?;
    writeln!(out)?;
    writeln!(out, "{}", meta.title)?;
    writeln!(out, "{}", meta.summary)?;
    if !meta.tools.is_empty() {
        writeln!(out, "Tools: {}", meta.tools.join(", "))?;
    }
    writeln!(out)?;
    write!(out, "{}", post.content)?;
    if !post.content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
