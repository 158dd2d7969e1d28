///
/// This module implements the CLI interface for lo-tree: command parsing, the
/// async `run` entrypoint, and the glue between commands and the core crate.
///
/// All tree logic (model, walks, rewrites, derived records) lives in
/// [`lo-tree-core`]. This module only loads inputs, wires collaborators and
/// prints results.
///
/// ## How To Use
/// - For command-line users: use the installed `lo-tree` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`lo-tree-core`]: ../../lo-tree-core/
use crate::load_config::load_config;
use crate::sync::sync_courses;
use crate::writer::FileLoWriter;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lo_tree_core::derive::{get_course_summary, update_lo};
use lo_tree_core::fetch::HttpSummaryFetcher;
use lo_tree_core::mutate::{fix_all_routes, get_sorted_units, inject_course_url, thread_los};
use lo_tree_core::path_ops::is_valid_course_name;
use lo_tree_core::walk::{all_video_los, find_by_route, flatten_los};
use lo_tree_core::{Course, Lo};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI for lo-tree: fetch, inspect and record Tutors course trees.
#[derive(Parser)]
#[clap(
    name = "lo-tree",
    version,
    about = "Fetch, inspect and record Tutors learning-object trees"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every configured course summary and write its record
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Fetch one course summary and print it as JSON
    Summary {
        /// Course id, e.g. `full-stack-1` for full-stack-1.netlify.app
        course_id: String,
    },
    /// Load a local tutors.json, normalise it and print what it contains
    Inspect {
        /// Path to the course JSON document
        #[clap(long)]
        file: PathBuf,
        /// Value substituted for the course URL placeholder
        #[clap(long)]
        course_url: Option<String>,
    },
    /// Write the summary record of the learning object at `route`
    Record {
        /// Path to the course JSON document
        #[clap(long)]
        file: PathBuf,
        /// Route of the learning object to record
        #[clap(long)]
        route: String,
        /// Key prefix; the record is stored under `<root>/lo`
        #[clap(long)]
        root: String,
        /// Directory records are written to
        #[clap(long)]
        output_dir: PathBuf,
        /// Value substituted for the course URL placeholder
        #[clap(long)]
        course_url: Option<String>,
    },
    /// Check whether a course id is acceptable (not a preview or branch deploy)
    CheckName { name: String },
}

fn read_lo(path: &Path) -> Result<Lo> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read course file {}", path.display()))?;
    let lo = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse course file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Course file loaded");
    Ok(lo)
}

fn inspect(mut root: Lo, course_url: Option<&str>) -> Result<()> {
    if let Some(url) = course_url {
        inject_course_url(&mut root, url);
    }
    fix_all_routes(&mut root)?;
    if let Some(topics) = root.los.as_mut() {
        for topic in topics.iter_mut() {
            if let Some(los) = topic.los.as_mut() {
                get_sorted_units(los);
            }
        }
    }
    if root.los.is_some() {
        thread_los(&mut root)?;
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for lo in flatten_los(std::slice::from_ref(&root)) {
        *counts.entry(lo.kind.to_string()).or_default() += 1;
    }
    println!("{}", root.title.as_deref().unwrap_or("(untitled)"));
    for (kind, count) in &counts {
        println!("  {kind}: {count}");
    }

    let videos = all_video_los(root.children());
    println!("Videos: {}", videos.len());
    for video in videos {
        let parent = video
            .parent_in(&root)
            .and_then(|p| p.title.as_deref())
            .unwrap_or("-");
        println!(
            "  {} [{}] in {}",
            video.title.as_deref().unwrap_or("(untitled)"),
            video.video_url().unwrap_or_default(),
            parent
        );
    }
    Ok(())
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "sync", "Starting course sync");
            let fetcher = HttpSummaryFetcher::new();
            let writer = FileLoWriter::new(&config.output_dir);
            match sync_courses(&fetcher, &writer, &config.courses).await {
                Ok(report) => {
                    tracing::info!(command = "sync", ?report, "Sync complete");
                    println!("Sync complete.\nReport:");
                    println!("{:#?}", report);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Sync failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Summary { course_id } => {
            let fetcher = HttpSummaryFetcher::new();
            let lo = get_course_summary(&fetcher, &course_id)
                .await
                .with_context(|| format!("Failed to load summary for {course_id}"))?;
            println!("{}", serde_json::to_string_pretty(&lo)?);
            Ok(())
        }
        Commands::Inspect { file, course_url } => {
            let root = read_lo(&file)?;
            inspect(root, course_url.as_deref())
        }
        Commands::Record {
            file,
            route,
            root,
            output_dir,
            course_url,
        } => {
            let mut lo = read_lo(&file)?;
            if let Some(url) = course_url.as_deref() {
                inject_course_url(&mut lo, url);
            }
            let course = Course::new(lo);
            let current = find_by_route(std::slice::from_ref(&course.lo), &route)
                .with_context(|| format!("No learning object with route {route}"))?;
            let writer = FileLoWriter::new(output_dir);
            update_lo(&writer, &root, &course, current).await?;
            println!("Recorded {route} under {root}/lo");
            Ok(())
        }
        Commands::CheckName { name } => {
            if is_valid_course_name(&name) {
                println!("{name}: valid");
                Ok(())
            } else {
                println!("{name}: invalid");
                anyhow::bail!("{name} is a preview or branch-deploy course id")
            }
        }
    }
}
