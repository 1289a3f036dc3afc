use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use sprig_sdk::{
    Commit, CommitDiff, DiffSegment, FileChange, FileReport, InitStatus, ObjectId, RepoConfig,
    Repository, SegmentKind,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let workdir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let ctx = Ctx {
        workdir,
        config: RepoConfig::from_env(),
        format: cli.format,
    };

    match cli.command {
        Command::Init => cmd_init(&ctx),
        Command::Add(args) => cmd_add(&ctx, args),
        Command::Commit(args) => cmd_commit(&ctx, args),
        Command::Log(args) => cmd_log(&ctx, args),
        Command::Show(args) => cmd_show(&ctx, args),
        Command::Status => cmd_status(&ctx),
    }
}

struct Ctx {
    workdir: PathBuf,
    config: RepoConfig,
    format: OutputFormat,
}

impl Ctx {
    fn open(&self) -> anyhow::Result<Repository> {
        Ok(Repository::open(&self.workdir, self.config.clone())?)
    }

    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_init(ctx: &Ctx) -> anyhow::Result<()> {
    let status = Repository::init(&ctx.workdir, ctx.config.clone())?;
    let root = ctx.workdir.join(&ctx.config.repo_dir);

    if ctx.json() {
        let status = match status {
            InitStatus::Created => "created",
            InitStatus::AlreadyInitialized => "already_initialized",
        };
        return print_json(&json!({ "status": status, "root": root }));
    }

    match status {
        InitStatus::Created => println!(
            "{} Initialized empty sprig repository in {}",
            "✓".green().bold(),
            root.display().to_string().bold()
        ),
        InitStatus::AlreadyInitialized => println!(
            "Repository already initialized in {}",
            root.display().to_string().bold()
        ),
    }
    Ok(())
}

fn cmd_add(ctx: &Ctx, args: AddArgs) -> anyhow::Result<()> {
    let repo = ctx.open()?;
    let mut staged = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let entry = repo.add(path)?;
        if !ctx.json() {
            println!(
                "  {} {} {}",
                "staged:".green(),
                entry.path,
                entry.hash.short_hex().dimmed()
            );
        }
        staged.push(entry);
    }

    if ctx.json() {
        print_json(&staged)?;
    }
    Ok(())
}

fn cmd_commit(ctx: &Ctx, args: CommitArgs) -> anyhow::Result<()> {
    let repo = ctx.open()?;
    let id = repo.commit(&args.message)?;
    let commit = repo.get_commit(&id)?;

    if ctx.json() {
        return print_json(&LogEntry { id, commit: &commit });
    }

    let root = if commit.is_root() { " (root commit)" } else { "" };
    println!(
        "[{}{}] {}",
        id.short_hex().yellow().bold(),
        root,
        commit.message
    );
    println!("  {} file(s) recorded", commit.files.len());
    Ok(())
}

/// A commit as printed by `log --format json`.
#[derive(Serialize)]
struct LogEntry<'a> {
    id: ObjectId,
    #[serde(flatten)]
    commit: &'a Commit,
}

fn cmd_log(ctx: &Ctx, args: LogArgs) -> anyhow::Result<()> {
    let repo = ctx.open()?;
    let limit = args.limit.unwrap_or(usize::MAX);

    let mut commits = Vec::new();
    for step in repo.log()?.take(limit) {
        commits.push(step?);
    }

    if ctx.json() {
        let entries: Vec<LogEntry<'_>> = commits
            .iter()
            .map(|(id, commit)| LogEntry { id: *id, commit })
            .collect();
        return print_json(&entries);
    }

    if commits.is_empty() {
        println!("No commits yet.");
        return Ok(());
    }
    for (i, (id, commit)) in commits.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_header(id, commit);
    }
    Ok(())
}

fn print_header(id: &ObjectId, commit: &Commit) {
    println!("{} {}", "commit".yellow(), id.to_hex().yellow());
    if let Some(parent) = &commit.parent {
        println!("Parent: {}", parent.short_hex().dimmed());
    }
    println!("Author: {}", commit.author);
    println!("Date:   {}", commit.timestamp);
    println!();
    for line in commit.message.lines() {
        println!("    {line}");
    }
}

fn cmd_show(ctx: &Ctx, args: ShowArgs) -> anyhow::Result<()> {
    let repo = ctx.open()?;
    let shown = repo.show(&args.commit)?;

    if ctx.json() {
        return print_json(&shown);
    }
    print_commit_diff(&shown);
    Ok(())
}

fn print_commit_diff(shown: &CommitDiff) {
    print_header(&shown.id, &shown.commit);
    if shown.files.is_empty() {
        println!();
        println!("(no files recorded)");
    }
    for file in &shown.files {
        println!();
        print_file_report(file);
    }
}

fn print_file_report(file: &FileReport) {
    let hash = file.hash.short_hex();
    match &file.change {
        FileChange::Initial => println!(
            "{} {} {}",
            file.path.bold(),
            format!("(initial commit, {} bytes)", file.size).green(),
            hash.dimmed()
        ),
        FileChange::Introduced => println!(
            "{} {} {}",
            file.path.bold(),
            format!("(new file, {} bytes)", file.size).green(),
            hash.dimmed()
        ),
        FileChange::Compared(diff) if diff.is_unchanged() => {
            println!("{} {} {}", file.path.bold(), "(unchanged)".dimmed(), hash.dimmed())
        }
        FileChange::Compared(diff) => {
            println!(
                "{} {} {}",
                file.path.bold(),
                format!("+{} -{}", diff.additions(), diff.deletions()).cyan(),
                hash.dimmed()
            );
            for segment in &diff.segments {
                print_segment(segment);
            }
        }
    }
}

fn print_segment(segment: &DiffSegment) {
    for line in segment.lines() {
        let line = line.strip_suffix('\n').unwrap_or(line);
        match segment.kind {
            SegmentKind::Unchanged => println!(" {line}"),
            SegmentKind::Removed => println!("{}", format!("-{line}").red()),
            SegmentKind::Added => println!("{}", format!("+{line}").green()),
        }
    }
}

fn cmd_status(ctx: &Ctx) -> anyhow::Result<()> {
    let repo = ctx.open()?;
    let index = repo.status()?;

    if ctx.json() {
        return print_json(&index.entries());
    }

    if index.is_empty() {
        println!("Nothing staged.");
        return Ok(());
    }
    println!("Staged for commit:");
    for entry in index.entries() {
        println!("  {} {}", entry.path.green(), entry.hash.short_hex().dimmed());
    }
    Ok(())
}
