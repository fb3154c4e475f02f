use std::path::PathBuf;

use anyhow::bail;
use clap::{command, value_parser, Arg, ArgMatches};
use context::{load_config, Context};
use generator::generate;
use log::warn;

mod context;
mod generator;
mod metadata;
mod renderer;

const DEFAULT_CONFIG: &str = "feed.json";

fn cli() -> clap::Command {
    command!().args([
        Arg::new("article_dir")
            .help("Directory path of markdown posts [default: logs]")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("out_path")
            .help("Path of the generated feed [default: feed.xml]")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("config")
            .long("config")
            .help("JSON file with site settings")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("site_url")
            .long("site-url")
            .env("FEED_SITE_URL")
            .help("Public URL of the site"),
        Arg::new("site_title")
            .long("site-title")
            .env("FEED_SITE_TITLE")
            .help("Title of the feed channel"),
        Arg::new("site_description")
            .long("site-description")
            .env("FEED_SITE_DESCRIPTION")
            .help("Description of the feed channel"),
        Arg::new("author_email")
            .long("author-email")
            .env("FEED_AUTHOR_EMAIL")
            .help("Author contact address put on every item"),
    ])
}

/// Defaults, then the config file, then flags and environment.
fn build_context(matches: &ArgMatches) -> anyhow::Result<Context> {
    let mut ctx = Context::default();

    let (config_path, required) = match matches.get_one::<PathBuf>("config") {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    ctx.apply(load_config(&config_path, required)?);

    if let Some(v) = matches.get_one::<PathBuf>("article_dir") {
        ctx.article_dir = v.clone();
    }
    if let Some(v) = matches.get_one::<PathBuf>("out_path") {
        ctx.out_path = v.clone();
    }
    for (id, field) in [
        ("site_url", &mut ctx.site_url),
        ("site_title", &mut ctx.site_title),
        ("site_description", &mut ctx.site_description),
        ("author_email", &mut ctx.author_email),
    ] {
        if let Some(v) = matches.get_one::<String>(id) {
            *field = v.clone();
        }
    }

    if !ctx.article_dir.is_dir() {
        bail!("article_dir({:?}) must be a directory.", ctx.article_dir);
    }
    if ctx.out_path.is_dir() {
        bail!("out_path({:?}) must not be a directory.", ctx.out_path);
    }

    Ok(ctx)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ctx = build_context(&cli().get_matches())?;
    let collected = generate(&ctx)?;

    if !collected.failures.is_empty() {
        warn!(
            "Skipped {} of {} files:",
            collected.failures.len(),
            collected.failures.len() + collected.posts.len()
        );
        for (path, _) in &collected.failures {
            warn!("  {path:?}");
        }
    }

    Ok(())
}
