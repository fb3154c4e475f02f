use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context as _};
use chrono::{DateTime, Local};
use log::{info, warn};

use crate::{context::Context, metadata::Post, renderer::render_feed};

mod extract;
mod frontmatter;
mod utils;

const POST_EXTENSION: &str = "md";

/// Posts that were extracted, plus the files that had to be skipped.
#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub posts: Vec<Post>,
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

/// Markdown files directly inside `article_dir`, in path order.
/// Symlinks are followed and hidden files are skipped.
pub(crate) fn scan(article_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(article_dir)
        .with_context(|| format!("while reading directory {article_dir:?}"))?
    {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden
            && path.is_file()
            && path.extension().is_some_and(|ext| ext == POST_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_post(path: &Path, ctx: &Context) -> anyhow::Result<Post> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("file name is not valid UTF-8"))?;
    let content = fs::read_to_string(path)?;
    let modified: DateTime<Local> = fs::metadata(path)?.modified()?.into();
    Ok(extract::extract(
        filename,
        &content,
        modified.date_naive(),
        ctx,
    ))
}

/// Extracts every file in turn. A file that cannot be read is reported and skipped.
pub(crate) fn collect(files: &[PathBuf], ctx: &Context) -> Collected {
    let mut collected = Collected::default();
    for path in files {
        match read_post(path, ctx) {
            Ok(post) => {
                info!("  ✓ {} ({})", post.title, post.date);
                collected.posts.push(post);
            }
            Err(e) => {
                warn!("  ✗ Error processing {path:?}: {e:#}");
                collected.failures.push((path.clone(), e));
            }
        }
    }
    collected
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<Collected> {
    info!("Scanning {:?} for markdown files...", ctx.article_dir);
    let files = scan(&ctx.article_dir)?;
    if files.is_empty() {
        warn!("No markdown files found in {:?}.", ctx.article_dir);
        return Ok(Collected::default());
    }
    info!("Found {} posts:", files.len());

    let collected = collect(&files, ctx);

    info!("Generating RSS feed...");
    let xml = render_feed(&collected.posts, ctx, chrono::Utc::now())?;

    if let Some(parent) = ctx.out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&ctx.out_path, xml)
        .with_context(|| format!("while writing {:?}", ctx.out_path))?;
    info!("Feed generated: {:?}", ctx.out_path);
    info!("  URL: {}", ctx.feed_url());

    Ok(collected)
}
