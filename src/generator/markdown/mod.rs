//! Builtin Markdown generator.
//!
//! Renders every Markdown file under `build.content` into a standalone HTML
//! page and copies everything else verbatim.
//!
//! ```text
//! docs/index.md        -> build/index.html
//! docs/guide/naming.md -> build/guide/naming.html
//! docs/img/logo.png    -> build/img/logo.png
//! static/CNAME         -> build/CNAME
//! ```
//!
//! Hidden entries are skipped in the content tree but copied from the static
//! tree. Every output path has exactly one source, static files included.

mod frontmatter;
mod layout;
mod render;

pub use frontmatter::FrontMatterError;

use crate::{
    config::SiteConfig,
    core::{FileCategory, is_shutdown},
    debug,
    generator::{BuildError, GenerateStats},
    logger::ProgressLine,
    utils::{
        html::escape,
        path::{is_hidden, to_slash_relative},
    },
};
use anyhow::{Context, Result};
use jwalk::WalkDir;
use layout::PageContext;
use pulldown_cmark::Options;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A file found in a source tree.
#[derive(Debug, Clone)]
struct SourceFile {
    /// Absolute path.
    path: PathBuf,
    /// Path relative to the tree root.
    rel: PathBuf,
    /// Copied as-is regardless of extension.
    verbatim: bool,
}

impl SourceFile {
    /// Relative output path of this file.
    fn output_rel(&self) -> PathBuf {
        if self.verbatim {
            return self.rel.clone();
        }
        match FileCategory::from_path(&self.rel) {
            FileCategory::Markdown => self.rel.with_extension("html"),
            FileCategory::Asset => self.rel.clone(),
        }
    }
}

/// A page that made it into the output.
#[derive(Debug, Clone)]
struct PageSummary {
    /// Slash-separated output path, e.g. `guide/naming.html`.
    href: String,
    title: String,
    weight: Option<i64>,
}

/// Render the content tree into `build.output`.
///
/// The output directory is expected to exist and be empty.
pub fn render_site(config: &SiteConfig, quiet: bool) -> Result<GenerateStats> {
    let output = &config.build.output;

    let (pages, assets): (Vec<_>, Vec<_>) =
        collect_files(&config.build.content, Walk::Content)?
            .into_iter()
            .partition(|f| FileCategory::from_path(&f.rel) == FileCategory::Markdown);
    let statics = if config.build.static_dir.is_dir() {
        collect_files(&config.build.static_dir, Walk::Static)?
    } else {
        Vec::new()
    };

    check_conflicts(config, pages.iter().chain(&assets).chain(&statics))?;

    let progress = (!quiet).then(|| {
        ProgressLine::new(&[
            (FileCategory::Markdown.name(), pages.len()),
            (FileCategory::Asset.name(), assets.len() + statics.len()),
        ])
    });

    let options = config.build.markdown.to_pulldown_options();
    let rendered = render_pages(config, &pages, options, progress.as_ref())?;

    copy_files(&assets, output, progress.as_ref())?;
    copy_files(&statics, output, progress.as_ref())?;

    if let Some(p) = progress {
        p.finish();
    }

    let mut summaries: Vec<_> = rendered.into_iter().flatten().collect();
    let has_index = summaries.iter().any(|p| p.href == "index.html");
    if !has_index && !summaries.is_empty() && !output.join("index.html").exists() {
        write_index(config, &mut summaries)?;
    }

    Ok(GenerateStats {
        pages: summaries.len(),
        assets: assets.len() + statics.len(),
        drafts_skipped: pages.len() - summaries.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Content tree: hidden entries skipped.
    Content,
    /// Static tree: everything copied verbatim.
    Static,
}

/// Walk `dir` and return its files, sorted by path.
///
/// Unreadable entries, dangling links and symlink loops fail the walk.
fn collect_files(dir: &Path, walk: Walk) -> Result<Vec<SourceFile>> {
    let content = walk == Walk::Content;
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).skip_hidden(content).follow_links(true).sort(true) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(dir).map(Path::to_path_buf) else {
            continue;
        };
        if content && is_hidden(&rel) {
            continue;
        }
        files.push(SourceFile {
            path,
            rel,
            verbatim: !content,
        });
    }

    Ok(files)
}

/// Every source must map to its own output file.
fn check_conflicts<'a>(
    config: &SiteConfig,
    files: impl Iterator<Item = &'a SourceFile>,
) -> Result<()> {
    let mut seen: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    for file in files {
        if let Some(first) = seen.insert(file.output_rel(), file.path.as_path()) {
            return Err(BuildError::OutputConflict {
                output: file.output_rel(),
                first: config.root_relative(first),
                second: config.root_relative(&file.path),
            }
            .into());
        }
    }
    Ok(())
}

/// Render pages in parallel. `None` marks a skipped draft.
fn render_pages(
    config: &SiteConfig,
    pages: &[SourceFile],
    options: Options,
    progress: Option<&ProgressLine>,
) -> Result<Vec<Option<PageSummary>>> {
    pages
        .par_iter()
        .map(|file| -> Result<Option<PageSummary>> {
            if is_shutdown() {
                return Err(BuildError::Interrupted.into());
            }
            let summary = render_one(config, file, options)?;
            if let Some(p) = progress {
                p.inc(FileCategory::Markdown.name());
            }
            Ok(summary)
        })
        .collect()
}

fn render_one(config: &SiteConfig, file: &SourceFile, options: Options) -> Result<Option<PageSummary>> {
    let source = fs::read_to_string(&file.path)
        .with_context(|| format!("failed to read {}", file.path.display()))?;

    let (meta, body) = frontmatter::extract(&source).map_err(|source| BuildError::InvalidDocument {
        path: config.root_relative(&file.path),
        source,
    })?;

    if meta.draft && !config.build.drafts {
        debug!("build"; "skipping draft {}", file.rel.display());
        return Ok(None);
    }

    let rendered = render::render_body(body, options);
    let title = meta
        .title
        .or(rendered.heading)
        .unwrap_or_else(|| file_stem(&file.rel));

    let depth = file.rel.components().count().saturating_sub(1);
    let html = layout::render_page(
        &config.site,
        &PageContext {
            title: &title,
            description: meta.description.as_deref(),
            body: &rendered.html,
            depth,
        },
    );

    let output_rel = file.output_rel();
    write_file(&config.build.output.join(&output_rel), html.as_bytes())?;

    Ok(Some(PageSummary {
        href: to_slash_relative(&output_rel, Path::new("")).unwrap_or_default(),
        title,
        weight: meta.weight,
    }))
}

/// Copy files verbatim into `output`, keeping their relative paths.
fn copy_files(files: &[SourceFile], output: &Path, progress: Option<&ProgressLine>) -> Result<()> {
    files.par_iter().try_for_each(|file| -> Result<()> {
        if is_shutdown() {
            return Err(BuildError::Interrupted.into());
        }
        let dest = output.join(&file.rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&file.path, &dest).with_context(|| {
            format!("failed to copy {} -> {}", file.path.display(), dest.display())
        })?;
        if let Some(p) = progress {
            p.inc(FileCategory::Asset.name());
        }
        Ok(())
    })
}

/// Write a landing page listing every page, ordered by weight then path.
fn write_index(config: &SiteConfig, pages: &mut [PageSummary]) -> Result<()> {
    pages.sort_by(|a, b| {
        a.weight
            .unwrap_or(i64::MAX)
            .cmp(&b.weight.unwrap_or(i64::MAX))
            .then_with(|| a.href.cmp(&b.href))
    });

    let mut body = String::from("<ul class=\"page-index\">\n");
    for page in pages.iter() {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(&page.href),
            escape(&page.title)
        ));
    }
    body.push_str("</ul>\n");

    let title = if config.site.title.is_empty() {
        "Index"
    } else {
        config.site.title.as_str()
    };
    let html = layout::render_page(
        &config.site,
        &PageContext {
            title,
            description: None,
            body: &body,
            depth: 0,
        },
    );
    write_file(&config.build.output.join("index.html"), html.as_bytes())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site;

    fn build(config: &SiteConfig) -> Result<GenerateStats> {
        fs::create_dir_all(&config.build.output).unwrap();
        render_site(config, true)
    }

    #[test]
    fn test_one_html_per_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[
                ("index.md", "# Welcome\n\nSee [naming](guide/naming.md)."),
                ("guide/naming.md", "---\ntitle: Naming\n---\nUse nouns."),
                ("guide/errors.markdown", "Errors are values."),
                ("img/logo.png", "PNG"),
            ],
        );

        let stats = build(&config).unwrap();
        let out = &config.build.output;

        assert_eq!(stats.pages, 3);
        assert_eq!(stats.assets, 1);
        assert!(out.join("index.html").is_file());
        assert!(out.join("guide/naming.html").is_file());
        assert!(out.join("guide/errors.html").is_file());
        assert_eq!(fs::read(out.join("img/logo.png")).unwrap(), b"PNG");
        assert!(!out.join("guide/naming.md").exists());

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("href=\"guide/naming.html\""));
        assert!(index.contains("<title>Welcome | Test Guide</title>"));

        let errors = fs::read_to_string(out.join("guide/errors.html")).unwrap();
        assert!(errors.contains("<title>errors | Test Guide</title>"));
        assert!(errors.contains("href=\"../index.html\""));
    }

    #[test]
    fn test_hidden_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[("a.md", "A"), (".drafts/b.md", "B"), (".DS_Store", "x")],
        );

        let stats = build(&config).unwrap();
        assert_eq!(stats.pages, 1);
        assert_eq!(stats.assets, 0);
        assert!(!config.build.output.join(".drafts").exists());
    }

    #[test]
    fn test_invalid_document_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[("good.md", "# Good"), ("bad.md", "---\ntitle: never closed\n\n# Bad")],
        );

        let err = build(&config).unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().unwrap();
        assert!(matches!(build_err, BuildError::InvalidDocument { .. }));
        assert!(format!("{err:#}").contains("bad.md"));
    }

    #[test]
    fn test_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let draft = "---\ndraft: true\n---\nWIP";
        let config = test_site(dir.path(), "", &[("index.md", "# Home"), ("wip.md", draft)]);

        let stats = build(&config).unwrap();
        assert_eq!(stats.pages, 1);
        assert_eq!(stats.drafts_skipped, 1);
        assert!(!config.build.output.join("wip.html").exists());

        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "[build]\ndrafts = true", &[("wip.md", draft)]);
        let stats = build(&config).unwrap();
        assert_eq!(stats.pages, 1);
        assert!(config.build.output.join("wip.html").exists());
    }

    #[test]
    fn test_static_dir_copied() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home")]);
        fs::create_dir_all(dir.path().join("static/css")).unwrap();
        fs::write(dir.path().join("static/CNAME"), "docs.example.org").unwrap();
        fs::write(dir.path().join("static/css/site.css"), "body{}").unwrap();

        let stats = build(&config).unwrap();
        assert_eq!(stats.assets, 2);
        assert!(config.build.output.join("CNAME").is_file());
        assert!(config.build.output.join("css/site.css").is_file());
    }

    #[test]
    fn test_static_dotfiles_copied() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home"), (".notes", "x")]);
        fs::create_dir_all(dir.path().join("static/.well-known")).unwrap();
        fs::write(dir.path().join("static/.well-known/security.txt"), "Contact: a@b").unwrap();
        fs::write(dir.path().join("static/.htaccess"), "Options -Indexes").unwrap();

        let stats = build(&config).unwrap();
        let out = &config.build.output;
        assert_eq!(stats.assets, 2);
        assert!(out.join(".well-known/security.txt").is_file());
        assert!(out.join(".htaccess").is_file());
        assert!(!out.join(".notes").exists());
    }

    #[test]
    fn test_static_markdown_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home")]);
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/README.md"), "# raw").unwrap();

        build(&config).unwrap();
        let out = &config.build.output;
        assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "# raw");
        assert!(!out.join("README.html").exists());
    }

    #[test]
    fn test_static_file_conflicting_with_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("naming.md", "# Naming")]);
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/naming.html"), "<p>old</p>").unwrap();

        let err = build(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::OutputConflict { .. })
        ));
        assert!(!config.build.output.join("naming.html").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_errors_fail_the_build() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home"), ("guide/a.md", "A")]);
        symlink(&config.build.content, config.build.content.join("guide/loop")).unwrap();
        assert!(build(&config).is_err());

        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home")]);
        symlink(dir.path().join("gone"), config.build.content.join("dangling")).unwrap();
        let err = build(&config).unwrap_err();
        assert!(format!("{err:#}").contains("failed to walk"));
    }

    #[test]
    fn test_generated_index_ordered_by_weight() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[
                ("b.md", "---\nsidebar_position: 1\n---\n# Second file"),
                ("a.md", "+++\nweight = 2\n+++\n# First file"),
                ("c.md", "# Unweighted"),
            ],
        );

        let stats = build(&config).unwrap();
        assert_eq!(stats.pages, 3);

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        let b = index.find("b.html").unwrap();
        let a = index.find("a.html").unwrap();
        let c = index.find("c.html").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_output_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("a.md", "A"), ("a.markdown", "B")]);

        let err = build(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::OutputConflict { .. })
        ));
    }
}
