//! CLI command handler: fingerprint each subdirectory of DIR (or DIR itself with --single) and print results.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::utils::{DirhashToml, load_dirhash_toml, setup_logging};
use crate::{CancelFlag, FingerprintError, FingerprintOpts, fingerprint_dir};

/// Effective settings after layering defaults < `.dirhash.toml` < CLI flags.
#[derive(Clone, Debug, Default)]
pub struct RunSettings {
    pub opts: FingerprintOpts,
    pub subpath: Option<String>,
    pub json: bool,
    pub verbose: bool,
}

/// One output record in `--json` mode.
#[derive(Debug, Serialize)]
struct ResultLine<'a> {
    path: String,
    digest: Option<&'a str>,
    error: Option<String>,
}

pub fn resolve_settings(cli: &Cli, file: Option<&DirhashToml>) -> RunSettings {
    let file = file.map(|f| &f.settings);
    let pick_bool = |flag: Option<bool>, from_file: Option<bool>| flag.or(from_file).unwrap_or(false);
    RunSettings {
        opts: FingerprintOpts {
            batch_size: cli
                .batch_size
                .or(file.and_then(|f| f.batch_size))
                .unwrap_or(0),
            workers: cli.workers.or(file.and_then(|f| f.workers)).unwrap_or(0),
            parallel_walk: pick_bool(cli.parallel_walk, file.and_then(|f| f.parallel_walk)),
            cancel: None,
        },
        subpath: cli
            .subpath
            .clone()
            .or_else(|| file.and_then(|f| f.subpath.clone())),
        json: pick_bool(cli.json, file.and_then(|f| f.json)),
        verbose: pick_bool(cli.verbose, file.and_then(|f| f.verbose)),
    }
}

/// Directories under `parent` to fingerprint, sorted by name. Non-directory children are skipped.
/// With `subpath`, each candidate is `<child>/<subpath>` (existence is not checked here).
pub fn list_candidates(parent: &Path, subpath: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(parent)
        .with_context(|| format!("read directory {}", parent.display()))?
    {
        match entry {
            Ok(e) if e.path().is_dir() => children.push(e.path()),
            Ok(_) => {}
            Err(err) => warn!("Skipping unreadable entry in {}: {}", parent.display(), err),
        }
    }
    children.sort();
    Ok(children
        .into_iter()
        .map(|p| match subpath {
            Some(sub) => p.join(sub),
            None => p,
        })
        .collect())
}

/// Render one result for stdout. Returns `None` for a failure in text mode (reported through the logger instead).
pub fn render_result(
    path: &Path,
    result: &Result<String, FingerprintError>,
    json: bool,
) -> Result<Option<String>> {
    if json {
        let line = ResultLine {
            path: path.display().to_string(),
            digest: result.as_ref().ok().map(String::as_str),
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        return Ok(Some(
            serde_json::to_string(&line).context("serialize result line")?,
        ));
    }
    Ok(result
        .as_ref()
        .ok()
        .map(|digest| format!("{}: {}", path.display(), digest)))
}

/// Run the driver: one fingerprint per candidate, printed as it completes.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let (file, file_warning) = match load_dirhash_toml(&cli.dir) {
        Ok(file) => (file, None),
        Err(msg) => (None, Some(msg)),
    };
    let mut settings = resolve_settings(cli, file.as_ref());
    setup_logging(settings.verbose);
    if let Some(msg) = file_warning {
        warn!("{}", msg);
    }

    let cancel = CancelFlag::new();
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || cancel_handler.cancel()).context("set Ctrl+C handler")?;
    settings.opts.cancel = Some(cancel.clone());

    let candidates = if cli.single {
        vec![match &settings.subpath {
            Some(sub) => cli.dir.join(sub),
            None => cli.dir.clone(),
        }]
    } else {
        list_candidates(&cli.dir, settings.subpath.as_deref())?
    };
    debug!("{} candidate(s) under {}", candidates.len(), cli.dir.display());

    let mut failures = 0_usize;
    for candidate in &candidates {
        if cancel.is_cancelled() {
            break;
        }
        let result = fingerprint_dir(candidate, &settings.opts);
        if cli.single && !settings.json {
            let digest = result
                .with_context(|| format!("fingerprint {}", candidate.display()))?;
            println!("{}", digest);
            return Ok(());
        }
        if let Some(line) = render_result(candidate, &result, settings.json)? {
            println!("{}", line);
        }
        if let Err(err) = result {
            failures += 1;
            warn!(
                "Error calculating directory hash for {}: {}",
                candidate.display(),
                err
            );
            if matches!(err, FingerprintError::Cancelled) {
                break;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} directories failed", failures, candidates.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::utils::dirhash_toml::parse_dirhash_toml;
    use tempfile::TempDir;

    #[test]
    fn candidates_are_sorted_dirs_only() {
        let parent = TempDir::new().unwrap();
        std::fs::create_dir(parent.path().join("zeta")).unwrap();
        std::fs::write(parent.path().join("middle.txt"), b"not a dir").unwrap();
        std::fs::create_dir(parent.path().join("alpha")).unwrap();

        let got = list_candidates(parent.path(), None).unwrap();
        assert_eq!(
            got,
            vec![parent.path().join("alpha"), parent.path().join("zeta")]
        );
    }

    #[test]
    fn candidates_join_subpath() {
        let parent = TempDir::new().unwrap();
        std::fs::create_dir(parent.path().join("b")).unwrap();
        std::fs::write(parent.path().join("a"), b"file").unwrap();
        std::fs::create_dir(parent.path().join("c")).unwrap();

        let got = list_candidates(parent.path(), Some("package")).unwrap();
        assert_eq!(
            got,
            vec![
                parent.path().join("b").join("package"),
                parent.path().join("c").join("package"),
            ]
        );
    }

    #[test]
    fn missing_parent_is_an_error() {
        let parent = TempDir::new().unwrap();
        assert!(list_candidates(&parent.path().join("nope"), None).is_err());
    }

    #[test]
    fn cli_flags_override_file_settings() {
        let cli = Cli::try_parse_from(["dirhash", ".", "-w", "3"]).unwrap();
        let file = parse_dirhash_toml(
            "[settings]\nworkers = 9\nbatch_size = 5\nsubpath = \"package\"\njson = true",
        )
        .unwrap();
        let s = resolve_settings(&cli, Some(&file));
        assert_eq!(s.opts.workers, 3);
        assert_eq!(s.opts.batch_size, 5);
        assert_eq!(s.subpath.as_deref(), Some("package"));
        assert!(s.json);
        assert!(!s.verbose);
    }

    #[test]
    fn no_file_means_defaults_left_to_the_library() {
        let cli = Cli::try_parse_from(["dirhash"]).unwrap();
        let s = resolve_settings(&cli, None);
        assert_eq!(s.opts.workers, 0);
        assert_eq!(s.opts.batch_size, 0);
        assert!(!s.opts.parallel_walk);
    }

    #[test]
    fn text_mode_renders_success_only() {
        let ok: Result<String, FingerprintError> = Ok("abc".into());
        let err: Result<String, FingerprintError> = Err(FingerprintError::Cancelled);
        let p = Path::new("/x/y");
        assert_eq!(
            render_result(p, &ok, false).unwrap().as_deref(),
            Some("/x/y: abc")
        );
        assert!(render_result(p, &err, false).unwrap().is_none());
    }

    #[test]
    fn json_mode_renders_both() {
        let err: Result<String, FingerprintError> = Err(FingerprintError::Cancelled);
        let line = render_result(Path::new("/x"), &err, true).unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["path"], "/x");
        assert!(v["digest"].is_null());
        assert_eq!(v["error"], "fingerprint cancelled");
    }
}
