//! `typeprobe resolve` command implementation.
//!
//! Resolves the declaration entry point of one package directory without
//! reading the declaration file itself.

use miette::{IntoDiagnostic, Result};
use std::path::Path;
use typeprobe_core::{file_exists, read_manifest, resolve, Config, MANIFEST_FILE};
use typeprobe_util::fs::normalize_path;

/// Run the resolve command.
pub fn run(config: &Config, package_dir: &Path) -> Result<()> {
    let package_dir = normalize_path(&config.cwd.join(package_dir));
    let manifest_path = package_dir.join(MANIFEST_FILE);

    let manifest = match read_manifest(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            if config.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": {
                            "code": e.code(),
                            "message": e.to_string()
                        }
                    })
                );
            } else {
                eprintln!("error: {}", e);
            }
            std::process::exit(1);
        }
    };

    let resolution = resolve(&manifest, &package_dir);
    let exists = resolution
        .as_ref()
        .is_some_and(|r| file_exists(&r.absolute_path));

    match &resolution {
        Some(r) => tracing::debug!(
            package = %package_dir.display(),
            source = %r.source,
            exists,
            "resolved declaration entry"
        ),
        None => tracing::debug!(package = %package_dir.display(), "no declaration entry"),
    }

    if config.json {
        let output = serde_json::json!({
            "ok": true,
            "package_dir": package_dir.to_string_lossy(),
            "name": manifest.name,
            "resolution": resolution,
            "exists": exists
        });
        let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
        println!("{json}");
        return Ok(());
    }

    let label = manifest
        .name
        .clone()
        .unwrap_or_else(|| package_dir.display().to_string());
    let Some(r) = resolution else {
        println!("{label}: no declaration entry");
        return Ok(());
    };

    println!("{label}");
    println!("  Source:         {}", r.source);
    println!("  Path:           {}", r.absolute_path.display());
    println!("  As written:     {}", r.relative_path);
    println!(
        "  ESM preferred:  {}",
        if r.is_esm_preferred() { "yes" } else { "no" }
    );
    println!("  Exists:         {}", if exists { "yes" } else { "no" });

    Ok(())
}
