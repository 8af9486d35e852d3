//! `typeprobe analyze` command implementation.
//!
//! Resolves and summarizes the declaration entry point of every dependency
//! listed in the project's package.json.

use miette::{IntoDiagnostic, Result};
use std::path::Path;
use typeprobe_core::{
    analyze_project, Config, DependencyAnalysis, ProjectAnalysis, ANALYZE_SCHEMA_VERSION,
};

/// Run the analyze command.
pub fn run(config: &Config) -> Result<()> {
    let project = match analyze_project(&config.cwd, &config.analyze_options()) {
        Ok(project) => project,
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

    tracing::debug!(
        manifest = %project.manifest_path.display(),
        analyzed = project.dependencies.len(),
        failed = project.failures.len(),
        "analysis complete"
    );
    for failure in &project.failures {
        tracing::warn!(
            dependency = %failure.dependency_name,
            code = failure.error.code(),
            "dependency analysis failed"
        );
    }

    if config.json {
        print_json(&project)?;
    } else {
        print_human(&project, &config.cwd);
    }

    if !project.failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn dependency_json(analysis: &DependencyAnalysis) -> serde_json::Value {
    let mut value = serde_json::to_value(analysis).unwrap_or_default();
    let skip = analysis.skip_reason().map(|reason| {
        serde_json::json!({
            "code": reason.code(),
            "message": reason.describe()
        })
    });
    if let Some(obj) = value.as_object_mut() {
        obj.insert("skip".to_string(), skip.unwrap_or(serde_json::Value::Null));
    }
    value
}

fn print_json(project: &ProjectAnalysis) -> Result<()> {
    let dependencies: Vec<_> = project.dependencies.iter().map(dependency_json).collect();
    let errors: Vec<_> = project
        .failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "dependency_name": f.dependency_name,
                "code": f.error.code(),
                "message": f.error.to_string()
            })
        })
        .collect();

    let output = serde_json::json!({
        "schema_version": ANALYZE_SCHEMA_VERSION,
        "ok": project.failures.is_empty(),
        "project": project.manifest_path.to_string_lossy(),
        "dependencies": dependencies,
        "errors": errors
    });

    let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn print_human(project: &ProjectAnalysis, cwd: &Path) {
    if project.dependencies.is_empty() && project.failures.is_empty() {
        println!("No dependencies found in package.json");
        return;
    }

    for analysis in &project.dependencies {
        if let Some(summary) = &analysis.parse_summary {
            let shown = summary
                .file_name
                .strip_prefix(cwd)
                .unwrap_or(&summary.file_name);
            println!(
                "{}: parsed {} with {} top-level statements",
                analysis.dependency_name,
                shown.display(),
                summary.statements
            );
        } else if let Some(reason) = analysis.skip_reason() {
            eprintln!("[skip] {}: {}", analysis.dependency_name, reason.describe());
        }
    }

    for failure in &project.failures {
        eprintln!("error: {}: {}", failure.dependency_name, failure.error);
    }
}
