use miette::{IntoDiagnostic, Result};
use typeprobe_core::{Config, VersionInfo};

pub fn run(config: &Config) -> Result<()> {
    let info = VersionInfo::current();
    if config.json {
        let json = serde_json::to_string_pretty(&info).into_diagnostic()?;
        println!("{json}");
    } else {
        println!("{info}");
    }
    Ok(())
}
