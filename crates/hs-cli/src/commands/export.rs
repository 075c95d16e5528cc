use std::path::Path;

use super::Context;

pub fn run(ctx: &Context, output: Option<&Path>) -> Result<(), String> {
    let session = super::open_session(ctx)?;
    let content = session.export().map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported {} characters to {}", session.store().len(), path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
