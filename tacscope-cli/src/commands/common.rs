use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tacscope::Program;

/// Load a JSON program from a file, or from stdin when the path is `-` or absent.
pub fn load_program(path: Option<&Path>) -> anyhow::Result<Program> {
    let program = match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open program: {}", path.display()))?;
            Program::from_json_reader(std::io::BufReader::new(file))
                .with_context(|| format!("failed to decode program: {}", path.display()))?
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read program from stdin")?;
            Program::from_json_str(&text).context("failed to decode program from stdin")?
        }
    };

    log::debug!("loaded {} function(s)", program.functions.len());
    Ok(program)
}
