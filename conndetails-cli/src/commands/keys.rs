use std::io::Write;

use conndetails_core::ConnConfig;
use conndetails_openid::OpenIdClientProjector;

use super::CommandResult;

/// Print the key table of the configured projector, one field per line.
pub fn run(config: &ConnConfig, out: &mut dyn Write) -> CommandResult {
    let projector = OpenIdClientProjector::from_config(config)?;

    let width = projector
        .keys()
        .iter()
        .map(|k| k.field().len())
        .max()
        .unwrap_or(0);
    let simplified_width = projector
        .keys()
        .iter()
        .map(|k| k.simplified().len())
        .max()
        .unwrap_or(0);

    for key in projector.keys() {
        writeln!(
            out,
            "{:<width$}  {:<simplified_width$}  {}",
            key.field(),
            key.simplified(),
            key.legacy(),
        )?;
    }
    Ok(())
}
