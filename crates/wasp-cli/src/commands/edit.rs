use anyhow::{Context, bail};
use wasp_core::Editor;

use crate::cli::EditArgs;
use crate::commands::manual::parse_manual;

/// Apply the requested edits in order: level, applicable patterns, not
/// applicable patterns, then verification.
pub fn apply(ed: &mut Editor, args: &EditArgs) -> anyhow::Result<()> {
    if let Some(level) = args.level {
        ed.set_applicable_by_level(level, true)
            .with_context(|| format!("failed to mark level {level} applicable"))?;
    }

    for pattern in &args.applicable {
        ed.set_applicable_by(pattern, true)
            .with_context(|| format!("failed to mark {pattern} applicable"))?;
    }

    for pattern in &args.not_applicable {
        ed.set_applicable_by(pattern, false)
            .with_context(|| format!("failed to mark {pattern} not applicable"))?;
    }

    let target = match (&args.verify, &args.unverify) {
        (Some(id), _) => Some((id.as_str(), true)),
        (None, Some(id)) => Some((id.as_str(), false)),
        (None, None) => None,
    };

    match (target, &args.manual) {
        (Some((id, verified)), Some(text)) => {
            let manual = parse_manual(text)?;
            ed.set_manually_verified(id, verified, manual)
                .with_context(|| format!("failed to record manual verification of {id}"))?;
        }
        (Some((id, verified)), None) => {
            ed.set_verified(id, verified)
                .with_context(|| format!("failed to set verified={verified} on {id}"))?;
        }
        (None, Some(_)) => bail!("--manual needs --verify or --unverify"),
        (None, None) => {}
    }

    Ok(())
}
