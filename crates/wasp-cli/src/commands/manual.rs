use anyhow::{Context, bail};
use chrono::NaiveDate;
use wasp_core::Manual;

/// Parse a `--manual` argument of the form `YYYY-MM-DD, By, How`.
///
/// Fields are trimmed. Commas after the second one belong to `How`.
pub fn parse_manual(input: &str) -> anyhow::Result<Manual> {
    let mut parts = input.splitn(3, ',').map(str::trim);
    let (Some(when), Some(by), Some(how)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("invalid --manual text {input:?}, expected \"YYYY-MM-DD, By, How\"");
    };

    NaiveDate::parse_from_str(when, "%Y-%m-%d")
        .with_context(|| format!("invalid --manual date {when:?}, expected YYYY-MM-DD"))?;
    if by.is_empty() {
        bail!("invalid --manual text {input:?}: By is empty");
    }
    if how.is_empty() {
        bail!("invalid --manual text {input:?}: How is empty");
    }

    Ok(Manual::new(how, when, by))
}
