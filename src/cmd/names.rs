/*!
Case-insensitive name lookup shared by every closed enumeration the parser
resolves from text (the command word, HELP's topic, GENERATE's number type).

A type opts in by implementing `Named`; `resolve` then does the matching,
so there is exactly one copy of the comparison rules.
*/

use anyhow::{Result, bail};

/// A closed set of symbols with one textual surface form each.
pub trait Named: Copy + 'static {
    /// Human label for the set, used in lookup failures ("command", "number type").
    const KIND: &'static str;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    /// Canonical lowercase name.
    fn name(&self) -> &'static str;
}

/// Resolve `input` to the variant whose name matches it exactly, ignoring ASCII case.
///
/// No trimming and no prefix matching: `"pin"` and `" ping"` both fail.
pub fn resolve<T: Named>(input: &str) -> Result<T> {
    match T::variants()
        .iter()
        .find(|v| v.name().eq_ignore_ascii_case(input))
    {
        Some(v) => Ok(*v),
        None => bail!("Unknown {} '{}'", T::KIND, input),
    }
}
