use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::script::script_model::Parameters;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Replace every `${name}` whose name is in `params` with its value.
///
/// Unknown names are left untouched. Substituted text is not scanned
/// again, so a value containing `${...}` comes out verbatim.
pub fn resolve<'a>(value: &'a str, params: &Parameters) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(value, |caps: &Captures| match params.get(&caps[1]) {
        Some(param) => param.to_string(),
        None => caps[0].to_string(),
    })
}
