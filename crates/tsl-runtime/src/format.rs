//! Positional argument substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: placeholders are replaced left to right in one scan;
//!    substituted values are never rescanned, so an argument containing `%s`
//!    stays literal.
//!
//! 2. **Lenient arity**: placeholders without an argument stay as written,
//!    surplus arguments are dropped. Formatting never fails.
//!
//! 3. **No arguments, no rewrite**: with an empty argument list the template
//!    is returned untouched, `%%` included.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use tsl_catalog::placeholder::{Segment, segments};

/// Replace placeholders in `template` with the `Display` form of `args`.
///
/// Flags, width and precision in a placeholder are accepted but do not
/// affect the rendered value.
///
/// ```
/// use tsl_runtime::format::substitute;
///
/// assert_eq!(substitute("Termina %s", &[&"MyApp"]), "Termina MyApp");
/// assert_eq!(substitute("%d items, %s", &[&3]), "3 items, %s");
/// assert_eq!(substitute("100%% of %s", &[&"files"]), "100% of files");
/// ```
#[must_use]
pub fn substitute<'a>(template: &'a str, args: &[&dyn fmt::Display]) -> Cow<'a, str> {
    if args.is_empty() {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut remaining = args.iter();
    for segment in segments(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Placeholder(token) => match remaining.next() {
                Some(arg) => {
                    // Writing into a String only fails if the Display impl does.
                    let _ = write!(out, "{arg}");
                }
                None => out.push_str(token),
            },
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument() {
        assert_eq!(substitute("Quit %s", &[&"MyApp"]), "Quit MyApp");
    }

    #[test]
    fn arguments_fill_left_to_right() {
        assert_eq!(
            substitute("Error moving folder %s to %s", &[&"/a", &"/b"]),
            "Error moving folder /a to /b"
        );
        assert_eq!(
            substitute("Unable to connect to %s%s", &[&"https://host", &"/nuxeo"]),
            "Unable to connect to https://host/nuxeo"
        );
    }

    #[test]
    fn mixed_value_types() {
        let count = 42_u32;
        let ratio = 0.5_f64;
        assert_eq!(
            substitute("%d items at %.1f", &[&count, &ratio]),
            "42 items at 0.5"
        );
    }

    #[test]
    fn missing_arguments_stay_literal() {
        assert_eq!(
            substitute("Unable to set roots for %s (%s)", &[&"alice"]),
            "Unable to set roots for alice (%s)"
        );
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        assert_eq!(substitute("About %s", &[&"App", &"extra"]), "About App");
        assert_eq!(substitute("No tokens", &[&1, &2]), "No tokens");
    }

    #[test]
    fn no_arguments_returns_template() {
        let out = substitute("100%% and %s", &[]);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "100%% and %s");
    }

    #[test]
    fn values_are_not_rescanned() {
        assert_eq!(substitute("%s and %s", &[&"%s", &"x"]), "%s and x");
    }

    #[test]
    fn stray_percent_is_kept() {
        assert_eq!(
            substitute("Deschide fisierul % %s", &[&"CloudDesk"]),
            "Deschide fisierul % CloudDesk"
        );
    }
}
