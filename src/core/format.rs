//! Positional `{}` template substitution
//!
//! Arguments are rendered to strings up front through [`Renderable`], so the
//! substitution itself only ever sees a template and a slice of strings.

use super::error::{LoggerError, Result};
use std::fmt::{self, Write};

/// The placeholder token substituted by [`format_message`]
pub const PLACEHOLDER: &str = "{}";

/// Anything that can be turned into the string form of a log argument.
///
/// Every [`fmt::Display`] type is renderable. A `Display` impl that reports
/// [`fmt::Error`] surfaces as [`LoggerError::Render`].
pub trait Renderable {
    fn render(&self) -> std::result::Result<String, fmt::Error>;
}

impl<T: fmt::Display + ?Sized> Renderable for T {
    fn render(&self) -> std::result::Result<String, fmt::Error> {
        let mut out = String::new();
        write!(out, "{}", self)?;
        Ok(out)
    }
}

/// Render each argument in order.
pub fn render_args(args: &[&dyn Renderable]) -> Result<Vec<String>> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| {
            arg.render()
                .map_err(|e| LoggerError::render(index, e.to_string()))
        })
        .collect()
}

/// Count `{}` placeholders in a template.
pub fn count_placeholders(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Substitute each `{}` left to right with the matching argument.
///
/// # Errors
///
/// Returns [`LoggerError::PlaceholderMismatch`] when the number of
/// placeholders differs from the number of arguments.
///
/// # Examples
///
/// ```
/// use async_file_logger::core::format::format_message;
///
/// let args = vec!["42".to_string(), "login".to_string(), "3.5".to_string()];
/// let message = format_message("User {} did {} in {} s", &args).unwrap();
/// assert_eq!(message, "User 42 did login in 3.5 s");
/// ```
pub fn format_message<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String> {
    let placeholders = count_placeholders(template);
    if placeholders != args.len() {
        return Err(LoggerError::placeholder_mismatch(
            template,
            placeholders,
            args.len(),
        ));
    }

    let extra: usize = args.iter().map(|a| a.as_ref().len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    for arg in args {
        // Count check above guarantees a placeholder remains.
        let Some(pos) = rest.find(PLACEHOLDER) else {
            break;
        };
        out.push_str(&rest[..pos]);
        out.push_str(arg.as_ref());
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Render `args` and substitute them into `template`.
pub fn format_args_dyn(template: &str, args: &[&dyn Renderable]) -> Result<String> {
    let rendered = render_args(args)?;
    format_message(template, &rendered)
}
