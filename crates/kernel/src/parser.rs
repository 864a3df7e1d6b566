//! Parser for canonical CSL text.
//!
//! ```text
//! line 1   <text> :: f<p>^<dim>
//! line 2   <text> : { x in f<p>^<dim> : x<k> = <c> } <text>
//! line 3.. free-form step lines, classified by marker
//! ```

use crate::error::{KernelError, KernelResult};
use crate::program::{Program, PsiDecl, Step, ValDecl};
use tracing::trace;

pub const DECL_SEPARATOR: &str = "::";

const GRAD_MARKERS: &[&str] = &["\u{2207}l", "grad"];
const PROJECT_MARKERS: &[&str] = &["p_v", "proj"];
const GOAL_MARKERS: &[&str] = &["\u{22A2}", "vdash", "goal"];

/// Parse text that has already been through [`canonicalize`](crate::canonicalize).
pub fn parse_program(canon: &str) -> KernelResult<Program> {
    let lines: Vec<&str> = canon.split('\n').filter(|l| !l.is_empty()).collect();
    if lines.len() < 2 {
        return Err(KernelError::ProgramTooShort { found: lines.len() });
    }

    let psi = parse_field_decl(lines[0], 1)?;
    let val = parse_validator(lines[1], 2)?;

    let mut steps = Vec::new();
    for (offset, line) in lines[2..].iter().enumerate() {
        match classify_step(line) {
            Some(step) => steps.push(step),
            None => trace!(line = offset + 3, text = %line, "no step marker, line ignored"),
        }
    }

    Ok(Program { psi, val, steps })
}

fn parse_field_decl(text: &str, line: usize) -> KernelResult<PsiDecl> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if !tokens.contains(&DECL_SEPARATOR) {
        return Err(KernelError::MissingDeclSeparator {
            line,
            text: text.to_string(),
        });
    }

    // The separator is present, so there is at least one token.
    let layout = tokens[tokens.len() - 1];
    let Some(after_f) = layout.strip_prefix('f') else {
        return Err(KernelError::MissingFieldPrefix {
            line,
            layout: layout.to_string(),
        });
    };
    let Some((p_str, dim_str)) = after_f.split_once('^') else {
        return Err(KernelError::MissingCaret {
            line,
            layout: layout.to_string(),
        });
    };

    let number = |value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| KernelError::InvalidFieldNumber {
                line,
                layout: layout.to_string(),
                value: value.to_string(),
            })
    };

    Ok(PsiDecl {
        p: number(p_str)?,
        dim: number(dim_str)?,
    })
}

fn parse_validator(text: &str, line: usize) -> KernelResult<ValDecl> {
    let Some((_, after_colon)) = text.split_once(':').filter(|_| text.contains('}')) else {
        return Err(KernelError::MissingValidator {
            line,
            text: text.to_string(),
        });
    };
    let region = after_colon
        .rsplit_once('}')
        .map_or(after_colon, |(inside, _)| inside);

    let invalid = || KernelError::InvalidValidator {
        line,
        region: region.trim().to_string(),
    };

    let (axis, constant) = find_axis_equality(region).ok_or_else(invalid)?;
    let axis: usize = axis.parse().map_err(|_| invalid())?;
    let constant: i64 = constant.parse().map_err(|_| invalid())?;
    if axis == 0 {
        return Err(invalid());
    }

    Ok(ValDecl::x_eq_const(axis - 1, constant))
}

/// Leftmost match of `x\s*(\d+)\s*=\s*(-?\d+)`, returning both captures.
fn find_axis_equality(region: &str) -> Option<(&str, &str)> {
    region
        .char_indices()
        .filter(|(_, ch)| *ch == 'x')
        .find_map(|(start, _)| match_axis_equality(&region[start + 1..]))
}

fn match_axis_equality(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim_start();
    let (axis, rest) = take_digits(rest)?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();

    let negative = rest.starts_with('-');
    let (digits, _) = take_digits(rest.strip_prefix('-').unwrap_or(rest))?;
    let len = digits.len() + usize::from(negative);
    Some((axis, &rest[..len]))
}

fn take_digits(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    (end > 0).then(|| s.split_at(end))
}

/// Classify a step line by marker containment; the first matching group wins.
pub fn classify_step(line: &str) -> Option<Step> {
    let has_any = |markers: &[&str]| markers.iter().any(|m| line.contains(m));

    if has_any(GRAD_MARKERS) {
        Some(Step::Grad)
    } else if has_any(PROJECT_MARKERS) {
        Some(Step::Project)
    } else if has_any(GOAL_MARKERS) {
        Some(Step::goal())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_equality_tolerates_spacing() {
        assert_eq!(find_axis_equality(" x 2=  -4 "), Some(("2", "-4")));
        assert_eq!(find_axis_equality("x in f3^3 : x1 = 0"), Some(("1", "0")));
        assert_eq!(find_axis_equality("x in f3^3"), None);
    }

    #[test]
    fn grad_marker_wins_over_goal_marker() {
        assert_eq!(classify_step("grad toward goal"), Some(Step::Grad));
    }

    #[test]
    fn unicode_markers_are_recognised() {
        assert_eq!(classify_step("\u{2207}l(psi)"), Some(Step::Grad));
        assert_eq!(classify_step("\u{22A2} done"), Some(Step::goal()));
        assert_eq!(classify_step("apply p_v"), Some(Step::Project));
    }
}
