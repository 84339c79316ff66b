//! Type pretty-printing for error messages.
//!
//! Types are shown in Stella syntax, so messages read like the program that
//! produced them. Wildcards have no source form and print as `?`, `!` and
//! `<error>`.

use crate::types::Ty;
use std::fmt;

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_type(self, f, false)
    }
}

fn format_list(types: &[Ty], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        format_type(ty, f, false)?;
    }
    Ok(())
}

/// `nested` is set for sum operands, where binders and sums need parentheses.
fn format_type(ty: &Ty, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
    match ty {
        Ty::Bool => write!(f, "Bool"),
        Ty::Nat => write!(f, "Nat"),
        Ty::Unit => write!(f, "Unit"),
        Ty::Top => write!(f, "Top"),
        Ty::Bottom => write!(f, "Bot"),
        Ty::Var(name) => write!(f, "{name}"),
        Ty::Never => write!(f, "!"),
        Ty::Unknown => write!(f, "?"),
        Ty::Error => write!(f, "<error>"),

        Ty::Fun { params, ret } => {
            if nested {
                write!(f, "(")?;
            }
            write!(f, "fn(")?;
            format_list(params, f)?;
            write!(f, ") -> ")?;
            format_type(ret, f, false)?;
            if nested {
                write!(f, ")")?;
            }
            Ok(())
        }

        Ty::ForAll { vars, body } => {
            if nested {
                write!(f, "(")?;
            }
            write!(f, "forall {}. ", vars.join(", "))?;
            format_type(body, f, false)?;
            if nested {
                write!(f, ")")?;
            }
            Ok(())
        }

        Ty::Rec { var, body } => {
            if nested {
                write!(f, "(")?;
            }
            write!(f, "µ {var}. ")?;
            format_type(body, f, false)?;
            if nested {
                write!(f, ")")?;
            }
            Ok(())
        }

        Ty::Sum(left, right) => {
            if nested {
                write!(f, "(")?;
            }
            format_type(left, f, true)?;
            write!(f, " + ")?;
            format_type(right, f, true)?;
            if nested {
                write!(f, ")")?;
            }
            Ok(())
        }

        Ty::Tuple(elements) => {
            write!(f, "{{")?;
            format_list(elements, f)?;
            write!(f, "}}")
        }

        Ty::Record(fields) => {
            write!(f, "{{")?;
            for (i, (label, ty)) in fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{label} : ")?;
                format_type(ty, f, false)?;
            }
            write!(f, "}}")
        }

        Ty::Variant(fields) => {
            write!(f, "<| ")?;
            for (i, (label, ty)) in fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{label}")?;
                if let Some(ty) = ty {
                    write!(f, " : ")?;
                    format_type(ty, f, false)?;
                }
            }
            write!(f, " |>")
        }

        Ty::List(element) => {
            write!(f, "[")?;
            format_type(element, f, false)?;
            write!(f, "]")
        }

        Ty::Ref(referent) => {
            write!(f, "&")?;
            format_type(referent, f, true)
        }
    }
}
