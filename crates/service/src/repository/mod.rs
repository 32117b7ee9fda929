//! Explicit named queries over the three tables.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so it runs the
//! same on a pooled connection or inside a service transaction. Listings are
//! ordered by id ascending unless a function says otherwise.
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, DbBackend, IntoSimpleExpr};

pub mod company;
pub mod department;
pub mod employee;

/// Escape LIKE metacharacters so the needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    it.next().is_none().then_some(first)
}

/// GLOB pattern matching `needle` anywhere, each letter as a `[xX]` set.
///
/// SQLite's `LOWER()` and `LIKE` only fold ASCII, so case variants of every
/// needle character are spelled out instead.
pub fn glob_contains_ci(needle: &str) -> String {
    let mut out = String::from("*");
    for ch in needle.chars() {
        let mut variants = vec![ch];
        for v in [single(ch.to_lowercase()), single(ch.to_uppercase())].into_iter().flatten() {
            if !variants.contains(&v) {
                variants.push(v);
            }
        }
        if variants.len() > 1 {
            out.push('[');
            out.extend(variants);
            out.push(']');
        } else if matches!(ch, '*' | '?' | '[') {
            out.push('[');
            out.push(ch);
            out.push(']');
        } else {
            out.push(ch);
        }
    }
    out.push('*');
    out
}

/// Case-insensitive substring match on a text column.
pub(crate) fn contains_ci<C: ColumnTrait>(backend: DbBackend, col: C, needle: &str) -> SimpleExpr {
    match backend {
        DbBackend::Sqlite => Expr::cust_with_exprs(
            "$1 GLOB $2",
            [col.into_simple_expr(), SimpleExpr::Value(glob_contains_ci(needle).into())],
        ),
        _ => {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            Expr::expr(Func::lower(col.into_simple_expr())).like(LikeExpr::new(pattern).escape('\\'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_like, glob_contains_ci};

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like("eng"), "eng");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn glob_pattern_spells_out_case_variants() {
        assert_eq!(glob_contains_ci("äR"), "*[äÄ][rR]*");
        assert_eq!(glob_contains_ci("Ä"), "*[Ää]*");
        assert_eq!(glob_contains_ci("5*?[]"), "*5[*][?][[]]*");
        assert_eq!(glob_contains_ci(""), "**");
    }
}
