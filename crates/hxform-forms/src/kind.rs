//! Field-kind resolution.
//!
//! Every declared type, however it is wrapped, maps to one [`FieldKind`]: the
//! semantic category that decides how a field is rendered and how its
//! submitted value is converted. Resolution peels annotation layers and
//! nullable unions, then classifies what remains.

use std::fmt;

use serde::{Deserialize, Serialize};

use hxform_schema::{SelectOption, TypeExpr};

/// The canonical semantic category of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text. Also the fallback for unrecognized types.
    String,
    /// A whole number.
    Integer,
    /// A floating-point number.
    Float,
    /// A flag, rendered as a checkbox.
    Boolean,
    /// A calendar date.
    Date,
    /// One value from a fixed option list.
    Select,
}

impl FieldKind {
    /// Returns `true` for the kinds that carry numeric bounds.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Select => "select",
        };
        write!(f, "{name}")
    }
}

/// The result of resolving a type: its kind and, for selects, its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKind {
    /// The field kind.
    pub kind: FieldKind,
    /// The options in declaration order. Empty unless `kind` is `Select`.
    pub options: Vec<SelectOption>,
}

impl ResolvedKind {
    const fn plain(kind: FieldKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
        }
    }
}

/// Peels annotation layers and nullable unions off a type.
///
/// A union reduces to its first non-null member. The result is never an
/// [`TypeExpr::Annotated`] and never a union with a non-null member, so
/// unwrapping it again returns it unchanged.
pub fn unwrap_type(ty: &TypeExpr) -> &TypeExpr {
    let mut current = ty;
    loop {
        let next = match current {
            TypeExpr::Annotated { inner, .. } => inner.as_ref(),
            TypeExpr::Union { .. } => current.non_null(),
            _ => return current,
        };
        if std::ptr::eq(next, current) {
            return current;
        }
        current = next;
    }
}

/// Resolves a declared type to its field kind and options.
///
/// Literal enumerations and explicit option lists become selects; the
/// primitive types map to their own kind; anything else is a string.
///
/// # Examples
///
/// ```
/// use hxform_forms::kind::{resolve, FieldKind};
/// use hxform_schema::TypeExpr;
///
/// let status = TypeExpr::literal(["active", "inactive", "pending"]);
/// let resolved = resolve(&status);
/// assert_eq!(resolved.kind, FieldKind::Select);
/// assert_eq!(resolved.options.len(), 3);
/// assert_eq!(resolved.options[0].value, "active");
/// assert_eq!(resolved.options[0].label, "active");
///
/// assert_eq!(resolve(&TypeExpr::optional(TypeExpr::Date)).kind, FieldKind::Date);
/// ```
pub fn resolve(ty: &TypeExpr) -> ResolvedKind {
    match unwrap_type(ty) {
        TypeExpr::Literal { values } => ResolvedKind {
            kind: FieldKind::Select,
            options: values
                .iter()
                .map(|v| SelectOption::plain(v.to_string()))
                .collect(),
        },
        TypeExpr::Choices { options } => ResolvedKind {
            kind: FieldKind::Select,
            options: options.clone(),
        },
        TypeExpr::Bool => ResolvedKind::plain(FieldKind::Boolean),
        TypeExpr::Int => ResolvedKind::plain(FieldKind::Integer),
        TypeExpr::Float => ResolvedKind::plain(FieldKind::Float),
        TypeExpr::Date => ResolvedKind::plain(FieldKind::Date),
        _ => ResolvedKind::plain(FieldKind::String),
    }
}

/// Resolves only the kind of a declared type.
pub fn resolve_kind(ty: &TypeExpr) -> FieldKind {
    resolve(ty).kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxform_schema::Constraints;

    #[test]
    fn test_primitives() {
        assert_eq!(resolve_kind(&TypeExpr::Str), FieldKind::String);
        assert_eq!(resolve_kind(&TypeExpr::Int), FieldKind::Integer);
        assert_eq!(resolve_kind(&TypeExpr::Float), FieldKind::Float);
        assert_eq!(resolve_kind(&TypeExpr::Bool), FieldKind::Boolean);
        assert_eq!(resolve_kind(&TypeExpr::Date), FieldKind::Date);
    }

    #[test]
    fn test_unrecognized_falls_back_to_string() {
        let ty = TypeExpr::Named {
            name: "EmailStr".into(),
        };
        assert_eq!(resolve_kind(&ty), FieldKind::String);
        assert_eq!(resolve_kind(&TypeExpr::NoneType), FieldKind::String);
    }

    #[test]
    fn test_annotated_and_optional_unwrap() {
        let ty = TypeExpr::annotated(
            TypeExpr::optional(TypeExpr::Int),
            Constraints {
                ge: Some(0.0),
                ..Constraints::default()
            },
        );
        assert_eq!(resolve_kind(&ty), FieldKind::Integer);

        let nested = TypeExpr::optional(TypeExpr::annotated(TypeExpr::Float, Constraints::default()));
        assert_eq!(resolve_kind(&nested), FieldKind::Float);
    }

    #[test]
    fn test_union_takes_first_non_null_member() {
        let ty = TypeExpr::Union {
            members: vec![TypeExpr::NoneType, TypeExpr::Bool, TypeExpr::Str],
        };
        assert_eq!(resolve_kind(&ty), FieldKind::Boolean);
    }

    #[test]
    fn test_literal_options_are_stringified() {
        let resolved = resolve(&TypeExpr::literal([1_i64, 2, 3]));
        assert_eq!(resolved.kind, FieldKind::Select);
        let values: Vec<&str> = resolved.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["1", "2", "3"]);
        assert!(resolved.options.iter().all(|o| o.value == o.label));
    }

    #[test]
    fn test_choices_keep_labels_and_order() {
        let ty = TypeExpr::optional(TypeExpr::select([("S", "Small"), ("M", "Medium"), ("L", "Large")]));
        let resolved = resolve(&ty);
        assert_eq!(resolved.kind, FieldKind::Select);
        assert_eq!(resolved.options[1], SelectOption::new("M", "Medium"));
        assert_eq!(resolved.options.len(), 3);
    }

    #[test]
    fn test_non_select_has_no_options() {
        assert!(resolve(&TypeExpr::Str).options.is_empty());
    }

    #[test]
    fn test_unwrap_is_idempotent() {
        let ty = TypeExpr::optional(TypeExpr::annotated(TypeExpr::Date, Constraints::default()));
        let once = unwrap_type(&ty);
        assert_eq!(once, &TypeExpr::Date);
        assert_eq!(unwrap_type(once), once);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Select.to_string(), "select");
        assert!(FieldKind::Float.is_numeric());
        assert!(!FieldKind::Date.is_numeric());
    }
}
