//! Type expressions, select options, and declarative constraints.
//!
//! A [`TypeExpr`] is the declared type of a field. Besides the primitive
//! types it can be wrapped: [`TypeExpr::Union`] with [`TypeExpr::NoneType`]
//! expresses a nullable field, and [`TypeExpr::Annotated`] attaches
//! [`Constraints`] to an inner type. Fixed enumerations are expressed with
//! [`TypeExpr::Literal`]; explicit option lists with labels are built with
//! [`TypeExpr::select`].

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One selectable option: the submitted `value` and the displayed `label`.
///
/// Deserializes from either a plain string (label = value) or a table with
/// `value` and an optional `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectOptionRepr")]
pub struct SelectOption {
    /// The value submitted with the form.
    pub value: String,
    /// The text shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Creates an option with an explicit label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates an option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        Self::plain(value)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectOptionRepr {
    Plain(String),
    Full { value: String, label: Option<String> },
}

impl From<SelectOptionRepr> for SelectOption {
    fn from(repr: SelectOptionRepr) -> Self {
        match repr {
            SelectOptionRepr::Plain(value) => Self::plain(value),
            SelectOptionRepr::Full { value, label } => match label {
                Some(label) => Self::new(value, label),
                None => Self::plain(value),
            },
        }
    }
}

/// Declarative constraints on a field's value. Every constraint is optional.
///
/// Length constraints apply to strings (counted in characters); bounds apply
/// to integers and floats; `pattern` is a regular expression that must match
/// somewhere in a string value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge: Option<f64>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub le: Option<f64>,
    /// Exclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    /// Exclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    /// Regular expression a string value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Constraints {
    /// Returns `true` if no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if any numeric bound is set.
    pub const fn has_bounds(&self) -> bool {
        self.ge.is_some() || self.le.is_some() || self.gt.is_some() || self.lt.is_some()
    }

    /// Combines two constraint sets; values set in `over` win.
    #[must_use]
    pub fn merged_with(&self, over: &Self) -> Self {
        Self {
            min_length: over.min_length.or(self.min_length),
            max_length: over.max_length.or(self.max_length),
            ge: over.ge.or(self.ge),
            le: over.le.or(self.le),
            gt: over.gt.or(self.gt),
            lt: over.lt.or(self.lt),
            pattern: over.pattern.clone().or_else(|| self.pattern.clone()),
        }
    }
}

/// The declared type of a field.
///
/// # Examples
///
/// ```
/// use hxform_schema::types::{Constraints, TypeExpr};
///
/// // `int | None`
/// let nullable = TypeExpr::optional(TypeExpr::Int);
/// assert!(nullable.is_nullable());
///
/// // An annotated string with a minimum length.
/// let name = TypeExpr::annotated(
///     TypeExpr::Str,
///     Constraints { min_length: Some(1), ..Constraints::default() },
/// );
/// assert!(!name.is_nullable());
///
/// // A select with explicit labels.
/// let size = TypeExpr::select([("S", "Small"), ("L", "Large")]);
/// assert!(matches!(size, TypeExpr::Choices { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A string.
    Str,
    /// A 64-bit integer.
    Int,
    /// A floating-point number.
    Float,
    /// A boolean.
    Bool,
    /// A calendar date.
    Date,
    /// The type of the null value; only meaningful inside a union.
    NoneType,
    /// A fixed enumeration of literal values.
    Literal {
        /// The accepted values, in declaration order.
        values: Vec<Value>,
    },
    /// A string chosen from an explicit option list.
    Choices {
        /// The options, in declaration order.
        options: Vec<SelectOption>,
    },
    /// A union of member types, tried in order.
    Union {
        /// The member types.
        members: Vec<TypeExpr>,
    },
    /// An inner type carrying constraint metadata.
    Annotated {
        /// The wrapped type.
        inner: Box<TypeExpr>,
        /// Constraints attached to the wrapped type.
        #[serde(default)]
        constraints: Constraints,
    },
    /// Any other named type. Validated and rendered as a string.
    Named {
        /// The type's name.
        name: String,
    },
}

impl TypeExpr {
    /// Builds the nullable union `inner | None`.
    pub fn optional(inner: Self) -> Self {
        Self::Union {
            members: vec![inner, Self::NoneType],
        }
    }

    /// Builds an annotated type.
    pub fn annotated(inner: Self, constraints: Constraints) -> Self {
        Self::Annotated {
            inner: Box::new(inner),
            constraints,
        }
    }

    /// Builds a literal enumeration from the given values.
    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Literal {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a select type from options, keeping their order.
    ///
    /// Plain strings become options whose label is their value.
    pub fn select<I, O>(options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        Self::Choices {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Removes one layer of [`TypeExpr::Annotated`], if present.
    pub fn strip_annotated(&self) -> &Self {
        match self {
            Self::Annotated { inner, .. } => inner,
            other => other,
        }
    }

    /// Returns the constraints attached by an outer [`TypeExpr::Annotated`].
    pub fn annotated_constraints(&self) -> Option<&Constraints> {
        match self {
            Self::Annotated { constraints, .. } => Some(constraints),
            _ => None,
        }
    }

    /// Returns `true` if the null value is accepted by this type.
    pub fn is_nullable(&self) -> bool {
        match self.strip_annotated() {
            Self::NoneType => true,
            Self::Union { members } => members.iter().any(Self::is_nullable),
            _ => false,
        }
    }

    /// Returns the first non-null member of a nullable union, or `self`.
    pub fn non_null(&self) -> &Self {
        match self {
            Self::Union { members } => members
                .iter()
                .find(|m| !matches!(m, Self::NoneType))
                .unwrap_or(self),
            other => other,
        }
    }
}
