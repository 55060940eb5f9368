//! Schema introspection.
//!
//! [`introspect`] walks a [`ModelSchema`]'s declared fields in order and
//! produces one [`FieldDescriptor`] per field, pulling the resolved kind,
//! requiredness, display metadata, constraints, and placeholder.

use hxform_schema::{FieldSchema, ModelSchema};

use crate::descriptor::FieldDescriptor;
use crate::kind::{resolve, FieldKind};

/// Derives the descriptors of every field of a model, in declaration order.
///
/// # Examples
///
/// ```
/// use hxform_forms::introspect::introspect;
/// use hxform_forms::kind::FieldKind;
/// use hxform_schema::{FieldSchema, ModelSchema, TypeExpr};
///
/// let schema = ModelSchema::builder("User")
///     .field(FieldSchema::new("full_name", TypeExpr::Str).min_length(1))
///     .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
///     .build()
///     .unwrap();
///
/// let fields = introspect(&schema);
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].title, "Full Name");
/// assert_eq!(fields[1].kind, FieldKind::Integer);
/// assert_eq!(fields[1].ge, Some(0.0));
/// ```
pub fn introspect(schema: &ModelSchema) -> Vec<FieldDescriptor> {
    let descriptors: Vec<FieldDescriptor> = schema.fields().iter().map(describe_field).collect();
    tracing::debug!(
        model = %schema.name(),
        fields = descriptors.len(),
        "Introspected model schema"
    );
    descriptors
}

/// Derives the descriptor of a single field.
pub fn describe_field(field: &FieldSchema) -> FieldDescriptor {
    let resolved = resolve(&field.ty);
    let required = field.is_required();
    let constraints = field.effective_constraints();

    let mut descriptor = FieldDescriptor::new(field.name.clone(), resolved.kind);
    descriptor.required = required;
    if let Some(title) = &field.title {
        descriptor.title.clone_from(title);
    }
    descriptor.description.clone_from(&field.description);
    descriptor.default = if required { None } else { field.default.clone() };
    descriptor.min_length = constraints.min_length;
    descriptor.max_length = constraints.max_length;
    descriptor.pattern = constraints.pattern.clone();
    descriptor.options = resolved.options;
    descriptor.placeholder = field.placeholder_text().map(str::to_string);

    if resolved.kind.is_numeric() {
        descriptor.ge = constraints.ge;
        descriptor.le = constraints.le;
        descriptor.gt = constraints.gt;
        descriptor.lt = constraints.lt;
    } else if constraints.has_bounds() {
        tracing::warn!(
            field = %field.name,
            kind = %resolved.kind,
            "Ignoring numeric bounds on a non-numeric field"
        );
    }

    if resolved.kind == FieldKind::Select && descriptor.options.is_empty() {
        tracing::warn!(field = %field.name, "Select field has no options");
    }

    descriptor
}
