//! `ModelViewSet` template.

use scribe_core::{ArtifactKind, ClassificationTag, FieldKind, ModelDescriptor};

use super::{PyModule, lookup_path, quoted};
use crate::layout::{class_name, models_module, module_path};
use crate::resolve::EffectiveFieldSet;

/// Conventional boolean columns that hide rows from the default queryset.
const VISIBILITY_FIELDS: [&str; 2] = ["is_visible", "visible"];

pub(super) fn render(model: &ModelDescriptor, fields: &EffectiveFieldSet) -> String {
    let serializer = class_name(model, ArtifactKind::Serializer);
    let filter = class_name(model, ArtifactKind::Filter);

    let mut py = PyModule::new(ArtifactKind::Endpoint, model);
    py.import("django_filters.rest_framework", "DjangoFilterBackend");
    py.import("rest_framework", "filters, viewsets");
    py.blank();
    py.import(&module_path(model, ArtifactKind::Filter), &filter);
    py.import(&models_module(model), &model.name);
    py.import(&module_path(model, ArtifactKind::Serializer), &serializer);
    py.blank();
    py.blank();
    py.line(
        0,
        format!(
            "class {}(viewsets.ModelViewSet):",
            class_name(model, ArtifactKind::Endpoint)
        ),
    );
    py.line(1, format!("queryset = {}", queryset(model, fields)));
    py.line(1, format!("serializer_class = {serializer}"));
    py.line(1, format!("filterset_class = {filter}"));
    py.line(1, "filter_backends = [");
    py.line(2, "DjangoFilterBackend,");
    py.line(2, "filters.SearchFilter,");
    py.line(2, "filters.OrderingFilter,");
    py.line(1, "]");

    let search: Vec<String> = fields.search_paths().into_iter().map(lookup_path).collect();
    py.string_list(1, "search_fields", &search);
    py.string_list(1, "ordering_fields", &ordering_fields(fields));
    py.string_list(1, "ordering", &[default_ordering(fields)]);
    py.finish()
}

/// `Model.objects` with joins for the rendered relations and the
/// visibility filter, or `.all()` when neither applies.
fn queryset(model: &ModelDescriptor, fields: &EffectiveFieldSet) -> String {
    let mut select = Vec::new();
    let mut prefetch = Vec::new();
    for field in fields.with_tag(ClassificationTag::Relation) {
        let Some(relation) = model.relation_for(&field.name) else {
            continue;
        };
        if relation.cardinality.is_single() {
            select.push(quoted(&field.name));
        } else {
            prefetch.push(quoted(&field.name));
        }
    }

    let visibility = model.fields.iter().find(|f| {
        f.kind == FieldKind::Boolean && VISIBILITY_FIELDS.contains(&f.name.as_str())
    });

    let mut chain = format!("{}.objects", model.name);
    if select.is_empty() && prefetch.is_empty() && visibility.is_none() {
        chain.push_str(".all()");
        return chain;
    }
    if !select.is_empty() {
        chain.push_str(&format!(".select_related({})", select.join(", ")));
    }
    if !prefetch.is_empty() {
        chain.push_str(&format!(".prefetch_related({})", prefetch.join(", ")));
    }
    if let Some(field) = visibility {
        chain.push_str(&format!(".filter({}=True)", field.name));
    }
    chain
}

fn ordering_fields(fields: &EffectiveFieldSet) -> Vec<&str> {
    fields
        .fields
        .iter()
        .filter(|f| {
            f.tag == ClassificationTag::Identifier
                || matches!(f.kind, FieldKind::Numeric | FieldKind::Timestamp)
        })
        .map(|f| f.name.as_str())
        .collect()
}

/// Newest first when there is a creation audit column, else by descending
/// identifier, else by the first rendered field.
fn default_ordering(fields: &EffectiveFieldSet) -> String {
    if let Some(created) = fields
        .with_tag(ClassificationTag::Audit)
        .find(|f| f.name.to_ascii_lowercase().starts_with("created"))
    {
        return format!("-{}", created.name);
    }
    if let Some(id) = fields.with_tag(ClassificationTag::Identifier).next() {
        return format!("-{}", id.name);
    }
    fields
        .fields
        .first()
        .map(|f| f.name.clone())
        .unwrap_or_default()
}
